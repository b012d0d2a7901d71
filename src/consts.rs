//! Default design constants for the viewport controller.

// ── Fit mode ────────────────────────────────────────────────────

/// Fraction of the viewport the page occupies when fitted (15% visual margin).
pub const FIT_PADDING: f64 = 0.85;

/// Lowest scale fit mode will ever commit; keeps menu text legible on small viewports.
pub const MIN_READABLE_SCALE: f64 = 0.6;

/// Consecutive animation frames a deferred fit is retried before waiting for a resize.
pub const DEFAULT_MAX_FIT_RETRIES: u32 = 60;

// ── Zoom ────────────────────────────────────────────────────────

/// Upper bound for every scale, fitted or manual.
pub const MAX_SCALE: f64 = 3.0;

/// Lower bound for manual zoom. Looser than [`MIN_READABLE_SCALE`].
pub const MIN_SCALE_FREE: f64 = 0.1;

/// Geometric zoom step applied per zoom-in / zoom-out.
pub const ZOOM_STEP: f64 = 1.1;

/// Scale restored by reset-to-100%.
pub const RESET_SCALE: f64 = 1.0;
