//! Scale arithmetic: fit-to-viewport, geometric zoom steps, and centering.
//!
//! All functions here are pure. The controller decides when to call them and
//! what to do with the result.

#[cfg(test)]
#[path = "fit_test.rs"]
mod fit_test;

use crate::config::ViewportConfig;
use crate::geometry::{Dimensions, Point};

/// Result of a fit computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitOutcome {
    /// A valid scale in `[min_readable_scale, max_scale]`.
    Scale(f64),
    /// Layout has not happened yet; try again on the next animation frame.
    Deferred,
}

/// Compute the scale at which the document occupies `fit_padding` of the viewport on
/// the tighter axis, clamped to `[min_readable_scale, max_scale]`.
#[must_use]
pub fn compute_fit_scale(dims: Dimensions, config: &ViewportConfig) -> FitOutcome {
    if !dims.is_ready() {
        return FitOutcome::Deferred;
    }
    let for_width = (dims.viewport.width * config.fit_padding) / dims.document.width;
    let for_height = (dims.viewport.height * config.fit_padding) / dims.document.height;
    let raw = for_width.min(for_height);
    FitOutcome::Scale(clamp_scale(raw, config.min_readable_scale, config.max_scale))
}

/// Clamp into `[min, max]`. A NaN input resolves to `min` so no NaN is ever committed.
#[must_use]
pub fn clamp_scale(scale: f64, min: f64, max: f64) -> f64 {
    if scale.is_nan() {
        return min;
    }
    scale.clamp(min, max)
}

/// One geometric step up, capped at `max_scale`.
#[must_use]
pub fn zoom_in_scale(scale: f64, config: &ViewportConfig) -> f64 {
    (scale * config.zoom_step).min(config.max_scale)
}

/// One geometric step down, floored at `min_scale_free`.
#[must_use]
pub fn zoom_out_scale(scale: f64, config: &ViewportConfig) -> f64 {
    (scale / config.zoom_step).max(config.min_scale_free)
}

/// Scroll offset that centers the scaled document in the viewport.
///
/// Zero on an axis where the scaled document fits; the host lays it out centered
/// there and there is nothing to scroll.
#[must_use]
pub fn centering_scroll(dims: Dimensions, scale: f64) -> Point {
    let scaled = dims.document.scaled(scale);
    Point {
        x: ((scaled.width - dims.viewport.width) * 0.5).max(0.0),
        y: ((scaled.height - dims.viewport.height) * 0.5).max(0.0),
    }
}
