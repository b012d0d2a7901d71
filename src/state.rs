//! Viewport state published to the rest of the editor UI.
//!
//! The controller owns the authoritative copy and hands out snapshots so the
//! toolbar (zoom readout, fit toggle) and the page renderer can read scale and
//! pan without coupling to the controller.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use serde::Serialize;

use crate::geometry::Point;

/// Top-level controller mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Scale follows container and document size.
    Fit,
    /// Scale is whatever the user last set.
    Manual,
}

/// Read-only snapshot of scale, pan, and fit flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub fit_mode: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self { scale: 1.0, pan_x: 0.0, pan_y: 0.0, fit_mode: false }
    }
}

impl ViewportState {
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.fit_mode { Mode::Fit } else { Mode::Manual }
    }

    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    /// Scale as a whole percentage, e.g. `0.7244` -> `72`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn zoom_percent(&self) -> i64 {
        (self.scale * 100.0).round() as i64
    }

    /// Toolbar readout, e.g. `"72%"`.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        format!("{}%", self.zoom_percent())
    }
}
