//! Viewport tuning parsed from JSON.
//!
//! Every field has a default from [`crate::consts`], so a host only needs to
//! name the values it wants to override (for example `{"initial_fit": false}`).

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_FIT_RETRIES, FIT_PADDING, MAX_SCALE, MIN_READABLE_SCALE, MIN_SCALE_FREE, ZOOM_STEP};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Fraction of the viewport the page occupies in fit mode.
    pub fit_padding: f64,
    /// Fit-mode floor.
    pub min_readable_scale: f64,
    /// Manual-zoom floor.
    pub min_scale_free: f64,
    /// Ceiling for every mode.
    pub max_scale: f64,
    /// Geometric zoom step (must be > 1).
    pub zoom_step: f64,
    /// Start in fit mode rather than manual 100%.
    pub initial_fit: bool,
    /// Frames a deferred fit is retried before giving up until the next resize.
    pub max_fit_retries: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            fit_padding: FIT_PADDING,
            min_readable_scale: MIN_READABLE_SCALE,
            min_scale_free: MIN_SCALE_FREE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
            initial_fit: true,
            max_fit_retries: DEFAULT_MAX_FIT_RETRIES,
        }
    }
}

impl ViewportConfig {
    /// Parse a (possibly partial) JSON object and validate the result.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the bounds are usable: finite, positive, and correctly ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fit_padding", self.fit_padding)?;
        if self.fit_padding > 1.0 {
            return Err(invalid("fit_padding", format!("{} exceeds 1.0", self.fit_padding)));
        }
        positive("min_scale_free", self.min_scale_free)?;
        positive("min_readable_scale", self.min_readable_scale)?;
        positive("max_scale", self.max_scale)?;
        if self.min_scale_free > self.min_readable_scale {
            return Err(invalid(
                "min_scale_free",
                format!("{} is above min_readable_scale {}", self.min_scale_free, self.min_readable_scale),
            ));
        }
        if self.min_readable_scale > self.max_scale {
            return Err(invalid(
                "min_readable_scale",
                format!("{} is above max_scale {}", self.min_readable_scale, self.max_scale),
            ));
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(invalid("zoom_step", format!("{} must be finite and > 1.0", self.zoom_step)));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be finite and > 0")))
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
