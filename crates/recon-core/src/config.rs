//! Reconciliation configuration.

use serde_json::Value;
use tracing::debug;

use crate::error::{ReconError, ReconResult};

/// Default values for reconciliation configuration.
pub mod defaults {
    /// Default drift threshold in milliseconds.
    ///
    /// A matched link whose measured latency deviates from its advertised
    /// expectation by more than this is classified `drift_high`.
    pub const DEFAULT_DRIFT_THRESHOLD_MS: f64 = 10.0;

    /// Sentinel location for links with no location tag on either side.
    pub const UNKNOWN_LOCATION: &str = "unknown";
}

/// Recognized option names in caller-supplied option objects.
pub mod options {
    /// Drift threshold override, in milliseconds.
    pub const DRIFT_THRESHOLD_MS: &str = "driftThresholdMs";

    /// Label used for links with no location on either side.
    pub const UNKNOWN_LOCATION_LABEL: &str = "unknownLocationLabel";
}

/// Read-only configuration for a reconciliation run.
///
/// Shared across concurrent runs; nothing in the pipeline mutates it.
#[derive(Debug, Clone)]
pub struct ReconConfig {
    /// Drift threshold in milliseconds.
    pub drift_threshold_ms: f64,
    /// Sentinel location label for unlocated links.
    pub unknown_location: String,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            drift_threshold_ms: defaults::DEFAULT_DRIFT_THRESHOLD_MS,
            unknown_location: defaults::UNKNOWN_LOCATION.to_string(),
        }
    }
}

impl ReconConfig {
    /// Creates a config with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the drift threshold in milliseconds.
    pub fn with_drift_threshold_ms(mut self, threshold: f64) -> Self {
        self.drift_threshold_ms = threshold;
        self
    }

    /// Sets the sentinel location label.
    pub fn with_unknown_location(mut self, label: impl Into<String>) -> Self {
        self.unknown_location = label.into();
        self
    }

    /// Applies a caller-supplied JSON options object.
    ///
    /// Unrecognized options are ignored; recognized options with invalid
    /// values are errors.
    pub fn apply_options(mut self, opts: &Value) -> ReconResult<Self> {
        let Some(obj) = opts.as_object() else {
            return Err(ReconError::config("options", "expected a JSON object"));
        };

        if let Some(v) = obj.get(options::DRIFT_THRESHOLD_MS) {
            let threshold = v.as_f64().ok_or_else(|| {
                ReconError::config(options::DRIFT_THRESHOLD_MS, "must be a number")
            })?;
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(ReconError::config(
                    options::DRIFT_THRESHOLD_MS,
                    "must be a non-negative finite number",
                ));
            }
            debug!("Drift threshold overridden to {} ms", threshold);
            self.drift_threshold_ms = threshold;
        }

        if let Some(v) = obj.get(options::UNKNOWN_LOCATION_LABEL) {
            let label = v.as_str().ok_or_else(|| {
                ReconError::config(options::UNKNOWN_LOCATION_LABEL, "must be a string")
            })?;
            if label.is_empty() {
                return Err(ReconError::config(
                    options::UNKNOWN_LOCATION_LABEL,
                    "must not be empty",
                ));
            }
            self.unknown_location = label.to_string();
        }

        Ok(self)
    }
}
