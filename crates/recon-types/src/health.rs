//! Link health categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reconciliation health bucket for a link.
///
/// Every reconciled link lands in exactly one category; the four category
/// counts sum to the total link count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCategory {
    /// Present in both planes, drift within threshold.
    Healthy,
    /// Present in both planes, drift above threshold.
    DriftHigh,
    /// Measured by telemetry but not advertised in IS-IS.
    MissingIsis,
    /// Advertised in IS-IS but not measured by telemetry.
    MissingTelemetry,
}

impl HealthCategory {
    /// Stable wire name (matches the serialized form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::DriftHigh => "drift_high",
            Self::MissingIsis => "missing_isis",
            Self::MissingTelemetry => "missing_telemetry",
        }
    }

    /// All categories, in summary order.
    pub fn all() -> [Self; 4] {
        [
            Self::Healthy,
            Self::DriftHigh,
            Self::MissingIsis,
            Self::MissingTelemetry,
        ]
    }
}

impl fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
