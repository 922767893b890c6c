//! Pluggable drift computation strategies.
//!
//! Whether "drift" compares like-for-like metrics or cross-domain ones
//! depends on how a deployment sets its IGP metrics, so the comparison is
//! a strategy trait the reconciliation engine is parameterized over. The
//! shipped strategies always return a value; a custom strategy may return
//! `None` to declare the metrics incomparable for a given link.

use crate::model::{AdvertisedLink, MeasuredLink};

/// Computes the drift signal for a link present in both planes.
pub trait DriftStrategy: Send + Sync {
    /// Strategy name (for logging and report provenance).
    fn name(&self) -> &'static str;

    /// Drift between the measured and advertised views of one link, in the
    /// unit the configured threshold is expressed in. `None` means the two
    /// metrics are not comparable for this link.
    fn drift(&self, measured: &MeasuredLink, advertised: &AdvertisedLink) -> Option<f64>;
}

/// Default strategy: the advertised metric is interpreted as the expected
/// latency in milliseconds (latency-derived IGP metrics), and drift is the
/// absolute difference from the measured latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricDelta;

impl DriftStrategy for MetricDelta {
    fn name(&self) -> &'static str {
        "metric-delta"
    }

    fn drift(&self, measured: &MeasuredLink, advertised: &AdvertisedLink) -> Option<f64> {
        Some((measured.latency_ms - advertised.metric as f64).abs())
    }
}

/// Cost-scaled strategy for deployments whose IGP metrics are not
/// milliseconds: the expected latency is `metric * ms_per_cost`.
#[derive(Debug, Clone, Copy)]
pub struct ScaledCost {
    /// Milliseconds of expected latency per unit of advertised cost.
    pub ms_per_cost: f64,
}

impl ScaledCost {
    /// Creates a strategy with the given cost-to-milliseconds scale.
    pub fn new(ms_per_cost: f64) -> Self {
        Self { ms_per_cost }
    }
}

impl DriftStrategy for ScaledCost {
    fn name(&self) -> &'static str {
        "scaled-cost"
    }

    fn drift(&self, measured: &MeasuredLink, advertised: &AdvertisedLink) -> Option<f64> {
        let expected_ms = advertised.metric as f64 * self.ms_per_cost;
        Some((measured.latency_ms - expected_ms).abs())
    }
}
