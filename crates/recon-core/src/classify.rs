//! Drift classification for matched links.
//!
//! Links present on only one side are categorized directly by the
//! reconciliation engine (`missing_isis` / `missing_telemetry`); this
//! module decides between `healthy` and `drift_high` for links present on
//! both sides.

use tracing::debug;

use recon_types::HealthCategory;

use crate::drift::DriftStrategy;
use crate::model::{AdvertisedLink, Diagnostics, MeasuredLink};

/// Classifies a link present in both planes.
///
/// Drift at or below the threshold is healthy; strictly above is
/// drift_high. A strategy declaring the metrics incomparable (`None`)
/// classifies the link healthy with no drift value and counts it in
/// diagnostics.
pub fn classify_matched(
    measured: &MeasuredLink,
    advertised: &AdvertisedLink,
    strategy: &dyn DriftStrategy,
    threshold: f64,
    diag: &mut Diagnostics,
) -> (HealthCategory, Option<f64>) {
    match strategy.drift(measured, advertised) {
        Some(drift) if drift <= threshold => (HealthCategory::Healthy, Some(drift)),
        Some(drift) => {
            debug!(
                "Drift {:.3} above threshold {:.3} ({} vs metric {})",
                drift, threshold, measured.latency_ms, advertised.metric
            );
            (HealthCategory::DriftHigh, Some(drift))
        }
        None => {
            diag.incomparable += 1;
            (HealthCategory::Healthy, None)
        }
    }
}
