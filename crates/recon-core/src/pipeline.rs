//! Parallel extraction pipeline.
//!
//! The two extractions are independent (neither reads the other's output),
//! so they run as separate blocking worker tasks; the join step is the
//! barrier and runs only after both complete. If either extraction fails,
//! the whole run fails; the join is never performed against a silently
//! empty map.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{ReconError, ReconResult, SourcePlane};
use crate::isis::extract_adjacencies;
use crate::model::{Diagnostics, ReconReport};
use crate::reconcile::Reconciler;
use crate::telemetry::extract_measured_links;

/// Runs one reconciliation with the two extractions in parallel.
///
/// Semantically identical to [`Reconciler::run`]; worth it when the
/// documents carry on the order of 10^4-10^5 links each.
#[instrument(skip_all)]
pub async fn reconcile_parallel(
    reconciler: Arc<Reconciler>,
    snapshot: Value,
    isis: Value,
) -> ReconResult<ReconReport> {
    let isis_task = tokio::task::spawn_blocking(move || {
        let mut diag = Diagnostics::default();
        extract_adjacencies(&isis, &mut diag).map(|links| (links, diag))
    });

    let telemetry_engine = Arc::clone(&reconciler);
    let telemetry_task = tokio::task::spawn_blocking(move || {
        let mut diag = Diagnostics::default();
        extract_measured_links(&snapshot, telemetry_engine.identity_map(), &mut diag)
            .map(|links| (links, diag))
    });

    // Barrier: both extractions must have completed before the join.
    let (isis_result, telemetry_result) = tokio::join!(isis_task, telemetry_task);

    let (advertised, isis_diag) = isis_result
        .map_err(|e| ReconError::extraction(SourcePlane::Isis, format!("worker task failed: {e}")))??;
    let (measured, telemetry_diag) = telemetry_result.map_err(|e| {
        ReconError::extraction(SourcePlane::Telemetry, format!("worker task failed: {e}"))
    })??;

    debug!(
        "Parallel extraction complete: {} advertised, {} measured",
        advertised.len(),
        measured.len()
    );
    Ok(reconciler.join(advertised, measured, isis_diag.merge(telemetry_diag)))
}
