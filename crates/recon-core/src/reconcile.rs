//! Reconciliation engine - outer join and classification.
//!
//! Joins the advertised and measured link maps on canonical link identity
//! and emits exactly one classified [`ReconciledLink`] per distinct key.
//! The join is hash-based (O(n) in the combined link count) and its output
//! is sorted by key, so two runs over the same inputs produce identical
//! reports regardless of map iteration order.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{info, instrument};

use recon_types::{HealthCategory, LinkKey};

use crate::aggregate;
use crate::classify::classify_matched;
use crate::config::ReconConfig;
use crate::drift::{DriftStrategy, MetricDelta};
use crate::error::ReconResult;
use crate::idmap::IdentityMap;
use crate::isis::extract_adjacencies;
use crate::model::{AdvertisedLink, Diagnostics, MeasuredLink, ReconReport, ReconciledLink};
use crate::telemetry::extract_measured_links;

/// Reconciliation engine.
///
/// Holds the read-only configuration, the identity map collaborator, and
/// the drift strategy. Each [`run`](Reconciler::run) allocates its own
/// maps and returns an independent result; no state is shared across
/// runs.
pub struct Reconciler {
    config: ReconConfig,
    idmap: IdentityMap,
    strategy: Box<dyn DriftStrategy>,
}

impl Reconciler {
    /// Creates an engine with the given configuration, an identity
    /// namespace mapping, and the default drift strategy.
    pub fn new(config: ReconConfig) -> Self {
        Self {
            config,
            idmap: IdentityMap::new(),
            strategy: Box::new(MetricDelta),
        }
    }

    /// Sets the identity map used to bridge telemetry device names into
    /// the IS-IS namespace.
    pub fn with_identity_map(mut self, idmap: IdentityMap) -> Self {
        self.idmap = idmap;
        self
    }

    /// Substitutes the drift strategy.
    pub fn with_strategy(mut self, strategy: Box<dyn DriftStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &ReconConfig {
        &self.config
    }

    /// Identity map collaborator.
    pub fn identity_map(&self) -> &IdentityMap {
        &self.idmap
    }

    /// Runs one full reconciliation over two parsed documents.
    ///
    /// Extraction runs sequentially here; [`crate::pipeline`] offers the
    /// parallel variant with the same semantics.
    #[instrument(skip_all)]
    pub fn run(&self, snapshot: &Value, isis: &Value) -> ReconResult<ReconReport> {
        let mut diag = Diagnostics::default();
        let advertised = extract_adjacencies(isis, &mut diag)?;
        let measured = extract_measured_links(snapshot, &self.idmap, &mut diag)?;
        Ok(self.join(advertised, measured, diag))
    }

    /// Joins two already-extracted maps into a classified report.
    ///
    /// This is the barrier point of the pipeline: both extractions must
    /// have completed (successfully) before the join runs.
    pub fn join(
        &self,
        mut advertised: HashMap<LinkKey, AdvertisedLink>,
        measured: HashMap<LinkKey, MeasuredLink>,
        mut diag: Diagnostics,
    ) -> ReconReport {
        let mut topology: Vec<ReconciledLink> =
            Vec::with_capacity(advertised.len() + measured.len());

        // Measured links, matched against the advertised map.
        for (key, m) in measured {
            let record = match advertised.remove(&key) {
                Some(a) => {
                    let (category, drift) = classify_matched(
                        &m,
                        &a,
                        self.strategy.as_ref(),
                        self.config.drift_threshold_ms,
                        &mut diag,
                    );
                    self.record(key, Some(a), Some(m), drift, category)
                }
                None => self.record(key, None, Some(m), None, HealthCategory::MissingIsis),
            };
            topology.push(record);
        }

        // Remaining advertisements have no measurement.
        for (key, a) in advertised.drain() {
            topology.push(self.record(
                key,
                Some(a),
                None,
                None,
                HealthCategory::MissingTelemetry,
            ));
        }

        topology.sort_by(|x, y| x.key.cmp(&y.key));

        let (locations, summary) = aggregate::aggregate(&topology, &self.config.unknown_location);
        debug_assert!(summary.is_consistent());

        info!(
            "Reconciled {} links: {} healthy, {} drift_high, {} missing_isis, {} missing_telemetry",
            summary.total_links,
            summary.healthy,
            summary.drift_high,
            summary.missing_isis,
            summary.missing_telemetry
        );

        let degraded = diag.degraded();
        ReconReport {
            topology,
            locations,
            summary,
            diagnostics: diag,
            degraded,
        }
    }

    /// Builds one reconciled record, attributing its aggregation location.
    fn record(
        &self,
        key: LinkKey,
        advertised: Option<AdvertisedLink>,
        measured: Option<MeasuredLink>,
        drift: Option<f64>,
        category: HealthCategory,
    ) -> ReconciledLink {
        // Measured-side location wins; the link-state database carries none.
        let location = measured
            .as_ref()
            .and_then(|m| m.source_site.clone().or_else(|| m.target_site.clone()))
            .unwrap_or_else(|| self.config.unknown_location.clone());

        ReconciledLink {
            key,
            advertised,
            measured,
            drift,
            category,
            location,
        }
    }
}
