//! Data model for reconciliation runs.
//!
//! [`AdvertisedLink`] and [`MeasuredLink`] are the typed intermediate
//! representations produced at the extraction boundary; everything
//! downstream operates on these, never on raw JSON trees.

use serde::Serialize;

use recon_types::{HealthCategory, IsisLevel, LinkKey, SystemId};

/// A point-to-point adjacency advertised in the IS-IS link-state database.
///
/// Immutable after extraction. When both directions of an adjacency are
/// advertised, the two advertisements collapse onto one entry with the
/// lower metric; both originating LSP IDs are retained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvertisedLink {
    /// Advertising system.
    pub local: SystemId,
    /// Advertised neighbor.
    pub remote: SystemId,
    /// Advertised metric (lower of the two directions when both are seen).
    pub metric: u64,
    /// IS-IS level the adjacency was advertised at.
    pub level: IsisLevel,
    /// VRF the instance belongs to.
    pub vrf: String,
    /// IS-IS instance identifier.
    pub instance: String,
    /// LSP IDs that contributed this adjacency (one per direction seen).
    pub source_lsps: Vec<String>,
}

/// A link measured in the data-plane telemetry snapshot.
///
/// Immutable after extraction. Endpoint devices are already translated
/// into the IS-IS identifier namespace by the identity map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasuredLink {
    /// Source device (post identity mapping).
    pub source_device: String,
    /// Source interface, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_interface: Option<String>,
    /// Target device (post identity mapping).
    pub target_device: String,
    /// Target interface, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_interface: Option<String>,
    /// Measured latency in milliseconds.
    pub latency_ms: f64,
    /// Measured loss percentage, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_pct: Option<f64>,
    /// Link utilization fraction, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<f64>,
    /// Source endpoint location tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_site: Option<String>,
    /// Target endpoint location tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_site: Option<String>,
    /// Snapshot epoch the measurement belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<u64>,
}

/// One reconciled link: the outer-join record for a distinct [`LinkKey`].
///
/// Created during reconciliation, immutable once classified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledLink {
    /// Canonical link identity.
    pub key: LinkKey,
    /// Control-plane side, when advertised.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertised: Option<AdvertisedLink>,
    /// Data-plane side, when measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured: Option<MeasuredLink>,
    /// Computed drift; `None` when only one side is present or the
    /// configured strategy deems the metrics incomparable.
    pub drift: Option<f64>,
    /// Health classification.
    pub category: HealthCategory,
    /// Location used for aggregation.
    pub location: String,
}

/// Per-location rollup of link health counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRollup {
    /// Location identifier (may be the configured `unknown` sentinel).
    pub location: String,
    /// Links classified healthy.
    pub healthy: u64,
    /// Links classified drift_high.
    pub drift_high: u64,
    /// Links classified missing_isis.
    pub missing_isis: u64,
    /// Links classified missing_telemetry.
    pub missing_telemetry: u64,
    /// Total links attributed to this location.
    pub total_links: u64,
}

impl LocationRollup {
    /// Creates an empty rollup for a location.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            healthy: 0,
            drift_high: 0,
            missing_isis: 0,
            missing_telemetry: 0,
            total_links: 0,
        }
    }

    /// Counts one link in the given category.
    pub fn count(&mut self, category: HealthCategory) {
        match category {
            HealthCategory::Healthy => self.healthy += 1,
            HealthCategory::DriftHigh => self.drift_high += 1,
            HealthCategory::MissingIsis => self.missing_isis += 1,
            HealthCategory::MissingTelemetry => self.missing_telemetry += 1,
        }
        self.total_links += 1;
    }
}

/// Global summary counts.
///
/// Invariant: `healthy + drift_high + missing_isis + missing_telemetry ==
/// total_links`, and `total_links` equals the number of distinct link keys
/// across both sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Distinct links across both sources.
    pub total_links: u64,
    /// Links classified healthy.
    pub healthy: u64,
    /// Links classified drift_high.
    pub drift_high: u64,
    /// Links classified missing_isis.
    pub missing_isis: u64,
    /// Links classified missing_telemetry.
    pub missing_telemetry: u64,
}

impl Summary {
    /// Counts one link in the given category.
    pub fn count(&mut self, category: HealthCategory) {
        match category {
            HealthCategory::Healthy => self.healthy += 1,
            HealthCategory::DriftHigh => self.drift_high += 1,
            HealthCategory::MissingIsis => self.missing_isis += 1,
            HealthCategory::MissingTelemetry => self.missing_telemetry += 1,
        }
        self.total_links += 1;
    }

    /// True if the four category counts sum to the total.
    pub fn is_consistent(&self) -> bool {
        self.healthy + self.drift_high + self.missing_isis + self.missing_telemetry
            == self.total_links
    }
}

/// Extraction and classification diagnostics for one run.
///
/// Per-record problems are skipped and counted here rather than failing
/// the run; `degraded` reports whether any input was only partially
/// interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// LSP/neighbor records skipped in the IS-IS document.
    pub isis_skipped_records: u64,
    /// Whole IS-IS instances skipped (malformed level/LSP containers).
    pub isis_skipped_instances: u64,
    /// Link entries skipped in the telemetry snapshot.
    pub telemetry_skipped_records: u64,
    /// Matched links whose metrics the drift strategy deemed incomparable.
    pub incomparable: u64,
}

impl Diagnostics {
    /// Combines the counters from two extraction passes.
    pub fn merge(self, other: Self) -> Self {
        Self {
            isis_skipped_records: self.isis_skipped_records + other.isis_skipped_records,
            isis_skipped_instances: self.isis_skipped_instances + other.isis_skipped_instances,
            telemetry_skipped_records: self.telemetry_skipped_records
                + other.telemetry_skipped_records,
            incomparable: self.incomparable + other.incomparable,
        }
    }

    /// True if any input record or instance was skipped.
    pub fn degraded(&self) -> bool {
        self.isis_skipped_records > 0
            || self.isis_skipped_instances > 0
            || self.telemetry_skipped_records > 0
    }
}

/// Complete result of one reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    /// One entry per distinct link key, sorted by key.
    pub topology: Vec<ReconciledLink>,
    /// One entry per distinct location, sorted by location.
    pub locations: Vec<LocationRollup>,
    /// Global counts.
    pub summary: Summary,
    /// Skip counters and degradation flags.
    pub diagnostics: Diagnostics,
    /// True if any input was only partially interpreted.
    pub degraded: bool,
}
