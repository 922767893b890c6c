//! Reconciliation engine for control-plane/data-plane topology drift.
//!
//! Takes two independently captured views of a network - a data-plane
//! telemetry snapshot and a control-plane IS-IS link-state database -
//! and reconciles them into one health-annotated topology:
//!
//! 1. [`isis`] and [`telemetry`] extract typed link records from the two
//!    parsed JSON documents
//! 2. [`idmap`] bridges the telemetry and IS-IS identifier namespaces
//! 3. [`reconcile`] outer-joins the two link sets on canonical link
//!    identity and classifies every link via a pluggable [`drift`]
//!    strategy
//! 4. [`aggregate`] rolls results up by location and derives the summary
//!
//! Each run is a pure function of its two inputs: no state is shared
//! across runs, and [`pipeline`] provides the parallel-extraction variant
//! for large documents. The [`cache`] trait is the caller-owned seam for
//! session caching; the core never reads it implicitly.
//!
//! # Example
//!
//! ```
//! use recon_core::{ReconConfig, Reconciler};
//! use serde_json::json;
//!
//! let engine = Reconciler::new(ReconConfig::new());
//! let report = engine
//!     .run(&json!({ "links": [] }), &json!({ "vrfs": {} }))
//!     .unwrap();
//! assert_eq!(report.summary.total_links, 0);
//! ```

pub mod aggregate;
pub mod cache;
pub mod classify;
pub mod config;
pub mod drift;
pub mod error;
pub mod idmap;
pub mod isis;
pub mod model;
pub mod pipeline;
pub mod reconcile;
pub mod schema;
pub mod telemetry;

pub use cache::{MemoryCache, SessionCache};
pub use config::ReconConfig;
pub use drift::{DriftStrategy, MetricDelta, ScaledCost};
pub use error::{ReconError, ReconResult, SourcePlane};
pub use idmap::IdentityMap;
pub use model::{
    AdvertisedLink, Diagnostics, LocationRollup, MeasuredLink, ReconReport, ReconciledLink,
    Summary,
};
pub use pipeline::reconcile_parallel;
pub use reconcile::Reconciler;
