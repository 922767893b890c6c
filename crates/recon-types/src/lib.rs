//! Common types for topology reconciliation.
//!
//! This crate provides type-safe representations of the primitives shared
//! by the reconciliation pipeline:
//!
//! - [`SystemId`]: IS-IS system identifiers (dotted-hex notation)
//! - [`IsisLevel`]: IS-IS routing levels (L1/L2)
//! - [`Endpoint`]: a link endpoint (device plus optional interface)
//! - [`LinkKey`]: canonical, direction-independent link identity
//! - [`HealthCategory`]: the four reconciliation health buckets

mod health;
mod link;
mod system_id;

pub use health::HealthCategory;
pub use link::{Endpoint, LinkKey};
pub use system_id::{IsisLevel, SystemId};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid system ID format: {0}")]
    InvalidSystemId(String),

    #[error("invalid LSP ID format: {0}")]
    InvalidLspId(String),

    #[error("invalid IS-IS level: {0} (must be 1 or 2)")]
    InvalidLevel(String),

    #[error("empty device identifier")]
    EmptyDevice,
}
