//! Field name constants for the two input documents.

/// IS-IS link-state database document fields.
pub mod isis {
    /// Top-level per-VRF mapping.
    pub const VRFS: &str = "vrfs";

    /// Per-VRF IS-IS instance mapping.
    pub const ISIS_INSTANCES: &str = "isisInstances";

    /// Per-instance level mapping (keys "1"/"2").
    pub const LEVEL: &str = "level";

    /// Per-level LSP mapping, keyed by LSP ID.
    pub const LSPS: &str = "lsps";

    /// LSP fields.
    pub mod lsp {
        /// Originating system ID (optional; derived from the LSP ID when absent).
        pub const SYSTEM_ID: &str = "systemId";

        /// Neighbor reachability entries.
        pub const NEIGHBORS: &str = "neighbors";

        /// Neighbor system ID.
        pub const NEIGHBOR_SYSTEM_ID: &str = "systemId";

        /// Advertised metric toward the neighbor.
        pub const METRIC: &str = "metric";

        /// Local interface for the adjacency (optional).
        pub const LOCAL_INTERFACE: &str = "localInterface";

        /// Remote interface for the adjacency (optional).
        pub const REMOTE_INTERFACE: &str = "remoteInterface";
    }
}

/// Telemetry snapshot document fields.
pub mod telemetry {
    /// Top-level measured link array.
    pub const LINKS: &str = "links";

    /// Link entry fields.
    pub mod link {
        /// Source endpoint object.
        pub const SOURCE: &str = "source";

        /// Target endpoint object.
        pub const TARGET: &str = "target";

        /// Measured round-trip latency in milliseconds.
        pub const LATENCY_MS: &str = "latencyMs";

        /// Measured loss percentage (optional).
        pub const LOSS_PCT: &str = "lossPct";

        /// Link utilization fraction (optional).
        pub const UTILIZATION: &str = "utilization";

        /// Snapshot epoch the measurement belongs to (optional).
        pub const EPOCH: &str = "epoch";
    }

    /// Endpoint object fields.
    pub mod endpoint {
        /// Device name.
        pub const DEVICE: &str = "device";

        /// Interface name (optional).
        pub const INTERFACE: &str = "interface";

        /// Site/location tag (optional).
        pub const SITE: &str = "site";
    }
}

/// Identity map document fields.
pub mod idmap {
    /// Telemetry device name -> IS-IS system ID mapping.
    pub const DEVICES: &str = "devices";
}
