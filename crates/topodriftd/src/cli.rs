//! Command line interface for topodriftd.

use std::path::PathBuf;

use clap::Parser;

/// Reconcile a telemetry snapshot against an IS-IS link-state database
/// and report per-link health.
#[derive(Parser, Debug)]
#[command(name = "topodriftd", version, about)]
pub struct Args {
    /// Path to the data-plane telemetry snapshot (JSON).
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Path to the IS-IS link-state database (JSON).
    #[arg(long)]
    pub isis: PathBuf,

    /// Path to an identity map bridging telemetry device names to IS-IS
    /// system IDs (JSON). Omit when telemetry already reports system IDs.
    #[arg(long)]
    pub idmap: Option<PathBuf>,

    /// Drift threshold override, in milliseconds.
    #[arg(long)]
    pub threshold_ms: Option<f64>,

    /// Snapshot epoch; when given, the processed report is cached under it
    /// for the lifetime of the process.
    #[arg(long)]
    pub epoch: Option<u64>,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_args() {
        let args = Args::try_parse_from([
            "topodriftd",
            "--snapshot",
            "/tmp/snapshot.json",
            "--isis",
            "/tmp/isis.json",
        ])
        .unwrap();
        assert_eq!(args.snapshot, PathBuf::from("/tmp/snapshot.json"));
        assert_eq!(args.idmap, None);
        assert_eq!(args.threshold_ms, None);
        assert!(!args.pretty);
    }

    #[test]
    fn test_full_args() {
        let args = Args::try_parse_from([
            "topodriftd",
            "--snapshot",
            "s.json",
            "--isis",
            "i.json",
            "--idmap",
            "m.json",
            "--threshold-ms",
            "2.5",
            "--epoch",
            "42",
            "--pretty",
        ])
        .unwrap();
        assert_eq!(args.threshold_ms, Some(2.5));
        assert_eq!(args.epoch, Some(42));
        assert!(args.pretty);
    }

    #[test]
    fn test_missing_required_args_rejected() {
        assert!(Args::try_parse_from(["topodriftd", "--snapshot", "s.json"]).is_err());
    }
}
