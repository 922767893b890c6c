//! Integration tests for the reconciliation engine against
//! production-shaped fixtures.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use recon_core::{reconcile_parallel, ReconConfig, Reconciler};
use recon_types::HealthCategory;

fn system_id(index: usize) -> String {
    format!("1921.6800.{:04x}", index)
}

/// Builds a snapshot with `count` measured links forming a device chain.
/// Links whose index is in `drifting` get a latency far above the
/// advertised expectation.
fn build_snapshot(count: usize, drifting: &[usize]) -> Value {
    let links: Vec<Value> = (0..count)
        .map(|i| {
            let latency = if drifting.contains(&i) { 30.0 } else { 12.0 };
            json!({
                "source": { "device": system_id(i), "site": format!("site{}", i % 4) },
                "target": { "device": system_id(i + 1), "site": format!("site{}", (i + 1) % 4) },
                "latencyMs": latency
            })
        })
        .collect();
    json!({ "links": links })
}

/// Builds a link-state database advertising the chain links whose index
/// is in `advertised`, each with metric 10, plus any extra (local, remote)
/// pairs.
fn build_isis(advertised: &[usize], extra: &[(String, String)]) -> Value {
    let mut lsps = serde_json::Map::new();
    for &i in advertised {
        lsps.insert(
            format!("{}.00-00", system_id(i)),
            json!({
                "neighbors": [{ "systemId": system_id(i + 1), "metric": 10 }]
            }),
        );
    }
    for (n, (local, remote)) in extra.iter().enumerate() {
        lsps.insert(
            format!("{}.00-{:02x}", local, n),
            json!({
                "systemId": local,
                "neighbors": [{ "systemId": remote, "metric": 10 }]
            }),
        );
    }
    json!({
        "vrfs": {
            "default": {
                "isisInstances": {
                    "CORE": { "level": { "2": { "lsps": lsps } } }
                }
            }
        }
    })
}

#[test]
fn test_production_fixture_shape() {
    // 88 measured links; the control plane advertises 87 of them (link 0
    // was never learned) and 10 of the matched links drift well past the
    // threshold. This reproduces the summary shape observed in captured
    // reconciliation output.
    let drifting: Vec<usize> = (1..=10).collect();
    let advertised: Vec<usize> = (1..88).collect();

    let snapshot = build_snapshot(88, &drifting);
    let isis = build_isis(&advertised, &[]);

    let engine = Reconciler::new(ReconConfig::new());
    let report = engine.run(&snapshot, &isis).unwrap();

    assert_eq!(report.summary.total_links, 88);
    assert_eq!(report.summary.healthy, 77);
    assert_eq!(report.summary.drift_high, 10);
    assert_eq!(report.summary.missing_isis, 1);
    assert_eq!(report.summary.missing_telemetry, 0);

    // The sum identity must hold on this exact fixture.
    assert_eq!(
        report.summary.healthy
            + report.summary.drift_high
            + report.summary.missing_isis
            + report.summary.missing_telemetry,
        report.summary.total_links
    );
    assert_eq!(report.topology.len() as u64, report.summary.total_links);
}

#[test]
fn test_fixture_with_unmatched_advertisement() {
    // Same chain, plus one advertisement with no measurement at all.
    let drifting: Vec<usize> = (1..=10).collect();
    let advertised: Vec<usize> = (1..88).collect();
    let extra = vec![("aaaa.bbbb.0001".to_string(), "aaaa.bbbb.0002".to_string())];

    let snapshot = build_snapshot(88, &drifting);
    let isis = build_isis(&advertised, &extra);

    let report = Reconciler::new(ReconConfig::new())
        .run(&snapshot, &isis)
        .unwrap();

    assert_eq!(report.summary.total_links, 89);
    assert_eq!(report.summary.healthy, 77);
    assert_eq!(report.summary.drift_high, 10);
    assert_eq!(report.summary.missing_isis, 1);
    assert_eq!(report.summary.missing_telemetry, 1);

    let unmatched: Vec<_> = report
        .topology
        .iter()
        .filter(|l| l.category == HealthCategory::MissingTelemetry)
        .collect();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].location, "unknown");
}

#[test]
fn test_location_rollups_cover_every_link_once() {
    let drifting: Vec<usize> = (1..=10).collect();
    let advertised: Vec<usize> = (1..88).collect();
    let report = Reconciler::new(ReconConfig::new())
        .run(&build_snapshot(88, &drifting), &build_isis(&advertised, &[]))
        .unwrap();

    let rollup_total: u64 = report.locations.iter().map(|l| l.total_links).sum();
    assert_eq!(rollup_total, report.summary.total_links);

    // Chain sites cycle through site0..site3
    assert_eq!(report.locations.len(), 4);
}

#[test]
fn test_parallel_physical_links_not_merged() {
    // Two distinct physical links between the same device pair, on
    // different interfaces, both advertised and both measured.
    let snapshot = json!({
        "links": [
            {
                "source": { "device": "1921.6800.0001", "interface": "et-0/0/0", "site": "sea1" },
                "target": { "device": "1921.6800.0002", "interface": "et-0/0/0", "site": "pdx1" },
                "latencyMs": 11.0
            },
            {
                "source": { "device": "1921.6800.0001", "interface": "et-0/0/1", "site": "sea1" },
                "target": { "device": "1921.6800.0002", "interface": "et-0/0/1", "site": "pdx1" },
                "latencyMs": 12.0
            }
        ]
    });
    let isis = json!({
        "vrfs": {
            "default": {
                "isisInstances": {
                    "CORE": {
                        "level": {
                            "2": {
                                "lsps": {
                                    "1921.6800.0001.00-00": {
                                        "neighbors": [
                                            {
                                                "systemId": "1921.6800.0002",
                                                "metric": 10,
                                                "localInterface": "et-0/0/0",
                                                "remoteInterface": "et-0/0/0"
                                            },
                                            {
                                                "systemId": "1921.6800.0002",
                                                "metric": 10,
                                                "localInterface": "et-0/0/1",
                                                "remoteInterface": "et-0/0/1"
                                            }
                                        ]
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    });

    let report = Reconciler::new(ReconConfig::new()).run(&snapshot, &isis).unwrap();

    assert_eq!(report.summary.total_links, 2, "parallel links must stay distinct");
    assert_eq!(report.summary.healthy, 2);
}

#[test]
fn test_empty_empty_is_all_zero() {
    let report = Reconciler::new(ReconConfig::new())
        .run(&json!({ "links": [] }), &json!({ "vrfs": {} }))
        .unwrap();

    assert_eq!(report.summary.total_links, 0);
    assert_eq!(report.summary.healthy, 0);
    assert_eq!(report.summary.drift_high, 0);
    assert_eq!(report.summary.missing_isis, 0);
    assert_eq!(report.summary.missing_telemetry, 0);
    assert!(report.topology.is_empty());
    assert!(report.locations.is_empty());
}

#[test]
fn test_reports_are_idempotent() {
    let drifting: Vec<usize> = (3..=7).collect();
    let advertised: Vec<usize> = (0..40).collect();
    let snapshot = build_snapshot(40, &drifting);
    let isis = build_isis(&advertised, &[]);

    let engine = Reconciler::new(ReconConfig::new());
    let r1 = engine.run(&snapshot, &isis).unwrap();
    let r2 = engine.run(&snapshot, &isis).unwrap();

    assert_eq!(r1.summary, r2.summary);
    assert_eq!(r1.topology, r2.topology);
    assert_eq!(r1.locations, r2.locations);
}

#[tokio::test]
async fn test_parallel_pipeline_on_fixture() {
    let drifting: Vec<usize> = (1..=10).collect();
    let advertised: Vec<usize> = (1..88).collect();
    let snapshot = build_snapshot(88, &drifting);
    let isis = build_isis(&advertised, &[]);

    let engine = Arc::new(Reconciler::new(ReconConfig::new()));
    let parallel = reconcile_parallel(Arc::clone(&engine), snapshot.clone(), isis.clone())
        .await
        .unwrap();
    let sequential = engine.run(&snapshot, &isis).unwrap();

    assert_eq!(parallel.summary, sequential.summary);
    assert_eq!(parallel.topology, sequential.topology);
}

#[test]
fn test_report_serializes_with_wire_names() {
    let drifting: Vec<usize> = vec![1];
    let advertised: Vec<usize> = vec![0, 1];
    let report = Reconciler::new(ReconConfig::new())
        .run(&build_snapshot(2, &drifting), &build_isis(&advertised, &[]))
        .unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["summary"]["total_links"], json!(2));
    assert_eq!(value["summary"]["healthy"], json!(1));
    assert_eq!(value["summary"]["drift_high"], json!(1));
    assert_eq!(value["topology"][0]["category"], json!("healthy"));
    assert!(value["topology"][0]["key"].is_string());
}
