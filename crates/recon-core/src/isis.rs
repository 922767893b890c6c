//! IS-IS adjacency extraction from the link-state database document.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "vrfs": {
//!     "default": {
//!       "isisInstances": {
//!         "CORE": {
//!           "level": {
//!             "2": {
//!               "lsps": {
//!                 "1921.6800.1001.00-00": {
//!                   "systemId": "1921.6800.1001",
//!                   "neighbors": [
//!                     { "systemId": "1921.6800.1002", "metric": 10 }
//!                   ]
//!                 }
//!               }
//!             }
//!           }
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! An empty `lsps` mapping is valid and yields zero adjacencies. Malformed
//! levels or LSP containers degrade to a per-instance skip with a logged
//! cause; only a missing/invalid top-level `vrfs` object fails the run.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info, warn};

use recon_types::{Endpoint, IsisLevel, LinkKey, SystemId};

use crate::error::{ReconError, ReconResult, SourcePlane};
use crate::model::{AdvertisedLink, Diagnostics};
use crate::schema::isis as fields;

/// The default VRF name; adjacencies in it carry no instance discriminator
/// so they can match telemetry measurements, which are not VRF-scoped.
pub const DEFAULT_VRF: &str = "default";

/// Extracts advertised adjacencies from a parsed link-state database.
///
/// Symmetric advertisements (each side's LSP lists the other) collapse onto
/// one [`LinkKey`]; on conflicting metrics the numerically lower wins and
/// both source LSP IDs are retained.
pub fn extract_adjacencies(
    doc: &Value,
    diag: &mut Diagnostics,
) -> ReconResult<HashMap<LinkKey, AdvertisedLink>> {
    let Some(root) = doc.as_object() else {
        return Err(ReconError::invalid_document(
            SourcePlane::Isis,
            "<document>",
            "expected a JSON object",
        ));
    };
    let vrfs = root.get(fields::VRFS).ok_or_else(|| {
        ReconError::invalid_document(SourcePlane::Isis, fields::VRFS, "missing required field")
    })?;
    let Some(vrfs) = vrfs.as_object() else {
        return Err(ReconError::invalid_document(
            SourcePlane::Isis,
            fields::VRFS,
            "expected an object",
        ));
    };

    let mut adjacencies: HashMap<LinkKey, AdvertisedLink> = HashMap::new();
    let mut lsp_count: u64 = 0;

    for (vrf_name, vrf) in vrfs {
        let Some(instances) = vrf
            .as_object()
            .and_then(|v| v.get(fields::ISIS_INSTANCES))
            .and_then(Value::as_object)
        else {
            warn!("VRF {} has no isisInstances object; skipping", vrf_name);
            diag.isis_skipped_instances += 1;
            continue;
        };

        for (instance_name, instance) in instances {
            let Some(levels) = instance
                .as_object()
                .and_then(|i| i.get(fields::LEVEL))
                .and_then(Value::as_object)
            else {
                warn!(
                    "Instance {}/{} has no level object; skipping",
                    vrf_name, instance_name
                );
                diag.isis_skipped_instances += 1;
                continue;
            };

            for (level_key, level) in levels {
                let parsed_level = match IsisLevel::parse(level_key) {
                    Ok(l) => l,
                    Err(e) => {
                        warn!(
                            "Instance {}/{}: {}; skipping level",
                            vrf_name, instance_name, e
                        );
                        diag.isis_skipped_instances += 1;
                        continue;
                    }
                };

                let Some(lsps) = level
                    .as_object()
                    .and_then(|l| l.get(fields::LSPS))
                    .and_then(Value::as_object)
                else {
                    warn!(
                        "Instance {}/{} level {} has no lsps object; skipping",
                        vrf_name, instance_name, parsed_level
                    );
                    diag.isis_skipped_instances += 1;
                    continue;
                };

                for (lsp_id, lsp) in lsps {
                    lsp_count += 1;
                    extract_lsp(
                        vrf_name,
                        instance_name,
                        parsed_level,
                        lsp_id,
                        lsp,
                        &mut adjacencies,
                        diag,
                    );
                }
            }
        }
    }

    info!(
        "Extracted {} advertised adjacencies from {} LSPs",
        adjacencies.len(),
        lsp_count
    );
    Ok(adjacencies)
}

/// Folds one LSP's neighbor entries into the adjacency map.
fn extract_lsp(
    vrf: &str,
    instance: &str,
    level: IsisLevel,
    lsp_id: &str,
    lsp: &Value,
    adjacencies: &mut HashMap<LinkKey, AdvertisedLink>,
    diag: &mut Diagnostics,
) {
    let Some(lsp_obj) = lsp.as_object() else {
        warn!("LSP {} is not an object; skipping", lsp_id);
        diag.isis_skipped_records += 1;
        return;
    };

    // Originating system: explicit field, else derived from the LSP ID.
    let local = match lsp_obj.get(fields::lsp::SYSTEM_ID).and_then(Value::as_str) {
        Some(s) => SystemId::parse(s),
        None => SystemId::from_lsp_id(lsp_id),
    };
    let local = match local {
        Ok(id) => id,
        Err(e) => {
            warn!("LSP {}: cannot determine system ID ({}); skipping", lsp_id, e);
            diag.isis_skipped_records += 1;
            return;
        }
    };

    let neighbors = match lsp_obj.get(fields::lsp::NEIGHBORS) {
        None => return, // an LSP with no reachability entries contributes nothing
        Some(Value::Array(n)) => n,
        Some(_) => {
            warn!("LSP {}: neighbors is not an array; skipping", lsp_id);
            diag.isis_skipped_records += 1;
            return;
        }
    };

    for neighbor in neighbors {
        let Some(n) = neighbor.as_object() else {
            warn!("LSP {}: neighbor entry is not an object; skipping", lsp_id);
            diag.isis_skipped_records += 1;
            continue;
        };

        let remote = n
            .get(fields::lsp::NEIGHBOR_SYSTEM_ID)
            .and_then(Value::as_str)
            .map(SystemId::parse);
        let remote = match remote {
            Some(Ok(id)) => id,
            _ => {
                warn!(
                    "LSP {}: neighbor entry missing valid systemId; skipping",
                    lsp_id
                );
                diag.isis_skipped_records += 1;
                continue;
            }
        };

        let Some(metric) = n.get(fields::lsp::METRIC).and_then(Value::as_u64) else {
            warn!(
                "LSP {}: neighbor {} missing valid metric; skipping",
                lsp_id, remote
            );
            diag.isis_skipped_records += 1;
            continue;
        };

        let local_iface = n
            .get(fields::lsp::LOCAL_INTERFACE)
            .and_then(Value::as_str)
            .unwrap_or("");
        let remote_iface = n
            .get(fields::lsp::REMOTE_INTERFACE)
            .and_then(Value::as_str)
            .unwrap_or("");

        // Endpoint construction cannot fail here: system IDs render non-empty.
        let Ok(local_ep) = Endpoint::with_interface(local.to_string(), local_iface) else {
            continue;
        };
        let Ok(remote_ep) = Endpoint::with_interface(remote.to_string(), remote_iface) else {
            continue;
        };

        // The default VRF carries no discriminator so its adjacencies can
        // match telemetry, which is not VRF-scoped.
        let instance_disc = if vrf == DEFAULT_VRF { None } else { Some(vrf) };
        let key = LinkKey::normalize(&local_ep, &remote_ep, instance_disc);

        match adjacencies.entry(key) {
            Entry::Occupied(mut entry) => {
                // Symmetric advertisement: same link seen from the other side.
                let existing = entry.get_mut();
                if metric < existing.metric {
                    debug!(
                        "Adjacency metric {} -> {} (lower wins)",
                        existing.metric, metric
                    );
                    existing.metric = metric;
                }
                if !existing.source_lsps.iter().any(|s| s == lsp_id) {
                    existing.source_lsps.push(lsp_id.to_string());
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(AdvertisedLink {
                    local,
                    remote,
                    metric,
                    level,
                    vrf: vrf.to_string(),
                    instance: instance.to_string(),
                    source_lsps: vec![lsp_id.to_string()],
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lsdb(lsps: Value) -> Value {
        json!({
            "vrfs": {
                "default": {
                    "isisInstances": {
                        "CORE": {
                            "level": { "2": { "lsps": lsps } }
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_extract_basic_adjacency() {
        let doc = lsdb(json!({
            "1921.6800.1001.00-00": {
                "neighbors": [
                    { "systemId": "1921.6800.1002", "metric": 10 }
                ]
            }
        }));
        let mut diag = Diagnostics::default();
        let adj = extract_adjacencies(&doc, &mut diag).unwrap();

        assert_eq!(adj.len(), 1);
        let link = adj.values().next().unwrap();
        assert_eq!(link.local.to_string(), "1921.6800.1001");
        assert_eq!(link.remote.to_string(), "1921.6800.1002");
        assert_eq!(link.metric, 10);
        assert_eq!(link.level, IsisLevel::L2);
        assert_eq!(link.vrf, "default");
        assert_eq!(link.instance, "CORE");
        assert!(!diag.degraded());
    }

    #[test]
    fn test_symmetric_advertisements_collapse() {
        let doc = lsdb(json!({
            "1921.6800.1001.00-00": {
                "neighbors": [{ "systemId": "1921.6800.1002", "metric": 20 }]
            },
            "1921.6800.1002.00-00": {
                "neighbors": [{ "systemId": "1921.6800.1001", "metric": 10 }]
            }
        }));
        let mut diag = Diagnostics::default();
        let adj = extract_adjacencies(&doc, &mut diag).unwrap();

        assert_eq!(adj.len(), 1, "symmetric advertisements must not duplicate");
        let link = adj.values().next().unwrap();
        assert_eq!(link.metric, 10, "lower metric wins");
        assert_eq!(link.source_lsps.len(), 2, "both LSP refs retained");
    }

    #[test]
    fn test_explicit_system_id_overrides_lsp_id() {
        let doc = lsdb(json!({
            "aaaa.bbbb.cccc.00-00": {
                "systemId": "1921.6800.1001",
                "neighbors": [{ "systemId": "1921.6800.1002", "metric": 5 }]
            }
        }));
        let mut diag = Diagnostics::default();
        let adj = extract_adjacencies(&doc, &mut diag).unwrap();
        assert_eq!(adj.values().next().unwrap().local.to_string(), "1921.6800.1001");
    }

    #[test]
    fn test_empty_lsps_is_valid() {
        let doc = lsdb(json!({}));
        let mut diag = Diagnostics::default();
        let adj = extract_adjacencies(&doc, &mut diag).unwrap();
        assert!(adj.is_empty());
        assert!(!diag.degraded());
    }

    #[test]
    fn test_missing_vrfs_fails_fast() {
        let mut diag = Diagnostics::default();
        let err = extract_adjacencies(&json!({}), &mut diag).unwrap_err();
        assert!(err.to_string().contains("vrfs"));

        let err = extract_adjacencies(&json!([1]), &mut diag).unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn test_malformed_level_skipped_not_fatal() {
        let doc = json!({
            "vrfs": {
                "default": {
                    "isisInstances": {
                        "CORE": {
                            "level": {
                                "7": { "lsps": {} },
                                "2": {
                                    "lsps": {
                                        "1921.6800.1001.00-00": {
                                            "neighbors": [
                                                { "systemId": "1921.6800.1002", "metric": 10 }
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
        let mut diag = Diagnostics::default();
        let adj = extract_adjacencies(&doc, &mut diag).unwrap();
        assert_eq!(adj.len(), 1);
        assert_eq!(diag.isis_skipped_instances, 1);
    }

    #[test]
    fn test_instance_without_level_skipped() {
        let doc = json!({
            "vrfs": { "default": { "isisInstances": { "CORE": {} } } }
        });
        let mut diag = Diagnostics::default();
        let adj = extract_adjacencies(&doc, &mut diag).unwrap();
        assert!(adj.is_empty());
        assert_eq!(diag.isis_skipped_instances, 1);
    }

    #[test]
    fn test_malformed_neighbor_skipped() {
        let doc = lsdb(json!({
            "1921.6800.1001.00-00": {
                "neighbors": [
                    { "systemId": "1921.6800.1002" },
                    { "metric": 10 },
                    { "systemId": "1921.6800.1003", "metric": 30 }
                ]
            }
        }));
        let mut diag = Diagnostics::default();
        let adj = extract_adjacencies(&doc, &mut diag).unwrap();
        assert_eq!(adj.len(), 1);
        assert_eq!(diag.isis_skipped_records, 2);
        assert!(diag.degraded());
    }

    #[test]
    fn test_lsp_without_neighbors_contributes_nothing() {
        let doc = lsdb(json!({
            "1921.6800.1001.00-00": {}
        }));
        let mut diag = Diagnostics::default();
        let adj = extract_adjacencies(&doc, &mut diag).unwrap();
        assert!(adj.is_empty());
        assert_eq!(diag.isis_skipped_records, 0);
    }

    #[test]
    fn test_non_default_vrf_discriminates_key() {
        let doc = json!({
            "vrfs": {
                "vrf-red": {
                    "isisInstances": {
                        "CORE": {
                            "level": {
                                "1": {
                                    "lsps": {
                                        "1921.6800.1001.00-00": {
                                            "neighbors": [
                                                { "systemId": "1921.6800.1002", "metric": 10 }
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
        let mut diag = Diagnostics::default();
        let adj = extract_adjacencies(&doc, &mut diag).unwrap();
        let key = adj.keys().next().unwrap();
        assert_eq!(key.instance.as_deref(), Some("vrf-red"));
    }

    #[test]
    fn test_interfaces_enter_discriminator() {
        let doc = lsdb(json!({
            "1921.6800.1001.00-00": {
                "neighbors": [
                    {
                        "systemId": "1921.6800.1002",
                        "metric": 10,
                        "localInterface": "et-0/0/0",
                        "remoteInterface": "et-0/0/1"
                    }
                ]
            }
        }));
        let mut diag = Diagnostics::default();
        let adj = extract_adjacencies(&doc, &mut diag).unwrap();
        let key = adj.keys().next().unwrap();
        assert!(key.discriminator.is_some());
    }
}
