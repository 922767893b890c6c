//! Measured link extraction from the data-plane telemetry snapshot.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "links": [
//!     {
//!       "source": { "device": "rtr1.sea", "interface": "et-0/0/0", "site": "sea1" },
//!       "target": { "device": "rtr2.pdx", "interface": "et-0/0/4", "site": "pdx1" },
//!       "latencyMs": 4.2,
//!       "lossPct": 0.0,
//!       "epoch": 1754284800
//!     }
//!   ]
//! }
//! ```
//!
//! Device names are translated through the [`IdentityMap`] before key
//! normalization so both extractors key in the same namespace. Interface
//! identifiers enter the key discriminator, so parallel links between the
//! same device pair are never merged.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{info, warn};

use recon_types::{Endpoint, LinkKey};

use crate::error::{ReconError, ReconResult, SourcePlane};
use crate::idmap::IdentityMap;
use crate::model::{Diagnostics, MeasuredLink};
use crate::schema::telemetry as fields;

/// Extracts measured links from a parsed telemetry snapshot.
pub fn extract_measured_links(
    doc: &Value,
    idmap: &IdentityMap,
    diag: &mut Diagnostics,
) -> ReconResult<HashMap<LinkKey, MeasuredLink>> {
    let Some(root) = doc.as_object() else {
        return Err(ReconError::invalid_document(
            SourcePlane::Telemetry,
            "<document>",
            "expected a JSON object",
        ));
    };
    let links = root.get(fields::LINKS).ok_or_else(|| {
        ReconError::invalid_document(
            SourcePlane::Telemetry,
            fields::LINKS,
            "missing required field",
        )
    })?;
    let Some(links) = links.as_array() else {
        return Err(ReconError::invalid_document(
            SourcePlane::Telemetry,
            fields::LINKS,
            "expected an array",
        ));
    };

    let mut measured: HashMap<LinkKey, MeasuredLink> = HashMap::new();

    for (index, entry) in links.iter().enumerate() {
        match parse_link_entry(entry, idmap) {
            Ok((key, link)) => {
                if measured.contains_key(&key) {
                    warn!("Link entry {}: duplicate key {}; keeping first", index, key);
                    diag.telemetry_skipped_records += 1;
                    continue;
                }
                measured.insert(key, link);
            }
            Err(cause) => {
                warn!("Link entry {}: {}; skipping", index, cause);
                diag.telemetry_skipped_records += 1;
            }
        }
    }

    info!(
        "Extracted {} measured links from {} snapshot entries",
        measured.len(),
        links.len()
    );
    Ok(measured)
}

/// Parses one snapshot link entry into a keyed [`MeasuredLink`].
///
/// Returns a human-readable cause on any per-entry problem; the caller
/// skips and counts it.
fn parse_link_entry(entry: &Value, idmap: &IdentityMap) -> Result<(LinkKey, MeasuredLink), String> {
    let obj = entry.as_object().ok_or("entry is not an object")?;

    let (source_device, source_interface, source_site) =
        parse_endpoint(obj.get(fields::link::SOURCE), fields::link::SOURCE)?;
    let (target_device, target_interface, target_site) =
        parse_endpoint(obj.get(fields::link::TARGET), fields::link::TARGET)?;

    let latency_ms = obj
        .get(fields::link::LATENCY_MS)
        .and_then(Value::as_f64)
        .ok_or("missing or non-numeric latencyMs")?;
    if !latency_ms.is_finite() || latency_ms < 0.0 {
        return Err(format!("latencyMs {} out of range", latency_ms));
    }

    let loss_pct = obj.get(fields::link::LOSS_PCT).and_then(Value::as_f64);
    let utilization = obj.get(fields::link::UTILIZATION).and_then(Value::as_f64);
    let epoch = obj.get(fields::link::EPOCH).and_then(Value::as_u64);

    // Translate into the IS-IS identifier namespace before keying.
    let source_device = idmap.map_device(&source_device).to_string();
    let target_device = idmap.map_device(&target_device).to_string();

    let source_ep = Endpoint::with_interface(
        source_device.as_str(),
        source_interface.as_deref().unwrap_or(""),
    )
    .map_err(|e| e.to_string())?;
    let target_ep = Endpoint::with_interface(
        target_device.as_str(),
        target_interface.as_deref().unwrap_or(""),
    )
    .map_err(|e| e.to_string())?;
    let key = LinkKey::normalize(&source_ep, &target_ep, None);

    Ok((
        key,
        MeasuredLink {
            source_device,
            source_interface,
            target_device,
            target_interface,
            latency_ms,
            loss_pct,
            utilization,
            source_site,
            target_site,
            epoch,
        },
    ))
}

/// Parses an endpoint object into (device, interface, site).
fn parse_endpoint(
    value: Option<&Value>,
    field: &str,
) -> Result<(String, Option<String>, Option<String>), String> {
    let obj = value
        .and_then(Value::as_object)
        .ok_or_else(|| format!("missing {} endpoint object", field))?;

    let device = obj
        .get(fields::endpoint::DEVICE)
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| format!("{} endpoint missing device", field))?;

    let interface = obj
        .get(fields::endpoint::INTERFACE)
        .and_then(Value::as_str)
        .filter(|i| !i.is_empty())
        .map(str::to_string);
    let site = obj
        .get(fields::endpoint::SITE)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok((device.to_string(), interface, site))
}
