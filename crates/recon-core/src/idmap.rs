//! Identifier namespace mapping between telemetry and IS-IS.
//!
//! The two input documents do not necessarily name devices the same way:
//! telemetry reports hostnames while the link-state database speaks in
//! system IDs. The identity map is the explicit collaborator that bridges
//! the two namespaces; an empty map is the identity mapping, for
//! deployments whose telemetry already reports system IDs.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ReconError, ReconResult};
use crate::schema;

/// Telemetry device name -> IS-IS system identifier mapping.
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    devices: HashMap<String, String>,
}

impl IdentityMap {
    /// Creates an empty (identity) mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of device mappings.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// True if no mappings are configured.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Registers one device mapping.
    pub fn insert(&mut self, telemetry_name: impl Into<String>, system_id: impl Into<String>) {
        self.devices.insert(telemetry_name.into(), system_id.into());
    }

    /// Translates a telemetry device name into the IS-IS namespace.
    ///
    /// Unmapped names pass through unchanged.
    pub fn map_device<'a>(&'a self, device: &'a str) -> &'a str {
        match self.devices.get(device) {
            Some(mapped) => mapped.as_str(),
            None => device,
        }
    }

    /// Loads a mapping from a JSON document of the form
    /// `{ "devices": { "<telemetryName>": "<systemId>" } }`.
    pub fn from_value(doc: &Value) -> ReconResult<Self> {
        let Some(obj) = doc.as_object() else {
            return Err(ReconError::config("idmap", "expected a JSON object"));
        };

        let mut map = Self::new();
        let Some(devices) = obj.get(schema::idmap::DEVICES) else {
            debug!("Identity map has no 'devices' table; using identity mapping");
            return Ok(map);
        };
        let Some(devices) = devices.as_object() else {
            return Err(ReconError::config(
                schema::idmap::DEVICES,
                "expected an object of device name mappings",
            ));
        };

        for (name, target) in devices {
            let Some(target) = target.as_str() else {
                return Err(ReconError::config(
                    schema::idmap::DEVICES,
                    format!("mapping for '{}' must be a string", name),
                ));
            };
            map.insert(name.clone(), target);
        }

        info!("Loaded identity map with {} device mappings", map.len());
        Ok(map)
    }

    /// Loads a mapping from a JSON file.
    pub fn from_file(path: &Path) -> ReconResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ReconError::config("idmap", format!("failed to read {}: {}", path.display(), e))
        })?;
        let doc: Value = serde_json::from_str(&raw).map_err(|e| {
            ReconError::config("idmap", format!("failed to parse {}: {}", path.display(), e))
        })?;
        Self::from_value(&doc)
    }
}
