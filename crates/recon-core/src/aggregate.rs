//! Location rollups and the global summary.

use std::collections::BTreeMap;

use crate::model::{LocationRollup, ReconciledLink, Summary};

/// Groups classified links by location and derives the global summary.
///
/// Every link is counted exactly once, in the location already attributed
/// to its record (the `unknown` sentinel for unlocated links, so nothing
/// is dropped). Rollups come back sorted by location.
pub fn aggregate(topology: &[ReconciledLink], unknown_location: &str) -> (Vec<LocationRollup>, Summary) {
    let mut by_location: BTreeMap<&str, LocationRollup> = BTreeMap::new();
    let mut summary = Summary::default();

    for link in topology {
        let location = if link.location.is_empty() {
            unknown_location
        } else {
            link.location.as_str()
        };
        by_location
            .entry(location)
            .or_insert_with(|| LocationRollup::new(location))
            .count(link.category);
        summary.count(link.category);
    }

    (by_location.into_values().collect(), summary)
}
