//! The zone collection and its overview.

use serde::{Deserialize, Serialize};

use skyhub_core::{DomainError, DomainResult, contains_ignore_case};

use crate::zone::{WarehouseZone, ZoneId, ZoneType};

/// Zone counters shown above the warehouse map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseOverview {
    pub total_zones: usize,
    pub storage_zones: usize,
    pub high_utilization_zones: usize,
    /// Mean utilization percent; `0.0` with no zones.
    pub average_utilization: f64,
}

impl WarehouseOverview {
    pub fn from_zones<'a>(zones: impl IntoIterator<Item = &'a WarehouseZone>) -> Self {
        let mut overview = Self::default();
        let mut utilization_sum = 0u64;
        for zone in zones {
            overview.total_zones += 1;
            if zone.zone_type() == ZoneType::Storage {
                overview.storage_zones += 1;
            }
            if zone.is_high_utilization() {
                overview.high_utilization_zones += 1;
            }
            utilization_sum += u64::from(zone.utilization());
        }
        if overview.total_zones > 0 {
            overview.average_utilization = utilization_sum as f64 / overview.total_zones as f64;
        }
        overview
    }
}

/// Zones whose name, or any stored item name, contains `query` (case-insensitive).
pub fn search_zones<'a>(zones: &'a [WarehouseZone], query: &str) -> Vec<&'a WarehouseZone> {
    zones
        .iter()
        .filter(|zone| {
            contains_ignore_case(zone.name(), query)
                || zone.items().iter().any(|item| contains_ignore_case(item, query))
        })
        .collect()
}

/// The set of zones on the warehouse map, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Warehouse {
    zones: Vec<WarehouseZone>,
}

impl Warehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone; its id must be unused.
    pub fn add_zone(&mut self, zone: WarehouseZone) -> DomainResult<&WarehouseZone> {
        if self.get(zone.id()).is_some() {
            return Err(DomainError::conflict(format!("zone {} already exists", zone.id())));
        }
        tracing::debug!(zone = %zone.id(), utilization = zone.utilization(), "zone added");
        self.zones.push(zone);
        Ok(&self.zones[self.zones.len() - 1])
    }

    pub fn get(&self, id: &ZoneId) -> Option<&WarehouseZone> {
        self.zones.iter().find(|z| z.id() == id)
    }

    pub fn zones(&self) -> &[WarehouseZone] {
        &self.zones
    }

    pub fn search(&self, query: &str) -> Vec<&WarehouseZone> {
        search_zones(&self.zones, query)
    }

    /// Zones holding an item with exactly this name.
    pub fn zones_holding(&self, item_name: &str) -> Vec<&WarehouseZone> {
        self.zones
            .iter()
            .filter(|z| z.items().iter().any(|i| i == item_name))
            .collect()
    }

    pub fn overview(&self) -> WarehouseOverview {
        WarehouseOverview::from_zones(&self.zones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_warehouse;

    fn ids(zones: &[&WarehouseZone]) -> Vec<String> {
        zones.iter().map(|z| z.id().to_string()).collect()
    }

    #[test]
    fn search_matches_zone_names() {
        let wh = demo_warehouse().unwrap();
        assert_eq!(ids(&wh.search("dock")), vec!["DOCK"]);
    }

    #[test]
    fn search_matches_stored_items() {
        let wh = demo_warehouse().unwrap();
        assert_eq!(ids(&wh.search("propel")), vec!["B2"]);
        assert_eq!(ids(&wh.search("")).len(), 4);
    }

    #[test]
    fn overview_of_demo_layout() {
        let overview = demo_warehouse().unwrap().overview();
        assert_eq!(overview.total_zones, 4);
        assert_eq!(overview.storage_zones, 3);
        assert_eq!(overview.high_utilization_zones, 1);
        assert!((overview.average_utilization - 56.25).abs() < 1e-9);
    }

    #[test]
    fn empty_overview_has_zero_average() {
        assert_eq!(Warehouse::new().overview(), WarehouseOverview::default());
    }

    #[test]
    fn duplicate_zone_ids_conflict() {
        let mut wh = demo_warehouse().unwrap();
        let dup = wh.zones()[0].clone();
        assert!(matches!(wh.add_zone(dup), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn zones_holding_is_exact() {
        let wh = demo_warehouse().unwrap();
        assert_eq!(ids(&wh.zones_holding("GPS Module")), vec!["A1"]);
        assert!(wh.zones_holding("gps module").is_empty());
    }
}
