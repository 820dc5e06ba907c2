//! Warehouse zones: identity, bounds and utilization.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use skyhub_core::{DomainError, DomainResult};

/// Short zone code such as `A1` or `DOCK`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ZoneId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_id("ZoneId: empty"));
        }
        Ok(Self(s.to_string()))
    }
}

impl core::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    Storage,
    Receiving,
    Shipping,
    Office,
}

/// WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Input for [`WarehouseZone::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewZone {
    pub id: String,
    pub name: String,
    pub zone_type: ZoneType,
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
    pub capacity: u32,
    pub utilization: u8,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseZone {
    id: ZoneId,
    name: String,
    zone_type: ZoneType,
    bounds: [GeoPoint; 2],
    center: GeoPoint,
    capacity: u32,
    utilization: u8,
    items: Vec<String>,
}

impl WarehouseZone {
    /// Validate and build a zone. The center is the midpoint of the bounds.
    pub fn new(input: NewZone) -> DomainResult<Self> {
        let id: ZoneId = input.id.parse()?;
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("zone name cannot be empty"));
        }
        if input.utilization > 100 {
            return Err(DomainError::validation(format!(
                "utilization must be a percentage, got {}",
                input.utilization
            )));
        }
        let (sw, ne) = (input.south_west, input.north_east);
        if sw.lat > ne.lat || sw.lng > ne.lng {
            return Err(DomainError::validation("zone bounds must be south-west then north-east"));
        }

        Ok(Self {
            id,
            name: input.name,
            zone_type: input.zone_type,
            bounds: [sw, ne],
            center: GeoPoint::new((sw.lat + ne.lat) / 2.0, (sw.lng + ne.lng) / 2.0),
            capacity: input.capacity,
            utilization: input.utilization,
            items: input.items,
        })
    }

    pub fn id(&self) -> &ZoneId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn zone_type(&self) -> ZoneType {
        self.zone_type
    }

    pub fn bounds(&self) -> [GeoPoint; 2] {
        self.bounds
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Percent of capacity in use.
    pub fn utilization(&self) -> u8 {
        self.utilization
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Above 80 % utilization.
    pub fn is_high_utilization(&self) -> bool {
        self.utilization > 80
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new() -> NewZone {
        NewZone {
            id: "A1".to_string(),
            name: "Zone A1 - Electronics".to_string(),
            zone_type: ZoneType::Storage,
            south_west: GeoPoint::new(37.450, -122.178),
            north_east: GeoPoint::new(37.452, -122.176),
            capacity: 100,
            utilization: 65,
            items: vec!["Battery Pack".to_string()],
        }
    }

    #[test]
    fn center_is_midpoint() {
        let zone = WarehouseZone::new(new()).unwrap();
        assert!((zone.center().lat - 37.451).abs() < 1e-9);
        assert!((zone.center().lng + 122.177).abs() < 1e-9);
    }

    #[test]
    fn rejects_over_full_utilization() {
        let mut s = new();
        s.utilization = 101;
        assert!(matches!(WarehouseZone::new(s), Err(DomainError::Validation(_))));
    }

    #[test]
    fn rejects_blank_id_and_inverted_bounds() {
        let mut s = new();
        s.id = " ".to_string();
        assert!(matches!(WarehouseZone::new(s), Err(DomainError::InvalidId(_))));

        let mut s = new();
        std::mem::swap(&mut s.south_west, &mut s.north_east);
        assert!(WarehouseZone::new(s).is_err());
    }

    #[test]
    fn high_utilization_threshold_is_exclusive() {
        let mut s = new();
        s.utilization = 80;
        assert!(!WarehouseZone::new(s.clone()).unwrap().is_high_utilization());
        s.utilization = 81;
        assert!(WarehouseZone::new(s).unwrap().is_high_utilization());
    }

    #[test]
    fn serializes_for_the_map_view() {
        let json = serde_json::to_value(WarehouseZone::new(new()).unwrap()).unwrap();
        assert_eq!(json["id"], "A1");
        assert_eq!(json["zoneType"], "storage");
        assert_eq!(json["bounds"][0]["lat"], 37.450);
    }
}
