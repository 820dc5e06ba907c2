//! Demo warehouse layout.

use skyhub_core::DomainResult;

use crate::warehouse::Warehouse;
use crate::zone::{GeoPoint, NewZone, WarehouseZone, ZoneType};

fn zone(
    id: &str,
    name: &str,
    zone_type: ZoneType,
    bounds: [(f64, f64); 2],
    capacity: u32,
    utilization: u8,
    items: &[&str],
) -> NewZone {
    NewZone {
        id: id.to_string(),
        name: name.to_string(),
        zone_type,
        south_west: GeoPoint::new(bounds[0].0, bounds[0].1),
        north_east: GeoPoint::new(bounds[1].0, bounds[1].1),
        capacity,
        utilization,
        items: items.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn demo_zones() -> Vec<NewZone> {
    vec![
        zone(
            "A1",
            "Zone A1 - Electronics",
            ZoneType::Storage,
            [(37.450, -122.178), (37.452, -122.176)],
            100,
            65,
            &["Battery Pack", "GPS Module", "Camera Gimbal"],
        ),
        zone(
            "B2",
            "Zone B2 - Parts",
            ZoneType::Storage,
            [(37.452, -122.178), (37.454, -122.176)],
            80,
            45,
            &["Propellers", "Sensors"],
        ),
        zone(
            "C3",
            "Zone C3 - Accessories",
            ZoneType::Storage,
            [(37.454, -122.178), (37.456, -122.176)],
            120,
            85,
            &["Delivery Container"],
        ),
        zone(
            "DOCK",
            "Loading Dock",
            ZoneType::Receiving,
            [(37.448, -122.180), (37.450, -122.178)],
            50,
            30,
            &[],
        ),
    ]
}

pub fn demo_warehouse() -> DomainResult<Warehouse> {
    let mut warehouse = Warehouse::new();
    for zone in demo_zones() {
        warehouse.add_zone(WarehouseZone::new(zone)?)?;
    }
    Ok(warehouse)
}
