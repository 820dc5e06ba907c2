//! Warehouse zones: search and utilization overview.

pub mod seed;
pub mod warehouse;
pub mod zone;

pub use warehouse::{Warehouse, WarehouseOverview, search_zones};
pub use zone::{GeoPoint, NewZone, WarehouseZone, ZoneId, ZoneType};
