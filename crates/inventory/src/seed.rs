//! Demo inventory shown on a fresh dashboard.

use chrono::{DateTime, TimeZone, Utc};

use skyhub_core::{AggregateId, DomainError, DomainResult};

use crate::item::{CreateItem, ItemId};
use crate::store::InventoryStore;

fn at(day: u32, hour: u32, min: u32) -> DomainResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, min, 0)
        .single()
        .ok_or_else(|| DomainError::validation("invalid demo timestamp"))
}

#[allow(clippy::too_many_arguments)]
fn entry(
    n: u128,
    name: &str,
    sku: &str,
    quantity: u64,
    min_quantity: u64,
    category: &str,
    location: &str,
    updated: DateTime<Utc>,
) -> CreateItem {
    CreateItem {
        item_id: ItemId::new(AggregateId::from_u128(n)),
        name: name.to_string(),
        sku: Some(sku.to_string()),
        quantity,
        min_quantity,
        category: category.to_string(),
        location: location.to_string(),
        occurred_at: updated,
    }
}

/// Creation commands for the demo items.
pub fn demo_items() -> DomainResult<Vec<CreateItem>> {
    Ok(vec![
        entry(1, "Battery Pack", "BAT-001", 25, 10, "Power", "Warehouse A1", at(22, 10, 30)?),
        entry(2, "Propellers", "PROP-002", 8, 10, "Parts", "Warehouse B2", at(22, 9, 15)?),
        entry(3, "GPS Module", "GPS-003", 0, 5, "Electronics", "Warehouse C3", at(21, 14, 20)?),
        entry(4, "Camera Gimbal", "CAM-004", 15, 5, "Electronics", "Warehouse A2", at(22, 11, 0)?),
        entry(5, "Delivery Container", "CONT-005", 45, 20, "Accessories", "Warehouse D1", at(22, 8, 45)?),
        entry(6, "Sensors", "SENS-006", 3, 10, "Electronics", "Warehouse B1", at(22, 7, 30)?),
    ])
}

/// A store pre-populated with [`demo_items`].
pub fn demo_store() -> DomainResult<InventoryStore> {
    let mut store = InventoryStore::new();
    for cmd in demo_items()? {
        store.create_item(cmd)?;
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StockStatus;

    #[test]
    fn demo_statuses_match_thresholds() {
        let store = demo_store().unwrap();
        let statuses: Vec<StockStatus> = store.items().iter().map(|i| i.status()).collect();
        assert_eq!(
            statuses,
            vec![
                StockStatus::InStock,
                StockStatus::LowStock,
                StockStatus::OutOfStock,
                StockStatus::InStock,
                StockStatus::InStock,
                StockStatus::LowStock,
            ]
        );
    }

    #[test]
    fn bad_demo_timestamp_is_an_error() {
        assert!(at(22, 10, 30).is_ok());
        assert!(matches!(at(32, 0, 0), Err(DomainError::Validation(_))));
    }

    #[test]
    fn demo_categories() {
        let store = demo_store().unwrap();
        assert_eq!(store.categories(), vec!["Power", "Parts", "Electronics", "Accessories"]);
    }
}
