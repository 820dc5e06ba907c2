//! Owned inventory collection with a defined mutation API.
//!
//! The store is the single owner of the item list. Callers mutate it only
//! through `create_item` / `adjust_quantity` / `execute`; every accepted
//! command is appended to the activity log.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use skyhub_core::{Aggregate, DomainError, DomainResult};
use skyhub_events::EventLog;

use crate::filter::{ItemFilter, filter_items};
use crate::item::{AdjustQuantity, CreateItem, InventoryCommand, InventoryEvent, InventoryItem, ItemId};
use crate::status::StockStatus;

pub const AGGREGATE_TYPE: &str = "inventory.item";

/// Headline numbers for the inventory cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_items: usize,
    pub total_units: u64,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

#[derive(Debug, Clone)]
pub struct InventoryStore {
    items: Vec<InventoryItem>,
    events: EventLog<InventoryEvent>,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            events: EventLog::new(AGGREGATE_TYPE),
        }
    }

    /// Add a new item. Duplicate ids are a `Conflict`.
    pub fn create_item(&mut self, cmd: CreateItem) -> DomainResult<&InventoryItem> {
        self.execute(InventoryCommand::CreateItem(cmd))
    }

    /// Adjust an item's quantity by `delta`, stamped now.
    pub fn adjust_quantity(&mut self, item_id: &ItemId, delta: i64) -> DomainResult<&InventoryItem> {
        self.execute(InventoryCommand::AdjustQuantity(AdjustQuantity {
            item_id: *item_id,
            delta,
            occurred_at: Utc::now(),
        }))
    }

    /// Run a command against the owning item and record its events.
    pub fn execute(&mut self, command: InventoryCommand) -> DomainResult<&InventoryItem> {
        let item_id = command.item_id();
        let index = match (&command, self.position(&item_id)) {
            (InventoryCommand::CreateItem(_), Some(_)) => {
                return Err(DomainError::conflict(format!("item {item_id} already exists")));
            }
            (InventoryCommand::CreateItem(_), None) => {
                self.items.push(InventoryItem::empty(item_id));
                self.items.len() - 1
            }
            (InventoryCommand::AdjustQuantity(_), Some(index)) => index,
            (InventoryCommand::AdjustQuantity(_), None) => return Err(DomainError::not_found()),
        };

        let before = self.items[index].status();
        let events = match self.items[index].execute(&command) {
            Ok(events) => events,
            Err(err) => {
                if !self.items[index].is_created() {
                    self.items.remove(index);
                }
                tracing::debug!(%item_id, error = %err, "inventory command rejected");
                return Err(err);
            }
        };

        let item = &self.items[index];
        match &command {
            InventoryCommand::CreateItem(_) => {
                tracing::debug!(%item_id, name = item.name(), quantity = item.quantity(), status = %item.status(), "item created");
            }
            InventoryCommand::AdjustQuantity(cmd) => {
                tracing::debug!(%item_id, delta = cmd.delta, quantity = item.quantity(), status = %item.status(), "quantity adjusted");
                let after = item.status();
                if after != before && after.needs_attention() {
                    tracing::warn!(%item_id, name = item.name(), quantity = item.quantity(), status = %after, "stock level needs attention");
                }
            }
        }

        self.events.extend(item_id.0, events);
        Ok(&self.items[index])
    }

    fn position(&self, item_id: &ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id_typed() == *item_id)
    }

    pub fn get(&self, item_id: &ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.id_typed() == *item_id)
    }

    /// All items, in insertion order.
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn search(&self, filter: &ItemFilter) -> Vec<InventoryItem> {
        filter_items(&self.items, filter)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category()) {
                seen.push(item.category());
            }
        }
        seen
    }

    /// Items that are low or out of stock, in insertion order.
    pub fn low_stock_alerts(&self) -> Vec<&InventoryItem> {
        self.items
            .iter()
            .filter(|i| i.status().needs_attention())
            .collect()
    }

    pub fn summary(&self) -> InventorySummary {
        self.items
            .iter()
            .fold(InventorySummary::default(), |mut acc, item| {
                acc.total_items += 1;
                acc.total_units = acc.total_units.saturating_add(item.quantity());
                match item.status() {
                    StockStatus::InStock => acc.in_stock += 1,
                    StockStatus::LowStock => acc.low_stock += 1,
                    StockStatus::OutOfStock => acc.out_of_stock += 1,
                }
                acc
            })
    }

    pub fn events(&self) -> &EventLog<InventoryEvent> {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};
    use skyhub_core::AggregateId;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 22, 8, 0, 0).unwrap()
    }

    fn cmd(n: u128, name: &str, qty: u64, min: u64, category: &str) -> CreateItem {
        CreateItem {
            item_id: ItemId::new(AggregateId::from_u128(n)),
            name: name.to_string(),
            sku: None,
            quantity: qty,
            min_quantity: min,
            category: category.to_string(),
            location: "Warehouse A1".to_string(),
            occurred_at: t0(),
        }
    }

    fn id(n: u128) -> ItemId {
        ItemId::new(AggregateId::from_u128(n))
    }

    fn store() -> InventoryStore {
        let mut store = InventoryStore::new();
        store.create_item(cmd(1, "Battery Pack", 25, 10, "Power")).unwrap();
        store.create_item(cmd(2, "Propellers", 8, 10, "Parts")).unwrap();
        store.create_item(cmd(3, "GPS Module", 0, 5, "Electronics")).unwrap();
        store.create_item(cmd(4, "Camera Gimbal", 15, 5, "Electronics")).unwrap();
        store
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let mut store = store();
        let err = store.create_item(cmd(1, "Again", 1, 1, "Power")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn failed_create_leaves_no_placeholder() {
        let mut store = store();
        let err = store.create_item(cmd(9, " ", 1, 1, "Power")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.len(), 4);
        assert!(store.get(&id(9)).is_none());
        assert_eq!(store.events().len(), 4);
    }

    #[test]
    fn adjust_unknown_item_is_not_found() {
        let mut store = store();
        assert_eq!(store.adjust_quantity(&id(42), 1).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn adjust_updates_in_place_and_logs() {
        let mut store = store();
        let item = store.adjust_quantity(&id(2), 5).unwrap();
        assert_eq!(item.quantity(), 13);
        assert_eq!(item.status(), StockStatus::InStock);
        assert!(item.last_updated() > t0());

        assert_eq!(store.events().len(), 5);
        let last = store.events().latest(1).next().unwrap();
        assert_eq!(last.aggregate_id(), id(2).0);
        assert_eq!(last.aggregate_type(), AGGREGATE_TYPE);
    }

    #[test]
    fn over_decrement_clamps() {
        let mut store = store();
        let item = store.adjust_quantity(&id(1), -999_999).unwrap();
        assert_eq!(item.quantity(), 0);
        assert_eq!(item.status(), StockStatus::OutOfStock);
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        assert_eq!(store().categories(), vec!["Power", "Parts", "Electronics"]);
    }

    #[test]
    fn alerts_cover_low_and_out_of_stock() {
        let store = store();
        let names: Vec<&str> = store.low_stock_alerts().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["Propellers", "GPS Module"]);
    }

    #[test]
    fn summary_counts_by_status() {
        let summary = store().summary();
        assert_eq!(
            summary,
            InventorySummary {
                total_items: 4,
                total_units: 48,
                in_stock: 2,
                low_stock: 1,
                out_of_stock: 1,
            }
        );
    }

    #[test]
    fn search_goes_through_filter() {
        let store = store();
        let found = store.search(&ItemFilter::new("").category("Electronics"));
        let names: Vec<&str> = found.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["GPS Module", "Camera Gimbal"]);
    }
}
