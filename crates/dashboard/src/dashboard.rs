//! The dashboard: the three owned stores plus the views derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skyhub_core::DomainResult;
use skyhub_events::Event;
use skyhub_inventory::{InventoryEvent, InventoryStore, InventorySummary, ItemId, StockStatus};
use skyhub_orders::{OrderBook, OrderEvent, OrderId, OrderStats};
use skyhub_warehouse::{Warehouse, WarehouseOverview};

use crate::analytics::AnalyticsMetrics;

/// An item on the low-stock banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: u64,
    pub min_quantity: u64,
    pub status: StockStatus,
}

/// Everything the overview page renders, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub inventory: InventorySummary,
    pub orders: OrderStats,
    pub warehouse: WarehouseOverview,
    pub analytics: AnalyticsMetrics,
    pub alerts: Vec<StockAlert>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Inventory,
    Order,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub event_type: String,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub inventory: InventoryStore,
    pub orders: OrderBook,
    pub warehouse: Warehouse,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dashboard pre-loaded with the demo inventory, orders and zones.
    pub fn seeded() -> DomainResult<Self> {
        let dashboard = Self {
            inventory: skyhub_inventory::seed::demo_store()?,
            orders: skyhub_orders::seed::demo_book()?,
            warehouse: skyhub_warehouse::seed::demo_warehouse()?,
        };
        tracing::info!(
            items = dashboard.inventory.len(),
            orders = dashboard.orders.len(),
            zones = dashboard.warehouse.zones().len(),
            "demo data loaded"
        );
        Ok(dashboard)
    }

    pub fn alerts(&self) -> Vec<StockAlert> {
        self.inventory
            .low_stock_alerts()
            .into_iter()
            .map(|item| StockAlert {
                item_id: item.id_typed(),
                name: item.name().to_string(),
                quantity: item.quantity(),
                min_quantity: item.min_quantity(),
                status: item.status(),
            })
            .collect()
    }

    pub fn analytics(&self) -> AnalyticsMetrics {
        AnalyticsMetrics::from_stores(&self.inventory, &self.orders, &self.warehouse)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            generated_at: Utc::now(),
            inventory: self.inventory.summary(),
            orders: self.orders.stats(),
            warehouse: self.warehouse.overview(),
            analytics: self.analytics(),
            alerts: self.alerts(),
        }
    }

    /// Newest-first activity across inventory and orders, at most `limit` entries.
    pub fn recent_activity(&self, limit: usize) -> Vec<ActivityEntry> {
        let inventory = self
            .inventory
            .events()
            .entries()
            .iter()
            .map(|e| self.describe_inventory(e.payload()));
        let orders = self
            .orders
            .events()
            .entries()
            .iter()
            .map(|e| self.describe_order(e.payload()));

        let mut entries: Vec<ActivityEntry> = inventory.chain(orders).collect();
        // Stable: equal timestamps keep log order, reversed below.
        entries.sort_by_key(|e| e.occurred_at);
        entries.reverse();
        entries.truncate(limit);
        entries
    }

    fn item_name(&self, item_id: &ItemId) -> String {
        self.inventory
            .get(item_id)
            .map(|i| i.name().to_string())
            .unwrap_or_else(|| item_id.to_string())
    }

    fn order_number(&self, order_id: &OrderId) -> String {
        self.orders
            .get(order_id)
            .map(|o| o.order_number().to_string())
            .unwrap_or_else(|| order_id.to_string())
    }

    fn describe_inventory(&self, event: &InventoryEvent) -> ActivityEntry {
        let message = match event {
            InventoryEvent::ItemCreated(e) => format!("Item added: {} ({} units)", e.name, e.quantity),
            InventoryEvent::QuantityAdjusted(e) => {
                let name = self.item_name(&event.item_id());
                match e.status {
                    StockStatus::OutOfStock => format!("Out of stock: {name}"),
                    StockStatus::LowStock => format!("Low stock alert: {name}"),
                    StockStatus::InStock => format!(
                        "Stock adjusted: {name} {} -> {}",
                        e.previous_quantity, e.new_quantity
                    ),
                }
            }
        };
        ActivityEntry {
            kind: ActivityKind::Inventory,
            event_type: event.event_type().to_string(),
            message,
            occurred_at: event.occurred_at(),
        }
    }

    fn describe_order(&self, event: &OrderEvent) -> ActivityEntry {
        let message = match event {
            OrderEvent::OrderCreated(e) => {
                format!("New {} order {} created", e.order_type.as_str(), e.order_number)
            }
            OrderEvent::ProcessingStarted(e) => {
                let number = self.order_number(&e.order_id);
                match &e.assigned_drone {
                    Some(drone) => format!("Order {number} processing ({drone})"),
                    None => format!("Order {number} processing"),
                }
            }
            OrderEvent::OrderCompleted(e) => format!("Order {} completed", self.order_number(&e.order_id)),
            OrderEvent::OrderCancelled(e) => format!("Order {} cancelled", self.order_number(&e.order_id)),
        };
        ActivityEntry {
            kind: ActivityKind::Order,
            event_type: event.event_type().to_string(),
            message,
            occurred_at: event.occurred_at(),
        }
    }
}
