//! Derived key metrics for the analytics page and the fleet card.

use serde::{Deserialize, Serialize};

use skyhub_inventory::InventoryStore;
use skyhub_orders::OrderBook;
use skyhub_warehouse::Warehouse;

/// Key metrics derived from the current state of the three stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsMetrics {
    pub total_orders: usize,
    pub completed_orders: usize,
    /// Completed orders as a percentage of all orders; `0.0` with no orders.
    pub order_completion_rate: f64,
    /// Items at or below their minimum, out-of-stock included.
    pub low_stock_alerts: usize,
    pub out_of_stock_items: usize,
    /// Distinct drones assigned to a processing order, sorted.
    pub active_drones: Vec<String>,
    pub warehouse_zones: usize,
    pub average_zone_utilization: f64,
}

impl AnalyticsMetrics {
    pub fn from_stores(inventory: &InventoryStore, orders: &OrderBook, warehouse: &Warehouse) -> Self {
        let order_stats = orders.stats();
        let inventory_summary = inventory.summary();
        let overview = warehouse.overview();

        Self {
            total_orders: order_stats.total,
            completed_orders: order_stats.completed,
            order_completion_rate: percentage(order_stats.completed, order_stats.total),
            low_stock_alerts: inventory_summary.low_stock + inventory_summary.out_of_stock,
            out_of_stock_items: inventory_summary.out_of_stock,
            active_drones: orders.active_drones().into_iter().map(str::to_string).collect(),
            warehouse_zones: overview.total_zones,
            average_zone_utilization: overview.average_utilization,
        }
    }

    pub fn active_drone_count(&self) -> usize {
        self.active_drones.len()
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}
