//! Black-box flow through the public API: seed, search, adjust, report.

use skyhub_core::{AggregateId, DomainError};
use skyhub_dashboard::{Dashboard, DashboardSnapshot};
use skyhub_inventory::{ItemFilter, ItemId, StockStatus, adjust_quantity, filter_items};
use skyhub_orders::{OrderFilter, OrderStatus};

fn item_id(n: u128) -> ItemId {
    ItemId::new(AggregateId::from_u128(n))
}

#[test]
fn search_then_restock_then_report() {
    let mut dashboard = Dashboard::seeded().unwrap();

    let filter = ItemFilter::from_params("prop", Some("all"), Some("all")).unwrap();
    assert_eq!(filter, ItemFilter::new("prop").category("all"));
    let found = dashboard.inventory.search(&filter);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "Propellers");
    assert_eq!(found[0].status(), StockStatus::LowStock);

    let updated = dashboard.inventory.adjust_quantity(&item_id(2), 5).unwrap();
    assert_eq!(updated.quantity(), 13);
    assert_eq!(updated.status(), StockStatus::InStock);

    let snapshot = dashboard.snapshot();
    assert_eq!(snapshot.inventory.low_stock, 1);
    assert!(snapshot.alerts.iter().all(|a| a.name != "Propellers"));

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: DashboardSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.inventory, snapshot.inventory);
}

#[test]
fn draining_an_item_marks_it_out_of_stock() {
    let mut dashboard = Dashboard::seeded().unwrap();
    let item = dashboard.inventory.adjust_quantity(&item_id(1), -999_999).unwrap();
    assert_eq!(item.quantity(), 0);
    assert_eq!(item.status(), StockStatus::OutOfStock);

    let out = dashboard
        .inventory
        .search(&ItemFilter::new("").status(StockStatus::OutOfStock));
    let names: Vec<&str> = out.iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["Battery Pack", "GPS Module"]);
}

#[test]
fn pure_adjustment_leaves_the_store_alone() {
    let dashboard = Dashboard::seeded().unwrap();
    let original = dashboard.inventory.get(&item_id(6)).unwrap();
    let preview = adjust_quantity(original, 20);
    assert_eq!(preview.quantity(), 23);
    assert_eq!(dashboard.inventory.get(&item_id(6)).unwrap().quantity(), 3);
}

#[test]
fn category_filter_is_exact() {
    let dashboard = Dashboard::seeded().unwrap();
    let electronics = filter_items(
        dashboard.inventory.items(),
        &ItemFilter::from_params("", Some("Electronics"), Some("all")).unwrap(),
    );
    assert_eq!(electronics.len(), 3);
    assert!(electronics.iter().all(|i| i.category() == "Electronics"));
}

#[test]
fn unknown_item_and_bad_filters_surface_domain_errors() {
    let mut dashboard = Dashboard::seeded().unwrap();
    assert_eq!(
        dashboard.inventory.adjust_quantity(&item_id(404), 1).unwrap_err(),
        DomainError::NotFound
    );
    assert!(matches!(
        ItemFilter::from_params("", None, Some("backordered")),
        Err(DomainError::Validation(_))
    ));
    assert!(OrderFilter::from_params("", Some("shipped"), None).is_err());
}

#[test]
fn order_lifecycle_shows_in_stats_and_activity() {
    let mut dashboard = Dashboard::seeded().unwrap();
    let pending = dashboard
        .orders
        .search(&OrderFilter::new("").status(OrderStatus::Pending))[0]
        .id_typed();

    dashboard.orders.start_processing(&pending, Some("Drone Delta")).unwrap();
    assert_eq!(
        dashboard.analytics().active_drones,
        vec!["Drone Alpha", "Drone Delta", "Drone Gamma"]
    );
    dashboard.orders.cancel(&pending, Some("weather")).unwrap();

    let snapshot = dashboard.snapshot();
    assert_eq!(snapshot.orders.pending, 0);
    assert_eq!(snapshot.orders.cancelled, 1);
    assert_eq!(snapshot.analytics.active_drone_count(), 2);
    assert_eq!(snapshot.analytics.order_completion_rate, 25.0);

    let latest = &dashboard.recent_activity(1)[0];
    assert_eq!(latest.message, "Order ORD-002 cancelled");
}
