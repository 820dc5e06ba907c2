//! Demo orders shown on a fresh dashboard.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use skyhub_core::{AggregateId, DomainError, DomainResult};

use crate::book::OrderBook;
use crate::order::{
    CompleteOrder, CreateOrder, OrderCommand, OrderId, OrderStatus, OrderType, StartProcessing,
};

struct DemoOrder {
    n: u128,
    number: &'static str,
    order_type: OrderType,
    status: OrderStatus,
    items: u32,
    destination: &'static str,
    scheduled: (i32, u32, u32),
    drone: Option<&'static str>,
    created: (u32, u32, u32),
}

const DEMO: [DemoOrder; 4] = [
    DemoOrder {
        n: 101,
        number: "ORD-001",
        order_type: OrderType::Outbound,
        status: OrderStatus::Processing,
        items: 15,
        destination: "Warehouse A1",
        scheduled: (2025, 1, 23),
        drone: Some("Drone Alpha"),
        created: (22, 10, 30),
    },
    DemoOrder {
        n: 102,
        number: "ORD-002",
        order_type: OrderType::Inbound,
        status: OrderStatus::Pending,
        items: 8,
        destination: "Loading Dock",
        scheduled: (2025, 1, 23),
        drone: None,
        created: (22, 14, 15),
    },
    DemoOrder {
        n: 103,
        number: "ORD-003",
        order_type: OrderType::Outbound,
        status: OrderStatus::Completed,
        items: 22,
        destination: "Warehouse B2",
        scheduled: (2025, 1, 22),
        drone: Some("Drone Beta"),
        created: (22, 9, 0),
    },
    DemoOrder {
        n: 104,
        number: "ORD-004",
        order_type: OrderType::Inbound,
        status: OrderStatus::Processing,
        items: 12,
        destination: "Receiving Area",
        scheduled: (2025, 1, 23),
        drone: Some("Drone Gamma"),
        created: (22, 11, 45),
    },
];

fn created_at((day, hour, min): (u32, u32, u32)) -> DomainResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, min, 0)
        .single()
        .ok_or_else(|| DomainError::validation("invalid demo timestamp"))
}

/// An order book holding the demo orders, each driven to its listed status.
pub fn demo_book() -> DomainResult<OrderBook> {
    let mut book = OrderBook::new();
    for demo in &DEMO {
        let order_id = OrderId::new(AggregateId::from_u128(demo.n));
        let at = created_at(demo.created)?;
        let (y, m, d) = demo.scheduled;
        let scheduled_date = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| DomainError::validation("invalid demo date"))?;

        book.execute(OrderCommand::CreateOrder(CreateOrder {
            order_id,
            order_number: demo.number.to_string(),
            order_type: demo.order_type,
            items: demo.items,
            destination: demo.destination.to_string(),
            scheduled_date,
            assigned_drone: None,
            occurred_at: at,
        }))?;

        if matches!(demo.status, OrderStatus::Processing | OrderStatus::Completed) {
            book.execute(OrderCommand::StartProcessing(StartProcessing {
                order_id,
                assigned_drone: demo.drone.map(str::to_string),
                occurred_at: at,
            }))?;
        }
        if demo.status == OrderStatus::Completed {
            book.execute(OrderCommand::CompleteOrder(CompleteOrder {
                order_id,
                occurred_at: at,
            }))?;
        }
    }
    Ok(book)
}
