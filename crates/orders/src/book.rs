//! The order collection owned by the orders view.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use skyhub_core::{Aggregate, DomainError, DomainResult};
use skyhub_events::EventLog;

use crate::filter::{OrderFilter, filter_orders};
use crate::order::{
    CancelOrder, CompleteOrder, CreateOrder, Order, OrderCommand, OrderEvent, OrderId, OrderStatus,
    OrderType, StartProcessing,
};

pub const AGGREGATE_TYPE: &str = "orders.order";

/// Counters for the order stat cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub inbound: usize,
    pub outbound: usize,
    pub total_items: u64,
}

impl OrderStats {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut stats = Self::default();
        for order in orders {
            stats.total += 1;
            stats.total_items += u64::from(order.items());
            match order.status() {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Processing => stats.processing += 1,
                OrderStatus::Completed => stats.completed += 1,
                OrderStatus::Cancelled => stats.cancelled += 1,
            }
            match order.order_type() {
                OrderType::Inbound => stats.inbound += 1,
                OrderType::Outbound => stats.outbound += 1,
            }
        }
        stats
    }
}

#[derive(Debug, Clone)]
pub struct OrderBook {
    orders: Vec<Order>,
    events: EventLog<OrderEvent>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            events: EventLog::new(AGGREGATE_TYPE),
        }
    }

    pub fn create_order(&mut self, cmd: CreateOrder) -> DomainResult<&Order> {
        self.execute(OrderCommand::CreateOrder(cmd))
    }

    pub fn start_processing(&mut self, order_id: &OrderId, drone: Option<&str>) -> DomainResult<&Order> {
        self.execute(OrderCommand::StartProcessing(StartProcessing {
            order_id: *order_id,
            assigned_drone: drone.map(str::to_string),
            occurred_at: Utc::now(),
        }))
    }

    pub fn complete(&mut self, order_id: &OrderId) -> DomainResult<&Order> {
        self.execute(OrderCommand::CompleteOrder(CompleteOrder {
            order_id: *order_id,
            occurred_at: Utc::now(),
        }))
    }

    pub fn cancel(&mut self, order_id: &OrderId, reason: Option<&str>) -> DomainResult<&Order> {
        self.execute(OrderCommand::CancelOrder(CancelOrder {
            order_id: *order_id,
            reason: reason.map(str::to_string),
            occurred_at: Utc::now(),
        }))
    }

    pub fn execute(&mut self, command: OrderCommand) -> DomainResult<&Order> {
        let order_id = command.order_id();
        let existing = self.orders.iter().position(|o| o.id_typed() == order_id);

        let index = match (&command, existing) {
            (OrderCommand::CreateOrder(cmd), Some(_)) => {
                return Err(DomainError::conflict(format!(
                    "order {} already exists",
                    cmd.order_number
                )));
            }
            (OrderCommand::CreateOrder(cmd), None) => {
                if self.orders.iter().any(|o| o.order_number() == cmd.order_number.trim()) {
                    return Err(DomainError::conflict(format!(
                        "order number {} already in use",
                        cmd.order_number
                    )));
                }
                self.orders.push(Order::empty(order_id));
                self.orders.len() - 1
            }
            (_, Some(index)) => index,
            (_, None) => return Err(DomainError::not_found()),
        };

        let events = match self.orders[index].execute(&command) {
            Ok(events) => events,
            Err(err) => {
                if !self.orders[index].is_created() {
                    self.orders.remove(index);
                }
                tracing::debug!(%order_id, error = %err, "order command rejected");
                return Err(err);
            }
        };

        let order = &self.orders[index];
        tracing::debug!(
            %order_id,
            order_number = order.order_number(),
            status = %order.status(),
            "order updated"
        );

        self.events.extend(order_id.0, events);
        Ok(&self.orders[index])
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id_typed() == *order_id)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn search(&self, filter: &OrderFilter) -> Vec<&Order> {
        filter_orders(&self.orders, filter)
    }

    pub fn stats(&self) -> OrderStats {
        OrderStats::from_orders(&self.orders)
    }

    /// Drones currently flying a processing order, distinct and sorted.
    pub fn active_drones(&self) -> Vec<&str> {
        self.orders
            .iter()
            .filter(|o| o.status() == OrderStatus::Processing)
            .filter_map(Order::assigned_drone)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn events(&self) -> &EventLog<OrderEvent> {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_book;
    use chrono::{NaiveDate, TimeZone};
    use skyhub_core::AggregateId;

    fn create(n: u128, number: &str) -> CreateOrder {
        CreateOrder {
            order_id: OrderId::new(AggregateId::from_u128(n)),
            order_number: number.to_string(),
            order_type: OrderType::Inbound,
            items: 4,
            destination: "Loading Dock".to_string(),
            scheduled_date: NaiveDate::from_ymd_opt(2025, 1, 24).unwrap(),
            assigned_drone: None,
            occurred_at: Utc.with_ymd_and_hms(2025, 1, 23, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn demo_stats_match_the_orders_view() {
        let stats = demo_book().unwrap().stats();
        assert_eq!(
            stats,
            OrderStats {
                total: 4,
                pending: 1,
                processing: 2,
                completed: 1,
                cancelled: 0,
                inbound: 2,
                outbound: 2,
                total_items: 57,
            }
        );
    }

    #[test]
    fn duplicate_order_numbers_conflict() {
        let mut book = OrderBook::new();
        book.create_order(create(1, "ORD-100")).unwrap();
        let err = book.create_order(create(2, "ORD-100")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn lifecycle_through_the_book() {
        let mut book = OrderBook::new();
        let id = book.create_order(create(1, "ORD-100")).unwrap().id_typed();

        book.start_processing(&id, Some("Drone Gamma")).unwrap();
        let order = book.complete(&id).unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
        assert_eq!(order.assigned_drone(), Some("Drone Gamma"));

        assert!(book.cancel(&id, None).is_err());
        assert_eq!(book.events().len(), 3);
    }

    #[test]
    fn active_drones_come_from_processing_orders() {
        let mut book = demo_book().unwrap();
        assert_eq!(book.active_drones(), vec!["Drone Alpha", "Drone Gamma"]);

        // A second order on the same drone is counted once.
        let id = book.create_order(create(1, "ORD-100")).unwrap().id_typed();
        book.start_processing(&id, Some("Drone Alpha")).unwrap();
        assert_eq!(book.active_drones(), vec!["Drone Alpha", "Drone Gamma"]);

        // Unassigned processing orders contribute nothing.
        let id = book.create_order(create(2, "ORD-101")).unwrap().id_typed();
        book.start_processing(&id, None).unwrap();
        assert_eq!(book.active_drones().len(), 2);

        assert!(OrderBook::new().active_drones().is_empty());
    }

    #[test]
    fn unknown_order_is_not_found() {
        let mut book = OrderBook::new();
        let id = OrderId::new(AggregateId::from_u128(99));
        assert_eq!(book.complete(&id).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn rejected_create_leaves_no_placeholder() {
        let mut book = OrderBook::new();
        let mut cmd = create(1, "ORD-100");
        cmd.destination = String::new();
        assert!(book.create_order(cmd).is_err());
        assert!(book.is_empty());
    }
}
