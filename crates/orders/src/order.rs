//! The `Order` aggregate: inbound/outbound drone orders and their lifecycle.

use core::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use skyhub_core::{Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult};
use skyhub_events::Event;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub AggregateId);

impl OrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Direction of the movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Inbound,
    Outbound,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }
}

impl FromStr for OrderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inbound" => Ok(Self::Inbound),
            "outbound" => Ok(Self::Outbound),
            other => Err(DomainError::validation(format!("unknown order type: {other:?}"))),
        }
    }
}

/// Order status lifecycle.
///
/// `Pending -> Processing -> Completed`, with `Cancelled` reachable from
/// either open state. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing) | (Processing, Completed) | (Pending, Cancelled) | (Processing, Cancelled)
        )
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::validation(format!("unknown order status: {other:?}"))),
        }
    }
}

/// Aggregate root: Order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    order_number: String,
    order_type: OrderType,
    status: OrderStatus,
    items: u32,
    destination: String,
    scheduled_date: NaiveDate,
    assigned_drone: Option<String>,
    created_at: DateTime<Utc>,
    version: u64,
    created: bool,
}

impl Order {
    /// Create an empty, not-yet-created aggregate instance.
    pub fn empty(id: OrderId) -> Self {
        Self {
            id,
            order_number: String::new(),
            order_type: OrderType::Outbound,
            status: OrderStatus::Pending,
            items: 0,
            destination: String::new(),
            scheduled_date: NaiveDate::MIN,
            assigned_drone: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> u32 {
        self.items
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn scheduled_date(&self) -> NaiveDate {
        self.scheduled_date
    }

    pub fn assigned_drone(&self) -> Option<&str> {
        self.assigned_drone.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_created(&self) -> bool {
        self.created
    }
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrder {
    pub order_id: OrderId,
    pub order_number: String,
    pub order_type: OrderType,
    pub items: u32,
    pub destination: String,
    pub scheduled_date: NaiveDate,
    pub assigned_drone: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: StartProcessing. A drone given here replaces any earlier assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartProcessing {
    pub order_id: OrderId,
    pub assigned_drone: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CompleteOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteOrder {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CancelOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrder {
    pub order_id: OrderId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderCommand {
    CreateOrder(CreateOrder),
    StartProcessing(StartProcessing),
    CompleteOrder(CompleteOrder),
    CancelOrder(CancelOrder),
}

impl OrderCommand {
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderCommand::CreateOrder(c) => c.order_id,
            OrderCommand::StartProcessing(c) => c.order_id,
            OrderCommand::CompleteOrder(c) => c.order_id,
            OrderCommand::CancelOrder(c) => c.order_id,
        }
    }
}

/// Event: OrderCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: OrderId,
    pub order_number: String,
    pub order_type: OrderType,
    pub items: u32,
    pub destination: String,
    pub scheduled_date: NaiveDate,
    pub assigned_drone: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProcessingStarted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingStarted {
    pub order_id: OrderId,
    pub assigned_drone: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderCompleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCompleted {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderCancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub order_id: OrderId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderCreated(OrderCreated),
    ProcessingStarted(ProcessingStarted),
    OrderCompleted(OrderCompleted),
    OrderCancelled(OrderCancelled),
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderCreated(_) => "orders.order.created",
            OrderEvent::ProcessingStarted(_) => "orders.order.processing_started",
            OrderEvent::OrderCompleted(_) => "orders.order.completed",
            OrderEvent::OrderCancelled(_) => "orders.order.cancelled",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderCreated(e) => e.occurred_at,
            OrderEvent::ProcessingStarted(e) => e.occurred_at,
            OrderEvent::OrderCompleted(e) => e.occurred_at,
            OrderEvent::OrderCancelled(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Order {
    type Command = OrderCommand;
    type Event = OrderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OrderEvent::OrderCreated(e) => {
                self.id = e.order_id;
                self.order_number = e.order_number.clone();
                self.order_type = e.order_type;
                self.status = OrderStatus::Pending;
                self.items = e.items;
                self.destination = e.destination.clone();
                self.scheduled_date = e.scheduled_date;
                self.assigned_drone = e.assigned_drone.clone();
                self.created_at = e.occurred_at;
                self.created = true;
            }
            OrderEvent::ProcessingStarted(e) => {
                if e.assigned_drone.is_some() {
                    self.assigned_drone = e.assigned_drone.clone();
                }
                self.status = OrderStatus::Processing;
            }
            OrderEvent::OrderCompleted(_) => {
                self.status = OrderStatus::Completed;
            }
            OrderEvent::OrderCancelled(_) => {
                self.status = OrderStatus::Cancelled;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::CreateOrder(cmd) => self.handle_create(cmd),
            OrderCommand::StartProcessing(cmd) => {
                self.ensure_transition(cmd.order_id, OrderStatus::Processing)?;
                Ok(vec![OrderEvent::ProcessingStarted(ProcessingStarted {
                    order_id: cmd.order_id,
                    assigned_drone: non_blank(cmd.assigned_drone.as_deref()),
                    occurred_at: cmd.occurred_at,
                })])
            }
            OrderCommand::CompleteOrder(cmd) => {
                self.ensure_transition(cmd.order_id, OrderStatus::Completed)?;
                Ok(vec![OrderEvent::OrderCompleted(OrderCompleted {
                    order_id: cmd.order_id,
                    occurred_at: cmd.occurred_at,
                })])
            }
            OrderCommand::CancelOrder(cmd) => {
                self.ensure_transition(cmd.order_id, OrderStatus::Cancelled)?;
                Ok(vec![OrderEvent::OrderCancelled(OrderCancelled {
                    order_id: cmd.order_id,
                    reason: non_blank(cmd.reason.as_deref()),
                    occurred_at: cmd.occurred_at,
                })])
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

impl Order {
    fn ensure_order_id(&self, order_id: OrderId) -> DomainResult<()> {
        if self.id != order_id {
            return Err(DomainError::invariant("order_id mismatch"));
        }
        Ok(())
    }

    fn ensure_transition(&self, order_id: OrderId, next: OrderStatus) -> DomainResult<()> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_order_id(order_id)?;
        if !self.status.can_transition_to(next) {
            return Err(DomainError::invariant(format!(
                "order {} cannot move from {} to {}",
                self.order_number, self.status, next
            )));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateOrder) -> DomainResult<Vec<OrderEvent>> {
        if self.created {
            return Err(DomainError::conflict("order already exists"));
        }
        self.ensure_order_id(cmd.order_id)?;
        if cmd.order_number.trim().is_empty() {
            return Err(DomainError::validation("order_number cannot be empty"));
        }
        if cmd.destination.trim().is_empty() {
            return Err(DomainError::validation("destination cannot be empty"));
        }

        Ok(vec![OrderEvent::OrderCreated(OrderCreated {
            order_id: cmd.order_id,
            order_number: cmd.order_number.trim().to_string(),
            order_type: cmd.order_type,
            items: cmd.items,
            destination: cmd.destination.clone(),
            scheduled_date: cmd.scheduled_date,
            assigned_drone: non_blank(cmd.assigned_drone.as_deref()),
            occurred_at: cmd.occurred_at,
        })])
    }
}
