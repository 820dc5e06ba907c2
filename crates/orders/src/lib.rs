//! Order management: inbound/outbound drone movements and their lifecycle.

pub mod book;
pub mod filter;
pub mod order;
pub mod seed;

pub use book::{OrderBook, OrderStats};
pub use filter::{OrderFilter, filter_orders};
pub use order::{
    CancelOrder, CompleteOrder, CreateOrder, Order, OrderCancelled, OrderCommand, OrderCompleted,
    OrderCreated, OrderEvent, OrderId, OrderStatus, OrderType, ProcessingStarted, StartProcessing,
};
