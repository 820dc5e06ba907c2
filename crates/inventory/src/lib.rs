//! Inventory domain module.
//!
//! Stock status derivation, quantity adjustment and search over an owned
//! collection of items. Deterministic domain logic only (no IO, no storage).

pub mod filter;
pub mod item;
pub mod seed;
pub mod status;
pub mod store;

pub use filter::{ItemFilter, filter_items};
pub use item::{
    AdjustQuantity, CreateItem, InventoryCommand, InventoryEvent, InventoryItem, ItemCreated,
    ItemId, ItemRecord, QuantityAdjusted, adjust_quantity,
};
pub use status::{StockStatus, derive_status};
pub use store::{InventoryStore, InventorySummary};
