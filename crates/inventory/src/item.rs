//! The `InventoryItem` aggregate and the quantity adjustment rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skyhub_core::{Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult};
use skyhub_events::Event;

use crate::status::{StockStatus, derive_status};

/// Inventory item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub AggregateId);

impl ItemId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: InventoryItem.
///
/// `status` is not a field: it is derived from `quantity` and `min_quantity`
/// on every read, so it can never disagree with them. `min_quantity` has no
/// setter and is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ItemRecord", try_from = "ItemRecord")]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    sku: Option<String>,
    quantity: u64,
    min_quantity: u64,
    category: String,
    location: String,
    last_updated: DateTime<Utc>,
    version: u64,
    created: bool,
}

impl InventoryItem {
    /// Create an empty, not-yet-created aggregate instance.
    pub fn empty(id: ItemId) -> Self {
        Self {
            id,
            name: String::new(),
            sku: None,
            quantity: 0,
            min_quantity: 0,
            category: String::new(),
            location: String::new(),
            last_updated: DateTime::<Utc>::UNIX_EPOCH,
            version: 0,
            created: false,
        }
    }

    /// Build a created item straight from a command.
    pub fn create(cmd: CreateItem) -> DomainResult<Self> {
        let mut item = Self::empty(cmd.item_id);
        item.execute(&InventoryCommand::CreateItem(cmd))?;
        Ok(item)
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn min_quantity(&self) -> u64 {
        self.min_quantity
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn status(&self) -> StockStatus {
        derive_status(self.quantity, self.min_quantity)
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Copy of this item with `delta` applied at time `at`.
    ///
    /// Never fails: decrements clamp at zero and increments saturate.
    pub fn adjusted(&self, delta: i64, at: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.apply(&InventoryEvent::QuantityAdjusted(
            self.quantity_adjusted(delta, at),
        ));
        next
    }

    fn quantity_adjusted(&self, delta: i64, at: DateTime<Utc>) -> QuantityAdjusted {
        let new_quantity = clamp_adjust(self.quantity, delta);
        QuantityAdjusted {
            item_id: self.id,
            delta,
            previous_quantity: self.quantity,
            new_quantity,
            status: derive_status(new_quantity, self.min_quantity),
            occurred_at: at,
        }
    }
}

/// `max(0, quantity + delta)`, saturating at `u64::MAX` on the way up.
fn clamp_adjust(quantity: u64, delta: i64) -> u64 {
    if delta >= 0 {
        quantity.saturating_add(delta.unsigned_abs())
    } else {
        quantity.saturating_sub(delta.unsigned_abs())
    }
}

/// Apply `delta` to a copy of `item`, stamped with the current time.
pub fn adjust_quantity(item: &InventoryItem, delta: i64) -> InventoryItem {
    item.adjusted(delta, Utc::now())
}

impl AggregateRoot for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Serialized view of an item, status included.
///
/// On the way in `status` is ignored and recomputed. `version` counts the
/// events applied so far and defaults to zero when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub quantity: u64,
    pub min_quantity: u64,
    pub category: String,
    #[serde(default, skip_deserializing)]
    pub status: Option<StockStatus>,
    pub location: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

impl From<InventoryItem> for ItemRecord {
    fn from(item: InventoryItem) -> Self {
        let status = Some(item.status());
        Self {
            id: item.id,
            name: item.name,
            sku: item.sku,
            quantity: item.quantity,
            min_quantity: item.min_quantity,
            category: item.category,
            status,
            location: item.location,
            last_updated: item.last_updated,
            version: item.version,
        }
    }
}

impl TryFrom<ItemRecord> for InventoryItem {
    type Error = DomainError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let mut item = InventoryItem::create(CreateItem {
            item_id: record.id,
            name: record.name,
            sku: record.sku,
            quantity: record.quantity,
            min_quantity: record.min_quantity,
            category: record.category,
            location: record.location,
            occurred_at: record.last_updated,
        })?;
        item.version = record.version;
        Ok(item)
    }
}

/// Command: CreateItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItem {
    pub item_id: ItemId,
    pub name: String,
    pub sku: Option<String>,
    pub quantity: u64,
    pub min_quantity: u64,
    pub category: String,
    pub location: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AdjustQuantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustQuantity {
    pub item_id: ItemId,
    pub delta: i64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    CreateItem(CreateItem),
    AdjustQuantity(AdjustQuantity),
}

impl InventoryCommand {
    pub fn item_id(&self) -> ItemId {
        match self {
            InventoryCommand::CreateItem(c) => c.item_id,
            InventoryCommand::AdjustQuantity(c) => c.item_id,
        }
    }
}

/// Event: ItemCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCreated {
    pub item_id: ItemId,
    pub name: String,
    pub sku: Option<String>,
    pub quantity: u64,
    pub min_quantity: u64,
    pub category: String,
    pub location: String,
    pub status: StockStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityAdjusted.
///
/// Carries the resolved quantity so `apply` does not redo the clamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityAdjusted {
    pub item_id: ItemId,
    pub delta: i64,
    pub previous_quantity: u64,
    pub new_quantity: u64,
    pub status: StockStatus,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemCreated(ItemCreated),
    QuantityAdjusted(QuantityAdjusted),
}

impl InventoryEvent {
    pub fn item_id(&self) -> ItemId {
        match self {
            InventoryEvent::ItemCreated(e) => e.item_id,
            InventoryEvent::QuantityAdjusted(e) => e.item_id,
        }
    }
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemCreated(_) => "inventory.item.created",
            InventoryEvent::QuantityAdjusted(_) => "inventory.item.quantity_adjusted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemCreated(e) => e.occurred_at,
            InventoryEvent::QuantityAdjusted(e) => e.occurred_at,
        }
    }
}

impl Aggregate for InventoryItem {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::ItemCreated(e) => {
                self.id = e.item_id;
                self.name = e.name.clone();
                self.sku = e.sku.clone();
                self.quantity = e.quantity;
                self.min_quantity = e.min_quantity;
                self.category = e.category.clone();
                self.location = e.location.clone();
                self.last_updated = e.occurred_at;
                self.created = true;
            }
            InventoryEvent::QuantityAdjusted(e) => {
                self.quantity = e.new_quantity;
                self.last_updated = e.occurred_at;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::CreateItem(cmd) => self.handle_create(cmd),
            InventoryCommand::AdjustQuantity(cmd) => self.handle_adjust(cmd),
        }
    }
}

impl InventoryItem {
    fn ensure_item_id(&self, item_id: ItemId) -> Result<(), DomainError> {
        if self.id != item_id {
            return Err(DomainError::invariant("item_id mismatch"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateItem) -> Result<Vec<InventoryEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("item already exists"));
        }
        self.ensure_item_id(cmd.item_id)?;
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let sku = cmd
            .sku
            .as_ref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(vec![InventoryEvent::ItemCreated(ItemCreated {
            item_id: cmd.item_id,
            name: cmd.name.clone(),
            sku,
            quantity: cmd.quantity,
            min_quantity: cmd.min_quantity,
            category: cmd.category.clone(),
            location: cmd.location.clone(),
            status: derive_status(cmd.quantity, cmd.min_quantity),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_adjust(&self, cmd: &AdjustQuantity) -> Result<Vec<InventoryEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_item_id(cmd.item_id)?;

        Ok(vec![InventoryEvent::QuantityAdjusted(
            self.quantity_adjusted(cmd.delta, cmd.occurred_at),
        )])
    }
}
