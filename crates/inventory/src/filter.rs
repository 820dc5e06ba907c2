//! Search-box and dropdown filtering over inventory items.

use skyhub_core::selection::ALL;
use skyhub_core::{DomainResult, Selection, contains_ignore_case};

use crate::item::InventoryItem;
use crate::status::StockStatus;

/// Query plus category/status selections, as chosen in the inventory view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemFilter {
    pub query: String,
    pub category: Selection<String>,
    pub status: Selection<StockStatus>,
}

impl ItemFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Restrict to one category. The `"all"` sentinel clears the restriction.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category_selection(Some(category.into()));
        self
    }

    pub fn status(mut self, status: StockStatus) -> Self {
        self.status = Selection::Only(status);
        self
    }

    /// Build from raw view parameters. `None` or `"all"` disables a dropdown.
    ///
    /// Fails with `Validation` if `status` is not a known stock status.
    pub fn from_params(
        query: &str,
        category: Option<&str>,
        status: Option<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            query: query.to_string(),
            category: category_selection(category.map(str::to_string)),
            status: Selection::parse(status)?,
        })
    }

    /// Text match on name, SKU or location; both dropdowns must admit the item.
    pub fn matches(&self, item: &InventoryItem) -> bool {
        self.matches_text(item)
            && self
                .category
                .as_option()
                .is_none_or(|c| c == item.category())
            && self.status.matches(&item.status())
    }

    fn matches_text(&self, item: &InventoryItem) -> bool {
        let q = self.query.as_str();
        contains_ignore_case(item.name(), q)
            || item.sku().is_some_and(|sku| contains_ignore_case(sku, q))
            || contains_ignore_case(item.location(), q)
    }
}

fn category_selection(category: Option<String>) -> Selection<String> {
    Selection::from_option(category.filter(|c| c != ALL))
}

/// Items admitted by `filter`, in their original order.
pub fn filter_items(items: &[InventoryItem], filter: &ItemFilter) -> Vec<InventoryItem> {
    items.iter().filter(|item| filter.matches(item)).cloned().collect()
}
