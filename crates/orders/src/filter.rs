//! Search and dropdown filtering for the orders view.

use skyhub_core::{DomainResult, Selection, contains_ignore_case};

use crate::order::{Order, OrderStatus, OrderType};

/// Search text plus status/type dropdowns of the orders view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderFilter {
    pub query: String,
    pub status: Selection<OrderStatus>,
    pub order_type: Selection<OrderType>,
}

impl OrderFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Selection::Only(status);
        self
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Selection::Only(order_type);
        self
    }

    /// Build from raw view parameters; `None` or `"all"` disables a dropdown.
    pub fn from_params(query: &str, status: Option<&str>, order_type: Option<&str>) -> DomainResult<Self> {
        Ok(Self {
            query: query.to_string(),
            status: Selection::parse(status)?,
            order_type: Selection::parse(order_type)?,
        })
    }

    pub fn matches(&self, order: &Order) -> bool {
        (contains_ignore_case(order.order_number(), &self.query)
            || contains_ignore_case(order.destination(), &self.query))
            && self.status.matches(&order.status())
            && self.order_type.matches(&order.order_type())
    }
}

/// Orders admitted by `filter`, in their original order.
pub fn filter_orders<'a>(orders: &'a [Order], filter: &OrderFilter) -> Vec<&'a Order> {
    orders.iter().filter(|o| filter.matches(o)).collect()
}
