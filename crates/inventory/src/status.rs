//! Stock status derived from quantity vs. reorder threshold.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use skyhub_core::DomainError;

/// Stock level classification.
///
/// Never stored on its own: always computed by [`derive_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [Self::InStock, Self::LowStock, Self::OutOfStock];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in-stock",
            Self::LowStock => "low-stock",
            Self::OutOfStock => "out-of-stock",
        }
    }

    /// Low or out of stock: the item belongs on the alert banner.
    pub fn needs_attention(self) -> bool {
        !matches!(self, Self::InStock)
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown stock status: {s:?}")))
    }
}

/// Map `(quantity, min_quantity)` to a status.
///
/// Zero is always out of stock, whatever the threshold. With a threshold of
/// zero an item is never low-stock.
pub fn derive_status(quantity: u64, min_quantity: u64) -> StockStatus {
    if quantity == 0 {
        StockStatus::OutOfStock
    } else if quantity < min_quantity {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}
