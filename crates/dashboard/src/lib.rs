//! `skyhub-dashboard` — composes the inventory, order and warehouse stores into
//! the overview the dashboard renders.

pub mod analytics;
pub mod config;
pub mod dashboard;

pub use analytics::AnalyticsMetrics;
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{ActivityEntry, ActivityKind, Dashboard, DashboardSnapshot, StockAlert};
