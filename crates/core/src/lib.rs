//! `skyhub-core` — domain building blocks shared by the SkyHub contexts.
//!
//! Everything here is **pure domain** code: no IO, no clocks, no logging.

pub mod aggregate;
pub mod error;
pub mod id;
pub mod selection;
pub mod text;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::AggregateId;
pub use selection::Selection;
pub use text::contains_ignore_case;
