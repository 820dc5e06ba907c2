//! Domain events and the in-memory activity log the stores append to.

pub mod envelope;
pub mod event;
pub mod log;

pub use envelope::EventEnvelope;
pub use event::Event;
pub use log::EventLog;
