//! Append-only, in-memory event log.
//!
//! The stores record every accepted event here; the dashboard reads it back
//! as its "recent activity" feed. Nothing is persisted.

use uuid::Uuid;

use skyhub_core::AggregateId;

use crate::envelope::EventEnvelope;
use crate::event::Event;

#[derive(Debug, Clone)]
pub struct EventLog<E> {
    aggregate_type: &'static str,
    entries: Vec<EventEnvelope<E>>,
}

impl<E: Event> EventLog<E> {
    pub fn new(aggregate_type: &'static str) -> Self {
        Self {
            aggregate_type,
            entries: Vec::new(),
        }
    }

    /// Append one event and return the sequence number it was given.
    pub fn append(&mut self, aggregate_id: AggregateId, event: E) -> u64 {
        let sequence_number = self.entries.len() as u64 + 1;
        self.entries.push(EventEnvelope::new(
            Uuid::now_v7(),
            aggregate_id,
            self.aggregate_type,
            sequence_number,
            event,
        ));
        sequence_number
    }

    pub fn extend(&mut self, aggregate_id: AggregateId, events: impl IntoIterator<Item = E>) {
        for event in events {
            self.append(aggregate_id, event);
        }
    }

    /// Entries in append order.
    pub fn entries(&self) -> &[EventEnvelope<E>] {
        &self.entries
    }

    /// Events recorded for one aggregate, in append order.
    pub fn for_aggregate(&self, aggregate_id: AggregateId) -> impl Iterator<Item = &EventEnvelope<E>> {
        self.entries
            .iter()
            .filter(move |e| e.aggregate_id() == aggregate_id)
    }

    /// The newest `limit` entries, newest first.
    pub fn latest(&self, limit: usize) -> impl Iterator<Item = &EventEnvelope<E>> {
        self.entries.iter().rev().take(limit)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    #[derive(Debug, Clone, PartialEq, serde::Serialize)]
    struct Ping(u32);

    impl Event for Ping {
        fn event_type(&self) -> &'static str {
            "test.ping"
        }

        fn version(&self) -> u32 {
            1
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 1, 22, 10, 0, 0).unwrap()
        }
    }

    #[test]
    fn sequence_numbers_start_at_one_and_increase() {
        let mut log = EventLog::new("test");
        let a = AggregateId::from_u128(1);
        assert_eq!(log.append(a, Ping(1)), 1);
        assert_eq!(log.append(a, Ping(2)), 2);
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[1].aggregate_type(), "test");
    }

    #[test]
    fn latest_is_newest_first_and_bounded() {
        let mut log = EventLog::new("test");
        let a = AggregateId::from_u128(1);
        log.extend(a, (1..=5).map(Ping));

        let latest: Vec<u32> = log.latest(2).map(|e| e.payload().0).collect();
        assert_eq!(latest, vec![5, 4]);
    }

    #[test]
    fn for_aggregate_filters_by_stream() {
        let mut log = EventLog::new("test");
        let a = AggregateId::from_u128(1);
        let b = AggregateId::from_u128(2);
        log.append(a, Ping(1));
        log.append(b, Ping(2));
        log.append(a, Ping(3));

        let seen: Vec<u32> = log.for_aggregate(a).map(|e| e.payload().0).collect();
        assert_eq!(seen, vec![1, 3]);
    }

    #[test]
    fn every_entry_gets_its_own_event_id() {
        let mut log = EventLog::new("test");
        log.extend(AggregateId::from_u128(1), (1..=3).map(Ping));
        let ids: std::collections::HashSet<Uuid> = log.entries().iter().map(|e| e.event_id()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn envelope_serializes_payload() {
        let mut log = EventLog::new("test");
        log.append(AggregateId::from_u128(9), Ping(42));
        let json = serde_json::to_value(&log.entries()[0]).unwrap();
        assert_eq!(json["payload"], 42);
        assert_eq!(json["sequence_number"], 1);
    }
}
