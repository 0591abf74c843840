//! Rental history events.
//!
//! Each customer carries an append-only log of [`Event`]s. An event stores a
//! snapshot of the vehicle summary taken when it was recorded, so history
//! stays readable after the vehicle itself is dropped.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// What happened in a history event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A vehicle was handed to the customer.
    Rent,
    /// The customer brought the vehicle back.
    Return,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rent => f.pad("RENT"),
            Self::Return => f.pad("RETURN"),
        }
    }
}

/// A single entry in a customer's rental history.
///
/// The timestamp is kept as the ISO-8601 text it was stored with. Records
/// written by other tools may use a different ISO-8601 shape, and they must
/// survive a load and save unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Rent or return.
    pub kind: EventKind,

    /// When the event was recorded, as ISO-8601 text.
    pub timestamp: String,

    /// The vehicle summary at the time of the event.
    pub vehicle_summary: String,
}

impl Event {
    /// Create an event stamped `at`, written with millisecond precision
    /// and a `Z` suffix, e.g. `2024-05-01T09:30:00.000Z`.
    #[must_use]
    pub fn new(kind: EventKind, at: DateTime<Utc>, vehicle_summary: String) -> Self {
        Self {
            kind,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            vehicle_summary,
        }
    }

    /// Parse the timestamp.
    ///
    /// Accepts RFC 3339 and ISO-8601 date-times without an offset, which are
    /// read as UTC. Returns `None` for anything else.
    #[must_use]
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|naive| naive.and_utc())
}
