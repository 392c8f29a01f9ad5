//! Watch event wire vocabulary
//!
//! The envelope written by the watch endpoint is `{"Type": ..., "Object": ...}`.
//! `Object` is kept as raw JSON until the reader knows which type it holds.

use crds::{Cluster, Pool};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Status;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Kind of change announced by a watch event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Object was created
    Added,

    /// Object was updated
    Modified,

    /// Object was removed
    Deleted,

    /// The server reports a watch-level failure; `Object` is a `Status`
    Error,
}

/// Envelope with the payload left undecoded
#[derive(Debug, Deserialize)]
pub struct RawEvent {
    /// Kind of change
    #[serde(rename = "Type", alias = "type")]
    pub event_type: EventKind,

    /// Payload, shape depends on `event_type`
    #[serde(rename = "Object", alias = "object")]
    pub object: Box<RawValue>,
}

/// Watch event with its payload decoded into a resource
#[derive(Debug, Clone, PartialEq)]
pub struct WatchEvent<K> {
    /// Kind of change
    pub event_type: EventKind,

    /// Resource state carried by the event
    pub object: K,
}

/// Event from a `Cluster` watch
pub type ClusterEvent = WatchEvent<Cluster>;

/// Event from a `Pool` watch
pub type PoolEvent = WatchEvent<Pool>;

/// Successful result of a single poll
///
/// Exactly one of these is produced per call; failures are returned as
/// [`WatchError`](crate::WatchError) alongside it in a `Result`.
#[derive(Debug)]
pub enum PollOutcome<E> {
    /// A change event
    Event(E),

    /// A failure reported by the control plane (e.g. expired resource version).
    /// This is data, the caller decides whether the watch can continue.
    Status(Status),

    /// The feed closed cleanly between two events
    StreamEnded,
}

impl<E> PollOutcome<E> {
    /// The feed closed cleanly
    pub fn is_stream_ended(&self) -> bool {
        matches!(self, Self::StreamEnded)
    }

    /// Event, if this outcome carries one
    pub fn into_event(self) -> Option<E> {
        match self {
            Self::Event(event) => Some(event),
            Self::Status(_) | Self::StreamEnded => None,
        }
    }

    /// Status, if this outcome carries one
    pub fn status(&self) -> Option<&Status> {
        match self {
            Self::Status(status) => Some(status),
            Self::Event(_) | Self::StreamEnded => None,
        }
    }
}
