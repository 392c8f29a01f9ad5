//! Watch decoding errors
//!
//! Every variant is a decode failure. A clean end of the feed is not an
//! error and is reported as [`PollOutcome::StreamEnded`](crate::PollOutcome)
//! instead, so no layer can wrap it.

use thiserror::Error;

/// Errors that can occur while decoding a watch feed
#[derive(Debug, Error)]
pub enum WatchError {
    /// The next envelope could not be read (syntax error, truncation, I/O)
    #[error("failed to decode raw event from watch stream: {0}")]
    RawEvent(#[source] serde_json::Error),

    /// An `ERROR` event carried an object that is not a `Status`
    #[error("failed to decode ({raw}) into Status: {source}")]
    Status {
        /// Offending payload bytes
        raw: String,
        /// Underlying decode failure
        source: serde_json::Error,
    },

    /// The payload of a normal event did not match the resource schema
    #[error("failed to unmarshal {kind} object from data ({raw}): {source}")]
    Object {
        /// Resource kind being decoded
        kind: String,
        /// Offending payload bytes
        raw: String,
        /// Underlying decode failure
        source: serde_json::Error,
    },

    /// A raw-layer failure seen while polling a specific resource kind
    #[error("failed to poll {kind} event: {source}")]
    Poll {
        /// Resource kind being polled
        kind: String,
        /// Raw-layer failure
        source: Box<WatchError>,
    },
}

impl WatchError {
    /// Resource kind the failure was observed for, if a typed reader was involved
    pub fn resource_kind(&self) -> Option<&str> {
        match self {
            Self::Object { kind, .. } | Self::Poll { kind, .. } => Some(kind),
            Self::RawEvent(_) | Self::Status { .. } => None,
        }
    }

    /// Raw payload bytes that failed to decode, when they are known
    ///
    /// Envelope failures have no payload: the value was never completely read.
    pub fn raw_payload(&self) -> Option<&str> {
        match self {
            Self::Status { raw, .. } | Self::Object { raw, .. } => Some(raw),
            Self::Poll { source, .. } => source.raw_payload(),
            Self::RawEvent(_) => None,
        }
    }

    /// The input ended in the middle of a JSON value
    pub fn is_truncated(&self) -> bool {
        match self {
            Self::RawEvent(e) => e.is_eof(),
            Self::Poll { source, .. } => source.is_truncated(),
            Self::Status { .. } | Self::Object { .. } => false,
        }
    }
}
