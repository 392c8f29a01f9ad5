//! Watch Event Decoding
//!
//! Decodes the unbounded stream of change notifications written by a
//! control-plane watch endpoint into typed events for storage `Cluster`
//! and `Pool` resources.
//!
//! # Example
//!
//! ```no_run
//! use watch_events::{poll_cluster_event, PollOutcome, WatchDecoder};
//!
//! # fn example(conn: std::net::TcpStream) -> Result<(), watch_events::WatchError> {
//! let mut decoder = WatchDecoder::new(conn);
//! loop {
//!     match poll_cluster_event(&mut decoder)? {
//!         PollOutcome::Event(event) => {
//!             println!("{:?} {:?}", event.event_type, event.object.metadata.name);
//!         }
//!         PollOutcome::Status(status) => {
//!             println!("watch closed by server: {:?}", status.reason);
//!             break;
//!         }
//!         PollOutcome::StreamEnded => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Each call consumes exactly one framed JSON value from the connection.
//! Calls on the same decoder must not overlap; independent watches use
//! independent decoders and can run in parallel.

pub mod decoder;
pub mod error;
pub mod event;
pub mod poll;

pub use decoder::{EventSource, WatchDecoder};
pub use error::WatchError;
pub use event::{ClusterEvent, EventKind, PollOutcome, PoolEvent, RawEvent, WatchEvent};
pub use poll::{poll_cluster_event, poll_event, poll_pool_event, poll_typed};

/// Status payload carried by `ERROR` events
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::Status;
