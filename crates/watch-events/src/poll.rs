//! Event polling
//!
//! [`poll_event`] classifies the next envelope on a feed; [`poll_typed`]
//! builds on it to decode the payload into a concrete resource kind.

use crate::decoder::EventSource;
use crate::error::WatchError;
use crate::event::{ClusterEvent, EventKind, PollOutcome, PoolEvent, RawEvent, WatchEvent};
use crds::{Cluster, Pool};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Status;
use kube::Resource;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Reads the next envelope and separates `ERROR` statuses from normal events.
///
/// A clean end of input is returned as [`PollOutcome::StreamEnded`] untouched.
pub fn poll_event<S>(source: &mut S) -> Result<PollOutcome<RawEvent>, WatchError>
where
    S: EventSource + ?Sized,
{
    let raw = match source.next_raw() {
        None => return Ok(PollOutcome::StreamEnded),
        Some(result) => result.map_err(WatchError::RawEvent)?,
    };

    if raw.event_type == EventKind::Error {
        let status: Status =
            serde_json::from_str(raw.object.get()).map_err(|source| WatchError::Status {
                raw: raw.object.get().to_string(),
                source,
            })?;
        info!("Received watch error status: {:?}", status);
        return Ok(PollOutcome::Status(status));
    }

    Ok(PollOutcome::Event(raw))
}

/// Reads the next event and decodes its payload as `K`.
///
/// Statuses and the end of the feed pass through unchanged. Envelope
/// failures are wrapped with the kind of resource being polled.
pub fn poll_typed<K, S>(source: &mut S) -> Result<PollOutcome<WatchEvent<K>>, WatchError>
where
    K: Resource<DynamicType = ()> + DeserializeOwned,
    S: EventSource + ?Sized,
{
    let kind = K::kind(&()).into_owned();

    let raw = match poll_event(source) {
        Ok(PollOutcome::Event(raw)) => raw,
        Ok(PollOutcome::Status(status)) => return Ok(PollOutcome::Status(status)),
        Ok(PollOutcome::StreamEnded) => return Ok(PollOutcome::StreamEnded),
        Err(e) => {
            return Err(WatchError::Poll {
                kind,
                source: Box::new(e),
            });
        }
    };

    let object: K = serde_json::from_str(raw.object.get()).map_err(|source| WatchError::Object {
        kind: kind.clone(),
        raw: raw.object.get().to_string(),
        source,
    })?;
    debug!("Decoded {} event: {:?}", kind, raw.event_type);

    Ok(PollOutcome::Event(WatchEvent {
        event_type: raw.event_type,
        object,
    }))
}

/// Polls the next event of a `Cluster` watch
pub fn poll_cluster_event<S>(source: &mut S) -> Result<PollOutcome<ClusterEvent>, WatchError>
where
    S: EventSource + ?Sized,
{
    poll_typed::<Cluster, S>(source)
}

/// Polls the next event of a `Pool` watch
pub fn poll_pool_event<S>(source: &mut S) -> Result<PollOutcome<PoolEvent>, WatchError>
where
    S: EventSource + ?Sized,
{
    poll_typed::<Pool, S>(source)
}
