//! Watch feed consumers.
//!
//! A watch runs until the feed ends, the control plane reports a status,
//! or a decode failure occurs. There is no reconnect: a resync needs a new
//! feed, which is the job of whoever opened the connection.

use crate::error::ControllerError;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Status;
use kube::ResourceExt;
use std::io::Read;
use tracing::{debug, info, warn};
use watch_events::{EventKind, PollOutcome, WatchDecoder, WatchError, WatchEvent};

/// Counts of what a finished watch observed
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WatchSummary {
    /// ADDED events
    pub added: usize,
    /// MODIFIED events
    pub modified: usize,
    /// DELETED events
    pub deleted: usize,
    /// Status that ended the watch, if the control plane sent one
    pub terminal_status: Option<Status>,
}

impl WatchSummary {
    /// Total number of resource events
    pub fn events(&self) -> usize {
        self.added + self.modified + self.deleted
    }

    fn record(&mut self, event_type: EventKind) {
        match event_type {
            EventKind::Added => self.added += 1,
            EventKind::Modified => self.modified += 1,
            EventKind::Deleted => self.deleted += 1,
            // Error envelopes surface as PollOutcome::Status
            EventKind::Error => {}
        }
    }
}

/// Drains one watch feed with `poll`, logging every event.
///
/// `poll` is one of the typed readers, e.g. `watch_events::poll_cluster_event`.
pub fn watch_feed<K, R, F>(
    resource_name: &str,
    reader: R,
    mut poll: F,
) -> Result<WatchSummary, ControllerError>
where
    K: ResourceExt,
    R: Read,
    F: FnMut(&mut WatchDecoder<R>) -> Result<PollOutcome<WatchEvent<K>>, WatchError>,
{
    info!("Starting {} watcher", resource_name);

    let mut decoder = WatchDecoder::new(reader);
    let mut summary = WatchSummary::default();

    loop {
        match poll(&mut decoder)? {
            PollOutcome::Event(event) => {
                let name = event.object.name_any();
                let namespace = event.object.namespace().unwrap_or_default();
                match event.event_type {
                    EventKind::Deleted => {
                        info!("{} deleted: {}/{}", resource_name, namespace, name);
                    }
                    other => debug!("{} {:?}: {}/{}", resource_name, other, namespace, name),
                }
                summary.record(event.event_type);
            }
            PollOutcome::Status(status) => {
                warn!(
                    "{} watch closed by control plane: {} ({})",
                    resource_name,
                    status.message.as_deref().unwrap_or("<no message>"),
                    status.reason.as_deref().unwrap_or("<no reason>")
                );
                summary.terminal_status = Some(status);
                break;
            }
            PollOutcome::StreamEnded => {
                info!(
                    "{} watch feed ended after {} bytes",
                    resource_name,
                    decoder.byte_offset()
                );
                break;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;
    use watch_events::{poll_cluster_event, poll_pool_event};

    fn pool_json(name: &str) -> serde_json::Value {
        json!({
            "apiVersion": "rook.io/v1alpha1",
            "kind": "Pool",
            "metadata": { "name": name, "namespace": "rook" },
            "spec": { "replicated": { "size": 2 } }
        })
    }

    fn feed(frames: &[serde_json::Value]) -> Cursor<Vec<u8>> {
        let text: Vec<String> = frames.iter().map(ToString::to_string).collect();
        Cursor::new(text.join("\n").into_bytes())
    }

    #[test]
    fn test_summary_counts_events_until_end() {
        let reader = feed(&[
            json!({ "Type": "ADDED", "Object": pool_json("a") }),
            json!({ "Type": "ADDED", "Object": pool_json("b") }),
            json!({ "Type": "MODIFIED", "Object": pool_json("a") }),
            json!({ "Type": "DELETED", "Object": pool_json("b") }),
        ]);

        let summary = watch_feed("Pool", reader, poll_pool_event).unwrap();
        assert_eq!(summary.added, 2);
        assert_eq!(summary.modified, 1);
        assert_eq!(summary.deleted, 1);
        assert_eq!(summary.events(), 4);
        assert!(summary.terminal_status.is_none());
    }

    #[test]
    fn test_status_stops_the_watch() {
        let reader = feed(&[
            json!({ "Type": "ADDED", "Object": pool_json("a") }),
            json!({
                "Type": "ERROR",
                "Object": { "status": "Failure", "reason": "Expired", "code": 410 }
            }),
            json!({ "Type": "ADDED", "Object": pool_json("never-read") }),
        ]);

        let summary = watch_feed("Pool", reader, poll_pool_event).unwrap();
        assert_eq!(summary.added, 1);
        let status = summary.terminal_status.expect("status");
        assert_eq!(status.reason.as_deref(), Some("Expired"));
    }

    #[test]
    fn test_decode_failure_is_returned() {
        let reader = Cursor::new(br#"{"Type":"ADDED","Object":{"metadata":"#.to_vec());

        let err = watch_feed("Cluster", reader, poll_cluster_event).unwrap_err();
        match err {
            ControllerError::Watch(e) => {
                assert!(e.is_truncated());
                assert_eq!(e.resource_kind(), Some("Cluster"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_feed() {
        let summary = watch_feed("Cluster", Cursor::new(Vec::new()), poll_cluster_event).unwrap();
        assert_eq!(summary, WatchSummary::default());
    }
}
