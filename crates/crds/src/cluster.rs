//! Cluster CRD
//!
//! Declares a storage cluster: where daemons keep their data and how
//! many monitors back it.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "rook.io",
    version = "v1alpha1",
    kind = "Cluster",
    namespaced,
    status = "ClusterStatus",
    derive = "PartialEq",
    shortname = "rcc"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Container image tag of the storage daemons
    #[serde(default)]
    pub version_tag: String,

    /// Host directory where daemon configuration and data are persisted
    pub data_dir_host_path: String,

    /// Run storage daemons on every node in the cluster
    #[serde(default)]
    pub use_all_nodes: bool,

    /// Use the host network instead of the pod network
    #[serde(default)]
    pub host_network: bool,

    /// Number of monitors to run (odd numbers only make sense)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mon_count: Option<u32>,

    /// Storage node selection
    #[serde(default)]
    pub storage: StorageSelection,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageSelection {
    /// Consume every raw device found on a selected node
    #[serde(default)]
    pub use_all_devices: bool,

    /// Regex filter applied to device names when not using all devices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_filter: Option<String>,

    /// Explicit node names; empty means all nodes when `useAllNodes` is set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
pub enum ClusterState {
    /// Initial deployment in progress
    #[default]
    Creating,

    /// All daemons are running
    Created,

    /// Spec change being rolled out
    Updating,

    /// Deployment failed, see message
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    /// Current lifecycle state
    pub state: ClusterState,

    /// Human-readable detail for the current state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last time the state changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cluster_spec_defaults() {
        let spec: ClusterSpec = serde_json::from_value(json!({
            "dataDirHostPath": "/var/lib/rook"
        }))
        .expect("minimal spec should parse");

        assert_eq!(spec.data_dir_host_path, "/var/lib/rook");
        assert_eq!(spec.version_tag, "");
        assert!(!spec.use_all_nodes);
        assert_eq!(spec.mon_count, None);
        assert_eq!(spec.storage, StorageSelection::default());
    }

    #[test]
    fn test_cluster_from_api_object() {
        let cluster: Cluster = serde_json::from_value(json!({
            "apiVersion": "rook.io/v1alpha1",
            "kind": "Cluster",
            "metadata": { "name": "rook", "namespace": "rook" },
            "spec": {
                "versionTag": "v0.4.0",
                "dataDirHostPath": "/var/lib/rook",
                "monCount": 3,
                "storage": { "useAllDevices": true, "nodes": ["node-a"] }
            },
            "status": { "state": "Created" }
        }))
        .expect("cluster object should parse");

        assert_eq!(cluster.metadata.name.as_deref(), Some("rook"));
        assert_eq!(cluster.spec.mon_count, Some(3));
        assert!(cluster.spec.storage.use_all_devices);
        assert_eq!(cluster.spec.storage.nodes, vec!["node-a".to_string()]);
        assert_eq!(
            cluster.status.map(|s| s.state),
            Some(ClusterState::Created)
        );
    }

    #[test]
    fn test_cluster_missing_data_dir_rejected() {
        let result: Result<ClusterSpec, _> = serde_json::from_value(json!({
            "versionTag": "v0.4.0"
        }));
        assert!(result.is_err());
    }
}
