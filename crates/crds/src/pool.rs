//! Pool CRD
//!
//! A storage pool carved out of a cluster, protected either by replication
//! or by erasure coding.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "rook.io",
    version = "v1alpha1",
    kind = "Pool",
    namespaced,
    status = "PoolStatus",
    derive = "PartialEq",
    shortname = "rcp"
)]
#[serde(rename_all = "camelCase")]
pub struct PoolSpec {
    /// Replicated data protection (mutually exclusive with `erasureCoded`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicated: Option<ReplicatedSpec>,

    /// Erasure coded data protection (mutually exclusive with `replicated`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erasure_coded: Option<ErasureCodedSpec>,

    /// CRUSH failure domain (e.g. "host", "rack")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_domain: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReplicatedSpec {
    /// Number of copies of each object
    pub size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErasureCodedSpec {
    /// Number of data chunks per object
    pub data_chunks: u32,

    /// Number of coding chunks per object
    pub coding_chunks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatus {
    /// Pool exists in the backing cluster
    #[serde(default)]
    pub ready: bool,

    /// Human-readable detail, set on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
