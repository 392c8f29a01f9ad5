//! Storage CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the storage cluster and pool
//! resources delivered over the control-plane watch feed.

pub mod cluster;
pub mod pool;

pub use cluster::*;
pub use pool::*;

/// API group shared by all storage CRDs
pub const API_GROUP: &str = "rook.io";

/// API version shared by all storage CRDs
pub const API_VERSION: &str = "v1alpha1";
