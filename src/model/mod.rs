//! Typed representation of the remote cluster management API.
//!
//! `ClusterSpec` and `ClusterPatch` are what gets sent, `ClusterRecord` is
//! what comes back. Field names follow the API's JSON, which is not always
//! the key used in the declared property tree (see `decode` and `project`).
mod cluster;
mod infra;
mod node_pool;

pub use cluster::*;
pub use infra::*;
pub use node_pool::*;
