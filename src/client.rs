use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ClusterPatch, ClusterRecord, ClusterSpec};

/// Failure reported by a `ClusterApi` implementation
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no cluster named '{0}'")]
    NotFound(String),

    #[error("API responded {status}: {message}")]
    Api { status: u16, message: String },

    #[error("service unreachable: {0}")]
    Unreachable(String),
}

/// The remote cluster management service.
///
/// Transport, authentication and retries all live behind this trait; the
/// reconciler only ever awaits one call at a time.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    async fn create(&self, spec: &ClusterSpec) -> Result<ClusterRecord, ClientError>;

    async fn get_by_name(&self, name: &str) -> Result<ClusterRecord, ClientError>;

    async fn patch(&self, patch: &ClusterPatch) -> Result<ClusterRecord, ClientError>;

    async fn delete(&self, uuid: &str) -> Result<(), ClientError>;
}
