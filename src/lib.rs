use std::path::Path;

use serde_json::{Map, Value};

pub mod client;
pub mod coerce;
pub mod config;
pub mod decode;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod project;
pub mod reconciler;
pub mod schema;
pub mod state;

pub use client::{ClientError, ClusterApi};
pub use config::ProviderConfig;
pub use decode::decode;
pub use errors::Error;
pub use model::{ClusterPatch, ClusterRecord, ClusterSpec};
pub use project::project;
pub use reconciler::Reconciler;
pub use state::{Lifecycle, ResourceData};

/// Load a declared cluster tree from a YAML (or JSON) file
pub fn load_manifest(path: &Path) -> Result<Map<String, Value>, Error> {
    let manifest_error = |reason: String| Error::Manifest {
        path: path.display().to_string(),
        reason,
    };
    let contents = std::fs::read_to_string(path).map_err(|e| manifest_error(e.to_string()))?;
    let value: Value = serde_yaml::from_str(&contents).map_err(|e| manifest_error(e.to_string()))?;
    match value {
        Value::Object(tree) => Ok(tree),
        other => Err(manifest_error(format!("expected a map at the top level, got {}", other))),
    }
}

/// The tree a successful create of `spec` would persist, before the service
/// has filled in any computed fields
pub fn desired_state(spec: &ClusterSpec) -> Map<String, Value> {
    let record = ClusterRecord {
        spec: spec.clone(),
        ..ClusterRecord::default()
    };
    project(&record)
        .into_iter()
        .filter(|(key, value)| key != "uuid" && !value.is_null())
        .collect()
}
