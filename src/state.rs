use std::fmt;

use serde_json::{Map, Value};

use crate::errors::Error;
use crate::schema::{Schema, CLUSTER_SCHEMA};

/// Where a managed cluster is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    NonExistent,
    Creating,
    Existing,
    Deleting,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lifecycle::NonExistent => "non-existent",
            Lifecycle::Creating => "creating",
            Lifecycle::Existing => "existing",
            Lifecycle::Deleting => "deleting",
        };
        f.write_str(name)
    }
}

/// Declared and persisted property trees for one managed cluster, plus its identity.
///
/// The declared tree is what the caller authored; the persisted tree is what
/// the last successful reconciliation projected from the service.
#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: &'static Schema,
    config: Map<String, Value>,
    state: Map<String, Value>,
    id: String,
    phase: Lifecycle,
}

impl ResourceData {
    /// A resource that has not been created yet
    pub fn new(config: Map<String, Value>) -> Self {
        ResourceData {
            schema: &CLUSTER_SCHEMA,
            config,
            state: Map::new(),
            id: String::new(),
            phase: Lifecycle::NonExistent,
        }
    }

    /// A resource restored from previously persisted state
    pub fn from_state(config: Map<String, Value>, id: &str, state: Map<String, Value>) -> Self {
        let phase = if id.is_empty() {
            Lifecycle::NonExistent
        } else {
            Lifecycle::Existing
        };
        ResourceData {
            schema: &CLUSTER_SCHEMA,
            config,
            state,
            id: id.to_owned(),
            phase,
        }
    }

    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Replace the declared tree, e.g. before an update
    pub fn set_config(&mut self, config: Map<String, Value>) {
        self.config = config;
    }

    pub fn state(&self) -> &Map<String, Value> {
        &self.state
    }

    /// Declared value for `key`, falling back to the persisted one
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config
            .get(key)
            .filter(|value| !value.is_null())
            .or_else(|| self.state.get(key))
    }

    /// Persist one top-level field. Writing `null` removes the field.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), Error> {
        self.schema
            .check(key, &value)
            .map_err(|reason| Error::FieldAssignment {
                field: key.to_owned(),
                reason,
            })?;
        if value.is_null() {
            self.state.remove(key);
        } else {
            self.state.insert(key.to_owned(), value);
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> Lifecycle {
        self.phase
    }

    pub(crate) fn set_id(&mut self, id: &str) {
        self.id = id.to_owned();
    }

    pub(crate) fn set_phase(&mut self, phase: Lifecycle) {
        self.phase = phase;
    }

    /// Forget the resource entirely after it was deleted
    pub(crate) fn clear(&mut self) {
        self.id.clear();
        self.state.clear();
        self.phase = Lifecycle::NonExistent;
    }
}
