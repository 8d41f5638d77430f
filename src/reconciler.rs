use log::{debug, error, info, warn};

use crate::client::{ClientError, ClusterApi};
use crate::coerce::coerce_string;
use crate::decode::decode;
use crate::errors::Error;
use crate::metrics;
use crate::model::{ClusterPatch, ClusterRecord};
use crate::project::{assign, project};
use crate::state::{Lifecycle, ResourceData};

/// Drives one cluster through create, read, update and delete against the
/// management service.
///
/// Every operation awaits its remote calls one after another; there is never
/// more than one call in flight.
pub struct Reconciler<C> {
    client: C,
}

impl<C: ClusterApi> Reconciler<C> {
    pub fn new(client: C) -> Self {
        Reconciler { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Create the declared cluster, then read it back by name and persist that record
    pub async fn create(&self, data: &mut ResourceData) -> Result<(), Error> {
        let result = self.create_cluster(data).await;
        observe("create", result)
    }

    /// Refresh persisted state from the cluster with the declared name
    pub async fn read(&self, data: &mut ResourceData) -> Result<(), Error> {
        let result = self.read_cluster(data).await;
        observe("read", result)
    }

    /// Patch the mutable fields of an existing cluster, then read it back
    pub async fn update(&self, data: &mut ResourceData) -> Result<(), Error> {
        let result = self.update_cluster(data).await;
        observe("update", result)
    }

    /// Delete the cluster by identity and forget it on success
    pub async fn delete(&self, data: &mut ResourceData) -> Result<(), Error> {
        let result = self.delete_cluster(data).await;
        observe("delete", result)
    }

    async fn create_cluster(&self, data: &mut ResourceData) -> Result<(), Error> {
        if data.phase() != Lifecycle::NonExistent || !data.id().is_empty() {
            return Err(Error::validation(
                "uuid",
                format!("cluster is {} with identity '{}'", data.phase(), data.id()),
            ));
        }
        let spec = decode(data.config())?;
        debug!("Create payload for '{}': {:?}", spec.name, spec);

        data.set_phase(Lifecycle::Creating);
        info!("Creating cluster '{}'", spec.name);
        let created = match self.client.create(&spec).await {
            Ok(created) => created,
            Err(source) => {
                data.set_phase(Lifecycle::NonExistent);
                return Err(Error::Transport {
                    operation: "create",
                    source,
                });
            }
        };
        debug!("Create returned uuid '{}' for '{}'", created.uuid, spec.name);

        let record = match self.read_after_write(&spec.name).await {
            Ok(record) if record.uuid.is_empty() => {
                data.set_phase(Lifecycle::NonExistent);
                return Err(Error::validation(
                    "uuid",
                    format!("cluster '{}' was read back without an identity", spec.name),
                ));
            }
            Ok(record) => record,
            Err(err) => {
                data.set_phase(Lifecycle::NonExistent);
                return Err(err);
            }
        };

        data.set_id(&record.uuid);
        data.set_phase(Lifecycle::Existing);
        info!("Created cluster '{}' with uuid '{}'", spec.name, record.uuid);
        assign(data, project(&record))
    }

    async fn read_cluster(&self, data: &mut ResourceData) -> Result<(), Error> {
        let name = declared_name(data)?;
        let record = match self.client.get_by_name(&name).await {
            Ok(record) => record,
            Err(source @ ClientError::NotFound(_)) => return Err(Error::NotFound { name, source }),
            Err(source) => {
                return Err(Error::Transport {
                    operation: "get_by_name",
                    source,
                })
            }
        };
        if !data.id().is_empty() && data.id() != record.uuid {
            warn!(
                "Cluster '{}' reports uuid '{}' but state holds '{}'; keeping the stored identity",
                name,
                record.uuid,
                data.id()
            );
        }
        assign(data, project(&record))
    }

    async fn update_cluster(&self, data: &mut ResourceData) -> Result<(), Error> {
        if data.id().is_empty() {
            return Err(Error::validation("uuid", "identity is required to update a cluster"));
        }
        let spec = decode(data.config())?;
        let patch = ClusterPatch::from_spec(data.id(), &spec);
        info!(
            "Patching cluster '{}' ({}): workers={}, loadbalancer_ip_num={}",
            spec.name, patch.uuid, patch.workers, patch.loadbalancer_ip_num
        );
        self.client
            .patch(&patch)
            .await
            .map_err(|source| Error::Transport {
                operation: "patch",
                source,
            })?;

        let record = self.read_after_write(&spec.name).await?;
        assign(data, project(&record))
    }

    async fn delete_cluster(&self, data: &mut ResourceData) -> Result<(), Error> {
        if data.id().is_empty() {
            return Err(Error::validation("uuid", "identity is required to delete a cluster"));
        }
        let uuid = data.id().to_owned();
        data.set_phase(Lifecycle::Deleting);
        info!("Deleting cluster '{}'", uuid);
        match self.client.delete(&uuid).await {
            Ok(()) => {
                data.clear();
                info!("Deleted cluster '{}'", uuid);
                Ok(())
            }
            Err(source) => {
                data.set_phase(Lifecycle::Existing);
                Err(Error::Transport {
                    operation: "delete",
                    source,
                })
            }
        }
    }

    /// The immediate create/patch response is partial; node inventories,
    /// master VIP and identity only show up on a fresh lookup by name.
    async fn read_after_write(&self, name: &str) -> Result<ClusterRecord, Error> {
        debug!("Reading back cluster '{}'", name);
        self.client
            .get_by_name(name)
            .await
            .map_err(|source| Error::Transport {
                operation: "get_by_name",
                source,
            })
    }
}

fn declared_name(data: &ResourceData) -> Result<String, Error> {
    let value = data
        .get("name")
        .ok_or_else(|| Error::validation("name", "required"))?;
    coerce_string("name", value)
}

fn observe(operation: &str, result: Result<(), Error>) -> Result<(), Error> {
    metrics::operation_happened(operation);
    if let Err(err) = &result {
        error!("Cluster {} failed: {}", operation, err);
        metrics::error_happened(operation, err);
    }
    result
}
