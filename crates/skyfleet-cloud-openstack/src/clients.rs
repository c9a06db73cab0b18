//! Capability-trait implementations over the openstack CLI

use crate::oscli::OsCli;
use async_trait::async_trait;
use skyfleet_cloud::{
    BootRequest, CloudError, ComputeApi, Created, HostInfo, IdentityApi, ImageApi, ImageSource,
    ImageSpec, Meter, Named, NetworkApi, Observation, Result, StackApi, StackSpec, TelemetryApi,
    VolumeApi, VolumeInfo, VolumeSpec, WorkloadRef,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Compute subsystem over `openstack server`/`hypervisor`.
pub struct ComputeClient {
    cli: Arc<OsCli>,
}

impl ComputeClient {
    pub fn new(cli: Arc<OsCli>) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl ComputeApi for ComputeClient {
    async fn list_hosts(&self) -> Result<Vec<HostInfo>> {
        let rows = self.cli.hypervisor_list().await.map_err(CloudError::from)?;
        Ok(rows
            .into_iter()
            .map(|r| HostInfo {
                hostname: r.hostname,
                admin_state: r.state,
                address: r.host_ip.unwrap_or_default(),
            })
            .collect())
    }

    async fn list_workloads_on_host(&self, hostname: &str) -> Result<Vec<WorkloadRef>> {
        // The CLI reports an idle host as an empty listing, which is
        // already the shape the core expects.
        let rows = self
            .cli
            .server_list_on_host(hostname)
            .await
            .map_err(CloudError::from)?;
        Ok(rows
            .into_iter()
            .map(|r| WorkloadRef {
                name: r.name,
                id: r.id,
            })
            .collect())
    }

    async fn list_servers(&self) -> Result<Vec<Named>> {
        let rows = self.cli.server_list().await.map_err(CloudError::from)?;
        Ok(rows.into_iter().map(|r| Named::new(r.name, r.id)).collect())
    }

    async fn list_flavors(&self) -> Result<Vec<Named>> {
        let rows = self.cli.flavor_list().await.map_err(CloudError::from)?;
        Ok(rows.into_iter().map(|r| Named::new(r.name, r.id)).collect())
    }

    async fn list_images(&self) -> Result<Vec<Named>> {
        let rows = self.cli.image_list().await.map_err(CloudError::from)?;
        Ok(rows.into_iter().map(|r| Named::new(r.name, r.id)).collect())
    }

    async fn list_networks(&self) -> Result<Vec<Named>> {
        let rows = self.cli.network_list().await.map_err(CloudError::from)?;
        Ok(rows.into_iter().map(|r| Named::new(r.name, r.id)).collect())
    }

    async fn boot_server(&self, request: &BootRequest) -> Result<Created> {
        let row = self
            .cli
            .server_create(
                &request.name,
                &request.image_id,
                &request.flavor_id,
                &request.network_id,
            )
            .await
            .map_err(CloudError::from)?;
        Ok(Created {
            id: row.id,
            status: row.status.unwrap_or_else(|| "BUILD".to_string()),
        })
    }

    async fn fetch_server(&self, name: &str) -> Result<Option<Observation>> {
        let rows = self
            .cli
            .server_list_named(name)
            .await
            .map_err(CloudError::from)?;
        Ok(rows.into_iter().next().map(|r| Observation {
            id: r.id,
            name: r.name,
            status: r.status.unwrap_or_else(|| "UNKNOWN".to_string()),
        }))
    }

    async fn evacuate_workload(&self, id: &str) -> Result<()> {
        self.cli.server_evacuate(id).await.map_err(CloudError::from)
    }
}

/// Block-storage subsystem over `openstack volume`.
pub struct VolumeClient {
    cli: Arc<OsCli>,
}

impl VolumeClient {
    pub fn new(cli: Arc<OsCli>) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl VolumeApi for VolumeClient {
    async fn list_volumes(&self) -> Result<Vec<VolumeInfo>> {
        let rows = self.cli.volume_list().await.map_err(CloudError::from)?;
        Ok(rows
            .into_iter()
            .map(|r| VolumeInfo {
                id: r.id,
                name: r.name,
                status: r.status,
                size_gb: r.size,
            })
            .collect())
    }

    async fn create_volume(&self, spec: &VolumeSpec) -> Result<Created> {
        let metadata: Vec<(String, String)> = spec
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let row = self
            .cli
            .volume_create(
                &spec.name,
                spec.size_or_default(),
                spec.description.as_deref(),
                &metadata,
            )
            .await
            .map_err(CloudError::from)?;
        Ok(Created {
            id: row.id,
            status: row.status.unwrap_or_else(|| "creating".to_string()),
        })
    }

    async fn delete_volume(&self, id: &str) -> Result<()> {
        self.cli.volume_delete(id).await.map_err(CloudError::from)
    }
}

/// Image subsystem over `openstack image`.
pub struct ImageClient {
    cli: Arc<OsCli>,
}

impl ImageClient {
    pub fn new(cli: Arc<OsCli>) -> Self {
        Self { cli }
    }

    fn staging_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("skyfleet-image-{name}"))
    }
}

#[async_trait]
impl ImageApi for ImageClient {
    async fn list_images(&self) -> Result<Vec<Observation>> {
        let rows = self.cli.image_list().await.map_err(CloudError::from)?;
        Ok(rows
            .into_iter()
            .map(|r| Observation {
                id: r.id,
                name: r.name,
                status: r.status.unwrap_or_else(|| "unknown".to_string()),
            })
            .collect())
    }

    async fn create_image(&self, spec: &ImageSpec) -> Result<Created> {
        let properties: Vec<(String, String)> = spec
            .properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let (file, staged) = match &spec.source {
            ImageSource::File(path) => (path.clone(), None),
            ImageSource::Data(data) => {
                let path = Self::staging_path(&spec.name);
                tokio::fs::write(&path, data).await?;
                (path.clone(), Some(path))
            }
        };

        let result = self
            .cli
            .image_create_from_file(
                &spec.name,
                &file,
                &spec.disk_format,
                &spec.container_format,
                &properties,
            )
            .await;

        if let Some(path) = staged
            && let Err(e) = tokio::fs::remove_file(&path).await
        {
            tracing::warn!("failed to remove staged image payload {}: {e}", path.display());
        }

        let row = result.map_err(CloudError::from)?;
        Ok(Created {
            id: row.id,
            status: row.status.unwrap_or_else(|| "queued".to_string()),
        })
    }

    async fn delete_image(&self, id: &str) -> Result<()> {
        self.cli.image_delete(id).await.map_err(CloudError::from)
    }
}

/// Orchestration subsystem over `openstack stack`.
pub struct StackClient {
    cli: Arc<OsCli>,
}

impl StackClient {
    pub fn new(cli: Arc<OsCli>) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl StackApi for StackClient {
    async fn list_stacks(&self) -> Result<Vec<Observation>> {
        let rows = self.cli.stack_list().await.map_err(CloudError::from)?;
        Ok(rows
            .into_iter()
            .map(|r| Observation {
                id: r.id,
                name: r.name,
                status: r.status,
            })
            .collect())
    }

    async fn create_stack(&self, spec: &StackSpec) -> Result<Created> {
        let path = std::env::temp_dir().join(format!("skyfleet-stack-{}.yaml", spec.name));
        tokio::fs::write(&path, &spec.template).await?;

        let result = self.cli.stack_create(&spec.name, &path).await;

        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("failed to remove staged template {}: {e}", path.display());
        }

        let row = result.map_err(CloudError::from)?;
        Ok(Created {
            id: row.id,
            status: row.status.unwrap_or_else(|| "CREATE_IN_PROGRESS".to_string()),
        })
    }

    async fn delete_stack(&self, id: &str) -> Result<()> {
        self.cli.stack_delete(id).await.map_err(CloudError::from)
    }
}

/// Network subsystem over `openstack network`.
pub struct NetworkClient {
    cli: Arc<OsCli>,
}

impl NetworkClient {
    pub fn new(cli: Arc<OsCli>) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl NetworkApi for NetworkClient {
    async fn list_networks(&self) -> Result<Vec<Named>> {
        let rows = self.cli.network_list().await.map_err(CloudError::from)?;
        Ok(rows.into_iter().map(|r| Named::new(r.name, r.id)).collect())
    }
}

/// Telemetry subsystem over `openstack metric`.
pub struct TelemetryClient {
    cli: Arc<OsCli>,
}

impl TelemetryClient {
    pub fn new(cli: Arc<OsCli>) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl TelemetryApi for TelemetryClient {
    async fn list_meters(&self) -> Result<Vec<Meter>> {
        let rows = self.cli.metric_list().await.map_err(CloudError::from)?;
        Ok(rows
            .into_iter()
            .map(|r| Meter {
                name: r.name,
                resource_id: r.resource_id,
                unit: r.unit,
            })
            .collect())
    }
}

/// Identity subsystem over `openstack user`.
pub struct IdentityClient {
    cli: Arc<OsCli>,
}

impl IdentityClient {
    pub fn new(cli: Arc<OsCli>) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl IdentityApi for IdentityClient {
    async fn list_users(&self) -> Result<Vec<Named>> {
        let rows = self.cli.user_list().await.map_err(CloudError::from)?;
        Ok(rows.into_iter().map(|r| Named::new(r.name, r.id)).collect())
    }
}
