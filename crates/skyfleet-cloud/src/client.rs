//! Capability-client traits
//!
//! One trait per control-plane subsystem. The orchestration core only ever
//! talks to these traits; concrete backends live in their own crates.

use crate::error::Result;
use crate::spec::{BootRequest, ImageSpec, StackSpec, VolumeSpec};
use crate::types::{Created, HostInfo, Meter, Named, Observation, VolumeInfo, WorkloadRef};
use async_trait::async_trait;
use std::sync::Arc;

/// Compute subsystem: hosts, servers and the evacuation primitive.
#[async_trait]
pub trait ComputeApi: Send + Sync {
    /// Hypervisor inventory for the whole fleet.
    async fn list_hosts(&self) -> Result<Vec<HostInfo>>;

    /// Instances currently scheduled on one host. Implementations must map
    /// the control plane's absent-attribute response for an idle host to an
    /// empty list, not an error.
    async fn list_workloads_on_host(&self, hostname: &str) -> Result<Vec<WorkloadRef>>;

    async fn list_servers(&self) -> Result<Vec<Named>>;

    async fn list_flavors(&self) -> Result<Vec<Named>>;

    async fn list_images(&self) -> Result<Vec<Named>>;

    async fn list_networks(&self) -> Result<Vec<Named>>;

    /// Boot a new instance from a fully resolved request.
    async fn boot_server(&self, request: &BootRequest) -> Result<Created>;

    /// Current observation of one server by name, `None` when not listed yet.
    async fn fetch_server(&self, name: &str) -> Result<Option<Observation>>;

    /// Evacuate one workload off its failed host. Shared storage is assumed
    /// and the scheduler picks the target host.
    async fn evacuate_workload(&self, id: &str) -> Result<()>;
}

/// Block-storage subsystem.
#[async_trait]
pub trait VolumeApi: Send + Sync {
    async fn list_volumes(&self) -> Result<Vec<VolumeInfo>>;

    async fn create_volume(&self, spec: &VolumeSpec) -> Result<Created>;

    async fn delete_volume(&self, id: &str) -> Result<()>;
}

/// Image subsystem.
#[async_trait]
pub trait ImageApi: Send + Sync {
    async fn list_images(&self) -> Result<Vec<Observation>>;

    /// Register the image and upload its payload. Blocks until the upload
    /// request has been issued; convergence to "active" is observed by the
    /// caller through `list_images`.
    async fn create_image(&self, spec: &ImageSpec) -> Result<Created>;

    async fn delete_image(&self, id: &str) -> Result<()>;
}

/// Orchestration (stack) subsystem.
#[async_trait]
pub trait StackApi: Send + Sync {
    async fn list_stacks(&self) -> Result<Vec<Observation>>;

    async fn create_stack(&self, spec: &StackSpec) -> Result<Created>;

    async fn delete_stack(&self, id: &str) -> Result<()>;
}

/// Network subsystem.
#[async_trait]
pub trait NetworkApi: Send + Sync {
    async fn list_networks(&self) -> Result<Vec<Named>>;
}

/// Telemetry subsystem.
#[async_trait]
pub trait TelemetryApi: Send + Sync {
    async fn list_meters(&self) -> Result<Vec<Meter>>;
}

/// Identity subsystem.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<Named>>;
}

/// Transport-level reachability probe.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Bounded probe against one address; `false` on any failure.
    async fn reachable(&self, address: &str) -> bool;
}

/// Best-effort host power control, swappable without touching the
/// evacuation controller.
#[async_trait]
pub trait PowerControl: Send + Sync {
    async fn power_down(&self, hostname: &str) -> Result<()>;
}

/// Default power control: hardware integration is not wired up, so the
/// request is acknowledged without acting.
#[derive(Debug, Default)]
pub struct NoopPowerControl;

#[async_trait]
impl PowerControl for NoopPowerControl {
    async fn power_down(&self, hostname: &str) -> Result<()> {
        tracing::info!("power down of {hostname} not implemented, reporting success");
        Ok(())
    }
}

/// Dependency-injection context bundling every capability client for one
/// run. Constructed once at startup and passed into each component; never
/// a process-wide singleton.
#[derive(Clone)]
pub struct CloudSession {
    pub compute: Arc<dyn ComputeApi>,
    pub volumes: Arc<dyn VolumeApi>,
    pub images: Arc<dyn ImageApi>,
    pub stacks: Arc<dyn StackApi>,
    pub networks: Arc<dyn NetworkApi>,
    pub telemetry: Arc<dyn TelemetryApi>,
    pub identity: Arc<dyn IdentityApi>,
    pub prober: Arc<dyn Prober>,
    pub power: Arc<dyn PowerControl>,
}
