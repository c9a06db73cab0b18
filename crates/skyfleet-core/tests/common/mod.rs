//! Shared in-memory capability clients for core integration tests.

use async_trait::async_trait;
use skyfleet_cloud::{
    BootRequest, CloudError, CloudSession, ComputeApi, Created, HostInfo, IdentityApi, ImageApi,
    ImageSpec, Meter, Named, NetworkApi, NoopPowerControl, Observation, Prober, Result, StackApi,
    StackSpec, TelemetryApi, VolumeApi, VolumeInfo, VolumeSpec, WorkloadRef,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

/// Scripted, inspectable stand-in for every capability client.
#[derive(Default)]
pub struct MockCloud {
    pub hosts: Vec<HostInfo>,
    pub workloads: HashMap<String, Vec<WorkloadRef>>,
    pub reachable: HashSet<String>,

    pub networks: Vec<Named>,
    pub flavors: Vec<Named>,
    pub boot_images: Vec<Named>,
    pub servers: Vec<Named>,

    pub fail_evacuate: HashSet<String>,
    pub evacuated: Mutex<Vec<String>>,

    /// Scripted responses for `fetch_server`; the last entry repeats.
    pub server_states: Mutex<VecDeque<Option<Observation>>>,

    /// Scripted snapshots for `list_volumes`; the last entry repeats.
    pub volume_snapshots: Mutex<VecDeque<Vec<VolumeInfo>>>,

    /// Scripted snapshots for `list_images` (image subsystem).
    pub image_snapshots: Mutex<VecDeque<Vec<Observation>>>,

    /// Scripted snapshots for `list_stacks`.
    pub stack_snapshots: Mutex<VecDeque<Vec<Observation>>>,
}

fn next_scripted<T: Clone + Default>(deque: &Mutex<VecDeque<T>>) -> T {
    let mut q = deque.lock().unwrap();
    if q.len() > 1 {
        q.pop_front().unwrap_or_default()
    } else {
        q.front().cloned().unwrap_or_default()
    }
}

impl MockCloud {
    pub fn host(name: &str, state: &str) -> HostInfo {
        HostInfo {
            hostname: name.to_string(),
            admin_state: state.to_string(),
            address: String::new(),
        }
    }

    pub fn workload(name: &str, id: &str) -> WorkloadRef {
        WorkloadRef {
            name: name.to_string(),
            id: id.to_string(),
        }
    }

    pub fn attempts(&self) -> Vec<String> {
        self.evacuated.lock().unwrap().clone()
    }
}

#[async_trait]
impl ComputeApi for MockCloud {
    async fn list_hosts(&self) -> Result<Vec<HostInfo>> {
        Ok(self.hosts.clone())
    }

    async fn list_workloads_on_host(&self, hostname: &str) -> Result<Vec<WorkloadRef>> {
        Ok(self.workloads.get(hostname).cloned().unwrap_or_default())
    }

    async fn list_servers(&self) -> Result<Vec<Named>> {
        Ok(self.servers.clone())
    }

    async fn list_flavors(&self) -> Result<Vec<Named>> {
        Ok(self.flavors.clone())
    }

    async fn list_images(&self) -> Result<Vec<Named>> {
        Ok(self.boot_images.clone())
    }

    async fn list_networks(&self) -> Result<Vec<Named>> {
        Ok(self.networks.clone())
    }

    async fn boot_server(&self, request: &BootRequest) -> Result<Created> {
        Ok(Created {
            id: format!("srv-{}", request.name),
            status: "BUILD".to_string(),
        })
    }

    async fn fetch_server(&self, _name: &str) -> Result<Option<Observation>> {
        Ok(next_scripted(&self.server_states))
    }

    async fn evacuate_workload(&self, id: &str) -> Result<()> {
        self.evacuated.lock().unwrap().push(id.to_string());
        if self.fail_evacuate.contains(id) {
            return Err(CloudError::ApiError(format!("evacuate {id} rejected")));
        }
        Ok(())
    }
}

#[async_trait]
impl VolumeApi for MockCloud {
    async fn list_volumes(&self) -> Result<Vec<VolumeInfo>> {
        Ok(next_scripted(&self.volume_snapshots))
    }

    async fn create_volume(&self, spec: &VolumeSpec) -> Result<Created> {
        Ok(Created {
            id: format!("vol-{}", spec.name),
            status: "creating".to_string(),
        })
    }

    async fn delete_volume(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ImageApi for MockCloud {
    async fn list_images(&self) -> Result<Vec<Observation>> {
        Ok(next_scripted(&self.image_snapshots))
    }

    async fn create_image(&self, spec: &ImageSpec) -> Result<Created> {
        Ok(Created {
            id: format!("img-{}", spec.name),
            status: "queued".to_string(),
        })
    }

    async fn delete_image(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl StackApi for MockCloud {
    async fn list_stacks(&self) -> Result<Vec<Observation>> {
        Ok(next_scripted(&self.stack_snapshots))
    }

    async fn create_stack(&self, spec: &StackSpec) -> Result<Created> {
        Ok(Created {
            id: format!("stk-{}", spec.name),
            status: "CREATE_IN_PROGRESS".to_string(),
        })
    }

    async fn delete_stack(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl NetworkApi for MockCloud {
    async fn list_networks(&self) -> Result<Vec<Named>> {
        Ok(self.networks.clone())
    }
}

#[async_trait]
impl TelemetryApi for MockCloud {
    async fn list_meters(&self) -> Result<Vec<Meter>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl IdentityApi for MockCloud {
    async fn list_users(&self) -> Result<Vec<Named>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl Prober for MockCloud {
    async fn reachable(&self, address: &str) -> bool {
        self.reachable.contains(address)
    }
}

/// Assemble a session where every capability points at the same mock.
pub fn session(mock: Arc<MockCloud>) -> CloudSession {
    CloudSession {
        compute: mock.clone(),
        volumes: mock.clone(),
        images: mock.clone(),
        stacks: mock.clone(),
        networks: mock.clone(),
        telemetry: mock.clone(),
        identity: mock.clone(),
        prober: mock,
        power: Arc::new(NoopPowerControl),
    }
}
