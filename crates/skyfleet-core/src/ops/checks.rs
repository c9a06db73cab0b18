//! Fleet sweeps and subsystem liveness checks

use crate::codes::{compute, fleet, identity, image, network, orchestration, storage, telemetry};
use crate::error::{Abort, Result};
use crate::mapper;
use skyfleet_cloud::{CloudSession, ComputeApi, Meter, ResourceKind, VolumeInfo};

/// API-liveness-only sweep over the hypervisor inventory. No network
/// probe, no remediation.
#[derive(Debug)]
pub struct ApiSweep {
    /// Hostname and administrative state per checked host.
    pub states: Vec<(String, String)>,
    pub failed: usize,
}

impl ApiSweep {
    pub fn checked(&self) -> usize {
        self.states.len()
    }

    /// Non-success verdict for the process boundary, once the sweep has
    /// been reported.
    pub fn verdict(&self) -> Option<Abort> {
        if self.checked() > 0 && self.failed == self.checked() {
            Some(Abort::new(
                fleet::CATASTROPHIC_ALL_HOSTS_DOWN,
                "catastrophic network or api failure, 0 hosts are available",
            ))
        } else if self.failed > 0 {
            Some(Abort::new(
                fleet::FAILED_HOSTS_DETECTED,
                format!("{} failed hosts detected", self.failed),
            ))
        } else {
            None
        }
    }
}

pub async fn check_hosts_api(compute_api: &dyn ComputeApi, filter: Option<&str>) -> Result<ApiSweep> {
    let hosts = compute_api
        .list_hosts()
        .await
        .map_err(|e| Abort::from_cloud(compute::FAILED_HYPERVISORS_LIST, e))?;

    let mut states = Vec::new();
    let mut failed = 0;

    for host in hosts {
        if let Some(f) = filter
            && !host.hostname.eq_ignore_ascii_case(f)
        {
            continue;
        }
        if !host.admin_state.eq_ignore_ascii_case("up") {
            failed += 1;
        }
        states.push((host.hostname, host.admin_state));
    }

    Ok(ApiSweep { states, failed })
}

/// Volume status sweep.
#[derive(Debug)]
pub struct VolumeSweep {
    pub volumes: Vec<VolumeInfo>,
    pub unavailable: Vec<VolumeInfo>,
}

impl VolumeSweep {
    pub fn verdict(&self) -> Option<Abort> {
        if !self.volumes.is_empty() && self.unavailable.len() == self.volumes.len() {
            Some(Abort::new(
                fleet::NO_FREE_VOLUMES,
                format!(
                    "{} of {} volumes are not available",
                    self.unavailable.len(),
                    self.volumes.len()
                ),
            ))
        } else {
            None
        }
    }
}

pub async fn check_volumes(session: &CloudSession, filter: Option<&str>) -> Result<VolumeSweep> {
    let volumes: Vec<VolumeInfo> = session
        .volumes
        .list_volumes()
        .await
        .map_err(|e| Abort::from_cloud(storage::FAILED_VOLUMES_LIST, e))?
        .into_iter()
        .filter(|v| filter.is_none_or(|f| v.name.eq_ignore_ascii_case(f)))
        .collect();

    let unavailable = volumes
        .iter()
        .filter(|v| !v.status.eq_ignore_ascii_case("available"))
        .cloned()
        .collect();

    Ok(VolumeSweep {
        volumes,
        unavailable,
    })
}

/// Control-plane subsystems the client check can exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    Compute,
    Storage,
    Image,
    Orchestration,
    Network,
    Telemetry,
    Identity,
}

impl Subsystem {
    pub const ALL: [Subsystem; 7] = [
        Subsystem::Compute,
        Subsystem::Storage,
        Subsystem::Image,
        Subsystem::Orchestration,
        Subsystem::Network,
        Subsystem::Telemetry,
        Subsystem::Identity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Subsystem::Compute => "compute",
            Subsystem::Storage => "storage",
            Subsystem::Image => "image",
            Subsystem::Orchestration => "orchestration",
            Subsystem::Network => "network",
            Subsystem::Telemetry => "telemetry",
            Subsystem::Identity => "identity",
        }
    }
}

/// Exercise one subsystem's cheapest listing call. Failure aborts with the
/// subsystem's listing code.
pub async fn check_client(session: &CloudSession, which: Subsystem) -> Result<()> {
    match which {
        Subsystem::Compute => session
            .compute
            .list_flavors()
            .await
            .map(|_| ())
            .map_err(|e| Abort::from_cloud(compute::FAILED_FLAVORS_LIST, e)),
        Subsystem::Storage => session
            .volumes
            .list_volumes()
            .await
            .map(|_| ())
            .map_err(|e| Abort::from_cloud(storage::FAILED_VOLUMES_LIST, e)),
        Subsystem::Image => session
            .images
            .list_images()
            .await
            .map(|_| ())
            .map_err(|e| Abort::from_cloud(image::FAILED_IMAGES_LIST, e)),
        Subsystem::Orchestration => session
            .stacks
            .list_stacks()
            .await
            .map(|_| ())
            .map_err(|e| Abort::from_cloud(orchestration::FAILED_STACKS_LIST, e)),
        Subsystem::Network => session
            .networks
            .list_networks()
            .await
            .map(|_| ())
            .map_err(|e| Abort::from_cloud(network::FAILED_NETWORKS_LIST, e)),
        Subsystem::Telemetry => session
            .telemetry
            .list_meters()
            .await
            .map(|_| ())
            .map_err(|e| Abort::from_cloud(telemetry::FAILED_METERS_LIST, e)),
        Subsystem::Identity => session
            .identity
            .list_users()
            .await
            .map(|_| ())
            .map_err(|e| Abort::from_cloud(identity::FAILED_USERS_LIST, e)),
    }
}

/// Telemetry meter lookup with optional server-name and metric filters.
/// The server name resolves to an id against the server listing; meters
/// are matched on their resource id.
pub async fn list_metrics(
    session: &CloudSession,
    server: Option<&str>,
    metric: Option<&str>,
    limit: usize,
) -> Result<Vec<Meter>> {
    let meters = session
        .telemetry
        .list_meters()
        .await
        .map_err(|e| Abort::from_cloud(telemetry::FAILED_METERS_LIST, e))?;

    let server_id = match server {
        Some(name) => {
            let servers = session
                .compute
                .list_servers()
                .await
                .map_err(|e| Abort::from_cloud(compute::FAILED_SERVERS_LIST, e))?;
            let id = mapper::resolve_id(ResourceKind::Server, name, &servers).ok_or_else(|| {
                Abort::new(
                    compute::FAILED_NAME_TO_ID_MAP,
                    format!("server specified does not exist: {name}"),
                )
            })?;
            Some(id)
        }
        None => None,
    };

    Ok(meters
        .into_iter()
        .filter(|m| metric.is_none_or(|wanted| m.name == wanted))
        .filter(|m| {
            server_id
                .as_ref()
                .is_none_or(|id| m.resource_id.contains(id.as_str()))
        })
        .take(limit)
        .collect())
}
