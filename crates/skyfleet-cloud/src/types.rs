//! Shared data types exchanged between the orchestration core and the
//! capability clients.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One compute host as reported by the control plane's hypervisor inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostInfo {
    /// Hypervisor hostname (unique key within the fleet)
    pub hostname: String,

    /// Administrative state as reported by the control plane ("up"/"down")
    pub admin_state: String,

    /// Address used for network reachability probes; empty when the
    /// control plane does not expose one (the hostname is probed instead)
    pub address: String,
}

impl HostInfo {
    /// Target for the reachability probe.
    pub fn probe_target(&self) -> &str {
        if self.address.is_empty() {
            &self.hostname
        } else {
            &self.address
        }
    }
}

/// A running instance scheduled on a host, identified for evacuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadRef {
    pub name: String,
    pub id: String,
}

/// A listed resource exposing a human-readable label and an opaque id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
    pub id: String,
}

impl Named {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Result of a create call: the new resource id and its transitional state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub id: String,
    pub status: String,
}

/// A freshly fetched observation of one resource's external state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub id: String,
    pub name: String,
    pub status: String,
}

impl Observation {
    /// Case-insensitive status comparison, the way every convergence
    /// predicate evaluates control-plane states.
    pub fn status_is(&self, status: &str) -> bool {
        self.status.eq_ignore_ascii_case(status)
    }
}

/// Volume listing entry with the details the volume sweep reports on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeInfo {
    pub id: String,
    pub name: String,
    pub status: String,
    pub size_gb: u32,
}

/// Telemetry meter sample reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meter {
    pub name: String,
    pub resource_id: String,
    pub unit: String,
}

/// Resource kinds the mapper resolves display names for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Server,
    Flavor,
    Image,
    Network,
    Volume,
    Stack,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Server => "server",
            ResourceKind::Flavor => "flavor",
            ResourceKind::Image => "image",
            ResourceKind::Network => "network",
            ResourceKind::Volume => "volume",
            ResourceKind::Stack => "stack",
        };
        write!(f, "{s}")
    }
}
