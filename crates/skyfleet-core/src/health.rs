//! Host health aggregation
//!
//! Combines two independent liveness signals per compute host (a network
//! reachability probe and the control plane's administrative state) with
//! the host's workload inventory into one structured record. Records are
//! built even for hosts that cannot be reached at all: failure is
//! represented in-band, never by an early return.

use crate::codes::compute;
use crate::error::{Abort, Result};
use skyfleet_cloud::{CloudError, ComputeApi, Prober, WorkloadRef};

/// Aggregated health verdict for one compute host. Built fresh per
/// aggregation pass, immutable afterwards.
#[derive(Debug, Clone)]
pub struct HostRecord {
    pub hostname: String,
    pub api_up: bool,
    pub network_up: bool,
    pub has_workloads: bool,
    pub workload_refs: Vec<WorkloadRef>,
}

/// Drives the per-host probes and inventory scan.
pub struct HealthAggregator<'a> {
    compute: &'a dyn ComputeApi,
    prober: &'a dyn Prober,
}

impl<'a> HealthAggregator<'a> {
    pub fn new(compute: &'a dyn ComputeApi, prober: &'a dyn Prober) -> Self {
        Self { compute, prober }
    }

    /// Build a record for every host in the hypervisor inventory,
    /// optionally filtered to one host by exact case-insensitive name.
    /// No ordering guarantee across hosts.
    pub async fn aggregate(&self, filter_hostname: Option<&str>) -> Result<Vec<HostRecord>> {
        let hosts = self
            .compute
            .list_hosts()
            .await
            .map_err(|e| Abort::from_cloud(compute::FAILED_HYPERVISORS_LIST, e))?;

        let mut records = Vec::new();

        for host in hosts {
            if let Some(filter) = filter_hostname
                && !host.hostname.eq_ignore_ascii_case(filter)
            {
                continue;
            }

            tracing::info!("checking status of host {}", host.hostname);

            let api_up = host.admin_state.eq_ignore_ascii_case("up");
            let network_up = self.prober.reachable(host.probe_target()).await;

            let workload_refs = match self.compute.list_workloads_on_host(&host.hostname).await {
                Ok(refs) => refs,
                // The workload attribute is absent, not empty, on an idle
                // host; map that to "no workloads".
                Err(CloudError::MissingAttribute(_)) => Vec::new(),
                Err(e) => {
                    tracing::warn!("workload inventory failed for {}: {e}", host.hostname);
                    Vec::new()
                }
            };

            records.push(HostRecord {
                hostname: host.hostname,
                api_up,
                network_up,
                has_workloads: !workload_refs.is_empty(),
                workload_refs,
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skyfleet_cloud::{
        BootRequest, Created, HostInfo, Named, Observation, Result as CloudResult,
    };
    use std::collections::{HashMap, HashSet};

    struct FakeCompute {
        hosts: Vec<HostInfo>,
        workloads: HashMap<String, Vec<WorkloadRef>>,
        missing_attribute: HashSet<String>,
    }

    #[async_trait]
    impl ComputeApi for FakeCompute {
        async fn list_hosts(&self) -> CloudResult<Vec<HostInfo>> {
            Ok(self.hosts.clone())
        }

        async fn list_workloads_on_host(&self, hostname: &str) -> CloudResult<Vec<WorkloadRef>> {
            if self.missing_attribute.contains(hostname) {
                return Err(CloudError::MissingAttribute(hostname.to_string()));
            }
            Ok(self.workloads.get(hostname).cloned().unwrap_or_default())
        }

        async fn list_servers(&self) -> CloudResult<Vec<Named>> {
            Ok(Vec::new())
        }

        async fn list_flavors(&self) -> CloudResult<Vec<Named>> {
            Ok(Vec::new())
        }

        async fn list_images(&self) -> CloudResult<Vec<Named>> {
            Ok(Vec::new())
        }

        async fn list_networks(&self) -> CloudResult<Vec<Named>> {
            Ok(Vec::new())
        }

        async fn boot_server(&self, _request: &BootRequest) -> CloudResult<Created> {
            unimplemented!("not exercised")
        }

        async fn fetch_server(&self, _name: &str) -> CloudResult<Option<Observation>> {
            Ok(None)
        }

        async fn evacuate_workload(&self, _id: &str) -> CloudResult<()> {
            Ok(())
        }
    }

    struct FakeProber {
        reachable: HashSet<String>,
    }

    #[async_trait]
    impl Prober for FakeProber {
        async fn reachable(&self, address: &str) -> bool {
            self.reachable.contains(address)
        }
    }

    fn host(name: &str, state: &str) -> HostInfo {
        HostInfo {
            hostname: name.to_string(),
            admin_state: state.to_string(),
            address: String::new(),
        }
    }

    #[tokio::test]
    async fn combines_both_signals_and_inventory() {
        let compute = FakeCompute {
            hosts: vec![host("cn1", "up"), host("cn2", "down")],
            workloads: HashMap::from([(
                "cn2".to_string(),
                vec![WorkloadRef {
                    name: "web16".to_string(),
                    id: "uuid-16".to_string(),
                }],
            )]),
            missing_attribute: HashSet::new(),
        };
        let prober = FakeProber {
            reachable: HashSet::from(["cn1".to_string()]),
        };

        let records = HealthAggregator::new(&compute, &prober)
            .aggregate(None)
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        let cn1 = records.iter().find(|r| r.hostname == "cn1").unwrap();
        assert!(cn1.api_up && cn1.network_up && !cn1.has_workloads);

        let cn2 = records.iter().find(|r| r.hostname == "cn2").unwrap();
        assert!(!cn2.api_up && !cn2.network_up);
        assert!(cn2.has_workloads);
        assert_eq!(cn2.workload_refs.len(), 1);
    }

    #[tokio::test]
    async fn missing_workload_attribute_means_idle_host() {
        let compute = FakeCompute {
            hosts: vec![host("cn3", "up")],
            workloads: HashMap::new(),
            missing_attribute: HashSet::from(["cn3".to_string()]),
        };
        let prober = FakeProber {
            reachable: HashSet::from(["cn3".to_string()]),
        };

        let records = HealthAggregator::new(&compute, &prober)
            .aggregate(None)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert!(!records[0].has_workloads);
        assert!(records[0].workload_refs.is_empty());
    }

    #[tokio::test]
    async fn filter_matches_hostname_case_insensitively() {
        let compute = FakeCompute {
            hosts: vec![host("cn1", "up"), host("cn2", "up")],
            workloads: HashMap::new(),
            missing_attribute: HashSet::new(),
        };
        let prober = FakeProber {
            reachable: HashSet::new(),
        };

        let records = HealthAggregator::new(&compute, &prober)
            .aggregate(Some("CN2"))
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hostname, "cn2");
    }
}
