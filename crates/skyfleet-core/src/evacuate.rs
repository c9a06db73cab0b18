//! Evacuation controller
//!
//! Consumes aggregated host health records, applies the failsafe policy
//! and drives workload evacuation for every host judged failed. Runs the
//! fixed sequence Scanning -> Deciding -> Remediating -> Done with no
//! state persisted across runs.

use crate::codes::fleet;
use crate::error::{Abort, Result};
use crate::health::HostRecord;
use skyfleet_cloud::{ComputeApi, PowerControl};
use std::time::{Duration, Instant};

/// Health classification of one host record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostClass {
    /// Both signals down with workloads present: eligible for remediation.
    Failed,
    /// Exactly one signal down with workloads present: reported, never
    /// auto-remediated.
    Degraded,
    Healthy,
}

/// A failure candidate is a host unreachable by both signals while
/// running workloads; a degraded host fails exactly one signal.
pub fn classify(record: &HostRecord) -> HostClass {
    if !record.has_workloads {
        return HostClass::Healthy;
    }
    match (record.network_up, record.api_up) {
        (false, false) => HostClass::Failed,
        (true, true) => HostClass::Healthy,
        _ => HostClass::Degraded,
    }
}

/// Degraded host entry for the run summary.
#[derive(Debug, Clone)]
pub struct DegradedHost {
    pub hostname: String,
    pub network_up: bool,
    pub api_up: bool,
}

/// Per-host evacuation result.
#[derive(Debug, Clone)]
pub struct EvacuationOutcome {
    pub hostname: String,
    pub succeeded: bool,
    pub duration: Duration,
    pub failed_workloads: u32,
}

/// Overall verdict of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Nothing wrong, or every attempted evacuation succeeded.
    Success,
    /// Degraded hosts exist but nothing was (or could be) acted on.
    /// Deliberately distinct from success: this is a silent partial
    /// outage.
    BadStateNoAction,
    /// Failure candidates exist and auto-evacuation was not requested.
    FailedHostsDetected(usize),
    /// One or more workload evacuations failed.
    EvacuationFailures(u32),
}

impl RunStatus {
    /// Registry code for non-success verdicts.
    pub fn exit_code(&self) -> Option<u16> {
        match self {
            RunStatus::Success => None,
            RunStatus::BadStateNoAction => Some(fleet::HOSTS_IN_BAD_STATE),
            RunStatus::FailedHostsDetected(_) => Some(fleet::FAILED_HOSTS_DETECTED),
            RunStatus::EvacuationFailures(_) => Some(fleet::FAILED_HOST_EVACUATE),
        }
    }
}

/// Summary emitted by the Done state.
#[derive(Debug)]
pub struct RunReport {
    pub total_hosts: usize,
    pub failure_candidates: Vec<String>,
    pub degraded: Vec<DegradedHost>,
    pub outcomes: Vec<EvacuationOutcome>,
    /// Candidates skipped because no workloads were discoverable.
    pub skipped: Vec<String>,
    auto_evacuate: bool,
}

impl RunReport {
    pub fn failed_evacuations(&self) -> u32 {
        self.outcomes.iter().map(|o| o.failed_workloads).sum()
    }

    pub fn status(&self) -> RunStatus {
        let failed = self.failed_evacuations();
        if failed > 0 {
            RunStatus::EvacuationFailures(failed)
        } else if !self.failure_candidates.is_empty() && !self.auto_evacuate {
            RunStatus::FailedHostsDetected(self.failure_candidates.len())
        } else if self.failure_candidates.is_empty() && !self.degraded.is_empty() {
            RunStatus::BadStateNoAction
        } else {
            RunStatus::Success
        }
    }
}

/// Applies the failsafe policy and drives remediation.
pub struct EvacuationController<'a> {
    compute: &'a dyn ComputeApi,
    power: &'a dyn PowerControl,
    failsafe: Option<u32>,
    auto_evacuate: bool,
}

impl<'a> EvacuationController<'a> {
    pub fn new(
        compute: &'a dyn ComputeApi,
        power: &'a dyn PowerControl,
        failsafe: Option<u32>,
        auto_evacuate: bool,
    ) -> Self {
        Self {
            compute,
            power,
            failsafe,
            auto_evacuate,
        }
    }

    /// Deciding + Remediating over a finished health scan.
    ///
    /// Aborts before any evacuation attempt when the whole fleet is down
    /// (remediating on stale data is worse than doing nothing) or when
    /// the candidate count exceeds the failsafe threshold.
    pub async fn run(&self, records: &[HostRecord]) -> Result<RunReport> {
        let total_hosts = records.len();

        let failure_candidates: Vec<&HostRecord> = records
            .iter()
            .filter(|r| classify(r) == HostClass::Failed)
            .collect();

        let degraded: Vec<DegradedHost> = records
            .iter()
            .filter(|r| classify(r) == HostClass::Degraded)
            .map(|r| DegradedHost {
                hostname: r.hostname.clone(),
                network_up: r.network_up,
                api_up: r.api_up,
            })
            .collect();

        let failed_host_count = failure_candidates.len();

        if failed_host_count > 0 && failed_host_count == total_hosts {
            return Err(Abort::new(
                fleet::CATASTROPHIC_ALL_HOSTS_DOWN,
                "catastrophic network or api failure, 0 hosts are available, taking no action",
            ));
        }

        let failsafe = self
            .failsafe
            .unwrap_or_else(|| total_hosts.saturating_sub(1) as u32);

        if failed_host_count as u32 > failsafe {
            return Err(Abort::new(
                fleet::TOO_MANY_HOSTS_NEED_EVACUATION,
                format!(
                    "{failed_host_count} hosts need evacuation, beyond the failsafe capacity of {failsafe}"
                ),
            ));
        }

        let mut outcomes = Vec::new();
        let mut skipped = Vec::new();

        if self.auto_evacuate {
            for host in &failure_candidates {
                if host.workload_refs.is_empty() {
                    tracing::info!("skip {} as it has no server instances", host.hostname);
                    skipped.push(host.hostname.clone());
                    continue;
                }

                if let Err(e) = self.power.power_down(&host.hostname).await {
                    tracing::warn!("power down request for {} failed: {e}", host.hostname);
                }

                let start = Instant::now();
                let mut failed_workloads: u32 = 0;

                for workload in &host.workload_refs {
                    let attempt = Instant::now();
                    match self.compute.evacuate_workload(&workload.id).await {
                        Ok(()) => {
                            tracing::info!(
                                "evacuate {}:{} took {:?}",
                                workload.name,
                                workload.id,
                                attempt.elapsed()
                            );
                        }
                        Err(e) => {
                            failed_workloads += 1;
                            tracing::error!(
                                "failed to evacuate {}:{}: {e}",
                                workload.name,
                                workload.id
                            );
                        }
                    }
                }

                outcomes.push(EvacuationOutcome {
                    hostname: host.hostname.clone(),
                    succeeded: failed_workloads == 0,
                    duration: start.elapsed(),
                    failed_workloads,
                });
            }
        }

        Ok(RunReport {
            total_hosts,
            failure_candidates: failure_candidates
                .iter()
                .map(|r| r.hostname.clone())
                .collect(),
            degraded,
            outcomes,
            skipped,
            auto_evacuate: self.auto_evacuate,
        })
    }
}
