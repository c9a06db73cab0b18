//! Host health commands

use colored::Colorize;
use skyfleet_cloud::CloudSession;
use skyfleet_core::codes::fleet;
use skyfleet_core::error::{Abort, Result};
use skyfleet_core::evacuate::{EvacuationController, RunStatus};
use skyfleet_core::health::HealthAggregator;
use skyfleet_core::ops;

/// Full health scan: network probe plus API liveness per host, then the
/// evacuation decision engine.
pub async fn check_hosts(
    session: &CloudSession,
    filter: Option<&str>,
    evacuate: bool,
    failsafe: Option<u32>,
) -> Result<()> {
    let aggregator = HealthAggregator::new(session.compute.as_ref(), session.prober.as_ref());
    let records = aggregator.aggregate(filter).await?;

    let controller = EvacuationController::new(
        session.compute.as_ref(),
        session.power.as_ref(),
        failsafe,
        evacuate,
    );
    let report = controller.run(&records).await?;

    if !report.degraded.is_empty() {
        println!("\nHosts in bad state, one of network access or api access failed.\n");
        println!("HOST:NETWORK:API");
        for d in &report.degraded {
            println!("{}:{}:{}", d.hostname, d.network_up, d.api_up);
        }
    }

    for outcome in &report.outcomes {
        let verdict = if outcome.succeeded {
            "ok".green()
        } else {
            format!("{} failed", outcome.failed_workloads).red()
        };
        println!(
            "evacuation of {} took {:?} [{verdict}]",
            outcome.hostname, outcome.duration
        );
    }
    for host in &report.skipped {
        println!("skipped {host}: no server instances");
    }

    match report.status() {
        RunStatus::Success => {
            println!(
                "\nSummary:\n{}",
                "All systems are up and responding, no action needed.".green()
            );
            Ok(())
        }
        RunStatus::BadStateNoAction => Err(Abort::new(
            fleet::HOSTS_IN_BAD_STATE,
            "hosts in bad state, no action taken",
        )),
        RunStatus::FailedHostsDetected(n) => Err(Abort::new(
            fleet::FAILED_HOSTS_DETECTED,
            format!("{n} failed hosts, refer to the run log for details"),
        )),
        RunStatus::EvacuationFailures(n) => Err(Abort::new(
            fleet::FAILED_HOST_EVACUATE,
            format!("{n} failed evacuations, refer to the run log for details"),
        )),
    }
}

/// API-liveness-only sweep: no network probe, no remediation.
pub async fn check_hosts_api(session: &CloudSession, filter: Option<&str>) -> Result<()> {
    let sweep = ops::check_hosts_api(session.compute.as_ref(), filter).await?;

    if sweep.failed == 0 {
        println!(
            "All hosts ({}) are responding to api calls.",
            sweep.checked()
        );
        return Ok(());
    }

    for (host, state) in &sweep.states {
        println!("{host} {state}");
    }

    match sweep.verdict() {
        Some(abort) => Err(abort),
        None => Ok(()),
    }
}
