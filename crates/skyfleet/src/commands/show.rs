//! Read-only listings

use skyfleet_cloud::{CloudSession, Named};
use skyfleet_core::codes::{compute, orchestration, storage};
use skyfleet_core::error::{Abort, Result};
use skyfleet_core::health::HealthAggregator;

/// Aligned name/id columns, padded to the widest name.
fn print_named(title: &str, rows: &[Named]) {
    println!("\n{title}:");
    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0) + 2;
    for row in rows {
        println!("{:<width$}{}", row.name, row.id);
    }
}

pub async fn hosts(session: &CloudSession) -> Result<()> {
    let hosts = session
        .compute
        .list_hosts()
        .await
        .map_err(|e| Abort::from_cloud(compute::FAILED_HYPERVISORS_LIST, e))?;

    println!("\nAvailable hosts:");
    for h in &hosts {
        println!(
            "\n{}\nstate={}\naddress={}",
            h.hostname,
            h.admin_state,
            if h.address.is_empty() { "-" } else { &h.address }
        );
    }
    Ok(())
}

/// Full health records including probe results and workload inventory.
pub async fn hosts_full(session: &CloudSession, filter: Option<&str>) -> Result<()> {
    let aggregator = HealthAggregator::new(session.compute.as_ref(), session.prober.as_ref());
    let records = aggregator.aggregate(filter).await?;

    for r in &records {
        println!(
            "\n{}\nnetwork_up={}\napi_up={}\nworkloads={}",
            r.hostname,
            r.network_up,
            r.api_up,
            r.workload_refs.len()
        );
        for w in &r.workload_refs {
            println!("  {} {}", w.name, w.id);
        }
    }
    Ok(())
}

pub async fn flavors(session: &CloudSession) -> Result<()> {
    let rows = session
        .compute
        .list_flavors()
        .await
        .map_err(|e| Abort::from_cloud(compute::FAILED_FLAVORS_LIST, e))?;
    print_named("Available flavors", &rows);
    Ok(())
}

pub async fn networks(session: &CloudSession) -> Result<()> {
    let rows = session
        .compute
        .list_networks()
        .await
        .map_err(|e| Abort::from_cloud(compute::FAILED_NETWORKS_LIST, e))?;
    print_named("Available networks", &rows);
    Ok(())
}

pub async fn images(session: &CloudSession) -> Result<()> {
    let rows = session
        .compute
        .list_images()
        .await
        .map_err(|e| Abort::from_cloud(compute::FAILED_IMAGES_LIST, e))?;
    print_named("Available images", &rows);
    Ok(())
}

pub async fn volumes(session: &CloudSession) -> Result<()> {
    let rows = session
        .volumes
        .list_volumes()
        .await
        .map_err(|e| Abort::from_cloud(storage::FAILED_VOLUMES_LIST, e))?;

    println!("\nAll volumes:");
    let width = rows.iter().map(|v| v.name.len()).max().unwrap_or(0) + 2;
    for v in &rows {
        println!("{:<width$}{}  {}  {}GB", v.name, v.id, v.status, v.size_gb);
    }
    Ok(())
}

pub async fn stacks(session: &CloudSession) -> Result<()> {
    let rows = session
        .stacks
        .list_stacks()
        .await
        .map_err(|e| Abort::from_cloud(orchestration::FAILED_STACKS_LIST, e))?;

    if rows.is_empty() {
        println!("\nNo stacks found");
        return Ok(());
    }

    println!("\nAvailable stacks:");
    let width = rows.iter().map(|s| s.name.len()).max().unwrap_or(0) + 2;
    for s in &rows {
        println!("{:<width$}{}  {}", s.name, s.id, s.status);
    }
    Ok(())
}
