//! Telemetry meter listing

use skyfleet_cloud::CloudSession;
use skyfleet_core::error::Result;
use skyfleet_core::ops;

pub async fn list(
    session: &CloudSession,
    server: Option<&str>,
    metric: Option<&str>,
    limit: usize,
) -> Result<()> {
    let meters = ops::list_metrics(session, server, metric, limit).await?;

    if meters.is_empty() {
        println!("No meters matched.");
        return Ok(());
    }

    for m in &meters {
        println!("{}  {}  {}", m.name, m.unit, m.resource_id);
    }
    Ok(())
}
