//! Volume sweep command

use colored::Colorize;
use skyfleet_cloud::CloudSession;
use skyfleet_core::error::Result;
use skyfleet_core::ops;

pub async fn check_volumes(session: &CloudSession, filter: Option<&str>) -> Result<()> {
    let sweep = ops::check_volumes(session, filter).await?;

    if sweep.volumes.is_empty() {
        println!("No volumes to check.");
        return Ok(());
    }

    for v in &sweep.unavailable {
        println!("{} {} :: {}", v.name.yellow(), v.id, v.status);
    }

    if let Some(abort) = sweep.verdict() {
        println!("{}", "Take action to create volumes.".yellow());
        return Err(abort);
    }

    println!("{}", "All volumes are in available status".green());
    Ok(())
}
