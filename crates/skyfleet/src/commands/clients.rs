//! Capability-client liveness checks

use colored::Colorize;
use skyfleet_cloud::CloudSession;
use skyfleet_core::error::Result;
use skyfleet_core::ops::{self, Subsystem};

/// Exercise one cheap listing per requested subsystem. The first failure
/// aborts with that subsystem's code, matching per-band reporting.
pub async fn check(session: &CloudSession, subsystems: &[Subsystem]) -> Result<()> {
    for subsystem in subsystems {
        match ops::check_client(session, *subsystem).await {
            Ok(()) => println!("{}", format!("{}=PASS", subsystem.name()).green()),
            Err(abort) => {
                println!("{}", format!("{}=FAILED", subsystem.name()).red());
                return Err(abort);
            }
        }
    }
    Ok(())
}
