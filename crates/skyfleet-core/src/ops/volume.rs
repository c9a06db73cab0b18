//! Volume creation

use super::{CREATE_DEADLINE, POLL_INTERVAL};
use crate::codes::storage;
use crate::convergence::{PollBudget, WaitError, wait_until};
use crate::error::{Abort, Result};
use skyfleet_cloud::{CloudSession, Created, VolumeInfo, VolumeSpec};

/// Create a new volume and wait for it to become "available".
///
/// A duplicate display name aborts unless `force` is set, in which case
/// the existing volume is deleted first.
pub async fn create_volume(
    session: &CloudSession,
    spec: &VolumeSpec,
    force: bool,
) -> Result<Created> {
    spec.validate()
        .map_err(|e| Abort::from_cloud(storage::FAILED_INVALID_VOLUME_PROPERTIES, e))?;

    let volumes = session
        .volumes
        .list_volumes()
        .await
        .map_err(|e| Abort::from_cloud(storage::FAILED_VOLUMES_LIST, e))?;

    if let Some(existing) = volumes.iter().find(|v| v.name == spec.name) {
        if force {
            tracing::info!("force re-create requested, deleting volume {}", spec.name);
            session
                .volumes
                .delete_volume(&existing.id)
                .await
                .map_err(|e| Abort::from_cloud(storage::FAILED_CREATE_VOLUME, e))?;
        } else {
            return Err(Abort::new(
                storage::FAILED_DUPLICATE_VOLUME_NAME,
                format!("volume name is in use: {}", spec.name),
            ));
        }
    }

    let created = session
        .volumes
        .create_volume(spec)
        .await
        .map_err(|e| Abort::from_cloud(storage::FAILED_CREATE_VOLUME, e))?;

    tracing::info!("created new volume {} id: {}", spec.name, created.id);

    let converged = wait_until(
        || session.volumes.list_volumes(),
        |vols: &Vec<VolumeInfo>| {
            vols.iter().any(|v| {
                v.name.eq_ignore_ascii_case(&spec.name) && v.status.eq_ignore_ascii_case("available")
            })
        },
        POLL_INTERVAL,
        PollBudget::Deadline(CREATE_DEADLINE),
    )
    .await;

    match converged {
        Ok(_) => {
            tracing::info!("new volume {} is ready", spec.name);
            Ok(created)
        }
        Err(WaitError::Timeout(t)) => Err(Abort::new(
            storage::FAILED_VOLUME_CONVERGENCE,
            format!("volume {} did not reach available: {t}", spec.name),
        )),
        Err(WaitError::Fetch(e)) => Err(Abort::from_cloud(storage::FAILED_VOLUME_CHECK, e)),
    }
}
