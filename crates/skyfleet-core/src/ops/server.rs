//! Server creation

use super::{CREATE_DEADLINE, POLL_INTERVAL};
use crate::codes::compute;
use crate::convergence::{PollBudget, WaitError, wait_until};
use crate::error::{Abort, Result};
use crate::mapper;
use skyfleet_cloud::{BootRequest, CloudSession, Observation, ResourceKind, ServerSpec};

/// Create a new server instance and wait for it to reach "active".
///
/// With `unique` set, an existing server with the same display name aborts
/// the operation instead of booting a doppelganger.
pub async fn create_server(
    session: &CloudSession,
    spec: &ServerSpec,
    unique: bool,
) -> Result<Observation> {
    spec.validate()
        .map_err(|e| Abort::from_cloud(compute::FAILED_CREATE_SERVER_INVALID_INPUT, e))?;

    if unique {
        let servers = session
            .compute
            .list_servers()
            .await
            .map_err(|e| Abort::from_cloud(compute::FAILED_SERVERS_LIST, e))?;
        if servers.iter().any(|s| s.name == spec.name) {
            return Err(Abort::new(
                compute::FAILED_DUPLICATE_SERVER_NAME,
                format!("duplicate server name: {}", spec.name),
            ));
        }
    }

    let networks = session
        .compute
        .list_networks()
        .await
        .map_err(|e| Abort::from_cloud(compute::FAILED_NETWORKS_LIST, e))?;
    let flavors = session
        .compute
        .list_flavors()
        .await
        .map_err(|e| Abort::from_cloud(compute::FAILED_FLAVORS_LIST, e))?;
    let images = session
        .compute
        .list_images()
        .await
        .map_err(|e| Abort::from_cloud(compute::FAILED_IMAGES_LIST, e))?;

    let network_id = mapper::resolve_id(ResourceKind::Network, &spec.network, &networks);
    let flavor_id = mapper::resolve_id(ResourceKind::Flavor, &spec.flavor, &flavors);
    let image_id = mapper::resolve_id(ResourceKind::Image, &spec.image, &images);

    let (Some(network_id), Some(flavor_id), Some(image_id)) = (network_id, flavor_id, image_id)
    else {
        return Err(Abort::new(
            compute::FAILED_NAME_TO_ID_MAP,
            format!(
                "failed to map name to id for one of image={} flavor={} network={}",
                spec.image, spec.flavor, spec.network
            ),
        ));
    };

    let request = BootRequest {
        name: spec.name.clone(),
        image_id,
        flavor_id,
        network_id,
    };

    let created = session
        .compute
        .boot_server(&request)
        .await
        .map_err(|e| Abort::from_cloud(compute::FAILED_CREATE_SERVER, e))?;

    tracing::info!("created new server {} id: {}", spec.name, created.id);

    let observed = wait_until(
        || session.compute.fetch_server(&spec.name),
        |state: &Option<Observation>| matches!(state, Some(o) if o.status_is("active")),
        POLL_INTERVAL,
        PollBudget::Deadline(CREATE_DEADLINE),
    )
    .await;

    match observed {
        Ok(state) => {
            let server = state.ok_or_else(|| {
                Abort::new(
                    compute::FAILED_CREATE_SERVER,
                    format!("server {} vanished after convergence", spec.name),
                )
            })?;
            tracing::info!("new instance {} is ready", server.name);
            Ok(server)
        }
        Err(WaitError::Timeout(t)) => Err(Abort::new(
            compute::FAILED_SERVER_CONVERGENCE,
            format!("server {} did not reach active: {t}", spec.name),
        )),
        Err(WaitError::Fetch(e)) => Err(Abort::from_cloud(compute::FAILED_SERVERS_LIST, e)),
    }
}
