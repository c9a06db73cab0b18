//! Image creation
//!
//! The initiating upload and the convergence poll run as two independently
//! scheduled tasks. They share no state: the poller observes progress only
//! by re-reading the image listing while the upload is still in flight.

use super::{CREATE_DEADLINE, POLL_INTERVAL};
use crate::codes::image;
use crate::convergence::{PollBudget, WaitError, wait_until};
use crate::error::{Abort, Result};
use skyfleet_cloud::{CloudError, CloudSession, ImageSpec, Observation};
use std::sync::Arc;

/// Register a new image, upload its payload and wait until the listing
/// reports it "active".
pub async fn create_image(session: &CloudSession, spec: ImageSpec) -> Result<Observation> {
    if spec.name.trim().is_empty() {
        return Err(Abort::new(
            image::FAILED_CREATE_MISSING_NAME,
            "missing name of image to create",
        ));
    }
    spec.validate()
        .map_err(|e| Abort::from_cloud(image::FAILED_CREATE_MISSING_DATA, e))?;

    let listed = session
        .images
        .list_images()
        .await
        .map_err(|e| Abort::from_cloud(image::FAILED_IMAGES_LIST, e))?;
    if listed.iter().any(|i| i.name.eq_ignore_ascii_case(&spec.name)) {
        return Err(Abort::new(
            image::DUPLICATE_IMAGE_NAME,
            format!("duplicate image name already exists: {}", spec.name),
        ));
    }

    let name = spec.name.clone();
    let images_api = Arc::clone(&session.images);
    let create_task = tokio::spawn(async move { images_api.create_image(&spec).await });

    let converged = wait_until(
        || session.images.list_images(),
        |imgs: &Vec<Observation>| {
            imgs.iter()
                .any(|i| i.name.eq_ignore_ascii_case(&name) && i.status_is("active"))
        },
        POLL_INTERVAL,
        PollBudget::Deadline(CREATE_DEADLINE),
    )
    .await;

    match converged {
        Ok(imgs) => {
            // The upload task has done its job once the listing shows the
            // image active; surface its error only as a warning.
            match create_task.await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => tracing::warn!("image create call reported {e} after convergence"),
                Err(e) => tracing::warn!("image create task aborted: {e}"),
            }

            let observed = imgs
                .into_iter()
                .find(|i| i.name.eq_ignore_ascii_case(&name) && i.status_is("active"))
                .ok_or_else(|| {
                    Abort::new(
                        image::FAILED_IMAGES_LIST,
                        format!("image {name} vanished after convergence"),
                    )
                })?;
            tracing::info!("new image {} is ready", observed.name);
            Ok(observed)
        }
        Err(WaitError::Timeout(t)) => {
            // If convergence stalled because the upload itself failed,
            // report that instead of the timeout.
            match create_task.await {
                Ok(Err(CloudError::Communication(m))) => {
                    Err(Abort::new(image::FAILED_COMMUNICATION, m))
                }
                Ok(Err(e)) => Err(Abort::from_cloud(image::FAILED_CREATE_IMAGE, e)),
                _ => Err(Abort::new(
                    image::FAILED_IMAGE_CONVERGENCE,
                    format!("image {name} did not reach active: {t}"),
                )),
            }
        }
        Err(WaitError::Fetch(e)) => {
            create_task.abort();
            Err(Abort::from_cloud(image::FAILED_IMAGES_LIST, e))
        }
    }
}
