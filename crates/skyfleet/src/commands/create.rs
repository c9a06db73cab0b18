//! Create-and-converge commands

use colored::Colorize;
use skyfleet_cloud::{CloudSession, ImageSource, ImageSpec, ServerSpec, StackSpec, VolumeSpec};
use skyfleet_core::codes::{orchestration, storage};
use skyfleet_core::error::{Abort, Result};
use skyfleet_core::ops;
use std::path::PathBuf;

pub async fn server(
    session: &CloudSession,
    name: String,
    image: String,
    flavor: String,
    network: String,
    unique: bool,
) -> Result<()> {
    let spec = ServerSpec {
        name,
        image,
        flavor,
        network,
    };

    let server = ops::create_server(session, &spec, unique).await?;
    println!(
        "{}",
        format!("New instance {} is ready (id: {})", server.name, server.id).green()
    );
    Ok(())
}

pub async fn volume(
    session: &CloudSession,
    name: Option<String>,
    size: Option<u32>,
    description: Option<String>,
    config: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    let spec: VolumeSpec = match config {
        Some(path) => {
            let raw = std::fs::read_to_string(&path).map_err(|e| {
                Abort::new(
                    storage::FAILED_CREATE_VOLUME,
                    format!("failed to open volume config {}: {e}", path.display()),
                )
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                Abort::new(
                    storage::FAILED_INVALID_VOLUME_PROPERTIES,
                    format!("invalid volume properties: {e}"),
                )
            })?
        }
        None => VolumeSpec {
            name: name.unwrap_or_default(),
            size_gb: size,
            description,
            metadata: Default::default(),
        },
    };

    let created = ops::create_volume(session, &spec, force).await?;
    println!(
        "{}",
        format!("Created new volume {} id: {}", spec.name, created.id).green()
    );
    Ok(())
}

pub async fn image(
    session: &CloudSession,
    name: String,
    file: PathBuf,
    disk_format: String,
    container_format: String,
) -> Result<()> {
    let mut spec = ImageSpec::new(name, ImageSource::File(file));
    spec.disk_format = disk_format;
    spec.container_format = container_format;

    let observed = ops::create_image(session, spec).await?;
    println!(
        "{}",
        format!("New image {} is ready (id: {})", observed.name, observed.id).green()
    );
    Ok(())
}

pub async fn stack(session: &CloudSession, name: String, template: PathBuf) -> Result<()> {
    let template = std::fs::read_to_string(&template).map_err(|e| {
        Abort::new(
            orchestration::MISSING_PARAMS,
            format!("failed to read template {}: {e}", template.display()),
        )
    })?;

    let spec = StackSpec { name, template };
    let created = ops::create_stack(session, &spec).await?;
    println!(
        "{}",
        format!("New stack {} is ready (id: {})", spec.name, created.id).green()
    );
    Ok(())
}
