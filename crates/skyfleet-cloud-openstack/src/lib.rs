//! OpenStack backend for Skyfleet
//!
//! Implements the capability-client traits by shelling out to the
//! `openstack` CLI with JSON output. Credentials are injected per
//! invocation; no process-wide state.

mod clients;
mod error;
mod oscli;
mod ping;

pub use clients::{
    ComputeClient, IdentityClient, ImageClient, NetworkClient, StackClient, TelemetryClient,
    VolumeClient,
};
pub use error::{OpenStackError, Result};
pub use oscli::{OsAuth, OsCli};
pub use ping::PingProber;

use skyfleet_cloud::{CloudSession, NoopPowerControl};
use std::sync::Arc;

/// Assemble a full capability session over one authenticated CLI wrapper.
pub fn build_session(auth: OsAuth) -> CloudSession {
    let cli = Arc::new(OsCli::new(auth));

    CloudSession {
        compute: Arc::new(ComputeClient::new(cli.clone())),
        volumes: Arc::new(VolumeClient::new(cli.clone())),
        images: Arc::new(ImageClient::new(cli.clone())),
        stacks: Arc::new(StackClient::new(cli.clone())),
        networks: Arc::new(NetworkClient::new(cli.clone())),
        telemetry: Arc::new(TelemetryClient::new(cli.clone())),
        identity: Arc::new(IdentityClient::new(cli)),
        prober: Arc::new(PingProber::default()),
        power: Arc::new(NoopPowerControl),
    }
}
