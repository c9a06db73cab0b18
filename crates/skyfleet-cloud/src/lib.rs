//! Capability-client abstraction for Skyfleet
//!
//! Defines the per-subsystem traits the orchestration core depends on, the
//! shared wire types, the typed create specs and the `CloudError` taxonomy.
//! Concrete backends (e.g. the `openstack` CLI wrapper) implement these
//! traits in their own crates.

mod client;
mod error;
mod spec;
mod types;

pub use client::{
    CloudSession, ComputeApi, IdentityApi, ImageApi, NetworkApi, NoopPowerControl, PowerControl,
    Prober, StackApi, TelemetryApi, VolumeApi,
};
pub use error::{CloudError, Result};
pub use spec::{
    BootRequest, DEFAULT_VOLUME_SIZE_GB, ImageSource, ImageSpec, ServerSpec, StackSpec, VolumeSpec,
};
pub use types::{
    Created, HostInfo, Meter, Named, Observation, ResourceKind, VolumeInfo, WorkloadRef,
};
