//! Create-and-converge operations and fleet sweeps
//!
//! Every create operation follows the same shape: validate the spec,
//! resolve referenced display names through the mapper, issue the create,
//! then drive the convergence poller until the resource reaches its
//! target state.

mod checks;
mod image;
mod server;
mod stack;
mod volume;

pub use checks::{ApiSweep, Subsystem, VolumeSweep, check_client, check_hosts_api, check_volumes, list_metrics};
pub use image::create_image;
pub use server::create_server;
pub use stack::create_stack;
pub use volume::create_volume;

use std::time::Duration;

/// Interval between convergence polls for fast-settling resources.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Stacks settle slower; poll them at a wider interval.
pub(crate) const STACK_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Wall-clock budget for any single create to converge.
pub(crate) const CREATE_DEADLINE: Duration = Duration::from_secs(600);
