pub mod clients;
pub mod create;
pub mod hosts;
pub mod metrics;
pub mod show;
pub mod volumes;
