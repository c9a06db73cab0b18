//! Fatal-failure type carrying its registry code

use crate::codes;
use skyfleet_cloud::CloudError;
use thiserror::Error;

/// An unrecoverable failure. Carries the registry code the process
/// boundary reports through; the message is the human-facing detail.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct Abort {
    pub code: u16,
    pub message: String,
}

impl Abort {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Wrap a capability-client failure under the given code.
    pub fn from_cloud(code: u16, err: CloudError) -> Self {
        Self {
            code,
            message: err.to_string(),
        }
    }

    pub fn descriptor(&self) -> &'static str {
        codes::describe(self.code)
    }

    /// Process exit status derived from the code's high-order digits.
    pub fn exit_status(&self) -> i32 {
        codes::status_of(self.code)
    }
}

pub type Result<T> = std::result::Result<T, Abort>;
