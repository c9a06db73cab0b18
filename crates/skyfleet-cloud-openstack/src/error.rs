//! OpenStack backend error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenStackError {
    #[error("openstack CLI not found. Please install python-openstackclient")]
    CliNotFound,

    #[error("openstack authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("openstack command failed: {0}")]
    CommandFailed(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OpenStackError>;

impl From<OpenStackError> for skyfleet_cloud::CloudError {
    fn from(err: OpenStackError) -> Self {
        use skyfleet_cloud::CloudError;
        match err {
            OpenStackError::CliNotFound => CloudError::ClientInit(err.to_string()),
            OpenStackError::AuthenticationFailed(m) => CloudError::ClientInit(m),
            OpenStackError::CommandFailed(m) => CloudError::CommandFailed(m),
            OpenStackError::JsonError(e) => CloudError::Json(e),
            OpenStackError::IoError(e) => CloudError::Io(e),
        }
    }
}
