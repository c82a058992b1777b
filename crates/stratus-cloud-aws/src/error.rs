//! AWS provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("required environment variable {0} is not set or empty")]
    MissingCredential(&'static str),

    #[error("EC2 API error: {0}")]
    Api(String),

    #[error("EC2 response missing {0}")]
    MalformedResponse(&'static str),

    #[error("timeout waiting for instance {0} to start")]
    InstanceStartTimeout(String),

    #[error("instance {id} entered {state} state, failed to start")]
    InstanceFailed { id: String, state: String },
}

impl AwsError {
    /// Collapse an SDK error into its full display chain.
    pub(crate) fn api(err: impl std::error::Error) -> Self {
        Self::Api(aws_sdk_ec2::error::DisplayErrorContext(&err).to_string())
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
