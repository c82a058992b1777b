pub mod cluster;
pub mod instance;

use stratus_cloud_aws::{AwsCloudConfig, AwsCredentials};

/// Region every resource is provisioned in. Not configurable from the CLI
/// yet.
pub const DEFAULT_REGION: &str = "eu-west-1";

/// Resolve credentials from the environment and build the cloud config.
/// Fails before any provider call is made.
pub fn load_cloud_config() -> anyhow::Result<AwsCloudConfig> {
    let credentials = AwsCredentials::from_env()?;
    Ok(AwsCloudConfig::new(credentials, DEFAULT_REGION))
}
