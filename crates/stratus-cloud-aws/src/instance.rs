//! EC2 instance operations.

use tokio::time::{Duration, Instant, sleep};

use crate::error::{AwsError, Result};
use crate::manager::AwsCloudManager;
use crate::tags::build_aws_tags;

const MAX_START_WAIT: Duration = Duration::from_secs(5 * 60);
const START_CHECK_INTERVAL: Duration = Duration::from_secs(10);

/// Launch request for a single instance.
#[derive(Debug, Clone)]
pub struct CreateInstanceConfig {
    pub image_id: String,
    pub instance_type: String,
}

/// Instance fields this tool reads back. Fields the provider omits map to
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceInfo {
    pub instance_id: String,
    pub state: String,
    pub instance_type: String,
    pub public_ip: String,
    pub private_ip: String,
}

/// State transition reported by a terminate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceStateChange {
    pub instance_id: String,
    pub previous_state: String,
    pub current_state: String,
}

impl AwsCloudManager {
    /// Launch one instance tagged to `cluster_name`.
    pub async fn create_instance(
        &self,
        config: &CreateInstanceConfig,
        cluster_name: &str,
    ) -> Result<InstanceInfo> {
        tracing::info!(
            "Creating EC2 instance with image_id={} instance_type={}",
            config.image_id,
            config.instance_type
        );
        let tags = build_aws_tags(cluster_name, None);
        let info = self.ec2().await.run_instance(config, tags).await?;
        tracing::info!(
            "Instance {} created in state {}",
            info.instance_id,
            info.state
        );
        Ok(info)
    }

    /// All instances visible to the account.
    pub async fn list_instances(&self) -> Result<Vec<InstanceInfo>> {
        tracing::debug!("Listing EC2 instances");
        let instances = self.ec2().await.describe_instances(&[]).await?;
        tracing::info!("Listed {} instances", instances.len());
        Ok(instances)
    }

    /// A single instance by id, if the provider knows it.
    pub async fn describe_instance(&self, instance_id: &str) -> Result<Option<InstanceInfo>> {
        let ids = [instance_id.to_string()];
        let instances = self.ec2().await.describe_instances(&ids).await?;
        Ok(instances.into_iter().next())
    }

    /// Terminate an instance. Termination is asynchronous on the provider
    /// side; only the state transition is reported here.
    pub async fn delete_instance(&self, instance_id: &str) -> Result<()> {
        tracing::info!("Deleting EC2 instance {}", instance_id);
        let change = self.ec2().await.terminate_instance(instance_id).await?;
        tracing::info!(
            "Instance {} termination initiated: {} -> {}",
            change.instance_id,
            change.previous_state,
            change.current_state
        );
        Ok(())
    }

    /// Poll until the instance reports `running`. Fails immediately when
    /// the instance lands in `terminated` or `stopped`, and after five
    /// minutes without reaching `running`.
    pub async fn wait_for_instance_running(&self, instance_id: &str) -> Result<()> {
        tracing::info!("Waiting for instance {} to be running", instance_id);
        let start = Instant::now();

        loop {
            if start.elapsed() > MAX_START_WAIT {
                tracing::error!("Timeout waiting for instance {} to start", instance_id);
                return Err(AwsError::InstanceStartTimeout(instance_id.to_string()));
            }

            if let Some(instance) = self.describe_instance(instance_id).await? {
                tracing::debug!("Instance {} state check: {}", instance_id, instance.state);

                match instance.state.as_str() {
                    "running" => {
                        tracing::info!("Instance {} is now running", instance_id);
                        return Ok(());
                    }
                    "terminated" | "stopped" => {
                        tracing::error!(
                            "Instance {} entered invalid state {}",
                            instance_id,
                            instance.state
                        );
                        return Err(AwsError::InstanceFailed {
                            id: instance_id.to_string(),
                            state: instance.state,
                        });
                    }
                    _ => {}
                }
            }

            sleep(START_CHECK_INTERVAL).await;
        }
    }
}
