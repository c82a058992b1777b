//! Cluster teardown: delete every network tagged to the cluster.

use async_trait::async_trait;
use stratus_cloud_aws::{AwsCloudConfig, Result};

use crate::action::{ActionContext, ClusterAction};

/// Destroys the cluster infrastructure.
///
/// Looks up all VPCs carrying the cluster tag and deletes them in the
/// order the provider returned. The first failing delete aborts the
/// batch.
pub struct ClusterTeardown {
    ctx: ActionContext,
}

impl ClusterTeardown {
    pub fn new(cluster_name: impl Into<String>, cloud_config: AwsCloudConfig) -> Self {
        Self {
            ctx: ActionContext::new(cluster_name, cloud_config),
        }
    }

    pub(crate) fn with_context(ctx: ActionContext) -> Self {
        Self { ctx }
    }

    async fn delete_cluster_vpcs(&self) -> Result<()> {
        let cluster_name = self.ctx.cluster_name();
        tracing::info!("Deleting VPCs for {}", cluster_name);
        let manager = self.ctx.cloud_manager();
        let vpc_ids = manager.find_vpcs(cluster_name).await?;
        tracing::info!("Found {} VPCs for cluster {}", vpc_ids.len(), cluster_name);
        for vpc_id in &vpc_ids {
            manager.delete_vpc(vpc_id).await?;
        }
        tracing::info!("Deleted VPCs for {}", cluster_name);
        Ok(())
    }
}

#[async_trait]
impl ClusterAction for ClusterTeardown {
    async fn run(&self) -> Result<()> {
        tracing::info!("Destroying cluster {}", self.ctx.cluster_name());
        self.delete_cluster_vpcs().await?;
        tracing::info!("Destroyed cluster {}", self.ctx.cluster_name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratus_cloud_aws::testing::{Ec2Call, Ec2Response, StubEc2, test_config};
    use stratus_cloud_aws::{AwsCloudManager, AwsError, VpcId};

    fn stubbed_teardown(cluster_name: &str, stub: &StubEc2) -> ClusterTeardown {
        let manager = AwsCloudManager::with_client(test_config(), Box::new(stub.clone()));
        ClusterTeardown::with_context(ActionContext::with_manager(
            cluster_name,
            test_config(),
            manager,
        ))
    }

    #[tokio::test]
    async fn test_teardown_deletes_every_matched_vpc() {
        let stub = StubEc2::new();
        stub.push_response(Ec2Response::VpcIds(vec![
            VpcId::new("net-1"),
            VpcId::new("net-2"),
        ]));
        stub.push_response(Ec2Response::Unit);
        stub.push_response(Ec2Response::Unit);
        let teardown = stubbed_teardown("demo", &stub);

        teardown.run().await.unwrap();

        assert_eq!(
            stub.calls(),
            vec![
                Ec2Call::DescribeVpcsByTag {
                    tag_key: "stratus-cluster-name".to_string(),
                    tag_value: "demo".to_string(),
                },
                Ec2Call::DeleteVpc {
                    vpc_id: "net-1".to_string(),
                },
                Ec2Call::DeleteVpc {
                    vpc_id: "net-2".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_teardown_stops_at_first_failing_delete() {
        let stub = StubEc2::new();
        stub.push_response(Ec2Response::VpcIds(vec![
            VpcId::new("net-1"),
            VpcId::new("net-2"),
        ]));
        stub.push_response(Ec2Response::Err(AwsError::Api(
            "DependencyViolation".to_string(),
        )));
        let teardown = stubbed_teardown("demo", &stub);

        let err = teardown.run().await.unwrap_err();

        assert!(matches!(err, AwsError::Api(message) if message.contains("DependencyViolation")));
        // The second delete is never attempted.
        assert_eq!(stub.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_teardown_with_no_matches_deletes_nothing() {
        let stub = StubEc2::new();
        stub.push_response(Ec2Response::VpcIds(Vec::new()));
        let teardown = stubbed_teardown("ghost", &stub);

        teardown.run().await.unwrap();

        assert_eq!(stub.calls().len(), 1);
    }
}
