//! Cloud resource manager.
//!
//! Single point of contact with the EC2 API. The client handle is created
//! lazily on first use and memoized for the lifetime of the manager.

use tokio::sync::OnceCell;

use crate::client::{Ec2Api, Ec2Client};
use crate::config::AwsCloudConfig;
use crate::error::Result;
use crate::subnet::SubnetConfig;
use crate::tags::{CloudTag, build_resource_tags};
use crate::vpc::VpcId;

pub struct AwsCloudManager {
    config: AwsCloudConfig,
    client: OnceCell<Box<dyn Ec2Api>>,
}

impl AwsCloudManager {
    pub fn new(config: AwsCloudConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Use a pre-built client instead of connecting lazily. Test seam,
    /// mirrored on the stubbed manager the integration tests use.
    pub fn with_client(config: AwsCloudConfig, client: Box<dyn Ec2Api>) -> Self {
        Self {
            config,
            client: OnceCell::new_with(Some(client)),
        }
    }

    pub fn config(&self) -> &AwsCloudConfig {
        &self.config
    }

    /// The memoized EC2 client handle, connected on first use.
    pub(crate) async fn ec2(&self) -> &dyn Ec2Api {
        self.client
            .get_or_init(|| async {
                Box::new(Ec2Client::connect(&self.config).await) as Box<dyn Ec2Api>
            })
            .await
            .as_ref()
    }

    /// Create a VPC tagged to `cluster_name` and return the
    /// provider-assigned identifier.
    pub async fn create_vpc(
        &self,
        name: &str,
        cidr_block: &str,
        cluster_name: &str,
    ) -> Result<VpcId> {
        tracing::info!("Creating VPC {} with cidr_block={}", name, cidr_block);
        let vpc_tags = build_resource_tags(name, cluster_name);
        let vpc_id = self.ec2().await.create_vpc(cidr_block, vpc_tags).await?;
        tracing::info!("Created VPC {} with vpc_id={}", name, vpc_id);
        Ok(vpc_id)
    }

    /// Create a subnet inside `vpc_id`, tagged identically to the VPC.
    pub async fn create_subnet(
        &self,
        subnet: &SubnetConfig,
        vpc_id: &VpcId,
        cluster_name: &str,
    ) -> Result<()> {
        let subnet_name = subnet.format_subnet_name(cluster_name);
        tracing::info!("Creating subnet {} with vpc_id={}", subnet_name, vpc_id);
        let subnet_tags = build_resource_tags(&subnet_name, cluster_name);
        self.ec2()
            .await
            .create_subnet(
                vpc_id,
                subnet.cidr_block,
                subnet.availability_zone,
                subnet_tags,
            )
            .await?;
        tracing::info!("Created subnet {}", subnet_name);
        Ok(())
    }

    /// Delete a VPC. The provider rejects the call if dependent resources
    /// are still attached; no pre-check is made here.
    pub async fn delete_vpc(&self, vpc_id: &VpcId) -> Result<()> {
        tracing::info!("Deleting VPC with vpc_id={}", vpc_id);
        self.ec2().await.delete_vpc(vpc_id).await?;
        tracing::info!("Deleted VPC with vpc_id={}", vpc_id);
        Ok(())
    }

    /// All VPCs carrying the cluster-name tag, in provider order.
    pub async fn find_vpcs(&self, cluster_name: &str) -> Result<Vec<VpcId>> {
        self.ec2()
            .await
            .describe_vpcs_by_tag(CloudTag::ClusterName.key(), cluster_name)
            .await
    }
}
