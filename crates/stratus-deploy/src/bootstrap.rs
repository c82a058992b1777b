//! Cluster bootstrap: stand up the cluster's network.

use async_trait::async_trait;
use stratus_cloud_aws::{AwsCloudConfig, CLUSTER_PUBLIC_SUBNET, CLUSTER_PUBLIC_VPC, Result};

use crate::action::{ActionContext, ClusterAction};

/// Bootstraps the initial cluster infrastructure.
///
/// Creates the cluster's public VPC, then its public subnet inside it.
/// Aborts on the first failure; partial state is left for
/// [`crate::ClusterTeardown`] to clean up.
pub struct ClusterBootstrap {
    ctx: ActionContext,
}

impl ClusterBootstrap {
    pub fn new(cluster_name: impl Into<String>, cloud_config: AwsCloudConfig) -> Self {
        Self {
            ctx: ActionContext::new(cluster_name, cloud_config),
        }
    }

    pub(crate) fn with_context(ctx: ActionContext) -> Self {
        Self { ctx }
    }

    async fn create_cluster_vpcs(&self) -> Result<()> {
        tracing::info!("Bootstrapping cluster VPCs");
        let manager = self.ctx.cloud_manager();
        let vpc_id = manager
            .create_vpc(
                &CLUSTER_PUBLIC_VPC.format_vpc_name(self.ctx.cluster_name()),
                CLUSTER_PUBLIC_VPC.cidr_block,
                self.ctx.cluster_name(),
            )
            .await?;
        manager
            .create_subnet(&CLUSTER_PUBLIC_SUBNET, &vpc_id, self.ctx.cluster_name())
            .await?;
        tracing::info!("Cluster VPCs bootstrapped");
        Ok(())
    }
}

#[async_trait]
impl ClusterAction for ClusterBootstrap {
    async fn run(&self) -> Result<()> {
        tracing::info!("Bootstrapping cluster {}", self.ctx.cluster_name());
        self.create_cluster_vpcs().await
    }
}
