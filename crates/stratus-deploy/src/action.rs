//! Cluster action base.

use std::sync::OnceLock;

use async_trait::async_trait;
use stratus_cloud_aws::{AwsCloudConfig, AwsCloudManager, Result};

/// A cluster-level operation: a fixed, linear sequence of resource
/// manager calls.
#[async_trait]
pub trait ClusterAction {
    /// Perform the cluster action.
    async fn run(&self) -> Result<()>;
}

/// State shared by every cluster action: the cluster name, the cloud
/// config, and a manager built on first use and reused for the lifetime
/// of the action.
pub struct ActionContext {
    cluster_name: String,
    cloud_config: AwsCloudConfig,
    manager: OnceLock<AwsCloudManager>,
}

impl ActionContext {
    pub fn new(cluster_name: impl Into<String>, cloud_config: AwsCloudConfig) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            cloud_config,
            manager: OnceLock::new(),
        }
    }

    /// Run against a pre-built manager. Used by tests to inject a stubbed
    /// client.
    pub fn with_manager(
        cluster_name: impl Into<String>,
        cloud_config: AwsCloudConfig,
        manager: AwsCloudManager,
    ) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(manager);
        Self {
            cluster_name: cluster_name.into(),
            cloud_config,
            manager: cell,
        }
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn cloud_manager(&self) -> &AwsCloudManager {
        self.manager
            .get_or_init(|| AwsCloudManager::new(self.cloud_config.clone()))
    }
}
