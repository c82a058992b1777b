//! EC2 client seam.
//!
//! The manager talks to EC2 through the [`Ec2Api`] trait, which covers
//! exactly the calls this tool consumes. [`Ec2Client`] is the real SDK
//! implementation; tests substitute [`crate::testing::StubEc2`].

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ec2::config::Credentials;
use aws_sdk_ec2::types::{Filter, Instance, InstanceType, ResourceType, Tag, TagSpecification};

use crate::config::AwsCloudConfig;
use crate::error::{AwsError, Result};
use crate::instance::{CreateInstanceConfig, InstanceInfo, InstanceStateChange};
use crate::vpc::VpcId;

/// The slice of the EC2 API this tool consumes.
#[async_trait]
pub trait Ec2Api: Send + Sync {
    async fn create_vpc(&self, cidr_block: &str, tags: Vec<Tag>) -> Result<VpcId>;

    async fn create_subnet(
        &self,
        vpc_id: &VpcId,
        cidr_block: &str,
        availability_zone: &str,
        tags: Vec<Tag>,
    ) -> Result<()>;

    async fn delete_vpc(&self, vpc_id: &VpcId) -> Result<()>;

    /// All VPC ids whose tag `tag_key` equals `tag_value`, in provider
    /// order.
    async fn describe_vpcs_by_tag(&self, tag_key: &str, tag_value: &str) -> Result<Vec<VpcId>>;

    async fn run_instance(
        &self,
        config: &CreateInstanceConfig,
        tags: Vec<Tag>,
    ) -> Result<InstanceInfo>;

    /// Instances matching the given ids; all instances when `instance_ids`
    /// is empty.
    async fn describe_instances(&self, instance_ids: &[String]) -> Result<Vec<InstanceInfo>>;

    async fn terminate_instance(&self, instance_id: &str) -> Result<InstanceStateChange>;
}

/// EC2 client backed by the AWS SDK.
pub struct Ec2Client {
    inner: aws_sdk_ec2::Client,
}

impl Ec2Client {
    /// Build a client from explicit credentials and a region.
    pub async fn connect(config: &AwsCloudConfig) -> Self {
        let credentials = Credentials::new(
            config.credentials.access_key_id.clone(),
            config.credentials.secret_access_key.clone(),
            None,
            None,
            "stratus-env",
        );
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;
        Self {
            inner: aws_sdk_ec2::Client::new(&sdk_config),
        }
    }
}

fn tag_specification(resource_type: ResourceType, tags: Vec<Tag>) -> TagSpecification {
    TagSpecification::builder()
        .resource_type(resource_type)
        .set_tags(Some(tags))
        .build()
}

fn instance_info(instance: &Instance) -> InstanceInfo {
    InstanceInfo {
        instance_id: instance.instance_id().unwrap_or_default().to_string(),
        state: instance
            .state()
            .and_then(|state| state.name())
            .map(|name| name.as_str().to_string())
            .unwrap_or_default(),
        instance_type: instance
            .instance_type()
            .map(|kind| kind.as_str().to_string())
            .unwrap_or_default(),
        public_ip: instance.public_ip_address().unwrap_or_default().to_string(),
        private_ip: instance
            .private_ip_address()
            .unwrap_or_default()
            .to_string(),
    }
}

#[async_trait]
impl Ec2Api for Ec2Client {
    async fn create_vpc(&self, cidr_block: &str, tags: Vec<Tag>) -> Result<VpcId> {
        let output = self
            .inner
            .create_vpc()
            .cidr_block(cidr_block)
            .tag_specifications(tag_specification(ResourceType::Vpc, tags))
            .send()
            .await
            .map_err(AwsError::api)?;
        let vpc_id = output
            .vpc()
            .and_then(|vpc| vpc.vpc_id())
            .ok_or(AwsError::MalformedResponse("VpcId"))?;
        Ok(VpcId::new(vpc_id))
    }

    async fn create_subnet(
        &self,
        vpc_id: &VpcId,
        cidr_block: &str,
        availability_zone: &str,
        tags: Vec<Tag>,
    ) -> Result<()> {
        self.inner
            .create_subnet()
            .vpc_id(vpc_id.as_str())
            .cidr_block(cidr_block)
            .availability_zone(availability_zone)
            .tag_specifications(tag_specification(ResourceType::Subnet, tags))
            .send()
            .await
            .map_err(AwsError::api)?;
        Ok(())
    }

    async fn delete_vpc(&self, vpc_id: &VpcId) -> Result<()> {
        self.inner
            .delete_vpc()
            .vpc_id(vpc_id.as_str())
            .send()
            .await
            .map_err(AwsError::api)?;
        Ok(())
    }

    async fn describe_vpcs_by_tag(&self, tag_key: &str, tag_value: &str) -> Result<Vec<VpcId>> {
        let output = self
            .inner
            .describe_vpcs()
            .filters(
                Filter::builder()
                    .name(format!("tag:{tag_key}"))
                    .values(tag_value)
                    .build(),
            )
            .send()
            .await
            .map_err(AwsError::api)?;
        Ok(output
            .vpcs()
            .iter()
            .filter_map(|vpc| vpc.vpc_id())
            .map(VpcId::new)
            .collect())
    }

    async fn run_instance(
        &self,
        config: &CreateInstanceConfig,
        tags: Vec<Tag>,
    ) -> Result<InstanceInfo> {
        let output = self
            .inner
            .run_instances()
            .image_id(&config.image_id)
            .instance_type(InstanceType::from(config.instance_type.as_str()))
            .min_count(1)
            .max_count(1)
            .tag_specifications(tag_specification(ResourceType::Instance, tags))
            .send()
            .await
            .map_err(AwsError::api)?;
        let instance = output
            .instances()
            .first()
            .ok_or(AwsError::MalformedResponse("Instances"))?;
        Ok(instance_info(instance))
    }

    async fn describe_instances(&self, instance_ids: &[String]) -> Result<Vec<InstanceInfo>> {
        let output = self
            .inner
            .describe_instances()
            .set_instance_ids((!instance_ids.is_empty()).then(|| instance_ids.to_vec()))
            .send()
            .await
            .map_err(AwsError::api)?;
        Ok(output
            .reservations()
            .iter()
            .flat_map(|reservation| reservation.instances())
            .map(instance_info)
            .collect())
    }

    async fn terminate_instance(&self, instance_id: &str) -> Result<InstanceStateChange> {
        let output = self
            .inner
            .terminate_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(AwsError::api)?;
        let change = output
            .terminating_instances()
            .first()
            .ok_or(AwsError::MalformedResponse("TerminatingInstances"))?;
        Ok(InstanceStateChange {
            instance_id: change.instance_id().unwrap_or_default().to_string(),
            previous_state: change
                .previous_state()
                .and_then(|state| state.name())
                .map(|name| name.as_str().to_string())
                .unwrap_or_default(),
            current_state: change
                .current_state()
                .and_then(|state| state.name())
                .map(|name| name.as_str().to_string())
                .unwrap_or_default(),
        })
    }
}
