//! Test doubles for the EC2 seam.
//!
//! [`StubEc2`] queues canned responses and records every call it observes,
//! so dependent crates can drive the manager without touching AWS. Shipped
//! as a normal module, like the provider stubs the integration tests use.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_sdk_ec2::types::Tag;

use crate::client::Ec2Api;
use crate::config::{AwsCloudConfig, AwsCredentials};
use crate::error::{AwsError, Result};
use crate::instance::{CreateInstanceConfig, InstanceInfo, InstanceStateChange};
use crate::vpc::VpcId;

/// A cloud config pointing at nothing, for stubbed managers.
pub fn test_config() -> AwsCloudConfig {
    AwsCloudConfig::new(
        AwsCredentials {
            access_key_id: "ident".to_string(),
            secret_access_key: "secret".to_string(),
        },
        "eu-west-1",
    )
}

/// A call the stub observed, with the request fields the caller supplied.
/// Tags are flattened to key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ec2Call {
    CreateVpc {
        cidr_block: String,
        tags: Vec<(String, String)>,
    },
    CreateSubnet {
        vpc_id: String,
        cidr_block: String,
        availability_zone: String,
        tags: Vec<(String, String)>,
    },
    DeleteVpc {
        vpc_id: String,
    },
    DescribeVpcsByTag {
        tag_key: String,
        tag_value: String,
    },
    RunInstance {
        image_id: String,
        instance_type: String,
        tags: Vec<(String, String)>,
    },
    DescribeInstances {
        instance_ids: Vec<String>,
    },
    TerminateInstance {
        instance_id: String,
    },
}

/// Canned response for one call, consumed in queue order.
#[derive(Debug)]
pub enum Ec2Response {
    VpcId(VpcId),
    VpcIds(Vec<VpcId>),
    Instance(InstanceInfo),
    Instances(Vec<InstanceInfo>),
    StateChange(InstanceStateChange),
    Unit,
    Err(AwsError),
}

#[derive(Clone, Default)]
pub struct StubEc2 {
    state: Arc<StubState>,
}

#[derive(Default)]
struct StubState {
    calls: Mutex<Vec<Ec2Call>>,
    responses: Mutex<VecDeque<Ec2Response>>,
}

impl StubEc2 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next call.
    pub fn push_response(&self, response: Ec2Response) {
        self.state.responses.lock().unwrap().push_back(response);
    }

    /// Every call observed so far, in order.
    pub fn calls(&self) -> Vec<Ec2Call> {
        self.state.calls.lock().unwrap().clone()
    }

    fn next(&self, call: Ec2Call) -> Result<Ec2Response> {
        self.state.calls.lock().unwrap().push(call.clone());
        match self.state.responses.lock().unwrap().pop_front() {
            Some(Ec2Response::Err(err)) => Err(err),
            Some(response) => Ok(response),
            None => Err(AwsError::Api(format!("stub: no response queued for {call:?}"))),
        }
    }
}

fn tag_pairs(tags: &[Tag]) -> Vec<(String, String)> {
    tags.iter()
        .map(|tag| {
            (
                tag.key().unwrap_or_default().to_string(),
                tag.value().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn unexpected(call: &'static str, response: Ec2Response) -> AwsError {
    AwsError::Api(format!("stub: unexpected response {response:?} for {call}"))
}

#[async_trait]
impl Ec2Api for StubEc2 {
    async fn create_vpc(&self, cidr_block: &str, tags: Vec<Tag>) -> Result<VpcId> {
        match self.next(Ec2Call::CreateVpc {
            cidr_block: cidr_block.to_string(),
            tags: tag_pairs(&tags),
        })? {
            Ec2Response::VpcId(vpc_id) => Ok(vpc_id),
            other => Err(unexpected("create_vpc", other)),
        }
    }

    async fn create_subnet(
        &self,
        vpc_id: &VpcId,
        cidr_block: &str,
        availability_zone: &str,
        tags: Vec<Tag>,
    ) -> Result<()> {
        match self.next(Ec2Call::CreateSubnet {
            vpc_id: vpc_id.as_str().to_string(),
            cidr_block: cidr_block.to_string(),
            availability_zone: availability_zone.to_string(),
            tags: tag_pairs(&tags),
        })? {
            Ec2Response::Unit => Ok(()),
            other => Err(unexpected("create_subnet", other)),
        }
    }

    async fn delete_vpc(&self, vpc_id: &VpcId) -> Result<()> {
        match self.next(Ec2Call::DeleteVpc {
            vpc_id: vpc_id.as_str().to_string(),
        })? {
            Ec2Response::Unit => Ok(()),
            other => Err(unexpected("delete_vpc", other)),
        }
    }

    async fn describe_vpcs_by_tag(&self, tag_key: &str, tag_value: &str) -> Result<Vec<VpcId>> {
        match self.next(Ec2Call::DescribeVpcsByTag {
            tag_key: tag_key.to_string(),
            tag_value: tag_value.to_string(),
        })? {
            Ec2Response::VpcIds(vpc_ids) => Ok(vpc_ids),
            other => Err(unexpected("describe_vpcs_by_tag", other)),
        }
    }

    async fn run_instance(
        &self,
        config: &CreateInstanceConfig,
        tags: Vec<Tag>,
    ) -> Result<InstanceInfo> {
        match self.next(Ec2Call::RunInstance {
            image_id: config.image_id.clone(),
            instance_type: config.instance_type.clone(),
            tags: tag_pairs(&tags),
        })? {
            Ec2Response::Instance(info) => Ok(info),
            other => Err(unexpected("run_instance", other)),
        }
    }

    async fn describe_instances(&self, instance_ids: &[String]) -> Result<Vec<InstanceInfo>> {
        match self.next(Ec2Call::DescribeInstances {
            instance_ids: instance_ids.to_vec(),
        })? {
            Ec2Response::Instances(instances) => Ok(instances),
            other => Err(unexpected("describe_instances", other)),
        }
    }

    async fn terminate_instance(&self, instance_id: &str) -> Result<InstanceStateChange> {
        match self.next(Ec2Call::TerminateInstance {
            instance_id: instance_id.to_string(),
        })? {
            Ec2Response::StateChange(change) => Ok(change),
            other => Err(unexpected("terminate_instance", other)),
        }
    }
}
