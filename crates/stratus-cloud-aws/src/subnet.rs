//! Subnet topology for a cluster.

/// Describes a subnet carved out of a cluster VPC, bound to one
/// availability zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetConfig {
    pub scope: &'static str,
    pub availability_zone: &'static str,
    pub cidr_block: &'static str,
}

impl SubnetConfig {
    pub fn format_subnet_name(&self, cluster_name: &str) -> String {
        format!("{}-{}-subnet", cluster_name, self.scope)
    }
}

/// The single public subnet every cluster gets.
pub const CLUSTER_PUBLIC_SUBNET: SubnetConfig = SubnetConfig {
    scope: "public",
    availability_zone: "eu-west-1a",
    cidr_block: "10.1.0.0/20",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_subnet_name() {
        assert_eq!(
            CLUSTER_PUBLIC_SUBNET.format_subnet_name("demo"),
            "demo-public-subnet"
        );
    }
}
