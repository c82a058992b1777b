//! VPC topology for a cluster.

/// Opaque provider-assigned VPC identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VpcId(String);

impl VpcId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VpcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Describes a VPC the tool provisions for a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VpcConfig {
    pub scope: &'static str,
    pub cidr_block: &'static str,
}

impl VpcConfig {
    pub fn format_vpc_name(&self, cluster_name: &str) -> String {
        format!("{}-{}-vpc", cluster_name, self.scope)
    }
}

/// The single public VPC every cluster gets.
pub const CLUSTER_PUBLIC_VPC: VpcConfig = VpcConfig {
    scope: "public",
    cidr_block: "10.1.0.0/16",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vpc_name() {
        assert_eq!(
            CLUSTER_PUBLIC_VPC.format_vpc_name("demo"),
            "demo-public-vpc"
        );
    }
}
