//! Resource tag construction.
//!
//! The cluster-name tag is the only durable association between a resource
//! and its cluster, so teardown can discover resources by tag alone.

use aws_sdk_ec2::types::Tag;
use chrono::{DateTime, Utc};

/// Tag keys attached to every resource stratus provisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudTag {
    CreateTime,
    ClusterName,
}

impl CloudTag {
    pub fn key(&self) -> &'static str {
        match self {
            CloudTag::CreateTime => "stratus-create-time",
            CloudTag::ClusterName => "stratus-cluster-name",
        }
    }
}

impl std::fmt::Display for CloudTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Base tags for any provisioned resource: creation timestamp plus the
/// owning cluster. `create_time` defaults to the current time.
pub fn build_aws_tags(cluster_name: &str, create_time: Option<DateTime<Utc>>) -> Vec<Tag> {
    let create_time = create_time.unwrap_or_else(Utc::now);
    vec![
        Tag::builder()
            .key(CloudTag::CreateTime.key())
            .value(create_time.to_rfc3339())
            .build(),
        Tag::builder()
            .key(CloudTag::ClusterName.key())
            .value(cluster_name)
            .build(),
    ]
}

/// Base tags plus a `Name` tag for resources with a display name.
pub fn build_resource_tags(name: &str, cluster_name: &str) -> Vec<Tag> {
    let mut tags = build_aws_tags(cluster_name, None);
    tags.push(Tag::builder().key("Name").value(name).build());
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tag_value<'a>(tags: &'a [Tag], key: &str) -> Option<&'a str> {
        tags.iter()
            .find(|tag| tag.key() == Some(key))
            .and_then(|tag| tag.value())
    }

    #[test]
    fn test_base_tags_carry_cluster_name() {
        let tags = build_aws_tags("demo", None);
        assert_eq!(tag_value(&tags, "stratus-cluster-name"), Some("demo"));
    }

    #[test]
    fn test_create_time_parses_as_utc_timestamp() {
        let tags = build_aws_tags("demo", None);
        let value = tag_value(&tags, "stratus-create-time").unwrap();
        let parsed = DateTime::parse_from_rfc3339(value).unwrap();
        assert_eq!(parsed.timezone().utc_minus_local(), 0);
    }

    #[test]
    fn test_explicit_create_time_is_deterministic() {
        let create_time = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let tags = build_aws_tags("demo", Some(create_time));
        assert_eq!(
            tag_value(&tags, "stratus-create-time"),
            Some("2024-06-01T12:00:00+00:00")
        );
    }

    #[test]
    fn test_resource_tags_append_display_name() {
        let tags = build_resource_tags("demo-public-vpc", "demo");
        assert_eq!(tag_value(&tags, "Name"), Some("demo-public-vpc"));
        assert_eq!(tag_value(&tags, "stratus-cluster-name"), Some("demo"));
        assert_eq!(tags.len(), 3);
    }
}
