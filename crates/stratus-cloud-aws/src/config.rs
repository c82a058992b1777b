//! Credentials and region configuration.
//!
//! Credentials are read once from the process environment at startup and
//! never persisted; everything downstream receives an immutable
//! [`AwsCloudConfig`] value.

use crate::error::{AwsError, Result};

pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// Static AWS credentials.
#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl AwsCredentials {
    /// Resolve credentials from the environment.
    ///
    /// Fails before any provider call is made if either variable is
    /// missing or empty.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            access_key_id: require_env(ACCESS_KEY_ID_VAR)?,
            secret_access_key: require_env(SECRET_ACCESS_KEY_VAR)?,
        })
    }
}

fn require_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AwsError::MissingCredential(name)),
    }
}

/// Credentials plus target region, passed to every manager instance.
#[derive(Debug, Clone)]
pub struct AwsCloudConfig {
    pub credentials: AwsCredentials,
    pub region: String,
}

impl AwsCloudConfig {
    pub fn new(credentials: AwsCredentials, region: impl Into<String>) -> Self {
        Self {
            credentials,
            region: region.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_reads_both_variables() {
        temp_env::with_vars(
            [
                (ACCESS_KEY_ID_VAR, Some("ident")),
                (SECRET_ACCESS_KEY_VAR, Some("secret")),
            ],
            || {
                let credentials = AwsCredentials::from_env().unwrap();
                assert_eq!(credentials.access_key_id, "ident");
                assert_eq!(credentials.secret_access_key, "secret");
            },
        );
    }

    #[test]
    fn test_from_env_fails_when_key_id_missing() {
        temp_env::with_vars(
            [
                (ACCESS_KEY_ID_VAR, None),
                (SECRET_ACCESS_KEY_VAR, Some("secret")),
            ],
            || {
                let err = AwsCredentials::from_env().unwrap_err();
                assert!(matches!(err, AwsError::MissingCredential(ACCESS_KEY_ID_VAR)));
            },
        );
    }

    #[test]
    fn test_from_env_fails_when_secret_empty() {
        temp_env::with_vars(
            [
                (ACCESS_KEY_ID_VAR, Some("ident")),
                (SECRET_ACCESS_KEY_VAR, Some("")),
            ],
            || {
                let err = AwsCredentials::from_env().unwrap_err();
                assert!(matches!(
                    err,
                    AwsError::MissingCredential(SECRET_ACCESS_KEY_VAR)
                ));
            },
        );
    }
}
