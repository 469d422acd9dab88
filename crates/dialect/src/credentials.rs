//! Temporary credentials via STS role assumption.

use std::fmt;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_types::region::Region;
use chrono::{DateTime, Utc};
use tracing::info;

use timestream_core::{DialectError, Result};

/// Session name recorded in CloudTrail for assumed-role sessions.
pub const ROLE_SESSION_NAME: &str = "TimestreamDialect";

/// Short-lived credentials returned by a role assumption.
#[derive(Clone, PartialEq, Eq)]
pub struct AssumedCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: Option<DateTime<Utc>>,
}

// Keep secrets out of logs and panic messages.
impl fmt::Debug for AssumedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssumedCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &"***")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Exchanges a role ARN for temporary credentials.
///
/// A single blocking round trip; failures abort the connect attempt and are
/// never retried.
#[async_trait]
pub trait RoleAssumer: Send + Sync {
    async fn assume_role(&self, role_arn: &str, region: Option<&str>)
        -> Result<AssumedCredentials>;
}

/// [`RoleAssumer`] backed by AWS STS `AssumeRole`.
///
/// The caller's own credentials come from the default AWS provider chain.
#[derive(Debug, Clone, Default)]
pub struct StsRoleAssumer;

#[async_trait]
impl RoleAssumer for StsRoleAssumer {
    async fn assume_role(
        &self,
        role_arn: &str,
        region: Option<&str>,
    ) -> Result<AssumedCredentials> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let aws_cfg = loader.load().await;
        let client = aws_sdk_sts::Client::new(&aws_cfg);

        info!(role_arn = %role_arn, region = ?region, "Assuming role");

        let resp = client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(ROLE_SESSION_NAME)
            .send()
            .await
            .map_err(|e| DialectError::CredentialExchange(Box::new(e)))?;

        let creds = resp.credentials().ok_or_else(|| {
            DialectError::CredentialExchange("AssumeRole response carried no credentials".into())
        })?;

        let expiration = creds.expiration();
        let expiration = DateTime::<Utc>::from_timestamp(expiration.secs(), expiration.subsec_nanos());

        info!(expiration = ?expiration, "Role assumed");

        Ok(AssumedCredentials {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: creds.session_token().to_string(),
            expiration,
        })
    }
}
