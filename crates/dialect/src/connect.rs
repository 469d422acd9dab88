//! Connection-argument construction.
//!
//! Turns a [`ConnectionUrl`] plus [`DialectConfig`] into the [`ConnectArgs`]
//! handed to the bridge's connect call: driver class, protocol URL, driver
//! property map and jar path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use timestream_core::{DialectConfig, DialectError, Result};

use crate::connection_url::ConnectionUrl;
use crate::credentials::RoleAssumer;
use crate::driver::{find_jar_in_class_path, JDBC_DRIVER_CLASS, JDBC_URL};

// Driver property names.
pub const PROP_REGION: &str = "Region";
pub const PROP_ACCESS_KEY_ID: &str = "AccessKeyId";
pub const PROP_SECRET_ACCESS_KEY: &str = "SecretAccessKey";
pub const PROP_SESSION_TOKEN: &str = "SessionToken";
pub const PROP_CREDENTIALS_PROVIDER_CLASS: &str = "AwsCredentialsProviderClass";
pub const PROP_DRIVER_PATH: &str = "DriverPath";

/// Provider class the driver uses to read EC2/ECS instance-profile credentials.
pub const INSTANCE_PROFILE_PROVIDER: &str = "InstanceProfileCredentialsProvider";

const SECRET_PROPS: &[&str] = &[PROP_SECRET_ACCESS_KEY, PROP_SESSION_TOKEN];

/// Keyword arguments of the bridge connect call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectKwargs {
    /// Driver class name.
    pub jclassname: String,
    /// Protocol URL; always [`JDBC_URL`].
    pub url: String,
    /// Driver connection properties.
    pub driver_args: BTreeMap<String, String>,
    /// Resolved driver jar.
    pub jars: String,
}

/// Positional and keyword arguments for the bridge connect call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectArgs {
    /// Always empty; everything travels in `kwargs`.
    pub args: Vec<String>,
    pub kwargs: ConnectKwargs,
}

impl ConnectArgs {
    pub fn property(&self, name: &str) -> Option<&str> {
        self.kwargs.driver_args.get(name).map(String::as_str)
    }

    /// Copy with secret key and session token masked, for display.
    pub fn redacted(&self) -> Self {
        let mut out = self.clone();
        redact(&mut out.kwargs.driver_args);
        out
    }
}

fn redact(props: &mut BTreeMap<String, String>) {
    for key in SECRET_PROPS {
        if let Some(v) = props.get_mut(*key) {
            *v = "***".to_string();
        }
    }
}

/// Builds [`ConnectArgs`] for one connection attempt.
pub struct ConnectArgsBuilder<'a> {
    config: &'a DialectConfig,
    role_assumer: &'a dyn RoleAssumer,
}

impl<'a> ConnectArgsBuilder<'a> {
    pub fn new(config: &'a DialectConfig, role_assumer: &'a dyn RoleAssumer) -> Self {
        Self {
            config,
            role_assumer,
        }
    }

    /// Build the connect arguments for `url`.
    ///
    /// Steps, in order:
    /// 1. Region from the host, else the configured default region
    /// 2. Username/password as static access key/secret
    /// 3. `role_arn` → assume the role, overwriting the credential properties
    /// 4. `use_instance_profile` → instance-profile provider instead of static keys
    /// 5. Driver jar from `driver_path`, the configured default, or CLASSPATH
    pub async fn build(&self, url: &ConnectionUrl) -> Result<ConnectArgs> {
        let mut props = BTreeMap::new();

        // 1. Region
        let region = match url.region() {
            Some(r) => Some(r),
            None => {
                let fallback = self.config.default_region.clone();
                warn!(
                    host = ?url.host,
                    fallback = ?fallback,
                    "Region not derivable from host, using environment default"
                );
                fallback
            }
        };
        if let Some(r) = &region {
            props.insert(PROP_REGION.to_string(), r.clone());
        }

        // 2. Static credentials
        if let Some(user) = &url.username {
            props.insert(PROP_ACCESS_KEY_ID.to_string(), user.clone());
        }
        if let Some(password) = &url.password {
            props.insert(PROP_SECRET_ACCESS_KEY.to_string(), password.clone());
        }

        // 3. Role assumption
        let assumed = match url.role_arn() {
            Some(arn) => {
                let creds = self.role_assumer.assume_role(arn, region.as_deref()).await?;
                props.insert(PROP_ACCESS_KEY_ID.to_string(), creds.access_key_id);
                props.insert(PROP_SECRET_ACCESS_KEY.to_string(), creds.secret_access_key);
                props.insert(PROP_SESSION_TOKEN.to_string(), creds.session_token);
                true
            }
            None => false,
        };

        // 4. Instance profile
        if url.use_instance_profile() {
            if assumed {
                warn!("use_instance_profile ignored: assumed-role credentials take precedence");
            } else {
                props.remove(PROP_ACCESS_KEY_ID);
                props.remove(PROP_SECRET_ACCESS_KEY);
                props.insert(
                    PROP_CREDENTIALS_PROVIDER_CLASS.to_string(),
                    INSTANCE_PROFILE_PROVIDER.to_string(),
                );
            }
        }

        // 5. Driver jar
        let jar = self.resolve_driver_path(url)?;
        props.insert(PROP_DRIVER_PATH.to_string(), jar.clone());

        let mut shown = props.clone();
        redact(&mut shown);
        info!(
            url = %url.redacted(),
            jar = %jar,
            properties = ?shown,
            "Built connection arguments"
        );

        Ok(ConnectArgs {
            args: Vec::new(),
            kwargs: ConnectKwargs {
                jclassname: JDBC_DRIVER_CLASS.to_string(),
                url: JDBC_URL.to_string(),
                driver_args: props,
                jars: jar,
            },
        })
    }

    fn resolve_driver_path(&self, url: &ConnectionUrl) -> Result<String> {
        if let Some(path) = url.driver_path() {
            debug!(path = %path, "Driver jar from URL");
            return Ok(path.to_string());
        }
        if let Some(path) = self.config.driver_path.as_deref().filter(|p| !p.is_empty()) {
            debug!(path = %path, "Driver jar from configured default");
            return Ok(path.to_string());
        }
        let class_path = self
            .config
            .class_path
            .as_deref()
            .ok_or(DialectError::MissingDriverJar)?;
        find_jar_in_class_path(class_path).ok_or(DialectError::MissingDriverJar)
    }
}
