//! Parsing of `awstimestream+jdbc://` connection URLs.
//!
//! ```text
//! awstimestream+jdbc://[user[:password]@]timestream.<region>.amazonaws.com[.cn]
//!     [?role_arn=<arn>&use_instance_profile=true&driver_path=<jar>]
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use timestream_core::{DialectError, Result};

/// URL schemes that select this dialect.
pub const SCHEMES: &[&str] = &["awstimestream", "awstimestream+jdbc", "jdbcapi+timestream"];

pub const PARAM_ROLE_ARN: &str = "role_arn";
pub const PARAM_USE_INSTANCE_PROFILE: &str = "use_instance_profile";
pub const PARAM_DRIVER_PATH: &str = "driver_path";

/// A parsed connection URL. Credentials and query values are percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUrl {
    pub scheme: String,
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub query: BTreeMap<String, String>,
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

impl ConnectionUrl {
    pub fn parse(input: &str) -> Result<Self> {
        let parsed = url::Url::parse(input.trim())
            .map_err(|e| DialectError::InvalidUrl(e.to_string()))?;

        if !SCHEMES.contains(&parsed.scheme()) {
            return Err(DialectError::InvalidUrl(format!(
                "unsupported scheme `{}`, expected one of {}",
                parsed.scheme(),
                SCHEMES.join(", ")
            )));
        }

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .map(|h| h.to_ascii_lowercase());
        let username = Some(parsed.username())
            .filter(|u| !u.is_empty())
            .map(decode);
        let password = parsed.password().map(decode);
        let query = parsed.query_pairs().into_owned().collect();

        Ok(Self {
            scheme: parsed.scheme().to_string(),
            host,
            username,
            password,
            query,
        })
    }

    fn param(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// ARN of the role to assume before connecting.
    pub fn role_arn(&self) -> Option<&str> {
        self.param(PARAM_ROLE_ARN)
    }

    /// True only when `use_instance_profile` is the string `true`.
    pub fn use_instance_profile(&self) -> bool {
        self.param(PARAM_USE_INSTANCE_PROFILE)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    pub fn driver_path(&self) -> Option<&str> {
        self.param(PARAM_DRIVER_PATH)
    }

    /// Region encoded in the host, if the host follows the endpoint pattern.
    pub fn region(&self) -> Option<String> {
        self.host.as_deref().and_then(region_from_host)
    }

    /// URL text safe for logs: the password is masked.
    pub fn redacted(&self) -> String {
        let mut out = format!("{}://", self.scheme);
        if let Some(user) = &self.username {
            out.push_str(user);
            if self.password.is_some() {
                out.push_str(":***");
            }
            out.push('@');
        }
        if let Some(host) = &self.host {
            out.push_str(host);
        }
        if !self.query.is_empty() {
            let pairs: Vec<String> = self.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            out.push('?');
            out.push_str(&pairs.join("&"));
        }
        out
    }
}

impl FromStr for ConnectionUrl {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Extract `<region>` from `timestream.<region>.amazonaws.com[.cn]`.
pub fn region_from_host(host: &str) -> Option<String> {
    let rest = host.strip_prefix("timestream.")?;
    let (region, domain) = rest.split_once('.')?;
    if !matches!(domain, "amazonaws.com" | "amazonaws.com.cn") {
        return None;
    }
    let valid = !region.is_empty()
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    valid.then(|| region.to_string())
}
