use std::env;

use serde::{Deserialize, Serialize};

/// Default capacity of the per-session reflection cache.
pub const DEFAULT_REFLECTION_CACHE_SIZE: usize = 128;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── DialectConfig ─────────────────────────────────────────────

/// Process-environment defaults consulted while building connect arguments.
///
/// When `TIMESTREAM_PROFILE=PROD`, `PROD_CLASSPATH` is checked before `CLASSPATH`,
/// and likewise for every other key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialectConfig {
    /// Active profile name (empty = default).
    pub profile: String,
    /// Region used when the connection host does not encode one.
    pub default_region: Option<String>,
    /// Colon-delimited search path for the driver jar.
    pub class_path: Option<String>,
    /// Configured driver jar, used when the URL has no `driver_path`.
    pub driver_path: Option<String>,
    /// Entries kept per reflection session; 0 disables caching.
    pub reflection_cache_size: usize,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            profile: String::new(),
            default_region: None,
            class_path: None,
            driver_path: None,
            reflection_cache_size: DEFAULT_REFLECTION_CACHE_SIZE,
        }
    }
}

impl DialectConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        let profile = env_opt("TIMESTREAM_PROFILE")
            .map(|s| s.to_uppercase())
            .unwrap_or_default();
        Self::from_env_profiled(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn from_env_profiled(profile: &str) -> Self {
        let default_region = profiled_env_opt(profile, "AWS_DEFAULT_REGION")
            .or_else(|| profiled_env_opt(profile, "AWS_REGION"));

        Self {
            profile: profile.to_string(),
            default_region,
            class_path: profiled_env_opt(profile, "CLASSPATH"),
            driver_path: profiled_env_opt(profile, "TIMESTREAM_DRIVER_PATH"),
            reflection_cache_size: profiled_env_usize(
                profile,
                "TIMESTREAM_REFLECTION_CACHE_SIZE",
                DEFAULT_REFLECTION_CACHE_SIZE,
            ),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }
}
