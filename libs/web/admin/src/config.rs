use core_config::{ConfigError, FromEnv, env_optional, env_parse_or};
use std::time::Duration;

use crate::screen::LoadingPolicy;

/// Admin page settings.
///
/// - `ADMIN_GATEWAY_URL`: base URL of the JSON API; unset means in-process
/// - `ADMIN_LOADING_POLICY`: `after-groups` or `after-both` (default)
/// - `ADMIN_GATEWAY_TIMEOUT_SECS`: HTTP gateway request timeout (default 10)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminConfig {
    pub gateway_url: Option<String>,
    pub loading_policy: LoadingPolicy,
    pub gateway_timeout: Duration,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            gateway_url: None,
            loading_policy: LoadingPolicy::default(),
            gateway_timeout: Duration::from_secs(10),
        }
    }
}

impl FromEnv for AdminConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            gateway_url: env_optional("ADMIN_GATEWAY_URL"),
            loading_policy: env_parse_or("ADMIN_LOADING_POLICY", LoadingPolicy::default())?,
            gateway_timeout: Duration::from_secs(env_parse_or("ADMIN_GATEWAY_TIMEOUT_SECS", 10)?),
        })
    }
}
