use axum_helpers::PermissionConfig;
use core_config::{AppInfo, FromEnv, app_info, env_optional, server::ServerConfig};
use database::postgres::PostgresConfig;
use web_admin::AdminConfig;

pub use core_config::Environment;

/// Application configuration composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    /// `None` when `DATABASE_URL` is unset: the in-memory store is used.
    pub database: Option<PostgresConfig>,
    pub admin: AdminConfig,
    pub permissions: PermissionConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let database = match env_optional("DATABASE_URL") {
            Some(_) => Some(PostgresConfig::from_env()?),
            None => None,
        };

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            database,
            admin: AdminConfig::from_env()?,
            permissions: PermissionConfig::from_env()?,
        })
    }
}
