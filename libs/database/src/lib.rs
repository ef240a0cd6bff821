//! PostgreSQL connectivity for the SIP services.
//!
//! - [`postgres`]: configuration, pooled connection with retry, migrations, health check
//! - [`common`]: error type and retry helpers
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::common::RetryConfig;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, Some(RetryConfig::new().with_max_retries(5))).await?;
//! postgres::run_migrations::<Migrator>(&db, "sip_admin").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
