use sea_orm::DatabaseConnection;

use crate::common::{DatabaseError, DatabaseResult};

/// Pings the pool. Backs the readiness endpoint.
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    tracing::trace!("Pinging PostgreSQL");
    db.ping().await.map_err(DatabaseError::Unreachable)
}
