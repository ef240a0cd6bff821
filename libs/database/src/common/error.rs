use sea_orm::DbErr;

/// Failures surfaced by the connectivity helpers, as opposed to query errors
/// which callers handle as plain [`DbErr`].
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("PostgreSQL did not answer the readiness ping: {0}")]
    Unreachable(#[source] DbErr),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
