//! Errors raised while provisioning database connections

use thiserror::Error;

/// Connection provisioning errors
///
/// Construction failures (`InvalidProvider`, `UnsupportedProvider`,
/// `InvalidConnectionString`) are kept distinct from open failures
/// (driver variants, `Cancelled`) so a caller can tell a bad input from a
/// network or auth fault.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("database provider cannot be empty")]
    InvalidProvider,

    #[error("provider '{0}' is not supported")]
    UnsupportedProvider(String),

    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("connection open was cancelled")]
    Cancelled,

    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("mysql error: {0}")]
    MySql(#[from] mysql_async::Error),
}

pub type Result<T> = std::result::Result<T, ConnectionError>;
