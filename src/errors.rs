//! Error types for the PgAccess facade
//!
//! Data-access operations report through `pg_store::StoreError`; this type
//! only covers setting the pool up.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PgAccessError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
