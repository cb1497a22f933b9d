//! Core PgAccess functionality
//!
//! This module contains the PgAccess coordinator: it owns the connection pool
//! and the executor every data-access operation goes through.

use sqlx::PgPool;
use std::time::Duration;

use crate::errors::PgAccessError;
use config::{AppConfig, DatabaseConfig, TableNameConfig};
use pg_store::{PgSource, QueryExecutor};

/// Lifecycle coordinator around the pooled executor
pub struct PgAccess {
    executor: QueryExecutor<PgSource>,
}

impl PgAccess {
    /// Connect the pool described by `config`
    pub async fn init(
        config: &DatabaseConfig,
        tables: TableNameConfig,
    ) -> Result<Self, PgAccessError> {
        config.validate()?;
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        tracing::info!(
            host = %config.host,
            database = %config.database,
            max_connections = config.max_connections,
            "Database pool ready"
        );

        Ok(Self::from_pool(pool, config.force_release, tables))
    }

    /// Connect using a loaded application configuration
    pub async fn from_config(config: AppConfig) -> Result<Self, PgAccessError> {
        Self::init(&config.database, config.tables).await
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool, force_release: bool, tables: TableNameConfig) -> Self {
        Self {
            executor: QueryExecutor::new(PgSource::new(pool, force_release), tables),
        }
    }

    pub fn executor(&self) -> &QueryExecutor<PgSource> {
        &self.executor
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        self.executor.source().pool()
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), PgAccessError> {
        sqlx::query("SELECT 1").fetch_one(self.pool()).await?;
        Ok(())
    }

    /// Empty the given tables; failures are logged, not returned
    pub async fn truncate_all(&self, tables: &[&str]) {
        self.executor.truncate_all(tables).await;
    }

    /// Close every pooled connection
    pub async fn shutdown(&self) {
        self.executor.shutdown().await;
    }
}
