use crate::connection::lease::Lease;
use crate::connection::{ConnectionHandle, ConnectionSource, QueryOutput};
use crate::errors::DbFailure;
use crate::query_builder::Statement;
use config::TableNameConfig;
use std::sync::Arc;

/// Generic data-access executor over a connection source
pub struct QueryExecutor<S: ConnectionSource> {
    pub(crate) source: S,
    tables: Arc<TableNameConfig>,
}

impl<S: ConnectionSource> QueryExecutor<S> {
    pub fn new(source: S, tables: TableNameConfig) -> Self {
        Self {
            source,
            tables: Arc::new(tables),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn tables(&self) -> &TableNameConfig {
        &self.tables
    }

    /// Run one statement on the caller's handle, or on a freshly acquired one
    /// that is released before returning, whatever the result. A cancelled
    /// call discards its acquired handle instead.
    pub(crate) async fn run(
        &self,
        statement: &Statement,
        handle: Option<&mut S::Handle>,
    ) -> Result<QueryOutput, DbFailure> {
        debug_log!("Executing: {} ({} params)", statement.text, statement.params.len());

        match handle {
            Some(handle) => handle.run(statement).await,
            None => {
                let mut lease = Lease::acquire(&self.source).await?;
                let result = lease.handle().run(statement).await;
                lease.release(self.source.default_force_release()).await;
                result
            }
        }
    }

    /// Truncate every listed table on one connection.
    ///
    /// Stops at the first failure, which is logged and swallowed. The
    /// connection is always closed rather than returned to the pool.
    pub async fn truncate_all(&self, tables: &[&str]) {
        let mut lease = match Lease::acquire(&self.source).await {
            Ok(lease) => lease,
            Err(e) => {
                tracing::error!("Failed to acquire connection for truncate: {}", e);
                return;
            }
        };

        for table in tables {
            let statement = Statement::raw(format!("TRUNCATE {} CASCADE", table));
            if let Err(e) = lease.handle().run(&statement).await {
                tracing::error!("Failed to truncate {}: {}", table, e);
                break;
            }
            debug_log!("Truncated {}", table);
        }

        lease.release(true).await;
    }

    /// Close the underlying source
    pub async fn shutdown(&self) {
        self.source.shutdown().await;
    }
}
