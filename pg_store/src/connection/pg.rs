//! sqlx-backed connection source

use super::{ConnectionHandle, ConnectionSource, QueryOutput};
use crate::errors::DbFailure;
use crate::query_builder::Statement;
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgArguments, PgPool, Postgres};
use sqlx::query::Query;
use sqlx::Connection;
use type_mapping::{row_to_json, BindValue};

/// Connection source over a sqlx `PgPool`
#[derive(Clone)]
pub struct PgSource {
    pool: PgPool,
    force_release: bool,
}

impl PgSource {
    pub fn new(pool: PgPool, force_release: bool) -> Self {
        Self {
            pool,
            force_release,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// A pooled PostgreSQL connection
pub struct PgHandle {
    conn: PoolConnection<Postgres>,
}

/// Bind a parameter with the PostgreSQL type it carries
fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &BindValue,
) -> Query<'q, Postgres, PgArguments> {
    match value.clone() {
        BindValue::Text(s) => query.bind(s),
        BindValue::Integer(i) => query.bind(i),
        BindValue::BigInt(i) => query.bind(i),
        BindValue::Double(f) => query.bind(f),
        BindValue::Boolean(b) => query.bind(b),
        BindValue::Uuid(u) => query.bind(u),
        BindValue::Timestamp(ts) => query.bind(ts),
        BindValue::TextArray(items) => query.bind(items),
        BindValue::Json(v) => query.bind(sqlx::types::Json(v)),
        BindValue::Null => query.bind(Option::<String>::None),
    }
}

#[async_trait]
impl ConnectionHandle for PgHandle {
    async fn run(&mut self, statement: &Statement) -> Result<QueryOutput, DbFailure> {
        let mut query = sqlx::query(&statement.text);
        trace_log!(
            "Binding params as [{}]",
            statement
                .params
                .iter()
                .map(BindValue::pg_type)
                .collect::<Vec<_>>()
                .join(", ")
        );
        for value in &statement.params {
            query = bind_value(query, value);
        }

        if statement.returns_rows {
            let rows = query.fetch_all(&mut *self.conn).await?;
            let rows = rows
                .iter()
                .map(row_to_json)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(QueryOutput::from_rows(rows))
        } else {
            let result = query.execute(&mut *self.conn).await?;
            Ok(QueryOutput::affected(result.rows_affected()))
        }
    }

    fn discard(self) {
        drop(self.conn.detach());
    }
}

#[async_trait]
impl ConnectionSource for PgSource {
    type Handle = PgHandle;

    async fn acquire(&self) -> Result<PgHandle, DbFailure> {
        let conn = self.pool.acquire().await?;
        Ok(PgHandle { conn })
    }

    async fn release(&self, handle: PgHandle, force: bool) {
        if force {
            if let Err(e) = handle.conn.detach().close().await {
                tracing::warn!("Failed to close released connection: {}", e);
            }
        } else {
            drop(handle);
        }
    }

    fn default_force_release(&self) -> bool {
        self.force_release
    }

    async fn shutdown(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
