//! Connection source and handle abstractions
//!
//! A [`ConnectionSource`] hands out exclusively owned [`ConnectionHandle`]s.
//! Handles are moved back into the source on release, so a released handle
//! cannot be used again.

pub(crate) mod lease;
pub mod pg;

#[cfg(test)]
pub(crate) mod mock;

use crate::errors::DbFailure;
use crate::query_builder::Statement;
use async_trait::async_trait;
use serde_json::Value;

pub use pg::{PgHandle, PgSource};
pub use type_mapping::Row;

/// Rows returned by a statement, or the affected-row count of a command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    pub rows: Vec<Row>,
    pub rows_affected: u64,
}

impl QueryOutput {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let rows_affected = rows.len() as u64;
        Self {
            rows,
            rows_affected,
        }
    }

    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows: Vec::new(),
            rows_affected,
        }
    }

    /// Values of the `id` column, in row order
    pub fn ids(&self) -> Vec<Value> {
        self.rows
            .iter()
            .filter_map(|row| row.get("id").cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One exclusively owned database session
#[async_trait]
pub trait ConnectionHandle: Send {
    /// Execute a statement and report its rows or affected-row count
    async fn run(&mut self, statement: &Statement) -> Result<QueryOutput, DbFailure>;

    /// Drop the session without returning it to the source
    fn discard(self)
    where
        Self: Sized;
}

/// Pool of database sessions
#[async_trait]
pub trait ConnectionSource: Send + Sync {
    type Handle: ConnectionHandle + 'static;

    async fn acquire(&self) -> Result<Self::Handle, DbFailure>;

    /// Return a handle. With `force`, the session is closed instead of reused.
    async fn release(&self, handle: Self::Handle, force: bool);

    /// Release mode used by operations that manage their own handle
    fn default_force_release(&self) -> bool;

    /// Close every session. Failures are logged, never returned.
    async fn shutdown(&self);
}
