//! Transaction support for QueryExecutor
//!
//! A [`Transaction`] owns one handle from BEGIN until commit or rollback.
//! Both consume the transaction, so the handle cannot be used afterwards.
//! Dropping an unfinished transaction discards its connection, which makes
//! the server roll it back.
//!
//! # Example
//! ```ignore
//! let mut tx = executor.begin_transaction().await?;
//!
//! executor.insert_one(&member, tx.conn()).await?;
//! executor.upsert_session_record(&session, Some(tx.conn())).await?;
//!
//! tx.commit(None).await?;
//! ```

use super::QueryExecutor;
use crate::connection::lease::Lease;
use crate::connection::{ConnectionHandle, ConnectionSource};
use crate::errors::Outcome;
use crate::outcome::classify;
use crate::query_builder::Statement;

/// An open transaction on an exclusively owned handle
pub struct Transaction<'s, S: ConnectionSource> {
    source: &'s S,
    lease: Lease<'s, S>,
}

impl<S: ConnectionSource> QueryExecutor<S> {
    /// Acquire a handle and issue BEGIN
    pub async fn begin_transaction(&self) -> Outcome<Transaction<'_, S>> {
        let mut lease = Lease::acquire(&self.source)
            .await
            .map_err(|f| classify(f, None, 1070))?;

        if let Err(f) = lease.handle().run(&Statement::raw("BEGIN")).await {
            lease.release(true).await;
            return Err(classify(f, None, 1071));
        }

        debug_log!("Transaction started");
        Ok(Transaction {
            source: &self.source,
            lease,
        })
    }
}

impl<'s, S: ConnectionSource> Transaction<'s, S> {
    /// Handle to pass into executor operations
    pub fn conn(&mut self) -> &mut S::Handle {
        self.lease.handle()
    }

    /// COMMIT, then release with `force` or the source default
    pub async fn commit(self, force: Option<bool>) -> Outcome<()> {
        self.finish("COMMIT", force, 1073).await
    }

    /// ROLLBACK, then release with `force` or the source default
    pub async fn rollback(self, force: Option<bool>) -> Outcome<()> {
        self.finish("ROLLBACK", force, 1076).await
    }

    async fn finish(self, command: &str, force: Option<bool>, code: u32) -> Outcome<()> {
        let Transaction { source, mut lease } = self;

        match lease.handle().run(&Statement::raw(command)).await {
            Ok(_) => {
                let force = force.unwrap_or_else(|| source.default_force_release());
                lease.release(force).await;
                debug_log!("Transaction finished with {}", command);
                Ok(())
            }
            Err(f) => {
                // the session state is unknown, never reuse it
                lease.release(true).await;
                Err(classify(f, None, code))
            }
        }
    }
}
