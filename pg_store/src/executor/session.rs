//! Session authentication queries

use super::operations::{decode_row, rejected};
use super::QueryExecutor;
use crate::connection::{ConnectionSource, QueryOutput};
use crate::errors::{Outcome, StoreError};
use crate::outcome::classify;
use crate::query_builder::{ReplaceIfExpired, SessionLookup, Upsert};
use serde::de::DeserializeOwned;

impl<S: ConnectionSource> QueryExecutor<S> {
    /// Member owning a live session for this token, device and ip.
    ///
    /// No match is reported as Unauthorized: an unknown token and an
    /// expired one look the same to the caller.
    pub async fn lookup_member_by_session<T: DeserializeOwned>(
        &self,
        lookup: &SessionLookup,
        handle: Option<&mut S::Handle>,
    ) -> Outcome<T> {
        let statement = lookup.build(self.tables());

        let output = self
            .run(&statement, handle)
            .await
            .map_err(|f| classify(f, None, 1058))?;

        match output.rows.into_iter().next() {
            Some(row) => decode_row(row, 1055),
            None => {
                tracing::warn!(code = 1050, device = %lookup.device, "no valid session");
                Err(StoreError::unauthorized(1050, "Invalid or expired session"))
            }
        }
    }

    /// Insert or refresh a session row
    pub async fn upsert_session_record(
        &self,
        request: &Upsert,
        handle: Option<&mut S::Handle>,
    ) -> Outcome<QueryOutput> {
        let statement = request.build().map_err(|e| rejected(e, 1062))?;

        self.run(&statement, handle)
            .await
            .map_err(|f| classify(f, Some(1063), 1061))
    }

    /// Insert, or take over the row holding the same key once it is inactive
    /// and past the deadline. A live holder is a Conflict.
    pub async fn replace_if_expired(
        &self,
        request: &ReplaceIfExpired,
        handle: &mut S::Handle,
    ) -> Outcome<QueryOutput> {
        let statement = request.build().map_err(|e| rejected(e, 1045))?;

        let output = self
            .run(&statement, Some(handle))
            .await
            .map_err(|f| classify(f, Some(1044), 1047))?;

        if output.is_empty() {
            tracing::warn!(code = 1041, table = %request.table, "row occupied and not yet expired");
            return Err(StoreError::conflict(1041, "occupied and not yet expired"));
        }
        Ok(output)
    }
}
