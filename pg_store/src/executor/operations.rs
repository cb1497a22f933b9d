//! Generic data-access operations

use super::QueryExecutor;
use crate::connection::{ConnectionSource, QueryOutput, Row};
use crate::errors::{BuildError, Outcome, StoreError};
use crate::outcome::classify;
use crate::query_builder::{Delete, InsertMany, InsertOne, Select, Update, Upsert};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Turn a request shape error into a BadRequest carrying `code`
pub(crate) fn rejected(err: BuildError, code: u32) -> StoreError {
    tracing::warn!(code, "rejected request: {}", err);
    StoreError::bad_request(code, err.to_string())
}

/// Deserialize a decoded row into the caller's row type
pub(crate) fn decode_row<T: DeserializeOwned>(row: Row, code: u32) -> Outcome<T> {
    serde_json::from_value(Value::Object(row)).map_err(|e| {
        tracing::error!(code, "Failed to decode row: {}", e);
        StoreError::internal(code, format!("Failed to decode row: {}", e))
    })
}

impl<S: ConnectionSource> QueryExecutor<S> {
    /// Insert several rows in one statement; returns the inserted ids
    pub async fn insert_many(
        &self,
        request: &InsertMany,
        handle: Option<&mut S::Handle>,
    ) -> Outcome<QueryOutput> {
        let statement = request.build().map_err(|e| {
            let code = match e {
                BuildError::WidthMismatch { .. } => 1008,
                BuildError::NoRows => 1009,
                _ => 1011,
            };
            rejected(e, code)
        })?;

        self.run(&statement, handle)
            .await
            .map_err(|f| classify(f, Some(1014), 1017))
    }

    /// Insert one row on the caller's handle; returns the inserted id
    pub async fn insert_one(
        &self,
        request: &InsertOne,
        handle: &mut S::Handle,
    ) -> Outcome<QueryOutput> {
        let statement = request.build().map_err(|e| rejected(e, 1021))?;

        self.run(&statement, Some(handle))
            .await
            .map_err(|f| classify(f, Some(1020), 1023))
    }

    /// Every matching row; no match is an empty vector
    pub async fn select_many<T: DeserializeOwned>(
        &self,
        request: &Select,
        handle: Option<&mut S::Handle>,
    ) -> Outcome<Vec<T>> {
        let output = self
            .run(&request.build(), handle)
            .await
            .map_err(|f| classify(f, None, 1035))?;

        output
            .rows
            .into_iter()
            .map(|row| decode_row(row, 1036))
            .collect()
    }

    /// First matching row, or `None`
    pub async fn select_one_optional<T: DeserializeOwned>(
        &self,
        request: &Select,
        handle: Option<&mut S::Handle>,
    ) -> Outcome<Option<T>> {
        let output = self
            .run(&request.build(), handle)
            .await
            .map_err(|f| classify(f, None, 1032))?;

        output
            .rows
            .into_iter()
            .next()
            .map(|row| decode_row(row, 1033))
            .transpose()
    }

    /// First matching row; no match is NotFound
    pub async fn select_one_or_fail<T: DeserializeOwned>(
        &self,
        request: &Select,
        handle: Option<&mut S::Handle>,
    ) -> Outcome<T> {
        let output = self
            .run(&request.build(), handle)
            .await
            .map_err(|f| classify(f, None, 1029))?;

        match output.rows.into_iter().next() {
            Some(row) => decode_row(row, 1030),
            None => Err(StoreError::not_found(1026, "No data found")),
        }
    }

    /// Update matching rows; no affected row is NotFound
    pub async fn update_one_or_fail(
        &self,
        request: &Update,
        handle: Option<&mut S::Handle>,
    ) -> Outcome<QueryOutput> {
        let statement = request.build().map_err(|e| {
            let code = match e {
                BuildError::EmptyConditions => 1004,
                _ => 1003,
            };
            rejected(e, code)
        })?;

        let output = self
            .run(&statement, handle)
            .await
            .map_err(|f| classify(f, Some(1006), 1005))?;

        match output.rows.len() {
            0 => Err(StoreError::not_found(1002, "No rows updated")),
            1 => Ok(output),
            n => {
                tracing::warn!(table = %request.table, rows = n, "update matched more than one row");
                Ok(output)
            }
        }
    }

    /// Delete matching rows; deleting nothing is still a success
    pub async fn delete(
        &self,
        request: &Delete,
        handle: Option<&mut S::Handle>,
    ) -> Outcome<QueryOutput> {
        self.run(&request.build(), handle)
            .await
            .map_err(|f| classify(f, None, 1038))
    }

    /// Delete matching rows; deleting nothing is NotFound
    pub async fn delete_or_fail(
        &self,
        request: &Delete,
        handle: Option<&mut S::Handle>,
    ) -> Outcome<QueryOutput> {
        let output = self
            .run(&request.build(), handle)
            .await
            .map_err(|f| classify(f, None, 1040))?;

        if output.is_empty() {
            return Err(StoreError::not_found(1039, "No rows deleted"));
        }
        Ok(output)
    }

    /// Idempotent insert-or-update on the conflict target
    pub async fn upsert_on_conflict(
        &self,
        request: &Upsert,
        handle: Option<&mut S::Handle>,
    ) -> Outcome<QueryOutput> {
        let statement = request.build().map_err(|e| rejected(e, 1065))?;

        self.run(&statement, handle)
            .await
            .map_err(|f| classify(f, Some(1066), 1064))
    }
}
