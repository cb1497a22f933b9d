//! Common imports for pg-store users

pub use crate::connection::{ConnectionHandle, ConnectionSource, PgSource, QueryOutput, Row};
pub use crate::errors::{ErrorKind, Outcome, StoreError};
pub use crate::executor::{QueryExecutor, Transaction};
pub use crate::query_builder::{
    Columns, Delete, ExpiryRule, FieldMap, InsertMany, InsertOne, LogicalOperator,
    ReplaceIfExpired, Select, SessionColumns, SessionLookup, Update, Upsert,
};
