//! PG Store - parameterized data access over PostgreSQL
//!
//! This crate turns typed requests into parameterized SQL, runs them on a
//! pooled or caller-owned connection and classifies every result into an
//! [`Outcome`].

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod connection;
pub mod errors;
pub mod executor;
pub mod outcome;
pub mod prelude;
pub mod query_builder;

pub use connection::{ConnectionHandle, ConnectionSource, PgHandle, PgSource, QueryOutput, Row};
pub use errors::{BuildError, DbFailure, ErrorKind, Outcome, StoreError};
pub use executor::{QueryExecutor, Transaction};
pub use query_builder::{
    Columns, Delete, ExpiryRule, FieldMap, InsertMany, InsertOne, LogicalOperator,
    ReplaceIfExpired, Select, SessionColumns, SessionLookup, Statement, Update, Upsert,
};
