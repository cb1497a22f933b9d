//! Query execution
//!
//! [`QueryExecutor`] runs the request builders against a [`ConnectionSource`]
//! and classifies every failure into an [`Outcome`](crate::errors::Outcome).
//! Each operation either borrows a caller-supplied handle or acquires and
//! releases its own around the single statement.

pub mod core;
pub mod operations;
pub mod session;
pub mod transaction;


pub use self::core::QueryExecutor;
pub use transaction::Transaction;
