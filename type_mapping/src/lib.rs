//! Unified value mapping between JSON and PostgreSQL
//! This crate provides the typed parameters pg-store binds ([`BindValue`],
//! built from Rust values or `serde_json::Value`) and turns result rows back
//! into column/value maps.

pub mod classify;
pub mod decode;
pub mod types;

pub use classify::classify;
pub use decode::{row_to_json, DecodeError};
pub use types::BindValue;

/// A decoded result row: column name to value
pub type Row = serde_json::Map<String, serde_json::Value>;
