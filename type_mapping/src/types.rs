//! Type mapping definitions
//!
//! This module provides the PostgreSQL-typed form a parameter takes
//! when it is bound to a statement.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// A statement parameter together with the PostgreSQL type it binds as
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Integer(i32),
    BigInt(i64),
    Double(f64),
    Boolean(bool),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    TextArray(Vec<String>),
    Json(Value),
    Null,
}

impl BindValue {
    /// PostgreSQL type name the value binds as
    pub fn pg_type(&self) -> &'static str {
        match self {
            BindValue::Text(_) => "TEXT",
            BindValue::Integer(_) => "INT4",
            BindValue::BigInt(_) => "INT8",
            BindValue::Double(_) => "FLOAT8",
            BindValue::Boolean(_) => "BOOL",
            BindValue::Uuid(_) => "UUID",
            BindValue::Timestamp(_) => "TIMESTAMPTZ",
            BindValue::TextArray(_) => "TEXT[]",
            BindValue::Json(_) => "JSONB",
            BindValue::Null => "NULL",
        }
    }
}

impl From<&Value> for BindValue {
    fn from(value: &Value) -> Self {
        crate::classify::classify(value)
    }
}

impl From<Value> for BindValue {
    fn from(value: Value) -> Self {
        crate::classify::classify(&value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Text(value.to_string())
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Text(value)
    }
}

impl From<&String> for BindValue {
    fn from(value: &String) -> Self {
        BindValue::Text(value.clone())
    }
}

impl From<i32> for BindValue {
    fn from(value: i32) -> Self {
        BindValue::Integer(value)
    }
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        BindValue::BigInt(value)
    }
}

impl From<f64> for BindValue {
    fn from(value: f64) -> Self {
        BindValue::Double(value)
    }
}

impl From<bool> for BindValue {
    fn from(value: bool) -> Self {
        BindValue::Boolean(value)
    }
}

impl From<Uuid> for BindValue {
    fn from(value: Uuid) -> Self {
        BindValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for BindValue {
    fn from(value: DateTime<Utc>) -> Self {
        BindValue::Timestamp(value)
    }
}

impl From<Vec<String>> for BindValue {
    fn from(value: Vec<String>) -> Self {
        BindValue::TextArray(value)
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(BindValue::Null, Into::into)
    }
}
