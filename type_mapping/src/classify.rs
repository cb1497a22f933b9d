//! Parameter classification
//!
//! Decides which PostgreSQL type a JSON parameter value is bound as.
//! Strings always bind as TEXT: a string that merely looks like a UUID or a
//! timestamp is still compared as text. Callers that target UUID or
//! TIMESTAMPTZ columns pass `uuid::Uuid` / `DateTime<Utc>` instead.

use crate::types::BindValue;
use serde_json::Value;

/// Classify a JSON value into the PostgreSQL type it binds as
pub fn classify(value: &Value) -> BindValue {
    match value {
        Value::String(s) => BindValue::Text(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => BindValue::Integer(small),
                    Err(_) => BindValue::BigInt(i),
                }
            } else if n.is_u64() {
                // above i64::MAX
                BindValue::Text(n.to_string())
            } else if let Some(f) = n.as_f64() {
                BindValue::Double(f)
            } else {
                BindValue::Text(n.to_string())
            }
        }
        Value::Bool(b) => BindValue::Boolean(*b),
        Value::Null => BindValue::Null,
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_string) => {
            BindValue::TextArray(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            )
        }
        other => BindValue::Json(other.clone()),
    }
}
