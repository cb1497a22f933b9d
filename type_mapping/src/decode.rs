//! Row decoding
//!
//! Converts a PostgreSQL result row into a column/value map by
//! dispatching on each column's type name. Types without a JSON
//! counterpart come back as strings: NUMERIC keeps its scale ("12.50"),
//! BYTEA uses the `\x<hex>` escape form, INET/CIDR use address/prefix.

use crate::Row;
use serde_json::Value;
use sqlx::postgres::{PgRow, Postgres};
use sqlx::types::ipnetwork::IpNetwork;
use sqlx::types::Decimal;
use sqlx::{Column, Row as _, TypeInfo};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unsupported type {type_name} for column '{column}'")]
    UnsupportedType { column: String, type_name: String },

    #[error("Failed to decode column '{column}': {source}")]
    Column {
        column: String,
        #[source]
        source: sqlx::Error,
    },
}

/// Decode every column of a row into a JSON map keyed by column name
pub fn row_to_json(row: &PgRow) -> Result<Row, DecodeError> {
    let mut map = Row::new();

    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.name(), column.type_info().name())?;
        map.insert(column.name().to_string(), value);
    }

    Ok(map)
}

fn get<'r, T>(row: &'r PgRow, index: usize) -> Result<Option<T>, sqlx::Error>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get::<Option<T>, _>(index)
}

fn float(f: f64) -> Value {
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn decode_column(
    row: &PgRow,
    index: usize,
    column: &str,
    type_name: &str,
) -> Result<Value, DecodeError> {
    let decoded: Result<Option<Value>, sqlx::Error> = match type_name {
        "BOOL" => get::<bool>(row, index).map(|v| v.map(Value::Bool)),
        "INT2" => get::<i16>(row, index).map(|v| v.map(Value::from)),
        "INT4" => get::<i32>(row, index).map(|v| v.map(Value::from)),
        "INT8" => get::<i64>(row, index).map(|v| v.map(Value::from)),
        "FLOAT4" => get::<f32>(row, index).map(|v| v.map(|f| float(f64::from(f)))),
        "FLOAT8" => get::<f64>(row, index).map(|v| v.map(float)),
        "NUMERIC" => get::<Decimal>(row, index).map(|v| v.map(|d| Value::String(d.to_string()))),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => get::<String>(row, index).map(|v| v.map(Value::String)),
        "BYTEA" => get::<Vec<u8>>(row, index)
            .map(|v| v.map(|bytes| Value::String(format!("\\x{}", hex::encode(bytes))))),
        "INET" | "CIDR" => get::<IpNetwork>(row, index).map(|v| v.map(|net| Value::String(net.to_string()))),
        "UUID" => get::<uuid::Uuid>(row, index).map(|v| v.map(|u| Value::String(u.to_string()))),
        "TIMESTAMPTZ" => get::<chrono::DateTime<chrono::Utc>>(row, index)
            .map(|v| v.map(|dt| Value::String(dt.to_rfc3339()))),
        "TIMESTAMP" => get::<chrono::NaiveDateTime>(row, index)
            .map(|v| v.map(|dt| Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))),
        "DATE" => get::<chrono::NaiveDate>(row, index).map(|v| v.map(|d| Value::String(d.to_string()))),
        "TIME" => get::<chrono::NaiveTime>(row, index).map(|v| v.map(|t| Value::String(t.to_string()))),
        "JSON" | "JSONB" => get::<Value>(row, index),
        "TEXT[]" | "VARCHAR[]" => get::<Vec<String>>(row, index).map(|v| v.map(Value::from)),
        "INT4[]" => get::<Vec<i32>>(row, index).map(|v| v.map(Value::from)),
        "INT8[]" => get::<Vec<i64>>(row, index).map(|v| v.map(Value::from)),
        "BOOL[]" => get::<Vec<bool>>(row, index).map(|v| v.map(Value::from)),
        "UUID[]" => get::<Vec<uuid::Uuid>>(row, index).map(|v| {
            v.map(|ids| Value::from(ids.iter().map(|u| u.to_string()).collect::<Vec<_>>()))
        }),
        other => {
            return Err(DecodeError::UnsupportedType {
                column: column.to_string(),
                type_name: other.to_string(),
            })
        }
    };

    decoded
        .map(|v| v.unwrap_or(Value::Null))
        .map_err(|source| DecodeError::Column {
            column: column.to_string(),
            source,
        })
}
