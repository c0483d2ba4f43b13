use serde_json::Value;
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::error::ApiError;
use crate::model::employee::WorkType;

/// How a JSON value must look before it may be written to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// non-empty string
    Text,
    /// non-negative number
    Amount,
    WorkType,
}

/// Maps a JSON key of an update payload onto a table column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub json_key: &'static str,
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Column {
    pub const fn new(json_key: &'static str, name: &'static str, kind: FieldKind) -> Self {
        Self {
            json_key,
            name,
            kind,
        }
    }
}

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    F64(f64),
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

fn convert(column: &Column, value: &Value) -> Result<SqlValue, ApiError> {
    let key = column.json_key;
    match column.kind {
        FieldKind::Text => match value.as_str().map(str::trim) {
            Some(s) if !s.is_empty() => Ok(SqlValue::Text(s.to_string())),
            Some(_) => Err(ApiError::validation(format!("{key} must not be empty"))),
            None => Err(ApiError::validation(format!("{key} must be a string"))),
        },
        FieldKind::Amount => match value.as_f64() {
            Some(n) if n >= 0.0 => Ok(SqlValue::F64(n)),
            Some(_) => Err(ApiError::validation(format!("{key} must not be negative"))),
            None => Err(ApiError::validation(format!("{key} must be a number"))),
        },
        FieldKind::WorkType => value
            .as_str()
            .and_then(|s| WorkType::from_str(s).ok())
            .map(|w| SqlValue::Text(w.as_ref().to_string()))
            .ok_or_else(|| {
                ApiError::validation(format!("{key} must be one of: taklob, lawas, both"))
            }),
    }
}

/// ===============================
/// Build dynamic UPDATE SQL
/// ===============================
///
/// Only keys listed in `columns` are written; anything else in the payload is
/// ignored. Returns `None` when the payload touches no known column.
pub fn build_update_sql(
    table: &str,
    payload: &Value,
    columns: &[Column],
    id: &str,
) -> Result<Option<SqlUpdate>, ApiError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ApiError::validation("Payload must be a JSON object"))?;

    let mut assignments = Vec::new();
    let mut values = Vec::with_capacity(obj.len() + 1);

    for column in columns {
        if let Some(value) = obj.get(column.json_key) {
            values.push(convert(column, value)?);
            assignments.push(format!("{} = ?", column.name));
        }
    }

    if assignments.is_empty() {
        return Ok(None);
    }

    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?",
        table,
        assignments.join(", ")
    );

    // WHERE id = ?
    values.push(SqlValue::Text(id.to_string()));

    Ok(Some(SqlUpdate { sql, values }))
}

/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update(pool: &SqlitePool, update: SqlUpdate) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::F64(v) => query.bind(v),
        };
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}
