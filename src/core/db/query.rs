/// Query Execution Module
///
/// Statement execution against the live client and conversion of
/// database rows into JSON values. Selects run directly; mutating
/// statements run inside a scoped transaction (begin, execute, commit)
/// so their effect is applied atomically or not at all. A failed
/// statement leaves the connection valid and reusable.
use crate::core::{PgkitError, Result};
use postgres::types::Type;
use postgres::{Client, Row};
use serde_json::Value;
use tracing::debug;

/// Executes a select and fetches at most one row.
pub fn run_select_one(client: &mut Client, sql: &str) -> Result<Option<Row>> {
    debug!(sql, "executing select");
    client
        .query_opt(sql, &[])
        .map_err(|e| PgkitError::Statement(format!("select failed: {}", e)))
}

/// Executes a select and fetches all rows.
pub fn run_select_all(client: &mut Client, sql: &str) -> Result<Vec<Row>> {
    debug!(sql, "executing select");
    client
        .query(sql, &[])
        .map_err(|e| PgkitError::Statement(format!("select failed: {}", e)))
}

/// Executes a mutating statement inside a scoped transaction and
/// commits it on success.
pub fn run_committed(client: &mut Client, sql: &str) -> Result<()> {
    debug!(sql, "executing mutating statement");
    let mut transaction = client
        .transaction()
        .map_err(|e| PgkitError::Statement(format!("failed to open transaction: {}", e)))?;
    transaction
        .execute(sql, &[])
        .map_err(|e| PgkitError::Statement(format!("statement failed: {}", e)))?;
    transaction
        .commit()
        .map_err(|e| PgkitError::Statement(format!("commit failed: {}", e)))?;
    Ok(())
}

/// Executes DDL directly, outside any explicit transaction scope.
pub fn run_ddl(client: &mut Client, sql: &str) -> Result<()> {
    debug!(sql, "executing ddl");
    client
        .batch_execute(sql)
        .map_err(|e| PgkitError::Statement(format!("ddl failed: {}", e)))
}

/// Converts a row into its JSON value tuple, keyed on each column's
/// Postgres type. Types without a native JSON mapping fall back to their
/// text form; unreadable cells become `null`.
pub fn row_values(row: &Row) -> Vec<Value> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| match *column.type_() {
            Type::BOOL => row
                .try_get::<_, Option<bool>>(idx)
                .ok()
                .flatten()
                .map(Value::Bool)
                .unwrap_or(Value::Null),
            Type::INT2 => row
                .try_get::<_, Option<i16>>(idx)
                .ok()
                .flatten()
                .map(|v| Value::Number(v.into()))
                .unwrap_or(Value::Null),
            Type::INT4 => row
                .try_get::<_, Option<i32>>(idx)
                .ok()
                .flatten()
                .map(|v| Value::Number(v.into()))
                .unwrap_or(Value::Null),
            Type::INT8 => row
                .try_get::<_, Option<i64>>(idx)
                .ok()
                .flatten()
                .map(|v| Value::Number(v.into()))
                .unwrap_or(Value::Null),
            Type::FLOAT4 => row
                .try_get::<_, Option<f32>>(idx)
                .ok()
                .flatten()
                .and_then(|v| serde_json::Number::from_f64(f64::from(v)))
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Type::FLOAT8 => row
                .try_get::<_, Option<f64>>(idx)
                .ok()
                .flatten()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Type::JSON | Type::JSONB => row
                .try_get::<_, Option<Value>>(idx)
                .ok()
                .flatten()
                .unwrap_or(Value::Null),
            _ => row
                .try_get::<_, Option<String>>(idx)
                .ok()
                .flatten()
                .map(Value::String)
                .unwrap_or(Value::Null),
        })
        .collect()
}
