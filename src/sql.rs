/// SQL Statement Builders
///
/// Pure translation from request shapes to SQL text. Nothing in this
/// module touches a connection; the dispatcher decides what to execute.
///
/// Values and field names are interpolated as their plain string
/// representation: no quoting, no escaping, no placeholder binding.
/// Callers that need quoted string literals must supply the quotes in
/// the value itself. This mirrors the wire contract the helper exposes
/// and leaves the statement text byte-for-byte predictable.
use crate::core::{PgkitError, Result};
use crate::request::{Conditions, Projection, Target};
use serde_json::Value;

/// Renders a value into its SQL text form. Strings are inserted bare,
/// `null` becomes `NULL`, everything else uses its JSON display form.
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builds the `WHERE` clause from a conditions mapping: `field = value`
/// pairs joined with ` AND `, in the mapping's insertion order. An
/// absent or empty mapping yields the empty string (no `WHERE`).
pub fn conditions_clause(conditions: Option<&Conditions>) -> String {
    match conditions {
        Some(map) if !map.is_empty() => {
            let pairs: Vec<String> = map
                .iter()
                .map(|(field, value)| format!("{} = {}", field, literal(value)))
                .collect();
            format!("WHERE {}", pairs.join(" AND "))
        }
        _ => String::new(),
    }
}

fn render_projection(projection: &Projection) -> String {
    match projection {
        Projection::All => "*".to_string(),
        Projection::Column(name) => name.clone(),
        Projection::Columns(names) => names.join(", "),
    }
}

fn push_conditions(sql: &mut String, conditions: Option<&Conditions>) {
    let clause = conditions_clause(conditions);
    if !clause.is_empty() {
        sql.push(' ');
        sql.push_str(&clause);
    }
}

/// `SELECT <projection> FROM <table> [WHERE ...]`
pub fn build_select(table: &str, projection: &Projection, conditions: Option<&Conditions>) -> String {
    let mut sql = format!("SELECT {} FROM {}", render_projection(projection), table);
    push_conditions(&mut sql, conditions);
    sql
}

/// `INSERT INTO <table> (<fields>) VALUES (<values>)`
///
/// `fields` and `values` are parallel lists: same length, positional
/// correspondence. A length mismatch or an empty field list is a
/// contract violation, not malformed SQL.
pub fn build_insert(table: &str, fields: &[String], values: &[Value]) -> Result<String> {
    if fields.len() != values.len() {
        return Err(PgkitError::Contract(format!(
            "insert fields and values differ in length: {} fields, {} values",
            fields.len(),
            values.len()
        )));
    }
    if fields.is_empty() {
        return Err(PgkitError::Contract(
            "insert requires at least one field".to_string(),
        ));
    }
    let rendered: Vec<String> = values.iter().map(literal).collect();
    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        fields.join(", "),
        rendered.join(", ")
    ))
}

/// `UPDATE <table> SET <field> = <value> [WHERE ...]`
///
/// Exactly one target pair per statement; the request layer rejects
/// updates with no target before this point.
pub fn build_update(table: &str, target: &Target, conditions: Option<&Conditions>) -> String {
    let mut sql = format!("UPDATE {} SET {} = {}", table, target.field, literal(&target.value));
    push_conditions(&mut sql, conditions);
    sql
}

/// `DELETE FROM <table> [WHERE ...]`
///
/// The dispatcher runs a select-one probe over the same conditions first
/// and only executes this statement when the probe matched a row.
pub fn build_delete(table: &str, conditions: Option<&Conditions>) -> String {
    let mut sql = format!("DELETE FROM {}", table);
    push_conditions(&mut sql, conditions);
    sql
}

/// `CREATE TABLE <table> IF NOT EXISTS (<col> <type>, ...)`
///
/// Thin DDL pass-through for `setup_table`; columns render in insertion
/// order as `name type-and-constraints`.
pub fn build_create_table(table: &str, columns: &Conditions) -> String {
    let cols: Vec<String> = columns
        .iter()
        .map(|(name, definition)| format!("{} {}", name, literal(definition)))
        .collect();
    format!("CREATE TABLE {} IF NOT EXISTS ({})", table, cols.join(", "))
}
