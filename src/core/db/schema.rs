/// Schema Introspection Module
///
/// Column metadata for result shaping: the `with_field_names` and
/// `as_dict` flags need the target table's column names, obtained from a
/// zero-row probe against the live connection.
use crate::core::{PgkitError, Result};
use postgres::Client;

/// Returns the table's column names, in table order.
///
/// The probe (`SELECT * FROM <table> LIMIT 0`) is prepared but never
/// fetched for rows; the names are read off the prepared statement's
/// metadata.
pub fn table_columns(client: &mut Client, table: &str) -> Result<Vec<String>> {
    let sql = format!("SELECT * FROM {} LIMIT 0", table);
    let statement = client
        .prepare(&sql)
        .map_err(|e| PgkitError::Statement(format!("failed to probe columns for {}: {}", table, e)))?;
    Ok(statement
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect())
}
