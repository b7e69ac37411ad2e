/// Dispatcher Module
///
/// `PgHelper` is the crate's facade: it owns the connection manager and
/// the default table context, routes each request to its verb's builder
/// and execution path, and shapes the raw result per the request's
/// output flags.
///
/// Request resolution runs before the connection is touched, so contract
/// violations never open a connection. One helper instance supports one
/// blocking operation at a time; share across threads only behind
/// external synchronization.
use crate::config::Config;
use crate::core::db::{self, ConnectionManager};
use crate::core::{PgkitError, Result};
use crate::request::{Action, Conditions, Projection, Request, Target};
use crate::response::Response;
use crate::sql;
use postgres::Client;
use serde_json::Value;

/// Request-driven access to one PostgreSQL database.
pub struct PgHelper {
    table: Option<String>,
    manager: ConnectionManager,
}

impl PgHelper {
    /// Creates a helper from its construction parameters. No connection
    /// is opened until the first operation or an explicit
    /// [`connect`](PgHelper::connect).
    pub fn new(config: Config) -> Self {
        PgHelper {
            table: config.table,
            manager: ConnectionManager::new(config.mode),
        }
    }

    /// Opens the connection now instead of lazily. No-op when already
    /// connected.
    pub fn connect(&mut self) -> Result<()> {
        self.manager.connect()
    }

    /// Closes the connection. Errors when none is active; see
    /// [`ConnectionManager::disconnect`](crate::core::db::ConnectionManager::disconnect).
    pub fn disconnect(&mut self) -> Result<()> {
        self.manager.disconnect()
    }

    /// Whether a connection is currently live.
    pub fn is_connected(&self) -> bool {
        self.manager.is_connected()
    }

    /// Executes a request: resolve, ensure the connection is ready,
    /// dispatch on the verb, then apply the `as_dict` reshape if asked.
    pub fn execute(&mut self, request: &Request) -> Result<Response> {
        let action = request.resolve(self.table.as_deref())?;
        let client = self.manager.client()?;

        let response = match &action {
            Action::SelectOne {
                table,
                projection,
                conditions,
                with_field_names,
            } => select_one(client, table, projection, conditions.as_ref(), *with_field_names)?,
            Action::SelectAll {
                table,
                projection,
                conditions,
                with_field_names,
            } => select_all(client, table, projection, conditions.as_ref(), *with_field_names)?,
            Action::Insert {
                table,
                fields,
                values,
            } => {
                let statement = sql::build_insert(table, fields, values)?;
                db::run_committed(client, &statement)?;
                Response::Committed
            }
            Action::Update {
                table,
                target,
                conditions,
            } => update(client, table, target, conditions.as_ref())?,
            Action::Delete { table, conditions } => delete(client, table, conditions.as_ref())?,
        };

        if request.headers.as_dict {
            return response.into_record();
        }
        Ok(response)
    }

    /// DDL pass-through: creates the helper's default table with the
    /// given column-name → type-and-constraint definitions. Requires a
    /// default table context.
    pub fn setup_table(&mut self, columns: &Conditions) -> Result<()> {
        let table = self.table.clone().ok_or_else(|| {
            PgkitError::Contract("setup_table requires a default table context".to_string())
        })?;
        let statement = sql::build_create_table(&table, columns);
        let client = self.manager.client()?;
        db::run_ddl(client, &statement)
    }
}

fn select_one(
    client: &mut Client,
    table: &str,
    projection: &Projection,
    conditions: Option<&Conditions>,
    with_field_names: bool,
) -> Result<Response> {
    let statement = sql::build_select(table, projection, conditions);
    let row = db::run_select_one(client, &statement)?;

    if with_field_names {
        let fields = db::table_columns(client, table)?;
        return Ok(Response::Row {
            fields,
            data: row.as_ref().map(db::row_values),
        });
    }

    match row {
        Some(row) => {
            let value = db::row_values(&row).into_iter().next().unwrap_or(Value::Null);
            Ok(Response::Scalar(value))
        }
        None => Ok(Response::no_match()),
    }
}

fn select_all(
    client: &mut Client,
    table: &str,
    projection: &Projection,
    conditions: Option<&Conditions>,
    with_field_names: bool,
) -> Result<Response> {
    let statement = sql::build_select(table, projection, conditions);
    let rows = db::run_select_all(client, &statement)?;
    let data: Vec<Vec<Value>> = rows.iter().map(db::row_values).collect();

    if with_field_names {
        let fields = db::table_columns(client, table)?;
        return Ok(Response::Table { fields, data });
    }
    Ok(Response::Rows(data))
}

fn update(
    client: &mut Client,
    table: &str,
    target: &Target,
    conditions: Option<&Conditions>,
) -> Result<Response> {
    let statement = sql::build_update(table, target, conditions);
    db::run_committed(client, &statement)?;
    Ok(Response::Committed)
}

/// Delete is guarded: a select-one probe over the same conditions runs
/// first, and the DELETE is only executed when the probe matched a row.
/// A miss is a no-op, not an error.
fn delete(client: &mut Client, table: &str, conditions: Option<&Conditions>) -> Result<Response> {
    let probe = sql::build_select(table, &Projection::All, conditions);
    if db::run_select_one(client, &probe)?.is_none() {
        return Ok(Response::Skipped);
    }
    let statement = sql::build_delete(table, conditions);
    db::run_committed(client, &statement)?;
    Ok(Response::Committed)
}
