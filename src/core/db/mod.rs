/// Database Module
///
/// The database layer behind the dispatcher, split into three concerns:
/// - **Connection Management** (`connection.rs`): lazy connect, explicit
///   disconnect, ensure-ready access to the client
/// - **Query Execution** (`query.rs`): statement execution, scoped
///   transactions, row-to-JSON conversion
/// - **Schema Introspection** (`schema.rs`): column names for result
///   shaping
///
/// All operations use the crate-wide `PgkitError` for error propagation;
/// nothing here retries or recovers.
pub mod connection;
pub mod query;
pub mod schema;

pub use connection::*;
pub use query::*;
pub use schema::*;
