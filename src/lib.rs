// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;
pub mod helper;
pub mod request;
pub mod response;
pub mod sql;

// Re-export the public surface at the crate root
pub use crate::core::{PgkitError, Result};
pub use config::{Config, ConnectMode, HostParams};
pub use helper::PgHelper;
pub use request::{Action, ActionType, Conditions, Headers, Projection, Request, Target};
pub use response::Response;
