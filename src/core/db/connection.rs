/// Connection Management Module
///
/// Per-helper connection lifecycle: the connection is opened lazily on
/// first use, reused until an explicit disconnect, and re-opened lazily
/// afterwards. Each helper instance owns its own connection; there is no
/// process-wide registry and no pooling. Sharing one instance across
/// threads requires external synchronization.
use crate::config::{ConnectMode, HostParams};
use crate::core::{PgkitError, Result};
use postgres::config::SslMode;
use postgres::{Client, Config, NoTls};
use postgres_native_tls::MakeTlsConnector;
use tracing::info;

/// Owns the helper's connection state and the configured connect mode.
pub struct ConnectionManager {
    mode: ConnectMode,
    client: Option<Client>,
}

impl ConnectionManager {
    /// Creates an unconnected manager. Nothing is opened until
    /// [`connect`](ConnectionManager::connect) or the first operation.
    pub fn new(mode: ConnectMode) -> Self {
        ConnectionManager { mode, client: None }
    }

    /// Opens the connection for the configured mode.
    ///
    /// No-op when a connection is already live: calling connect twice in
    /// succession opens exactly one underlying connection. URI mode
    /// requires encrypted transport; params mode connects in the clear.
    pub fn connect(&mut self) -> Result<()> {
        if self.client.is_some() {
            return Ok(());
        }
        let client = match &self.mode {
            ConnectMode::Uri(uri) => connect_uri(uri)?,
            ConnectMode::Params(params) => connect_params(params)?,
        };
        info!("database connection established");
        self.client = Some(client);
        Ok(())
    }

    /// Closes the active connection and clears it. The next operation
    /// re-establishes the connection lazily.
    ///
    /// Disconnecting an unconnected manager is a `Connection` error;
    /// callers that want best-effort teardown should consult
    /// [`is_connected`](ConnectionManager::is_connected) first.
    pub fn disconnect(&mut self) -> Result<()> {
        let client = self.client.take().ok_or_else(|| {
            PgkitError::Connection("disconnect called with no active connection".to_string())
        })?;
        client
            .close()
            .map_err(|e| PgkitError::Connection(format!("failed to close connection: {}", e)))?;
        info!("database connection closed");
        Ok(())
    }

    /// Whether a connection is currently live.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Ensure-ready accessor: connects lazily when needed, then hands
    /// out the live client. Idempotent across calls.
    pub fn client(&mut self) -> Result<&mut Client> {
        if self.client.is_none() {
            self.connect()?;
        }
        self.client.as_mut().ok_or_else(|| {
            PgkitError::Connection("connection unavailable after connect".to_string())
        })
    }
}

fn connect_uri(uri: &str) -> Result<Client> {
    let mut config: Config = uri
        .parse()
        .map_err(|e: postgres::Error| PgkitError::Config(format!("invalid connection URI: {}", e)))?;
    config.ssl_mode(SslMode::Require);
    let connector = native_tls::TlsConnector::new()
        .map_err(|e| PgkitError::Connection(format!("failed to build TLS connector: {}", e)))?;
    config
        .connect(MakeTlsConnector::new(connector))
        .map_err(|e| PgkitError::Connection(format!("failed to connect: {}", e)))
}

fn connect_params(params: &HostParams) -> Result<Client> {
    Config::new()
        .host(&params.host)
        .port(params.port)
        .user(&params.user)
        .password(&params.password)
        .dbname(&params.database)
        .connect(NoTls)
        .map_err(|e| PgkitError::Connection(format!("failed to connect: {}", e)))
}
