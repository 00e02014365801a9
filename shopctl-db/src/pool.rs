//! Database connection management
//!
//! One console session holds one connection, so the pool is capped at one.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// A single session talks over a single connection.
const SESSION_MAX_CONNECTIONS: u32 = 1;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Dates are typed as month-day-year regardless of server defaults.
///
/// Startup options are split on whitespace by the server, so the value
/// must not contain any.
pub const SESSION_DATESTYLE: &str = "ISO,MDY";

/// Where to find the shop database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl ConnectionSettings {
    /// Connection URL for display; never includes the password.
    pub fn display_url(&self) -> String {
        format!("postgresql://{}:{}/{}", self.host, self.port, self.dbname)
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.dbname)
            .username(&self.user)
            .password(&self.password)
            .application_name("shopctl")
            .options([("datestyle", SESSION_DATESTYLE)])
    }
}

/// Open the session connection.
///
/// # Errors
///
/// Returns an error if the server cannot be reached or rejects the login.
pub async fn connect(settings: &ConnectionSettings) -> Result<PgPool, sqlx::Error> {
    connect_with(settings.connect_options(), SESSION_MAX_CONNECTIONS).await
}

/// Open a pool with custom options.
///
/// # Arguments
///
/// * `options` - PostgreSQL connection options
/// * `max_connections` - Maximum number of connections in the pool
pub async fn connect_with(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
}
