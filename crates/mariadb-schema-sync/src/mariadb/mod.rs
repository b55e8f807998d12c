//! MariaDB driver: a single connection exposing catalog inspection and DDL
//! execution over it.
//!
//! The whole engine runs on one connection so that catalog reads observe the
//! DDL previously executed in the same run without racing other sessions.

mod executor;
mod inspector;

use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, OptsBuilder};
use tracing::{debug, info};

use crate::config::{Config, DatabaseConfig, SyncOptions};
use crate::error::{Result, SyncError};

/// Handle to an open MariaDB connection.
///
/// Implements [`CatalogInspector`](crate::core::traits::CatalogInspector) and
/// [`DdlExecutor`](crate::core::traits::DdlExecutor) on the same underlying
/// connection. Catalog queries are scoped to the configured database.
pub struct MariaDb {
    conn: Conn,
    database: String,
    combine_varchar_length: bool,
}

impl MariaDb {
    /// Connect using the full configuration.
    pub async fn connect(config: &Config) -> Result<Self> {
        Self::connect_with(&config.database, &config.sync).await
    }

    /// Connect with explicit connection and sync options.
    pub async fn connect_with(database: &DatabaseConfig, sync: &SyncOptions) -> Result<Self> {
        info!(
            "Connecting to MariaDB: {}:{}/{}",
            database.host, database.port, database.database
        );

        let opts: Opts = OptsBuilder::default()
            .ip_or_hostname(&database.host)
            .tcp_port(database.port)
            .user(Some(&database.user))
            .pass(Some(&database.password))
            .db_name(Some(&database.database))
            .into();

        let mut conn = Conn::new(opts).await.map_err(SyncError::connection)?;

        conn.query_drop("SELECT 1")
            .await
            .map_err(SyncError::connection)?;
        debug!("Connection test successful");

        Ok(Self {
            conn,
            database: database.database.clone(),
            combine_varchar_length: sync.combine_varchar_length,
        })
    }

    /// Close the connection gracefully.
    pub async fn close(self) -> Result<()> {
        self.conn.disconnect().await.map_err(SyncError::connection)
    }
}
