//! Async trait seams between the engine and the database handle.
//!
//! One concrete handle implements both traits over a single connection; the
//! split keeps catalog reads and plan execution independently mockable.

use async_trait::async_trait;

use crate::core::catalog::{CatalogColumn, CatalogTable};
use crate::core::plan::SyncPlan;
use crate::error::Result;

/// Read access to the live database catalog.
#[async_trait]
pub trait CatalogInspector: Send {
    /// Names of all base tables in the configured database.
    async fn table_names(&mut self) -> Result<Vec<String>>;

    /// Whether a table exists.
    async fn table_exists(&mut self, table: &str) -> Result<bool>;

    /// Column definitions for a table, in ordinal order.
    async fn columns(&mut self, table: &str) -> Result<Vec<CatalogColumn>>;

    /// Primary-key column names for a table, in key order.
    async fn primary_key_columns(&mut self, table: &str) -> Result<Vec<String>>;

    /// Snapshot one table, or `None` if it does not exist.
    ///
    /// Absence is decided by the existence lookup, never inferred from an
    /// empty column list.
    async fn snapshot(&mut self, table: &str) -> Result<Option<CatalogTable>> {
        if !self.table_exists(table).await? {
            return Ok(None);
        }
        let columns = self.columns(table).await?;
        let primary_key = self.primary_key_columns(table).await?;
        Ok(Some(CatalogTable {
            name: table.to_string(),
            columns,
            primary_key,
        }))
    }
}

/// Applies sync plans to the database.
#[async_trait]
pub trait DdlExecutor: Send {
    /// Execute every operation in the plan, in order.
    ///
    /// Returns the number of statements executed. Does not commit.
    async fn apply(&mut self, plan: &SyncPlan) -> Result<usize>;

    /// Commit work executed since the last commit.
    async fn commit(&mut self) -> Result<()>;
}
