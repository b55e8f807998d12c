//! DDL execution against the live connection.

use async_trait::async_trait;
use mysql_async::prelude::*;
use tracing::{debug, info};

use super::MariaDb;
use crate::core::plan::SyncPlan;
use crate::core::traits::DdlExecutor;
use crate::ddl;
use crate::error::{Result, SyncError};

#[async_trait]
impl DdlExecutor for MariaDb {
    async fn apply(&mut self, plan: &SyncPlan) -> Result<usize> {
        let statements = ddl::statements(plan);
        for (op, statement) in plan.ops.iter().zip(&statements) {
            info!("{}: {}", plan.table, op);
            debug!("Executing: {}", statement);
            self.conn
                .query_drop(statement)
                .await
                .map_err(|e| SyncError::ddl(&plan.table, statement, e))?;
        }
        Ok(statements.len())
    }

    /// Send an explicit COMMIT.
    ///
    /// Each DDL statement already commits implicitly; the explicit COMMIT
    /// marks the checkpoint boundary chosen by the commit granularity.
    async fn commit(&mut self) -> Result<()> {
        self.conn
            .query_drop("COMMIT")
            .await
            .map_err(SyncError::connection)
    }
}
