//! Sync orchestrator - main workflow coordinator.
//!
//! Drives two phases against the database handle: reconcile every declared
//! table, then sweep catalog tables nothing declares. A configuration error
//! in one record aborts the run at that record; work already executed for
//! earlier tables stands.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{CommitGranularity, SyncOptions};
use crate::core::plan::SyncPlan;
use crate::core::schema::{SchemaSource, TableSpec};
use crate::core::traits::{CatalogInspector, DdlExecutor};
use crate::diff;
use crate::error::Result;

/// Schema sync orchestrator, generic over the database handle.
pub struct Orchestrator<D> {
    db: D,
    options: SyncOptions,
}

/// Result of a sync run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Unique run identifier.
    pub run_id: String,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Table-backed records in the declared schema.
    pub tables_declared: usize,

    /// Tables created from scratch.
    pub tables_created: usize,

    /// Existing tables altered.
    pub tables_altered: usize,

    /// Tables already in the declared state.
    pub tables_unchanged: usize,

    /// Orphan tables dropped.
    pub tables_dropped: usize,

    /// DDL statements executed.
    pub statements_executed: usize,
}

impl SyncReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<D> Orchestrator<D>
where
    D: CatalogInspector + DdlExecutor,
{
    /// Create a new orchestrator over an open database handle.
    pub fn new(db: D, options: SyncOptions) -> Self {
        Self { db, options }
    }

    /// Give the database handle back, e.g. to close it.
    pub fn into_inner(self) -> D {
        self.db
    }

    /// Run the sync: reconcile declared tables, then drop orphans.
    pub async fn run(&mut self, schema: &SchemaSource) -> Result<SyncReport> {
        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        info!("Starting schema sync run: {}", run_id);

        let tables_declared = schema.table_records().count();
        let mut tables_created = 0;
        let mut tables_altered = 0;
        let mut tables_unchanged = 0;
        let mut tables_dropped = 0;
        let mut statements_executed = 0;

        // Phase 1: reconcile declared tables, in declaration order.
        info!("Phase 1: Reconciling {} declared tables", tables_declared);
        for record in schema.table_records() {
            let declared = TableSpec::from_record(record)?;
            let existing = self.db.snapshot(&declared.name).await?;
            let plan = diff::diff_table(&declared, existing.as_ref());

            if plan.is_empty() {
                debug!("Table {} is up to date", declared.name);
                tables_unchanged += 1;
                continue;
            }

            if plan.creates_table() {
                info!("Creating table {}", declared.name);
                tables_created += 1;
            } else {
                info!("Altering table {} ({} operations)", declared.name, plan.ops.len());
                tables_altered += 1;
            }

            statements_executed += self.db.apply(&plan).await?;
            if self.options.commit == CommitGranularity::PerTable {
                self.db.commit().await?;
            }
        }

        // Phase 2: sweep catalog tables nothing declares. The table list is
        // fetched after phase 1 so tables created above are never candidates.
        info!("Phase 2: Sweeping orphan tables");
        let declared: HashSet<String> = schema.table_names().into_iter().collect();
        let existing = self.db.table_names().await?;
        for table in diff::orphan_tables(&declared, &existing) {
            warn!("Dropping orphan table {}", table);
            statements_executed += self.db.apply(&SyncPlan::drop_table(&table)).await?;
            tables_dropped += 1;
            if self.options.commit == CommitGranularity::PerTable {
                self.db.commit().await?;
            }
        }

        if self.options.commit == CommitGranularity::PerRun {
            self.db.commit().await?;
        }

        let completed_at = Utc::now();
        let duration_seconds = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        info!(
            "Sync completed: {} created, {} altered, {} unchanged, {} dropped; {} statements in {:.1}s",
            tables_created,
            tables_altered,
            tables_unchanged,
            tables_dropped,
            statements_executed,
            duration_seconds
        );

        Ok(SyncReport {
            run_id,
            started_at,
            completed_at,
            duration_seconds,
            tables_declared,
            tables_created,
            tables_altered,
            tables_unchanged,
            tables_dropped,
            statements_executed,
        })
    }

    /// Compute every non-empty plan without executing anything.
    ///
    /// Orphan drops are planned from the current catalog, so a table the run
    /// would first create is not reported as an orphan here either.
    pub async fn plan(&mut self, schema: &SchemaSource) -> Result<Vec<SyncPlan>> {
        let mut plans = Vec::new();

        for record in schema.table_records() {
            let declared = TableSpec::from_record(record)?;
            let existing = self.db.snapshot(&declared.name).await?;
            let plan = diff::diff_table(&declared, existing.as_ref());
            if !plan.is_empty() {
                plans.push(plan);
            }
        }

        let declared: HashSet<String> = schema.table_names().into_iter().collect();
        let existing = self.db.table_names().await?;
        for table in diff::orphan_tables(&declared, &existing) {
            plans.push(SyncPlan::drop_table(table));
        }

        Ok(plans)
    }
}
