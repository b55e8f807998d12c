//! # mariadb-schema-sync
//!
//! Declarative schema synchronization for MariaDB.
//!
//! Compares a declared record schema against the live INFORMATION_SCHEMA
//! catalog and executes the DDL that reconciles them:
//!
//! - **Table reconciliation**: creates missing tables, re-declares drifted
//!   column sets, replaces primary keys wholesale
//! - **Orphan sweep**: drops tables the schema no longer declares
//! - **Conditional DDL** using `IF EXISTS` / `IF NOT EXISTS` forms, so
//!   re-applying a plan degrades to a no-op
//! - **Dry-run planning** that renders every statement without executing
//!
//! ## Example
//!
//! ```rust,no_run
//! use mariadb_schema_sync::{Config, MariaDb, Orchestrator, SchemaSource};
//!
//! #[tokio::main]
//! async fn main() -> mariadb_schema_sync::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let schema = SchemaSource::load("schema.yaml")?;
//!     let db = MariaDb::connect(&config).await?;
//!     let mut orchestrator = Orchestrator::new(db, config.sync.clone());
//!     let report = orchestrator.run(&schema).await?;
//!     println!("Executed {} statements", report.statements_executed);
//!     orchestrator.into_inner().close().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod ddl;
pub mod diff;
pub mod error;
pub mod mariadb;
pub mod orchestrator;

// Re-exports for convenient access
pub use config::{CommitGranularity, Config, DatabaseConfig, SyncOptions};
pub use core::catalog::{CatalogColumn, CatalogTable};
pub use core::descriptor::{FieldDescriptor, FieldMetadata, RecordDescriptor};
pub use core::plan::{DdlOp, SyncPlan};
pub use core::schema::{FieldSpec, SchemaSource, TableSpec};
pub use core::traits::{CatalogInspector, DdlExecutor};
pub use error::{Result, SyncError};
pub use mariadb::MariaDb;
pub use orchestrator::{Orchestrator, SyncReport};
