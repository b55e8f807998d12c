//! Introspected-side schema model: what the catalog reports right now.

use serde::{Deserialize, Serialize};

/// One existing column as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogColumn {
    /// Column name.
    pub name: String,

    /// Data type token; carries the character length (e.g. "varchar(255)")
    /// when length combining is enabled.
    pub data_type: String,

    /// Whether the column allows NULL.
    pub is_nullable: bool,

    /// Whether the column is part of the primary key.
    pub is_primary_key: bool,

    /// Column default, if any.
    pub default_value: Option<String>,

    /// Whether the column auto-increments.
    pub auto_increment: bool,
}

/// Snapshot of one existing table at inspection time.
///
/// Produced fresh on every inspection call; never cached across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTable {
    /// Table name.
    pub name: String,

    /// Columns in ordinal order.
    pub columns: Vec<CatalogColumn>,

    /// Primary-key column names, in key order.
    pub primary_key: Vec<String>,
}

impl CatalogTable {
    /// Whether the table has a primary key.
    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }
}
