//! Catalog introspection over INFORMATION_SCHEMA.
//!
//! All queries are scoped by `TABLE_SCHEMA = ?` so the inspector never sees
//! tables from other databases on the same server.

use async_trait::async_trait;
use mysql_async::prelude::*;
use tracing::debug;

use super::MariaDb;
use crate::core::catalog::CatalogColumn;
use crate::core::traits::CatalogInspector;
use crate::error::{Result, SyncError};

/// One COLUMNS row, in SELECT order.
type ColumnRow = (
    String,         // COLUMN_NAME
    String,         // DATA_TYPE
    Option<u64>,    // CHARACTER_MAXIMUM_LENGTH
    String,         // IS_NULLABLE
    Option<String>, // COLUMN_DEFAULT
    String,         // COLUMN_KEY
    String,         // EXTRA
);

/// Map a raw catalog row into a column, optionally folding the character
/// length into the type so `varchar` reports as `varchar(255)` and compares
/// cleanly against declared types.
fn column_from_row(row: ColumnRow, combine_varchar_length: bool) -> CatalogColumn {
    let (name, data_type, max_length, is_nullable, default_value, column_key, extra) = row;

    let data_type = match max_length {
        Some(len) if combine_varchar_length && data_type.eq_ignore_ascii_case("varchar") => {
            format!("{}({})", data_type, len)
        }
        _ => data_type,
    };

    CatalogColumn {
        name,
        data_type,
        is_nullable: is_nullable == "YES",
        is_primary_key: column_key == "PRI",
        default_value,
        auto_increment: extra.to_lowercase().contains("auto_increment"),
    }
}

#[async_trait]
impl CatalogInspector for MariaDb {
    async fn table_names(&mut self) -> Result<Vec<String>> {
        let sql = r#"
            SELECT TABLE_NAME FROM information_schema.TABLES
            WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
            ORDER BY TABLE_NAME
        "#;

        let names: Vec<String> = self
            .conn
            .exec(sql, (self.database.as_str(),))
            .await
            .map_err(|e| SyncError::inspection("table list", e))?;

        debug!("Catalog lists {} base tables", names.len());
        Ok(names)
    }

    async fn table_exists(&mut self, table: &str) -> Result<bool> {
        let sql = r#"
            SELECT COUNT(*) FROM information_schema.TABLES
            WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
        "#;

        let count: Option<i64> = self
            .conn
            .exec_first(sql, (self.database.as_str(), table))
            .await
            .map_err(|e| SyncError::inspection(format!("table {}", table), e))?;

        Ok(count.unwrap_or(0) > 0)
    }

    async fn columns(&mut self, table: &str) -> Result<Vec<CatalogColumn>> {
        let sql = r#"
            SELECT COLUMN_NAME, DATA_TYPE, CHARACTER_MAXIMUM_LENGTH,
                   IS_NULLABLE, COLUMN_DEFAULT, COLUMN_KEY, EXTRA
            FROM information_schema.COLUMNS
            WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
            ORDER BY ORDINAL_POSITION
        "#;

        let rows: Vec<ColumnRow> = self
            .conn
            .exec(sql, (self.database.as_str(), table))
            .await
            .map_err(|e| SyncError::inspection(format!("table {}", table), e))?;

        Ok(rows
            .into_iter()
            .map(|row| column_from_row(row, self.combine_varchar_length))
            .collect())
    }

    async fn primary_key_columns(&mut self, table: &str) -> Result<Vec<String>> {
        let sql = r#"
            SELECT COLUMN_NAME FROM information_schema.KEY_COLUMN_USAGE
            WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? AND CONSTRAINT_NAME = 'PRIMARY'
            ORDER BY ORDINAL_POSITION
        "#;

        self.conn
            .exec(sql, (self.database.as_str(), table))
            .await
            .map_err(|e| SyncError::inspection(format!("primary key of {}", table), e))
    }
}
