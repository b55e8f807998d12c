//! Renders plan operations into MariaDB DDL statements.
//!
//! Statements are rendered without trailing semicolons. All identifiers go
//! through [`quote_ident`]; storage types and default expressions are emitted
//! verbatim as declared. Column adds and drops use the `IF NOT EXISTS` /
//! `IF EXISTS` forms so a re-applied plan degrades to a no-op instead of an
//! error.

use crate::core::identifier::quote_ident;
use crate::core::plan::{DdlOp, SyncPlan};
use crate::core::schema::FieldSpec;

/// Render every operation in a plan, in plan order.
pub fn statements(plan: &SyncPlan) -> Vec<String> {
    plan.ops
        .iter()
        .map(|op| render_op(&plan.table, op))
        .collect()
}

/// Render a single operation against the given table.
pub fn render_op(table: &str, op: &DdlOp) -> String {
    let table = quote_ident(table);
    match op {
        DdlOp::CreateTable { columns } => {
            // Bare name/type pairs; attributes ride on the ADD COLUMN pass.
            let cols: Vec<String> = columns
                .iter()
                .map(|f| format!("{} {}", quote_ident(&f.name), f.storage_type))
                .collect();
            format!(
                "CREATE TABLE IF NOT EXISTS {} ({})",
                table,
                cols.join(", ")
            )
        }
        DdlOp::AddColumns { columns } => {
            let clauses: Vec<String> = columns
                .iter()
                .map(|f| format!("ADD COLUMN IF NOT EXISTS {}", column_definition(f)))
                .collect();
            format!("ALTER TABLE {} {}", table, clauses.join(", "))
        }
        DdlOp::DropColumns { columns } => {
            let clauses: Vec<String> = columns
                .iter()
                .map(|c| format!("DROP COLUMN IF EXISTS {}", quote_ident(c)))
                .collect();
            format!("ALTER TABLE {} {}", table, clauses.join(", "))
        }
        DdlOp::SetPrimaryKey {
            columns,
            drop_existing,
        } => {
            if columns.is_empty() {
                return format!("ALTER TABLE {} DROP PRIMARY KEY", table);
            }
            let cols: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
            if *drop_existing {
                format!(
                    "ALTER TABLE {} DROP PRIMARY KEY, ADD PRIMARY KEY ({})",
                    table,
                    cols.join(", ")
                )
            } else {
                format!("ALTER TABLE {} ADD PRIMARY KEY ({})", table, cols.join(", "))
            }
        }
        DdlOp::DropTable => format!("DROP TABLE {}", table),
    }
}

/// Full column definition with attribute clauses in a fixed order:
/// type, default, nullability, key membership, auto-increment.
fn column_definition(field: &FieldSpec) -> String {
    let mut def = format!("{} {}", quote_ident(&field.name), field.storage_type);
    if let Some(default) = &field.default_value {
        def.push_str(" DEFAULT ");
        def.push_str(default);
    }
    if !field.nullable {
        def.push_str(" NOT NULL");
    }
    if field.is_primary_key {
        def.push_str(" PRIMARY KEY");
    }
    if field.auto_increment {
        def.push_str(" AUTO_INCREMENT");
    }
    def
}
