//! Sync plans: the ordered DDL operations required for one table.

use std::fmt;

use crate::core::schema::FieldSpec;

/// One DDL operation in a table's sync plan.
#[derive(Debug, Clone, PartialEq)]
pub enum DdlOp {
    /// Create the table from its declared columns (name/type pairs only;
    /// other attributes ride on the conditional add-column path).
    CreateTable { columns: Vec<FieldSpec> },

    /// Re-declare columns. Conditional per column, so unchanged fields are
    /// re-added harmlessly.
    AddColumns { columns: Vec<FieldSpec> },

    /// Drop columns. Conditional per column.
    DropColumns { columns: Vec<String> },

    /// Replace or clear the primary key. `drop_existing` records whether an
    /// existing key must be dropped first; empty `columns` clears the key.
    SetPrimaryKey {
        columns: Vec<String>,
        drop_existing: bool,
    },

    /// Drop the table.
    DropTable,
}

impl fmt::Display for DdlOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DdlOp::CreateTable { columns } => {
                write!(f, "create table ({} columns)", columns.len())
            }
            DdlOp::AddColumns { columns } => {
                let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
                write!(f, "add columns {}", names.join(", "))
            }
            DdlOp::DropColumns { columns } => write!(f, "drop columns {}", columns.join(", ")),
            DdlOp::SetPrimaryKey { columns, .. } if columns.is_empty() => {
                write!(f, "drop primary key")
            }
            DdlOp::SetPrimaryKey {
                columns,
                drop_existing: true,
            } => write!(f, "replace primary key ({})", columns.join(", ")),
            DdlOp::SetPrimaryKey { columns, .. } => {
                write!(f, "add primary key ({})", columns.join(", "))
            }
            DdlOp::DropTable => write!(f, "drop table"),
        }
    }
}

/// Ordered DDL operations for one table.
///
/// Valid plan shapes: `[CreateTable]` optionally followed by `SetPrimaryKey`;
/// any subset of `[DropColumns, AddColumns, SetPrimaryKey]` in that order;
/// `[DropTable]` alone; or empty. Create/drop never mix with column-level
/// operations in one plan.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan {
    /// Table the operations apply to.
    pub table: String,

    /// Operations in execution order.
    pub ops: Vec<DdlOp>,
}

impl SyncPlan {
    /// Empty plan for a table.
    pub fn new(table: impl Into<String>) -> Self {
        SyncPlan {
            table: table.into(),
            ops: Vec::new(),
        }
    }

    /// Plan that drops an orphan table.
    pub fn drop_table(table: impl Into<String>) -> Self {
        SyncPlan {
            table: table.into(),
            ops: vec![DdlOp::DropTable],
        }
    }

    /// Whether the plan requires no work.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Whether the plan creates the table.
    pub fn creates_table(&self) -> bool {
        matches!(self.ops.first(), Some(DdlOp::CreateTable { .. }))
    }

    /// Whether the plan drops the table.
    pub fn drops_table(&self) -> bool {
        matches!(self.ops.first(), Some(DdlOp::DropTable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_field(name: &str) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            storage_type: "int".to_string(),
            nullable: true,
            is_primary_key: false,
            auto_increment: false,
            default_value: None,
        }
    }

    #[test]
    fn test_plan_shape_helpers() {
        let empty = SyncPlan::new("user");
        assert!(empty.is_empty());
        assert!(!empty.creates_table());

        let drop = SyncPlan::drop_table("old");
        assert!(drop.drops_table());
        assert!(!drop.is_empty());

        let mut create = SyncPlan::new("user");
        create.ops.push(DdlOp::CreateTable {
            columns: vec![make_field("id")],
        });
        assert!(create.creates_table());
        assert!(!create.drops_table());
    }

    #[test]
    fn test_op_display() {
        let add = DdlOp::AddColumns {
            columns: vec![make_field("a"), make_field("b")],
        };
        assert_eq!(add.to_string(), "add columns a, b");

        let clear = DdlOp::SetPrimaryKey {
            columns: vec![],
            drop_existing: true,
        };
        assert_eq!(clear.to_string(), "drop primary key");

        let replace = DdlOp::SetPrimaryKey {
            columns: vec!["id".to_string()],
            drop_existing: true,
        };
        assert_eq!(replace.to_string(), "replace primary key (id)");

        let add_pk = DdlOp::SetPrimaryKey {
            columns: vec!["id".to_string()],
            drop_existing: false,
        };
        assert_eq!(add_pk.to_string(), "add primary key (id)");
    }
}
