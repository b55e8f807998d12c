//! Pure schema comparison: declared state vs. catalog state, per table.
//!
//! Comparison is strictly set-based over column names and primary-key
//! membership; column order never matters. Composite primary-key member
//! order is likewise not compared, so reordering members without changing
//! membership is a no-op even though key order affects composite index
//! behavior. That gap is carried over from the source semantics on purpose;
//! see the tests pinning it.

use std::collections::HashSet;

use crate::core::catalog::CatalogTable;
use crate::core::plan::{DdlOp, SyncPlan};
use crate::core::schema::TableSpec;

/// Compute the plan that brings one table in line with its declaration.
///
/// `existing` is the catalog snapshot, or `None` when the table is absent.
pub fn diff_table(declared: &TableSpec, existing: Option<&CatalogTable>) -> SyncPlan {
    let mut plan = SyncPlan::new(declared.name.clone());

    let existing = match existing {
        None => {
            plan.ops.push(DdlOp::CreateTable {
                columns: declared.fields.clone(),
            });
            let pk = declared.primary_key();
            if !pk.is_empty() {
                plan.ops.push(DdlOp::SetPrimaryKey {
                    columns: pk,
                    drop_existing: false,
                });
            }
            return plan;
        }
        Some(table) => table,
    };

    let declared_names: HashSet<&str> = declared.fields.iter().map(|f| f.name.as_str()).collect();
    let existing_names: HashSet<&str> = existing.columns.iter().map(|c| c.name.as_str()).collect();

    if declared_names != existing_names {
        // Drops in catalog order, adds in declaration order: deterministic DDL.
        let to_drop: Vec<String> = existing
            .columns
            .iter()
            .filter(|c| !declared_names.contains(c.name.as_str()))
            .map(|c| c.name.clone())
            .collect();
        if !to_drop.is_empty() {
            plan.ops.push(DdlOp::DropColumns { columns: to_drop });
        }
        if !declared.fields.is_empty() {
            // Every declared field is re-added, not just the missing ones;
            // conditional rendering makes the re-declaration a no-op.
            plan.ops.push(DdlOp::AddColumns {
                columns: declared.fields.clone(),
            });
        }
    }

    let declared_pk = declared.primary_key();
    let declared_pk_set: HashSet<&str> = declared_pk.iter().map(String::as_str).collect();
    let existing_pk_set: HashSet<&str> = existing.primary_key.iter().map(String::as_str).collect();
    if declared_pk_set != existing_pk_set {
        plan.ops.push(DdlOp::SetPrimaryKey {
            columns: declared_pk,
            drop_existing: existing.has_primary_key(),
        });
    }

    plan
}

/// Catalog tables absent from the declared set: candidates for the drop sweep.
pub fn orphan_tables(declared: &HashSet<String>, existing: &[String]) -> Vec<String> {
    existing
        .iter()
        .filter(|table| !declared.contains(*table))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CatalogColumn;
    use crate::core::schema::FieldSpec;

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

    fn make_pk_field(name: &str) -> FieldSpec {
        FieldSpec {
            is_primary_key: true,
            ..make_field(name)
        }
    }

    fn make_spec(name: &str, fields: Vec<FieldSpec>) -> TableSpec {
        TableSpec {
            name: name.to_string(),
            fields,
        }
    }

    fn make_column(name: &str) -> CatalogColumn {
        CatalogColumn {
            name: name.to_string(),
            data_type: "int".to_string(),
            is_nullable: true,
            is_primary_key: false,
            default_value: None,
            auto_increment: false,
        }
    }

    fn make_table(name: &str, columns: &[&str], primary_key: &[&str]) -> CatalogTable {
        CatalogTable {
            name: name.to_string(),
            columns: columns.iter().map(|c| make_column(c)).collect(),
            primary_key: primary_key.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn names(fields: &[FieldSpec]) -> Vec<&str> {
        fields.iter().map(|f| f.name.as_str()).collect()
    }

    // =========================================================================
    // Absent table
    // =========================================================================

    #[test]
    fn test_absent_table_is_created_with_primary_key() {
        let spec = make_spec("user", vec![make_pk_field("id"), make_field("name")]);
        let plan = diff_table(&spec, None);

        assert_eq!(plan.table, "user");
        assert_eq!(plan.ops.len(), 2);
        assert!(matches!(&plan.ops[0], DdlOp::CreateTable { columns } if columns.len() == 2));
        assert_eq!(
            plan.ops[1],
            DdlOp::SetPrimaryKey {
                columns: vec!["id".to_string()],
                drop_existing: false,
            }
        );
    }

    #[test]
    fn test_absent_table_without_primary_key_is_just_created() {
        let spec = make_spec("log", vec![make_field("message")]);
        let plan = diff_table(&spec, None);

        assert_eq!(plan.ops.len(), 1);
        assert!(plan.creates_table());
    }

    // =========================================================================
    // Column diffing
    // =========================================================================

    #[test]
    fn test_identical_table_yields_empty_plan() {
        let spec = make_spec("user", vec![make_pk_field("id"), make_field("name")]);
        let table = make_table("user", &["id", "name"], &["id"]);

        assert!(diff_table(&spec, Some(&table)).is_empty());
    }

    #[test]
    fn test_reordered_columns_are_a_noop() {
        let spec = make_spec("user", vec![make_field("b"), make_field("a")]);
        let table = make_table("user", &["a", "b"], &[]);

        assert!(diff_table(&spec, Some(&table)).is_empty());
    }

    #[test]
    fn test_drift_drops_stale_and_readds_all_declared() {
        // Declared {a,b,c}, existing {a,b,d}: drop {d}, re-add all of a, b, c.
        let spec = make_spec(
            "t",
            vec![make_field("a"), make_field("b"), make_field("c")],
        );
        let table = make_table("t", &["a", "b", "d"], &[]);

        let plan = diff_table(&spec, Some(&table));
        assert_eq!(plan.ops.len(), 2);
        assert_eq!(
            plan.ops[0],
            DdlOp::DropColumns {
                columns: vec!["d".to_string()]
            }
        );
        match &plan.ops[1] {
            DdlOp::AddColumns { columns } => assert_eq!(names(columns), vec!["a", "b", "c"]),
            other => panic!("expected AddColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_columns_only_readd_without_drop() {
        let spec = make_spec(
            "t",
            vec![make_field("a"), make_field("b"), make_field("c")],
        );
        let table = make_table("t", &["a", "b"], &[]);

        let plan = diff_table(&spec, Some(&table));
        assert_eq!(plan.ops.len(), 1);
        match &plan.ops[0] {
            DdlOp::AddColumns { columns } => assert_eq!(names(columns), vec!["a", "b", "c"]),
            other => panic!("expected AddColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_columns_dropped_in_catalog_order() {
        let spec = make_spec("t", vec![make_field("a")]);
        let table = make_table("t", &["z", "a", "y"], &[]);

        let plan = diff_table(&spec, Some(&table));
        assert_eq!(
            plan.ops[0],
            DdlOp::DropColumns {
                columns: vec!["z".to_string(), "y".to_string()]
            }
        );
        // The surviving column is still re-declared.
        match &plan.ops[1] {
            DdlOp::AddColumns { columns } => assert_eq!(names(columns), vec!["a"]),
            other => panic!("expected AddColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_no_declared_fields_drops_everything_without_add() {
        let spec = make_spec("t", vec![]);
        let table = make_table("t", &["a", "b"], &[]);

        let plan = diff_table(&spec, Some(&table));
        assert_eq!(plan.ops.len(), 1);
        assert_eq!(
            plan.ops[0],
            DdlOp::DropColumns {
                columns: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    // =========================================================================
    // Primary key diffing
    // =========================================================================

    #[test]
    fn test_narrowed_primary_key_is_replaced_wholesale() {
        let spec = make_spec("t", vec![make_pk_field("a"), make_field("b")]);
        let table = make_table("t", &["a", "b"], &["a", "b"]);

        let plan = diff_table(&spec, Some(&table));
        assert_eq!(plan.ops.len(), 1);
        assert_eq!(
            plan.ops[0],
            DdlOp::SetPrimaryKey {
                columns: vec!["a".to_string()],
                drop_existing: true,
            }
        );
    }

    #[test]
    fn test_cleared_primary_key_still_drops_existing() {
        let spec = make_spec("t", vec![make_field("a")]);
        let table = make_table("t", &["a"], &["a"]);

        let plan = diff_table(&spec, Some(&table));
        assert_eq!(
            plan.ops[0],
            DdlOp::SetPrimaryKey {
                columns: vec![],
                drop_existing: true,
            }
        );
    }

    #[test]
    fn test_new_primary_key_on_keyless_table_does_not_drop() {
        let spec = make_spec("t", vec![make_pk_field("a")]);
        let table = make_table("t", &["a"], &[]);

        let plan = diff_table(&spec, Some(&table));
        assert_eq!(
            plan.ops[0],
            DdlOp::SetPrimaryKey {
                columns: vec!["a".to_string()],
                drop_existing: false,
            }
        );
    }

    #[test]
    fn test_reordered_composite_key_is_a_noop() {
        // Membership comparison only: key order is not diffed. Documented gap.
        let spec = make_spec("t", vec![make_pk_field("b"), make_pk_field("a")]);
        let table = make_table("t", &["b", "a"], &["a", "b"]);

        assert!(diff_table(&spec, Some(&table)).is_empty());
    }

    #[test]
    fn test_primary_key_change_alongside_column_drift_comes_last() {
        let spec = make_spec("t", vec![make_pk_field("a"), make_field("c")]);
        let table = make_table("t", &["a", "b"], &[]);

        let plan = diff_table(&spec, Some(&table));
        assert_eq!(plan.ops.len(), 3);
        assert!(matches!(plan.ops[0], DdlOp::DropColumns { .. }));
        assert!(matches!(plan.ops[1], DdlOp::AddColumns { .. }));
        assert!(matches!(plan.ops[2], DdlOp::SetPrimaryKey { .. }));
    }

    // =========================================================================
    // Orphan sweep
    // =========================================================================

    #[test]
    fn test_orphan_tables_filters_declared_names() {
        let declared: HashSet<String> =
            ["user".to_string(), "order".to_string()].into_iter().collect();
        let existing = vec![
            "legacy".to_string(),
            "order".to_string(),
            "user".to_string(),
        ];

        assert_eq!(orphan_tables(&declared, &existing), vec!["legacy"]);
    }

    #[test]
    fn test_orphan_tables_empty_when_everything_declared() {
        let declared: HashSet<String> = ["user".to_string()].into_iter().collect();
        assert!(orphan_tables(&declared, &["user".to_string()]).is_empty());
    }
}
