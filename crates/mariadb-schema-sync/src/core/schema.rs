//! Declared-side schema model: the desired state of the database.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::descriptor::RecordDescriptor;
use crate::core::identifier::validate_identifier;
use crate::error::{Result, SyncError};

/// One desired column, fully resolved from its field annotations.
///
/// Declared once per run and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Column name, unique within the table.
    pub name: String,

    /// Storage type token, rendered verbatim (e.g. "int", "varchar(255)").
    pub storage_type: String,

    /// Whether the column allows NULL.
    pub nullable: bool,

    /// Whether the column is part of the primary key.
    pub is_primary_key: bool,

    /// Whether the column auto-increments.
    pub auto_increment: bool,

    /// Default value, rendered verbatim.
    pub default_value: Option<String>,
}

/// One desired table, derived from a table-backed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Table name: the lower-cased record name.
    pub name: String,

    /// Columns in declaration order. Order never matters for comparison but
    /// keeps DDL rendering deterministic.
    pub fields: Vec<FieldSpec>,
}

impl TableSpec {
    /// Convert one record descriptor into a table spec.
    ///
    /// Fails with a configuration error if any field lacks a storage type or
    /// carries an invalid identifier; nothing is defaulted silently.
    pub fn from_record(record: &RecordDescriptor) -> Result<TableSpec> {
        validate_identifier(&record.name)?;
        let name = record.name.to_lowercase();

        let mut fields = Vec::with_capacity(record.fields.len());
        for field in &record.fields {
            validate_identifier(&field.name)?;
            let storage_type = field.metadata.storage_type.clone().ok_or_else(|| {
                SyncError::Config(format!(
                    "Storage type for field {}.{} is missing",
                    record.name, field.name
                ))
            })?;
            fields.push(FieldSpec {
                name: field.name.clone(),
                storage_type,
                nullable: !field.metadata.not_null,
                is_primary_key: field.metadata.primary_key,
                auto_increment: field.metadata.auto_increment,
                default_value: field.metadata.default_value.clone(),
            });
        }

        Ok(TableSpec { name, fields })
    }

    /// Declared primary-key column names, in declaration order.
    pub fn primary_key(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.is_primary_key)
            .map(|f| f.name.clone())
            .collect()
    }

    /// Whether any field is marked as primary key.
    pub fn has_primary_key(&self) -> bool {
        self.fields.iter().any(|f| f.is_primary_key)
    }
}

/// The declared descriptor set: the engine's schema input.
#[derive(Debug, Clone)]
pub struct SchemaSource {
    records: Vec<RecordDescriptor>,
}

/// Serialized form of the descriptor set file.
#[derive(Debug, Deserialize)]
struct SchemaFile {
    records: Vec<RecordDescriptor>,
}

impl SchemaSource {
    /// Wrap an already-loaded descriptor set.
    pub fn new(records: Vec<RecordDescriptor>) -> Self {
        SchemaSource { records }
    }

    /// Parse a descriptor set from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: SchemaFile = serde_yaml::from_str(yaml)?;
        Ok(SchemaSource::new(file.records))
    }

    /// Load a descriptor set from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// All declared records.
    pub fn records(&self) -> &[RecordDescriptor] {
        &self.records
    }

    /// Table-backed records, in declaration order.
    pub fn table_records(&self) -> impl Iterator<Item = &RecordDescriptor> {
        self.records.iter().filter(|r| r.table)
    }

    /// Lower-cased table names of all table-backed records.
    pub fn table_names(&self) -> Vec<String> {
        self.table_records().map(|r| r.name.to_lowercase()).collect()
    }

    /// Convert every table-backed record eagerly.
    ///
    /// The orchestrator converts lazily, per table; this is the validation
    /// path for callers that want all configuration errors up front.
    pub fn table_specs(&self) -> Result<Vec<TableSpec>> {
        self.table_records().map(TableSpec::from_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::{FieldDescriptor, FieldMetadata};

    fn make_record(name: &str, fields: Vec<FieldDescriptor>) -> RecordDescriptor {
        RecordDescriptor {
            name: name.to_string(),
            table: true,
            fields,
        }
    }

    fn make_field(name: &str, storage_type: &str) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            metadata: FieldMetadata {
                storage_type: Some(storage_type.to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_table_name_is_lowercased_record_name() {
        let spec = TableSpec::from_record(&make_record("UserProfile", vec![])).unwrap();
        assert_eq!(spec.name, "userprofile");
    }

    #[test]
    fn test_missing_storage_type_is_fatal() {
        let mut field = make_field("id", "int");
        field.metadata.storage_type = None;
        let record = make_record("User", vec![field]);

        let err = TableSpec::from_record(&record).unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
        assert!(err.to_string().contains("User.id"));
    }

    #[test]
    fn test_not_null_marker_inverts_to_nullable() {
        let mut field = make_field("name", "varchar(255)");
        field.metadata.not_null = true;
        let record = make_record("User", vec![field, make_field("bio", "text")]);

        let spec = TableSpec::from_record(&record).unwrap();
        assert!(!spec.fields[0].nullable);
        assert!(spec.fields[1].nullable, "unmarked fields stay nullable");
    }

    #[test]
    fn test_primary_key_in_declaration_order() {
        let mut a = make_field("a", "int");
        a.metadata.primary_key = true;
        let b = make_field("b", "int");
        let mut c = make_field("c", "int");
        c.metadata.primary_key = true;

        let spec = TableSpec::from_record(&make_record("T", vec![a, b, c])).unwrap();
        assert_eq!(spec.primary_key(), vec!["a", "c"]);
        assert!(spec.has_primary_key());
    }

    #[test]
    fn test_invalid_field_identifier_rejected() {
        let record = make_record("User", vec![make_field("bad\0name", "int")]);
        assert!(TableSpec::from_record(&record).is_err());
    }

    #[test]
    fn test_schema_source_filters_table_backed_records() {
        let schema = SchemaSource::from_yaml(
            r#"
records:
  - name: User
    table: true
    fields:
      - name: id
        type: int
  - name: Address
    fields:
      - name: street
        type: varchar(80)
"#,
        )
        .unwrap();

        assert_eq!(schema.records().len(), 2);
        assert_eq!(schema.table_names(), vec!["user"]);
        let specs = schema.table_specs().unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].fields[0].storage_type, "int");
    }

    #[test]
    fn test_schema_file_without_records_key_is_an_error() {
        assert!(SchemaSource::from_yaml("tables: []").is_err());
    }
}
