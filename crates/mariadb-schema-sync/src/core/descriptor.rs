//! Declared record descriptors and their field metadata annotations.
//!
//! A descriptor set is the loaded form of the schema definition: named record
//! types whose fields carry storage annotations. Producing the set is an
//! upstream concern; the engine consumes it as-is.

use serde::{Deserialize, Serialize};

/// Metadata annotations attached to one declared field.
///
/// Populated once when the descriptor set is loaded; no annotation lookup
/// happens after that point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
    /// Storage type token rendered verbatim into DDL (e.g. "int",
    /// "varchar(255)"). Required for fields of table-backed records.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,

    /// Render a NOT NULL clause for this column. Columns are nullable unless
    /// marked.
    #[serde(default)]
    pub not_null: bool,

    /// Column participates in the table's primary key.
    #[serde(default)]
    pub primary_key: bool,

    /// Render an AUTO_INCREMENT clause for this column.
    #[serde(default)]
    pub auto_increment: bool,

    /// Default value, rendered verbatim into DDL. String literals must carry
    /// their own quotes (e.g. `"'free'"`).
    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// One declared field: a name plus its metadata annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name (becomes the column name).
    pub name: String,

    /// Metadata annotations, flattened in the serialized form.
    #[serde(flatten)]
    pub metadata: FieldMetadata,
}

/// One declared record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    /// Record name; the table name is its lower-cased form.
    pub name: String,

    /// Table-backed marker. Records without it are ignored by the sync.
    #[serde(default)]
    pub table: bool,

    /// Ordered field list.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}
