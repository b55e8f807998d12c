//! Error types for the schema sync library.

use thiserror::Error;

/// Main error type for sync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Configuration error (invalid YAML, missing fields, missing storage type, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(#[source] mysql_async::Error),

    /// Catalog inspection failed (table snapshot or table list)
    #[error("Catalog inspection failed for {context}: {source}")]
    Inspection {
        context: String,
        #[source]
        source: mysql_async::Error,
    },

    /// A DDL statement failed at the database
    #[error("DDL execution failed for table {table}: {source}\n  Statement: {statement}")]
    Ddl {
        table: String,
        statement: String,
        #[source]
        source: mysql_async::Error,
    },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SyncError {
    /// Create a Connection error
    pub fn connection(source: mysql_async::Error) -> Self {
        SyncError::Connection(source)
    }

    /// Create an Inspection error with context ("table x", "table list")
    pub fn inspection(context: impl Into<String>, source: mysql_async::Error) -> Self {
        SyncError::Inspection {
            context: context.into(),
            source,
        }
    }

    /// Create a Ddl error carrying the offending statement
    pub fn ddl(
        table: impl Into<String>,
        statement: impl Into<String>,
        source: mysql_async::Error,
    ) -> Self {
        SyncError::Ddl {
            table: table.into(),
            statement: statement.into(),
            source,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        // Add error chain for wrapped errors
        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for this error class.
    ///
    /// 1 = configuration (including YAML/JSON parse), 2 = connection,
    /// 3 = catalog inspection, 4 = DDL execution, 7 = IO.
    pub fn exit_code(&self) -> u8 {
        match self {
            SyncError::Config(_) | SyncError::Yaml(_) | SyncError::Json(_) => 1,
            SyncError::Connection(_) => 2,
            SyncError::Inspection { .. } => 3,
            SyncError::Ddl { .. } => 4,
            SyncError::Io(_) => 7,
        }
    }
}

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
