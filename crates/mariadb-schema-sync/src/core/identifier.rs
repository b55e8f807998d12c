//! Identifier validation and quoting for SQL injection prevention.
//!
//! SQL identifiers (table names, column names) cannot be passed as parameters
//! in prepared statements - only data values can be parameterized. Declared
//! record and field names therefore flow into DDL text, so every identifier is
//! validated once at conversion time and backtick-quoted wherever it is
//! rendered.

use crate::error::{Result, SyncError};

/// Maximum identifier length (MySQL/MariaDB limit).
const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Validate an identifier for security issues.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes (injection vector)
/// - Identifiers exceeding maximum length
///
/// # Errors
///
/// Returns `SyncError::Config` for invalid identifiers with a descriptive message.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SyncError::Config("Identifier cannot be empty".to_string()));
    }

    if name.contains('\0') {
        return Err(SyncError::Config(format!(
            "SECURITY: Identifier contains null byte (possible injection attempt): {:?}",
            name
        )));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(SyncError::Config(format!(
            "SECURITY: Identifier exceeds maximum length of {} bytes (got {} bytes): {:?}",
            MAX_IDENTIFIER_LENGTH,
            name.len(),
            name
        )));
    }

    Ok(())
}

/// Quote a MariaDB/MySQL identifier using backticks.
///
/// Escapes backticks by doubling them and wraps in backticks. Assumes the
/// identifier has already passed [`validate_identifier`].
///
/// # Examples
///
/// ```
/// use mariadb_schema_sync::core::identifier::quote_ident;
/// assert_eq!(quote_ident("users"), "`users`");
/// assert_eq!(quote_ident("table`name"), "`table``name`");
/// ```
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
