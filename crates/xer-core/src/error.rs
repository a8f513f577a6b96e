use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Every failure class the reader distinguishes.
///
/// Only `SchemaMissing` and `SchemaConflict` abort a parse. The others are
/// recorded as [`Diagnostic`]s on the finished document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    SchemaMissing,
    SchemaConflict,
    MalformedNumber,
    MalformedDate,
    DuplicatePrimaryKey,
    MalformedCalendarData,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SchemaMissing => "schema_missing",
            ErrorKind::SchemaConflict => "schema_conflict",
            ErrorKind::MalformedNumber => "malformed_number",
            ErrorKind::MalformedDate => "malformed_date",
            ErrorKind::DuplicatePrimaryKey => "duplicate_primary_key",
            ErrorKind::MalformedCalendarData => "malformed_calendar_data",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that discard the document being built, plus the I/O and encoding
/// errors of the persistence helpers.
#[derive(Debug, Error)]
pub enum XerError {
    #[error("line {line}: data row in table {table} precedes its field header")]
    SchemaMissing { table: String, line: usize },

    #[error("line {line}: field header appears before any table header")]
    MissingTableHeader { line: usize },

    #[error("line {line}: table {table} redeclares its field schema with different fields")]
    SchemaConflict { table: String, line: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "dataframe")]
    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

impl XerError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            XerError::SchemaMissing { .. } | XerError::MissingTableHeader { .. } => {
                Some(ErrorKind::SchemaMissing)
            }
            XerError::SchemaConflict { .. } => Some(ErrorKind::SchemaConflict),
            _ => None,
        }
    }
}

pub type XerResult<T> = Result<T, XerError>;

/// A single field that could not be decoded into its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field {field}: malformed number '{raw}'")]
    MalformedNumber { field: String, raw: String },

    #[error("field {field}: malformed date '{raw}' (expected YYYY-MM-DD HH:MM)")]
    MalformedDate { field: String, raw: String },
}

impl FieldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::MalformedNumber { .. } => ErrorKind::MalformedNumber,
            FieldError::MalformedDate { .. } => ErrorKind::MalformedDate,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FieldError::MalformedNumber { field, .. } | FieldError::MalformedDate { field, .. } => {
                field
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// A non-fatal problem found while ingesting one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub severity: Severity,
    pub table: String,
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(
        kind: ErrorKind,
        table: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            table: table.into(),
            line,
            message: message.into(),
        }
    }

    pub fn error(
        kind: ErrorKind,
        table: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            table: table.into(),
            line,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub(crate) fn log(&self) {
        tracing::warn!(
            kind = self.kind.as_str(),
            table = %self.table,
            line = self.line,
            "{}",
            self.message
        );
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(
            f,
            "{level} [{}] {} line {}: {}",
            self.kind, self.table, self.line, self.message
        )
    }
}
