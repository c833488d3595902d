//! Error types for schema validation.
//!
//! Two failure channels exist:
//! - Data-shape problems are collected as [`Finding`]s during the walk and
//!   surfaced once, as a single [`ConstructError`] carrying the complete
//!   ordered error and warning lists.
//! - Schema malformation (an unresolvable or nonsensical type definition)
//!   aborts the walk immediately; no partial result is meaningful.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Closed set of validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unresolvable or structurally invalid type definition
    BadSchema,
    /// Type definition names a kind that cannot be constructed
    SchemaError,
    /// Required value is absent
    MissingValue,
    /// Leaf, shape, length, or count mismatch
    BadValue,
    /// Strict-mode extraneous object key
    UnknownField,
}

impl ErrorCode {
    /// Returns the wire-format string code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::BadSchema => "bad_schema",
            ErrorCode::SchemaError => "schema_error",
            ErrorCode::MissingValue => "missing_value",
            ErrorCode::BadValue => "bad_value",
            ErrorCode::UnknownField => "unknown_field",
        }
    }

    /// Schema-level codes abort a construct call instead of being collected.
    pub fn is_schema_fault(&self) -> bool {
        matches!(self, ErrorCode::BadSchema | ErrorCode::SchemaError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single path-tagged validation outcome (error or warning).
///
/// The path is a snapshot taken at the point of failure; later mutation of
/// the live validation path does not affect recorded findings. Array index
/// segments are decimal strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub code: ErrorCode,
    pub message: String,
    pub path: Vec<String>,
}

impl Finding {
    pub fn new(code: ErrorCode, message: impl Into<String>, path: &[String]) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.to_vec(),
        }
    }

    /// Formats the path in dotted/bracketed form, e.g. `nested.inner[1]`.
    pub fn format_path(path: &[String]) -> String {
        let mut out = String::new();
        for segment in path {
            let is_index = !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit());
            if is_index {
                out.push('[');
                out.push_str(segment);
                out.push(']');
            } else {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(segment);
            }
        }
        out
    }

    fn prefixed_message(&self) -> String {
        if self.path.is_empty() {
            self.message.clone()
        } else {
            format!("\"{}\": {}", Self::format_path(&self.path), self.message)
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.prefixed_message())
    }
}

/// Local failure raised by a leaf validator.
///
/// Leaf validators signal failure without path context; the recursive layer
/// re-records the failure as a `bad_value` finding at the current path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeafError {
    #[error("expected a {expected}, got {actual}.")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("value size too large: measured {measured}, limit {limit}.")]
    SizeTooLarge { measured: usize, limit: usize },
    #[error("value size too small: measured {measured}, minimum {minimum}.")]
    SizeTooSmall { measured: usize, minimum: usize },
    #[error("string too short: require at least {min}, got {len}.")]
    StringTooShort { min: usize, len: usize },
    #[error("string too long: require at most {max}, got {len}.")]
    StringTooLong { max: usize, len: usize },
    #[error("outside the alphanumeric character set.")]
    NotAlphanumeric,
    #[error("invalid Base64 encoded string (length not a multiple of 4).")]
    Base64Length,
    #[error("invalid Base64 encoded string (invalid character set).")]
    Base64Charset,
    #[error("not in the hexadecimal character set.")]
    NotHexadecimal,
    #[error("expected a number >= {min}, got {value}.")]
    BelowMinimum { min: f64, value: f64 },
    #[error("expected a number <= {max}, got {value}.")]
    AboveMaximum { max: f64, value: f64 },
    #[error("expected an integer, got {value}.")]
    NotAnInteger { value: f64 },
    #[error("timestamp {0} appears to be seconds rather than milliseconds.")]
    SecondsTimestamp(i64),
    #[error("not an IP address.")]
    NotAnIpAddress,
    #[error("expected literal {expected}, got {actual}.")]
    LiteralMismatch { expected: String, actual: String },
    #[error("not a valid factor.")]
    InvalidFactor,
}

/// The single failure surfaced by a construct call.
///
/// Carries the code, message, and path of the first error in dispatch order,
/// plus the complete ordered error and warning lists for programmatic
/// inspection or multi-error display.
#[derive(Debug, Clone)]
pub struct ConstructError {
    code: ErrorCode,
    message: String,
    path: Vec<String>,
    all_errors: Vec<Finding>,
    all_warnings: Vec<Finding>,
}

impl ConstructError {
    pub(crate) fn from_findings(errors: Vec<Finding>, warnings: Vec<Finding>) -> Self {
        let first = errors
            .first()
            .cloned()
            .unwrap_or_else(|| Finding::new(ErrorCode::BadValue, "validation failed.", &[]));
        Self {
            code: first.code,
            message: first.prefixed_message(),
            path: first.path,
            all_errors: errors,
            all_warnings: warnings,
        }
    }

    pub(crate) fn fault(finding: Finding) -> Self {
        Self::from_findings(vec![finding], Vec::new())
    }

    /// Code of the first error encountered in dispatch order.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message, including the dotted/bracketed path.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Path of the first error.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Every error found in one pass, in dispatch order.
    pub fn all_errors(&self) -> &[Finding] {
        &self.all_errors
    }

    /// Every warning found in one pass, in dispatch order.
    pub fn all_warnings(&self) -> &[Finding] {
        &self.all_warnings
    }
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if self.all_errors.len() > 1 {
            write!(f, " ({} errors total)", self.all_errors.len())?;
        }
        Ok(())
    }
}

impl std::error::Error for ConstructError {}

/// Errors raised while loading type definitions into a registry.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid type definition in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid type definition in {path}: {reason}")]
    BadDefinition { path: PathBuf, reason: String },
}
