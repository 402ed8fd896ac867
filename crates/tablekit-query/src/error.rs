//! Error types for the query crate.
//!
//! The engine operations themselves never fail. Errors only arise when
//! parsing the name of an operator, logic, data type or order mode from a
//! string.

use thiserror::Error;

/// Errors that can occur when parsing engine enumerations from names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Name is not a known filter operator.
    #[error("unknown filter operator: '{0}'")]
    UnknownOperator(String),

    /// Name is not `and` or `or`.
    #[error("unknown filter logic: '{0}'")]
    UnknownLogic(String),

    /// Name is not a known column data type.
    #[error("unknown column data type: '{0}'")]
    UnknownDataType(String),

    /// Name is not a known column order mode.
    #[error("unknown column order mode: '{0}'")]
    UnknownOrderMode(String),
}

/// Result type for query crate operations.
pub type Result<T> = std::result::Result<T, QueryError>;
