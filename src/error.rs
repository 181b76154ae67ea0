//! Error types for frame operations

use crate::model::CellType;

/// Errors raised by frame and column operations.
///
/// Per-cell parse failures are not represented here: a value that fails
/// temporal or numeric parsing becomes [`CellValue::Null`](crate::model::CellValue)
/// so cleaning passes can act on it uniformly.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Referenced a column name that does not exist
    #[error("column not found: {name:?}")]
    ColumnNotFound { name: String },

    /// Referenced a row label that does not exist in the row index
    #[error("row label not found: {label}")]
    LabelNotFound { label: String },

    /// Positional index outside [-rows, rows-1]
    #[error("position {index} out of bounds for {rows} row(s)")]
    PositionOutOfBounds { index: i64, rows: usize },

    /// A value sequence's length disagrees with the table's row count
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Numeric operation on a non-numeric column, or comparison of
    /// incompatible value kinds
    #[error("type mismatch: cannot {operation} on {kind} column {name:?}")]
    TypeMismatch {
        operation: &'static str,
        kind: CellType,
        name: String,
    },

    /// Two columns would end up with the same name
    #[error("duplicate column name: {name:?}")]
    DuplicateColumn { name: String },
}

pub type Result<T> = std::result::Result<T, FrameError>;
