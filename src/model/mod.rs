//! Column-oriented data model: values, columns, masks, and frames

mod column;
mod frame;
mod mask;
mod value;

pub use column::{ArithOp, Column};
pub use frame::{DataFrame, RowIndex};
pub use mask::Mask;
pub use value::{CellType, CellValue};
