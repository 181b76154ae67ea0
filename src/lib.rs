//! framelite - an in-memory labeled tabular data store
//!
//! A single-threaded, eager, column-oriented table abstraction with
//! positional and label-based indexing, boolean masking, grouping and
//! aggregation, and null-aware cleaning passes. File codecs and console
//! rendering live at the boundary and only serialize the core model.

pub mod codec;
pub mod demo;
pub mod error;
pub mod model;
pub mod ops;
pub mod render;

pub use error::{FrameError, Result};
pub use model::{CellType, CellValue, Column, DataFrame, Mask};
