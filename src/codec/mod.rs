//! Record-oriented file codecs at the edge of the core.
//!
//! A codec turns a file of homogeneous records into a [`DataFrame`] and
//! back; the on-disk byte format is entirely its business. The core only
//! requires that column order and row order survive a round trip.

mod csv;
mod json;

use std::path::Path;

use anyhow::{bail, Result};

use crate::model::DataFrame;

pub use self::csv::CsvCodec;
pub use self::json::JsonCodec;

/// Reads and writes one record-oriented file format
pub trait RecordCodec {
    /// Read a file into a frame
    fn read(&self, path: &Path) -> Result<DataFrame>;

    /// Write a frame out in this codec's format
    fn write(&self, frame: &DataFrame, path: &Path) -> Result<()>;

    /// Check if this codec handles the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Dispatches to the right codec based on file extension
pub struct CodecRegistry {
    codecs: Vec<Box<dyn RecordCodec>>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self {
            codecs: vec![Box::new(CsvCodec), Box::new(JsonCodec)],
        }
    }

    /// Get the codec for the given file path
    pub fn codec_for(&self, path: &Path) -> Result<&dyn RecordCodec> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        for codec in &self.codecs {
            if codec.supports_extension(&ext) {
                return Ok(codec.as_ref());
            }
        }

        bail!(
            "Unsupported file format: {}",
            if ext.is_empty() { "unknown" } else { ext.as_str() }
        )
    }

    /// Read a file using the appropriate codec
    pub fn read(&self, path: &Path) -> Result<DataFrame> {
        self.codec_for(path)?.read(path)
    }

    /// Write a frame using the appropriate codec
    pub fn write(&self, frame: &DataFrame, path: &Path) -> Result<()> {
        self.codec_for(path)?.write(frame, path)
    }
}
