//! Output document writers.

pub mod tcx;

use std::path::PathBuf;
use thiserror::Error;

pub use tcx::{create_output, generate_tcx_filename, TcxWriter};

/// Errors that can occur while writing the output document
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to serialize XML
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// Output file would be overwritten
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
