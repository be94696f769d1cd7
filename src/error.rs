//! Error types for slidemerge.
//!
//! Two classes of failure exist. [`Error`] is fatal: the document or the
//! merge configuration is unusable and nothing is attempted. [`ElementError`]
//! is scoped to a single shape, cell, or placement attempt; the merge counts
//! it and moves on.

use std::io;
use thiserror::Error;

/// Result type alias for slidemerge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors surfaced to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document or job file is not valid JSON for the model.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document structure is invalid as a whole.
    #[error("Corrupted document: {0}")]
    Corrupted(String),

    /// The merge configuration is unusable.
    #[error("Invalid merge options: {0}")]
    InvalidOptions(String),

    /// An image payload could not be read.
    #[error("Image load error: {0}")]
    ImageLoad(String),
}

/// Recoverable failures scoped to one element of the document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    /// The shape carries a lock that forbids the requested change.
    #[error("shape {shape_id} is locked against {action}")]
    ShapeLocked {
        /// Shape identifier
        shape_id: u32,
        /// The forbidden action ("text edit", "delete")
        action: &'static str,
    },

    /// A cell write addressed a position outside the row.
    #[error("cell ({row}, {column}) is outside a {rows}x{columns} table")]
    CellOutOfRange {
        /// Row index
        row: usize,
        /// Column index
        column: usize,
        /// Rows in the table
        rows: usize,
        /// Cells in the addressed row
        columns: usize,
    },

    /// The cell is covered by another cell's span and has no content of its own.
    #[error("cell ({row}, {column}) is covered by a merged cell")]
    SpannedCell {
        /// Row index
        row: usize,
        /// Column index
        column: usize,
    },

    /// The requested placement box was rejected.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Automatic sizing needs the image's natural size, which is unknown.
    #[error("image has no known natural size")]
    UnknownImageSize,
}
