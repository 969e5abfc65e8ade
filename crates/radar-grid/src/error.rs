//! Error types for radar-quickplot rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using QuickplotError.
pub type QuickplotResult<T> = Result<T, QuickplotError>;

/// Primary error type for rendering operations.
#[derive(Debug, Error)]
pub enum QuickplotError {
    // === Input resolution ===
    #[error("no input files found in {} matching pattern '{pattern}'", dir.display())]
    NoInput { dir: PathBuf, pattern: String },

    // === Labelled-array invariants ===
    #[error("axis '{axis}' is not strictly monotonic")]
    NonMonotonicAxis { axis: &'static str },

    #[error("data length {data_len} does not match {rows} rows x {cols} cols")]
    AxisMismatch {
        data_len: usize,
        rows: usize,
        cols: usize,
    },

    #[error("labelled array has an empty axis")]
    EmptyAxis,

    #[error("file name '{0}' does not carry a parseable timestamp")]
    BadStemTimestamp(String),

    // === Rendering ===
    #[error("style error: {0}")]
    Style(String),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("no display backend available: {0}")]
    DisplayUnavailable(String),

    // === Infrastructure ===
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
