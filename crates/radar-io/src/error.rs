//! Error types for frame and keogram loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing labelled arrays.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode raster {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid world file {}: {reason}", path.display())]
    WorldFile { path: PathBuf, reason: String },

    #[error("frame {} has {actual} samples along the cut, expected {expected}", path.display())]
    ShapeMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("keogram extraction requires at least one source file")]
    EmptyFileList,

    #[error(transparent)]
    Grid(#[from] radar_grid::QuickplotError),
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;
