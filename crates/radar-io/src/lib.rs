//! Data-access seams for radar-quickplot.
//!
//! The renderers consume labelled arrays; this crate supplies the traits
//! that produce them ([`FrameSource`], [`KeogramSource`]) plus default
//! raster-backed implementations. Anything that can decode a radar
//! product into a [`radar_grid::Frame`] can stand in behind the traits.

pub mod error;
pub mod extract;
pub mod raster;
pub mod worldfile;

pub use error::{LoadError, Result};
pub use extract::{KeogramSource, SliceKeogramExtractor};
pub use raster::{FrameSource, RasterFrameLoader};
pub use worldfile::WorldFile;
