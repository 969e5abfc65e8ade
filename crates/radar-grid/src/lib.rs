//! Core types and conventions shared across the radar-quickplot workspace.

pub mod bbox;
pub mod downsample;
pub mod error;
pub mod frame;
pub mod keogram;
pub mod naming;

pub use bbox::BoundingBox;
pub use downsample::{downsample, downsample_axis, DownsampleMethod};
pub use error::{QuickplotError, QuickplotResult};
pub use frame::Frame;
pub use keogram::{CutAxis, Keogram, KeogramCut};
