//! Figure composition and PNG output for radar frames and keograms.
//!
//! Rendering styles:
//! - Map overlay: a frame drawn in geographic coordinates over a
//!   fixed-extent gridded canvas
//! - Keogram: a time-vs-position strip with a formatted time axis
//! - Scale-legend inset overlay

pub mod config;
pub mod display;
pub mod figure;
pub mod gradient;
pub mod keogram;
pub mod legend;
pub mod map;
pub mod png;
pub mod style;
pub mod text;

pub use config::PlotConfig;
pub use keogram::render_keogram;
pub use legend::load_scale_legend;
pub use map::{render_map, RenderOutcome};
pub use style::{ColorStop, ReflectivityStyle};
