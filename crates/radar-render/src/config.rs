//! Plot configuration.

use radar_grid::BoundingBox;
use serde::{Deserialize, Serialize};

/// Rendering options shared by every figure in a batch.
///
/// Built once at process start and passed by reference into each render
/// call; nothing mutates it between frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Projection name; also the output-filename prefix in map mode.
    pub projection: String,
    /// Map figure size in inches (width, height).
    pub figsize: [f64; 2],
    /// Keogram figure size in inches (width, height).
    pub keogram_figsize: [f64; 2],
    /// South/north latitude limits of the map view.
    pub lat_limits: [f64; 2],
    /// West/east longitude limits of the map view.
    pub lon_limits: [f64; 2],
    /// Latitudes at which parallels are drawn and labelled.
    pub parallels: Vec<f64>,
    /// Longitudes at which meridians are drawn and labelled.
    pub meridians: Vec<f64>,
    /// Gridline thickness in pixels.
    pub grid_linewidth: u32,
    /// Gridline color (RGB).
    pub grid_color: [u8; 3],
    /// Output raster density in pixels per inch.
    pub dpi: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            projection: "lambert".to_string(),
            figsize: [12.0, 8.0],
            keogram_figsize: [15.0, 10.0],
            lat_limits: [25.0, 55.0],
            lon_limits: [-125.0, -65.0],
            parallels: (20..70).step_by(10).map(f64::from).collect(),
            meridians: (-140..-20).step_by(20).map(f64::from).collect(),
            grid_linewidth: 2,
            grid_color: [0, 0, 0],
            dpi: 100,
        }
    }
}

impl PlotConfig {
    /// The fixed geographic view window of map figures.
    pub fn view(&self) -> BoundingBox {
        BoundingBox::new(
            self.lon_limits[0],
            self.lat_limits[0],
            self.lon_limits[1],
            self.lat_limits[1],
        )
    }

    /// Map canvas size in pixels at the configured density.
    pub fn map_canvas(&self) -> (u32, u32) {
        (
            (self.figsize[0] * self.dpi as f64).round() as u32,
            (self.figsize[1] * self.dpi as f64).round() as u32,
        )
    }

    /// Keogram canvas size in pixels at the configured density.
    pub fn keogram_canvas(&self) -> (u32, u32) {
        (
            (self.keogram_figsize[0] * self.dpi as f64).round() as u32,
            (self.keogram_figsize[1] * self.dpi as f64).round() as u32,
        )
    }
}
