//! Plot-configuration loading.
//!
//! Defaults live in [`PlotConfig::default`]; a YAML file can override any
//! subset of fields.

use std::path::Path;

use anyhow::{Context, Result};
use radar_render::PlotConfig;
use serde::Deserialize;

/// Optional YAML overrides; anything omitted keeps its default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotConfigFile {
    pub projection: Option<String>,
    pub figsize: Option<[f64; 2]>,
    pub keogram_figsize: Option<[f64; 2]>,
    pub lat_limits: Option<[f64; 2]>,
    pub lon_limits: Option<[f64; 2]>,
    pub parallels: Option<Vec<f64>>,
    pub meridians: Option<Vec<f64>>,
    pub grid_linewidth: Option<u32>,
    pub grid_color: Option<[u8; 3]>,
    pub dpi: Option<u32>,
}

impl PlotConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Overlay these overrides onto a base configuration.
    pub fn apply(self, mut cfg: PlotConfig) -> PlotConfig {
        if let Some(v) = self.projection {
            cfg.projection = v;
        }
        if let Some(v) = self.figsize {
            cfg.figsize = v;
        }
        if let Some(v) = self.keogram_figsize {
            cfg.keogram_figsize = v;
        }
        if let Some(v) = self.lat_limits {
            cfg.lat_limits = v;
        }
        if let Some(v) = self.lon_limits {
            cfg.lon_limits = v;
        }
        if let Some(v) = self.parallels {
            cfg.parallels = v;
        }
        if let Some(v) = self.meridians {
            cfg.meridians = v;
        }
        if let Some(v) = self.grid_linewidth {
            cfg.grid_linewidth = v;
        }
        if let Some(v) = self.grid_color {
            cfg.grid_color = v;
        }
        if let Some(v) = self.dpi {
            cfg.dpi = v;
        }
        cfg
    }
}

/// The plot configuration for this run: compiled-in defaults, optionally
/// overridden from a YAML file.
pub fn load_plot_config(path: Option<&Path>) -> Result<PlotConfig> {
    let cfg = PlotConfig::default();
    match path {
        Some(path) => Ok(PlotConfigFile::load(path)?.apply(cfg)),
        None => Ok(cfg),
    }
}
