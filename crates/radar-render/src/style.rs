//! Color-stop styles for reflectivity rendering.

use serde::{Deserialize, Serialize};

use radar_grid::{QuickplotError, QuickplotResult};

/// Color stop for a gradient: a data value and its hex color.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColorStop {
    pub value: f32,
    pub color: String,
    pub label: Option<String>,
}

/// A value-to-color mapping loaded from JSON or built in.
///
/// Stops are kept sorted by value. Values below the first stop are drawn
/// transparent (below-threshold returns are not painted); values above the
/// last stop take its color.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReflectivityStyle {
    pub name: String,
    pub units: Option<String>,
    pub stops: Vec<ColorStop>,
}

impl ReflectivityStyle {
    /// Load a style from a JSON string.
    pub fn from_json(json_str: &str) -> QuickplotResult<Self> {
        let mut style: ReflectivityStyle = serde_json::from_str(json_str)
            .map_err(|e| QuickplotError::Style(format!("invalid style JSON: {e}")))?;
        if style.stops.is_empty() {
            return Err(QuickplotError::Style(format!(
                "style '{}' has no color stops",
                style.name
            )));
        }
        style
            .stops
            .sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));
        Ok(style)
    }

    /// Load a style from a JSON file.
    pub fn from_file(path: &std::path::Path) -> QuickplotResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The standard base-reflectivity color curve in dBZ.
    pub fn reflectivity() -> Self {
        let stops = [
            (5.0, "#04e9e7"),
            (10.0, "#019ff4"),
            (15.0, "#0300f4"),
            (20.0, "#02fd02"),
            (25.0, "#01c501"),
            (30.0, "#008e00"),
            (35.0, "#fdf802"),
            (40.0, "#e5bc00"),
            (45.0, "#fd9500"),
            (50.0, "#fd0000"),
            (55.0, "#d40000"),
            (60.0, "#bc0000"),
            (65.0, "#f800fd"),
            (70.0, "#9854c6"),
            (75.0, "#fdfdfd"),
        ];

        Self {
            name: "reflectivity".to_string(),
            units: Some("dBZ".to_string()),
            stops: stops
                .iter()
                .map(|&(value, color)| ColorStop {
                    value,
                    color: color.to_string(),
                    label: None,
                })
                .collect(),
        }
    }

    /// Value range covered by the stops (first, last).
    pub fn domain(&self) -> (f32, f32) {
        (
            self.stops.first().map(|s| s.value).unwrap_or(0.0),
            self.stops.last().map(|s| s.value).unwrap_or(0.0),
        )
    }
}

/// Parse a hex color string to RGB.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}
