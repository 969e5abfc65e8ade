//! ESRI world-file georeferencing.
//!
//! A world file carries six line-separated numbers: x pixel size, two
//! rotation terms, y pixel size (negative for a north-up raster), and the
//! map coordinates of the upper-left pixel centre.

use std::path::Path;

use crate::error::{LoadError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldFile {
    /// Longitude step per pixel column (positive east).
    pub x_step: f64,
    /// Latitude step per pixel row (negative for north-up rasters).
    pub y_step: f64,
    /// Longitude of the upper-left pixel centre.
    pub x_origin: f64,
    /// Latitude of the upper-left pixel centre.
    pub y_origin: f64,
}

impl WorldFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&text).map_err(|reason| LoadError::WorldFile {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse world-file text. Line order: A, D, B, E, C, F.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let values: Vec<f64> = text
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|_| format!("'{tok}' is not a number"))
            })
            .collect::<std::result::Result<_, _>>()?;

        if values.len() != 6 {
            return Err(format!("expected 6 parameters, found {}", values.len()));
        }

        let [x_step, rot_d, rot_b, y_step, x_origin, y_origin] =
            [values[0], values[1], values[2], values[3], values[4], values[5]];

        if rot_d != 0.0 || rot_b != 0.0 {
            return Err("rotated rasters are not supported".to_string());
        }
        if x_step <= 0.0 {
            return Err("x pixel size must be positive".to_string());
        }
        if y_step >= 0.0 {
            return Err("y pixel size must be negative for a north-up raster".to_string());
        }

        Ok(Self {
            x_step,
            y_step,
            x_origin,
            y_origin,
        })
    }

    /// Ascending longitude axis for `ncols` pixel columns.
    pub fn lon_axis(&self, ncols: usize) -> Vec<f64> {
        (0..ncols)
            .map(|i| self.x_origin + i as f64 * self.x_step)
            .collect()
    }

    /// North-first latitude axis for `nrows` pixel rows.
    pub fn lat_rows(&self, nrows: usize) -> Vec<f64> {
        (0..nrows)
            .map(|r| self.y_origin + r as f64 * self.y_step)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0.5\n0.0\n0.0\n-0.5\n-125.0\n55.0\n";

    #[test]
    fn test_parse() {
        let wf = WorldFile::parse(SAMPLE).unwrap();
        assert_eq!(wf.x_step, 0.5);
        assert_eq!(wf.y_step, -0.5);
        assert_eq!(wf.x_origin, -125.0);
        assert_eq!(wf.y_origin, 55.0);
    }

    #[test]
    fn test_axes() {
        let wf = WorldFile::parse(SAMPLE).unwrap();
        assert_eq!(wf.lon_axis(3), vec![-125.0, -124.5, -124.0]);
        assert_eq!(wf.lat_rows(3), vec![55.0, 54.5, 54.0]);
    }

    #[test]
    fn test_rejects_rotation() {
        let err = WorldFile::parse("0.5\n0.1\n0.0\n-0.5\n-125.0\n55.0\n").unwrap_err();
        assert!(err.contains("rotated"));
    }

    #[test]
    fn test_rejects_wrong_count() {
        assert!(WorldFile::parse("1.0 2.0 3.0").is_err());
    }

    #[test]
    fn test_rejects_positive_y_step() {
        assert!(WorldFile::parse("0.5\n0\n0\n0.5\n-125.0\n55.0\n").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(WorldFile::parse("a b c d e f").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = WorldFile::load(Path::new("/no/such/file.wld")).unwrap_err();
        assert!(matches!(err, LoadError::FileRead { .. }));
    }
}
