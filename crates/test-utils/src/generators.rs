//! Generators for synthetic radar-like test data.
//!
//! The generators create predictable patterns so tests can verify array
//! handling without real radar mosaics.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use radar_grid::{CutAxis, Frame, Keogram, KeogramCut};

/// Creates a test grid with predictable values: `col * 1000 + row`.
///
/// Row-major, so `grid[row * width + col] == col * 1000 + row`.
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a reflectivity-like grid in dBZ with a storm-cell bump in the
/// middle over a quiet background.
pub fn create_reflectivity_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let sigma = (width.min(height) as f32 / 4.0).max(1.0);

    for row in 0..height {
        for col in 0..width {
            let dx = col as f32 - cx;
            let dy = row as f32 - cy;
            let dist2 = dx * dx + dy * dy;
            // background ~5 dBZ, core up to ~60 dBZ
            let dbz = 5.0 + 55.0 * (-dist2 / (2.0 * sigma * sigma)).exp();
            data.push(dbz);
        }
    }
    data
}

/// Ascending longitude axis spanning the default CONUS view.
pub fn lon_axis(n: usize) -> Vec<f64> {
    let step = 60.0 / (n.max(2) - 1) as f64;
    (0..n).map(|i| -125.0 + i as f64 * step).collect()
}

/// North-first latitude axis spanning the default CONUS view.
pub fn lat_axis(n: usize) -> Vec<f64> {
    let step = 30.0 / (n.max(2) - 1) as f64;
    (0..n).map(|i| 55.0 - i as f64 * step).collect()
}

/// Builds a valid frame around [`create_reflectivity_grid`].
pub fn test_frame(width: usize, height: usize, source: &str) -> Frame {
    Frame::new(
        create_reflectivity_grid(width, height),
        lon_axis(width),
        lat_axis(height),
        PathBuf::from(source),
    )
    .expect("generator axes are valid")
}

/// Evenly spaced timestamps starting at 2018-01-01T09:00:00Z.
pub fn test_times(n: usize, step_minutes: u32) -> Vec<DateTime<Utc>> {
    let start = Utc.with_ymd_and_hms(2018, 1, 1, 9, 0, 0).unwrap();
    (0..n)
        .map(|i| start + chrono::Duration::minutes((i as u32 * step_minutes) as i64))
        .collect()
}

/// Builds a valid latitude-cut keogram with `rows` longitude samples and
/// `cols` time steps.
pub fn test_keogram(rows: usize, cols: usize, cut_lat: f64) -> Keogram {
    Keogram::new(
        create_reflectivity_grid(cols, rows),
        test_times(cols, 5),
        lon_axis(rows),
        KeogramCut::new(CutAxis::Lat, cut_lat),
    )
    .expect("generator axes are valid")
}

/// Creates empty files with the given names inside `dir`.
pub fn touch_files(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            std::fs::write(&path, b"").expect("failed to create test file");
            path
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_grid_layout() {
        let grid = create_test_grid(10, 5);
        assert_eq!(grid.len(), 50);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[1], 1000.0);
        assert_eq!(grid[10], 1.0);
    }

    #[test]
    fn test_reflectivity_grid_peaks_in_center() {
        let grid = create_reflectivity_grid(9, 9);
        let center = grid[4 * 9 + 4];
        let corner = grid[0];
        assert!(center > corner);
        assert!(center <= 60.0);
        assert!(corner >= 5.0);
    }

    #[test]
    fn test_frame_generator_is_valid() {
        let frame = test_frame(8, 4, "map2018-0101T090000.png");
        assert_eq!(frame.ncols(), 8);
        assert_eq!(frame.nrows(), 4);
        assert_eq!(frame.stem(), "map2018-0101T090000");
    }

    #[test]
    fn test_keogram_generator_is_valid() {
        let keo = test_keogram(6, 3, 40.0);
        assert_eq!(keo.nrows(), 6);
        assert_eq!(keo.ncols(), 3);
        assert_eq!(keo.cut().value, 40.0);
    }
}
