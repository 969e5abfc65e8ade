//! Labelled reflectivity frames.

use std::path::{Path, PathBuf};

use crate::{BoundingBox, QuickplotError, QuickplotResult};

/// A single radar reflectivity frame labelled with geographic axes.
///
/// Data is row-major and north-up: row 0 is the northernmost latitude.
/// The longitude axis is strictly ascending and indexes columns; the
/// latitude axis is strictly descending and indexes rows.
#[derive(Debug, Clone)]
pub struct Frame {
    data: Vec<f32>,
    lon: Vec<f64>,
    lat: Vec<f64>,
    source: PathBuf,
}

impl Frame {
    /// Build a frame, validating the axis invariants.
    pub fn new(
        data: Vec<f32>,
        lon: Vec<f64>,
        lat: Vec<f64>,
        source: PathBuf,
    ) -> QuickplotResult<Self> {
        if lon.is_empty() || lat.is_empty() {
            return Err(QuickplotError::EmptyAxis);
        }
        if !strictly_increasing(&lon) {
            return Err(QuickplotError::NonMonotonicAxis { axis: "lon" });
        }
        if !strictly_decreasing(&lat) {
            return Err(QuickplotError::NonMonotonicAxis { axis: "lat" });
        }
        if data.len() != lon.len() * lat.len() {
            return Err(QuickplotError::AxisMismatch {
                data_len: data.len(),
                rows: lat.len(),
                cols: lon.len(),
            });
        }

        Ok(Self {
            data,
            lon,
            lat,
            source,
        })
    }

    pub fn ncols(&self) -> usize {
        self.lon.len()
    }

    pub fn nrows(&self) -> usize {
        self.lat.len()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Value at (row, col); rows count from the north edge.
    pub fn value(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.ncols() + col]
    }

    /// One full row of values at the given row index.
    pub fn row(&self, row: usize) -> &[f32] {
        let w = self.ncols();
        &self.data[row * w..(row + 1) * w]
    }

    /// Index of the row whose latitude is nearest to `lat`.
    pub fn nearest_row(&self, lat: f64) -> usize {
        nearest_index(&self.lat, lat)
    }

    /// Index of the column whose longitude is nearest to `lon`.
    pub fn nearest_col(&self, lon: f64) -> usize {
        nearest_index(&self.lon, lon)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Source file stem, used for titles and derived output names.
    pub fn stem(&self) -> &str {
        self.source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// Geographic extent spanned by the frame's own axes.
    pub fn extent(&self) -> BoundingBox {
        // axes are non-empty by construction
        BoundingBox::from_axes(&self.lon, &self.lat).expect("frame axes are non-empty")
    }
}

pub(crate) fn strictly_increasing(axis: &[f64]) -> bool {
    axis.windows(2).all(|w| w[0] < w[1])
}

pub(crate) fn strictly_decreasing(axis: &[f64]) -> bool {
    axis.windows(2).all(|w| w[0] > w[1])
}

fn nearest_index(axis: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &a) in axis.iter().enumerate() {
        let d = (a - value).abs();
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}
