//! Labelled keograms: one spatial slice stacked over time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::frame::{strictly_decreasing, strictly_increasing};
use crate::{QuickplotError, QuickplotResult};

/// Which coordinate a keogram holds fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutAxis {
    Lat,
    Lon,
}

impl CutAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            CutAxis::Lat => "lat",
            CutAxis::Lon => "lon",
        }
    }

    /// Name of the axis that varies along the keogram rows.
    pub fn spatial_label(&self) -> &'static str {
        match self {
            CutAxis::Lat => "Longitude [deg.]",
            CutAxis::Lon => "Latitude [deg.]",
        }
    }
}

impl fmt::Display for CutAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CutAxis {
    type Err = QuickplotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lat" => Ok(CutAxis::Lat),
            "lon" => Ok(CutAxis::Lon),
            other => Err(QuickplotError::Render(format!(
                "unknown keogram axis '{other}', expected 'lat' or 'lon'"
            ))),
        }
    }
}

/// A fixed-coordinate request handed to the keogram extractor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeogramCut {
    pub axis: CutAxis,
    pub value: f64,
}

impl KeogramCut {
    pub fn new(axis: CutAxis, value: f64) -> Self {
        Self { axis, value }
    }
}

/// A 2-D array of reflectivity with a time axis (columns) and one spatial
/// axis (rows), produced by slicing a frame sequence at a fixed coordinate.
///
/// Rows follow the source frame's storage order: ascending longitude for a
/// latitude cut, north-first latitude for a longitude cut.
#[derive(Debug, Clone)]
pub struct Keogram {
    data: Vec<f32>,
    times: Vec<DateTime<Utc>>,
    spatial: Vec<f64>,
    cut: KeogramCut,
}

impl Keogram {
    /// Build a keogram, validating axis invariants. `data` is row-major
    /// with one row per spatial sample and one column per time step.
    pub fn new(
        data: Vec<f32>,
        times: Vec<DateTime<Utc>>,
        spatial: Vec<f64>,
        cut: KeogramCut,
    ) -> QuickplotResult<Self> {
        if times.is_empty() || spatial.is_empty() {
            return Err(QuickplotError::EmptyAxis);
        }
        if !times.windows(2).all(|w| w[0] < w[1]) {
            return Err(QuickplotError::NonMonotonicAxis { axis: "time" });
        }
        if !strictly_increasing(&spatial) && !strictly_decreasing(&spatial) {
            return Err(QuickplotError::NonMonotonicAxis { axis: "spatial" });
        }
        if data.len() != times.len() * spatial.len() {
            return Err(QuickplotError::AxisMismatch {
                data_len: data.len(),
                rows: spatial.len(),
                cols: times.len(),
            });
        }

        Ok(Self {
            data,
            times,
            spatial,
            cut,
        })
    }

    pub fn ncols(&self) -> usize {
        self.times.len()
    }

    pub fn nrows(&self) -> usize {
        self.spatial.len()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn spatial(&self) -> &[f64] {
        &self.spatial
    }

    pub fn cut(&self) -> &KeogramCut {
        &self.cut
    }

    /// First and last timestamps of the stack.
    pub fn time_span(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        // times are non-empty by construction
        (self.times[0], *self.times.last().expect("non-empty times"))
    }
}
