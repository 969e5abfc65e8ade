//! Keogram extraction: one fixed-coordinate slice per frame, stacked in
//! time order.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use radar_grid::{naming, CutAxis, Keogram, KeogramCut};

use crate::error::{LoadError, Result};
use crate::raster::FrameSource;

/// Builds labelled keograms from an ordered file list.
pub trait KeogramSource {
    fn extract(
        &self,
        files: &[PathBuf],
        cut: &KeogramCut,
        world_file: Option<&Path>,
    ) -> Result<Keogram>;
}

/// Default extractor: loads each frame at native resolution, takes the
/// row (or column) nearest the requested coordinate, and stacks the
/// slices in file order. Timestamps come from the source-stem convention.
pub struct SliceKeogramExtractor<S> {
    frames: S,
}

impl<S: FrameSource> SliceKeogramExtractor<S> {
    pub fn new(frames: S) -> Self {
        Self { frames }
    }
}

impl<S: FrameSource> KeogramSource for SliceKeogramExtractor<S> {
    fn extract(
        &self,
        files: &[PathBuf],
        cut: &KeogramCut,
        world_file: Option<&Path>,
    ) -> Result<Keogram> {
        if files.is_empty() {
            return Err(LoadError::EmptyFileList);
        }

        let mut times: Vec<DateTime<Utc>> = Vec::with_capacity(files.len());
        let mut columns: Vec<Vec<f32>> = Vec::with_capacity(files.len());
        let mut spatial: Option<Vec<f64>> = None;

        for path in files {
            let frame = self.frames.load(path, world_file, 1)?;

            let slice: Vec<f32> = match cut.axis {
                CutAxis::Lat => frame.row(frame.nearest_row(cut.value)).to_vec(),
                CutAxis::Lon => {
                    let col = frame.nearest_col(cut.value);
                    (0..frame.nrows()).map(|r| frame.value(r, col)).collect()
                }
            };

            match &spatial {
                None => {
                    spatial = Some(match cut.axis {
                        CutAxis::Lat => frame.lon().to_vec(),
                        CutAxis::Lon => frame.lat().to_vec(),
                    });
                }
                Some(existing) if existing.len() != slice.len() => {
                    return Err(LoadError::ShapeMismatch {
                        path: path.clone(),
                        expected: existing.len(),
                        actual: slice.len(),
                    });
                }
                Some(_) => {}
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            times.push(naming::parse_stem_timestamp(stem)?);
            columns.push(slice);
        }

        let spatial = spatial.expect("files is non-empty");
        let nrows = spatial.len();
        let ncols = columns.len();

        // transpose the per-file slices into row-major (spatial, time)
        let mut data = vec![0.0f32; nrows * ncols];
        for (c, column) in columns.iter().enumerate() {
            for (r, &v) in column.iter().enumerate() {
                data[r * ncols + c] = v;
            }
        }

        tracing::debug!(
            files = ncols,
            samples = nrows,
            axis = %cut.axis,
            value = cut.value,
            "extracted keogram"
        );

        Keogram::new(data, times, spatial, *cut).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_grid::Frame;
    use test_utils::{lat_axis, lon_axis};

    /// Synthetic source: every frame's value is `row * 100 + col`, so
    /// slices are easy to predict.
    struct IndexedSource;

    impl FrameSource for IndexedSource {
        fn load(&self, path: &Path, _wld: Option<&Path>, _ds: usize) -> Result<Frame> {
            let (w, h) = (4, 3);
            let data = (0..h)
                .flat_map(|r| (0..w).map(move |c| (r * 100 + c) as f32))
                .collect();
            Frame::new(data, lon_axis(w), lat_axis(h), path.to_path_buf()).map_err(Into::into)
        }
    }

    fn files() -> Vec<PathBuf> {
        vec![
            PathBuf::from("map2018-0101T090000.png"),
            PathBuf::from("map2018-0101T090500.png"),
            PathBuf::from("map2018-0101T091000.png"),
        ]
    }

    #[test]
    fn test_lat_cut_stacks_rows() {
        let extractor = SliceKeogramExtractor::new(IndexedSource);
        // lat_axis(3) is [55, 40, 25]; 40 is row 1
        let cut = KeogramCut::new(CutAxis::Lat, 40.0);
        let keo = extractor.extract(&files(), &cut, None).unwrap();

        assert_eq!(keo.ncols(), 3);
        assert_eq!(keo.nrows(), 4);
        // row 1 of every frame is [100, 101, 102, 103]
        assert_eq!(keo.data()[0], 100.0); // spatial 0, time 0
        assert_eq!(keo.data()[1], 100.0); // spatial 0, time 1
        assert_eq!(keo.data()[3 * 3 + 2], 103.0); // spatial 3, time 2
    }

    #[test]
    fn test_lon_cut_stacks_columns() {
        let extractor = SliceKeogramExtractor::new(IndexedSource);
        // lon_axis(4) starts at -125; its first entry is column 0
        let cut = KeogramCut::new(CutAxis::Lon, -125.0);
        let keo = extractor.extract(&files(), &cut, None).unwrap();

        assert_eq!(keo.nrows(), 3);
        // column 0 of every frame is [0, 100, 200]; one keogram row per
        // latitude, three time steps each
        assert_eq!(keo.data()[0], 0.0);
        assert_eq!(keo.data()[3], 100.0);
        assert_eq!(keo.data()[6], 200.0);
    }

    #[test]
    fn test_times_follow_file_order() {
        let extractor = SliceKeogramExtractor::new(IndexedSource);
        let cut = KeogramCut::new(CutAxis::Lat, 40.0);
        let keo = extractor.extract(&files(), &cut, None).unwrap();

        let (t0, t1) = keo.time_span();
        assert_eq!((t1 - t0).num_minutes(), 10);
    }

    #[test]
    fn test_empty_file_list() {
        let extractor = SliceKeogramExtractor::new(IndexedSource);
        let cut = KeogramCut::new(CutAxis::Lat, 40.0);
        assert!(matches!(
            extractor.extract(&[], &cut, None),
            Err(LoadError::EmptyFileList)
        ));
    }

    #[test]
    fn test_bad_stem_rejected() {
        let extractor = SliceKeogramExtractor::new(IndexedSource);
        let cut = KeogramCut::new(CutAxis::Lat, 40.0);
        let bad = vec![PathBuf::from("nostamp.png")];
        assert!(extractor.extract(&bad, &cut, None).is_err());
    }
}
