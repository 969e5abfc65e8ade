//! Frame loading seam and the default raster-backed implementation.

use std::path::Path;

use radar_grid::{downsample, downsample_axis, BoundingBox, DownsampleMethod, Frame};

use crate::error::{LoadError, Result};
use crate::worldfile::WorldFile;

/// Display range the decoded luminance is mapped onto.
pub const DBZ_MIN: f32 = -30.0;
pub const DBZ_MAX: f32 = 75.0;

/// Produces labelled frames from source files.
///
/// The batch driver only sees this trait; the default implementation
/// below reads pre-rendered radar mosaics, and richer decoders can slot
/// in behind it.
pub trait FrameSource {
    fn load(&self, path: &Path, world_file: Option<&Path>, downsample: usize) -> Result<Frame>;
}

/// Loads frames from raster mosaics via the `image` crate.
///
/// Luminance is scaled linearly onto the dBZ display range. Geographic
/// axes come from the world file when one is given; otherwise the raster
/// is assumed to span the configured view window.
#[derive(Debug, Clone)]
pub struct RasterFrameLoader {
    view: BoundingBox,
    method: DownsampleMethod,
}

impl RasterFrameLoader {
    pub fn new(view: BoundingBox) -> Self {
        Self {
            view,
            // Max keeps storm cores visible through decimation
            method: DownsampleMethod::Max,
        }
    }
}

impl FrameSource for RasterFrameLoader {
    fn load(&self, path: &Path, world_file: Option<&Path>, factor: usize) -> Result<Frame> {
        let img = image::open(path)
            .map_err(|source| LoadError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_luma8();

        let (w, h) = img.dimensions();
        let (w, h) = (w as usize, h as usize);

        let data: Vec<f32> = img
            .as_raw()
            .iter()
            .map(|&luma| DBZ_MIN + luma as f32 / 255.0 * (DBZ_MAX - DBZ_MIN))
            .collect();

        let (lon, lat) = match world_file {
            Some(wld) => {
                let wf = WorldFile::load(wld)?;
                (wf.lon_axis(w), wf.lat_rows(h))
            }
            None => view_axes(&self.view, w, h),
        };

        let (data, nw, nh) = downsample(&data, w, h, factor, self.method);
        let lon = downsample_axis(&lon, factor);
        let lat = downsample_axis(&lat, factor);

        tracing::debug!(
            path = %path.display(),
            nx = nw,
            ny = nh,
            factor,
            "loaded radar frame"
        );

        Frame::new(data, lon, lat, path.to_path_buf()).map_err(Into::into)
    }
}

/// Pixel-centre axes spanning a view window, north-up.
fn view_axes(view: &BoundingBox, w: usize, h: usize) -> (Vec<f64>, Vec<f64>) {
    let lon_step = view.width() / w as f64;
    let lat_step = view.height() / h as f64;

    let lon = (0..w)
        .map(|i| view.min_lon + (i as f64 + 0.5) * lon_step)
        .collect();
    let lat = (0..h)
        .map(|r| view.max_lat - (r as f64 + 0.5) * lat_step)
        .collect();

    (lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use test_utils::temp_test_dir;

    fn conus() -> BoundingBox {
        BoundingBox::new(-125.0, 25.0, -65.0, 55.0)
    }

    fn write_gray(dir: &Path, name: &str, w: u32, h: u32) -> std::path::PathBuf {
        let img = GrayImage::from_fn(w, h, |x, _| Luma([(x * 16) as u8]));
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_without_world_file_spans_view() {
        let dir = temp_test_dir();
        let path = write_gray(dir.path(), "map2018-0101T090000.png", 8, 4);

        let loader = RasterFrameLoader::new(conus());
        let frame = loader.load(&path, None, 1).unwrap();

        assert_eq!(frame.ncols(), 8);
        assert_eq!(frame.nrows(), 4);

        let extent = frame.extent();
        assert!(extent.min_lon > -125.0 && extent.max_lon < -65.0);
        assert!(extent.min_lat > 25.0 && extent.max_lat < 55.0);
    }

    #[test]
    fn test_luminance_maps_to_dbz_range() {
        let dir = temp_test_dir();
        let path = dir.path().join("map2018-0101T090000.png");
        let mut img = GrayImage::from_pixel(2, 1, Luma([0]));
        img.put_pixel(1, 0, Luma([255]));
        img.save(&path).unwrap();

        let loader = RasterFrameLoader::new(conus());
        let frame = loader.load(&path, None, 1).unwrap();

        assert!((frame.value(0, 0) - DBZ_MIN).abs() < 0.001);
        assert!((frame.value(0, 1) - DBZ_MAX).abs() < 0.001);
    }

    #[test]
    fn test_load_with_world_file_axes() {
        let dir = temp_test_dir();
        let path = write_gray(dir.path(), "map2018-0101T090000.png", 4, 4);
        let wld = dir.path().join("map.wld");
        std::fs::write(&wld, "0.5\n0\n0\n-0.5\n-100.0\n45.0\n").unwrap();

        let loader = RasterFrameLoader::new(conus());
        let frame = loader.load(&path, Some(&wld), 1).unwrap();

        assert_eq!(frame.lon(), &[-100.0, -99.5, -99.0, -98.5]);
        assert_eq!(frame.lat(), &[45.0, 44.5, 44.0, 43.5]);
    }

    #[test]
    fn test_downsample_factor_shrinks_frame() {
        let dir = temp_test_dir();
        let path = write_gray(dir.path(), "map2018-0101T090000.png", 16, 8);

        let loader = RasterFrameLoader::new(conus());
        let frame = loader.load(&path, None, 4).unwrap();

        assert_eq!(frame.ncols(), 4);
        assert_eq!(frame.nrows(), 2);
    }

    #[test]
    fn test_missing_raster_is_decode_error() {
        let loader = RasterFrameLoader::new(conus());
        let err = loader.load(Path::new("/no/such.png"), None, 1).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
    }
}
