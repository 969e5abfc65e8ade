//! Scale-legend bitmap loading.

use std::path::Path;

use image::imageops;
use image::RgbaImage;

use radar_grid::{QuickplotError, QuickplotResult};

/// Load the optional color-scale legend bitmap.
///
/// An unset path or a path that is not an existing file yields `None` and
/// the overlay step is skipped; only a file that exists but fails to
/// decode is an error. Legend art is stored bottom-up, so it is given two
/// quarter turns before use.
pub fn load_scale_legend(path: Option<&Path>) -> QuickplotResult<Option<RgbaImage>> {
    let Some(path) = path else {
        return Ok(None);
    };

    if !path.is_file() {
        tracing::debug!(path = %path.display(), "scale legend not found, overlay skipped");
        return Ok(None);
    }

    let img = image::open(path)
        .map_err(|e| {
            QuickplotError::Render(format!(
                "failed to read scale legend {}: {e}",
                path.display()
            ))
        })?
        .to_rgba8();

    Ok(Some(imageops::rotate90(&imageops::rotate90(&img))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use test_utils::temp_test_dir;

    #[test]
    fn test_none_path_skips() {
        assert!(load_scale_legend(None).unwrap().is_none());
    }

    #[test]
    fn test_missing_file_skips() {
        let legend = load_scale_legend(Some(Path::new("/no/such/scale.png"))).unwrap();
        assert!(legend.is_none());
    }

    #[test]
    fn test_loaded_legend_is_flipped() {
        let dir = temp_test_dir();
        let path = dir.path().join("scale.png");

        // 2x2 marker image: red at top-left
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let legend = load_scale_legend(Some(&path)).unwrap().unwrap();
        assert_eq!(legend.dimensions(), (2, 2));
        // two quarter turns move the marker to the bottom-right
        assert_eq!(*legend.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*legend.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = temp_test_dir();
        let path = dir.path().join("scale.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(load_scale_legend(Some(&path)).is_err());
    }
}
