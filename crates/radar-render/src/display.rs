//! External-viewer display for pathless renders.
//!
//! When no output file is requested, the composed figure is written to a
//! temporary PNG and handed to the platform's image viewer. The call
//! blocks until the viewer command returns.

use std::process::Command;

use image::RgbaImage;

use radar_grid::{QuickplotError, QuickplotResult};

use crate::png;

#[cfg(target_os = "macos")]
const VIEWER: &str = "open";
#[cfg(target_os = "windows")]
const VIEWER: &str = "explorer";
#[cfg(all(unix, not(target_os = "macos")))]
const VIEWER: &str = "xdg-open";

/// Show a figure in the platform image viewer.
///
/// Errors with [`QuickplotError::DisplayUnavailable`] when the viewer
/// cannot be launched, so callers can degrade to a skipped frame.
pub fn show_image(img: &RgbaImage) -> QuickplotResult<()> {
    let (w, h) = img.dimensions();
    let encoded = png::encode_auto(img.as_raw(), w as usize, h as usize)?;

    let dir = tempfile::Builder::new().prefix("quickplot-").tempdir()?;
    let path = dir.path().join("figure.png");
    std::fs::write(&path, encoded)?;

    let status = Command::new(VIEWER)
        .arg(&path)
        .status()
        .map_err(|e| QuickplotError::DisplayUnavailable(format!("{VIEWER}: {e}")))?;

    if !status.success() {
        return Err(QuickplotError::DisplayUnavailable(format!(
            "{VIEWER} exited with {status}"
        )));
    }

    Ok(())
}
