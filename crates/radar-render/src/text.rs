//! Text drawing for figure annotation.
//!
//! The font is discovered on the system at first use and cached for the
//! process lifetime. When no usable TTF is found, label drawing becomes a
//! no-op and figures render without text; a warning is logged once.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use once_cell::sync::Lazy;
use rusttype::{Font, Scale};

/// Candidate font locations, checked in order after `QUICKPLOT_FONT`.
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT: Lazy<Option<Font<'static>>> = Lazy::new(|| {
    let mut candidates: Vec<String> = Vec::new();
    if let Ok(path) = std::env::var("QUICKPLOT_FONT") {
        candidates.push(path);
    }
    candidates.extend(FONT_SEARCH_PATHS.iter().map(|s| s.to_string()));

    for path in &candidates {
        if let Ok(data) = std::fs::read(path) {
            if let Some(font) = Font::try_from_vec(data) {
                tracing::debug!(path = %path, "loaded figure font");
                return Some(font);
            }
        }
    }

    tracing::warn!("no usable TTF font found; figures will omit text labels");
    None
});

/// The cached figure font, if any was found.
pub fn font() -> Option<&'static Font<'static>> {
    FONT.as_ref()
}

/// Pixel width of `text` at the given size; 0 without a font.
pub fn text_width(text: &str, size: f32) -> f32 {
    let Some(font) = font() else {
        return 0.0;
    };
    let scale = Scale::uniform(size);
    text.chars()
        .map(|c| font.glyph(c).scaled(scale).h_metrics().advance_width)
        .sum()
}

/// Pixel height of one text line at the given size; 0 without a font.
pub fn line_height(size: f32) -> f32 {
    let Some(font) = font() else {
        return 0.0;
    };
    let metrics = font.v_metrics(Scale::uniform(size));
    metrics.ascent - metrics.descent
}

/// Draw `text` with its top-left corner at (x, y). No-op without a font.
pub fn draw_label(img: &mut RgbaImage, text: &str, x: i32, y: i32, size: f32, color: Rgba<u8>) {
    let Some(font) = font() else {
        return;
    };
    draw_text_mut(img, color, x, y, Scale::uniform(size), font, text);
}

/// Draw `text` horizontally centered on `cx` with its top at `y`.
pub fn draw_label_centered(
    img: &mut RgbaImage,
    text: &str,
    cx: i32,
    y: i32,
    size: f32,
    color: Rgba<u8>,
) {
    let w = text_width(text, size);
    draw_label(img, text, cx - (w / 2.0) as i32, y, size, color);
}

/// Draw `text` rotated counter-clockwise by `degrees`, centered on
/// (cx, cy). The label is rasterized to a transparent tile, rotated about
/// the tile centre, and composited. No-op without a font.
pub fn draw_label_rotated(
    img: &mut RgbaImage,
    text: &str,
    cx: i32,
    cy: i32,
    size: f32,
    color: Rgba<u8>,
    degrees: f32,
) {
    if font().is_none() {
        return;
    }

    let w = text_width(text, size).ceil() as u32;
    let h = line_height(size).ceil() as u32;
    if w == 0 || h == 0 {
        return;
    }

    // square tile so the rotation cannot clip the corners
    let side = ((w * w + h * h) as f32).sqrt().ceil() as u32 + 2;
    let mut tile = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 0]));
    draw_label(
        &mut tile,
        text,
        ((side - w) / 2) as i32,
        ((side - h) / 2) as i32,
        size,
        color,
    );

    let theta = -degrees.to_radians();
    let rotated = rotate_about_center(&tile, theta, Interpolation::Bilinear, Rgba([0, 0, 0, 0]));

    image::imageops::overlay(
        img,
        &rotated,
        cx as i64 - side as i64 / 2,
        cy as i64 - side as i64 / 2,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_empty() {
        assert_eq!(text_width("", 14.0), 0.0);
    }

    #[test]
    fn test_text_width_grows_with_text() {
        // only meaningful when a system font is available
        if font().is_some() {
            let short = text_width("ab", 14.0);
            let long = text_width("abcdef", 14.0);
            assert!(long > short);
        }
    }

    #[test]
    fn test_draw_label_does_not_panic_without_font() {
        let mut img = RgbaImage::from_pixel(32, 32, Rgba([255, 255, 255, 255]));
        draw_label(&mut img, "40", -5, 2, 12.0, Rgba([0, 0, 0, 255]));
        draw_label_centered(&mut img, "40", 16, 2, 12.0, Rgba([0, 0, 0, 255]));
        draw_label_rotated(&mut img, "09:00:00", 16, 16, 12.0, Rgba([0, 0, 0, 255]), 30.0);
    }
}
