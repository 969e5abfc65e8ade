//! Gradient rasterization for gridded reflectivity data.

use crate::style::{hex_to_rgb, ReflectivityStyle};

/// Color value in RGBA format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }
}

/// Linear color interpolation.
fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f32 * t_inv) + (color2.r as f32 * t)) as u8,
        ((color1.g as f32 * t_inv) + (color2.g as f32 * t)) as u8,
        ((color1.b as f32 * t_inv) + (color2.b as f32 * t)) as u8,
        ((color1.a as f32 * t_inv) + (color2.a as f32 * t)) as u8,
    )
}

/// Resolved stops: (value, color) pairs with parsed hex colors.
fn resolve_stops(style: &ReflectivityStyle) -> Vec<(f32, Color)> {
    style
        .stops
        .iter()
        .map(|s| {
            let (r, g, b) = hex_to_rgb(&s.color).unwrap_or((200, 200, 200));
            (s.value, Color::new(r, g, b, 255))
        })
        .collect()
}

/// Map one data value through the style's color stops.
///
/// Values below the first stop (and NaN) are transparent; values above the
/// last stop take its color.
pub fn color_for_value(value: f32, stops: &[(f32, Color)]) -> Color {
    if value.is_nan() || stops.is_empty() {
        return Color::transparent();
    }

    let (first_val, first_color) = stops[0];
    if value < first_val {
        return Color::transparent();
    }
    if value == first_val {
        return first_color;
    }

    let (last_val, last_color) = stops[stops.len() - 1];
    if value >= last_val {
        return last_color;
    }

    for pair in stops.windows(2) {
        let (low_val, low_color) = pair[0];
        let (high_val, high_color) = pair[1];
        if value <= high_val {
            let span = high_val - low_val;
            let t = if span.abs() < 0.001 {
                0.0
            } else {
                (value - low_val) / span
            };
            return interpolate_color(low_color, high_color, t);
        }
    }

    last_color
}

/// Render grid data as RGBA pixels through a style's color stops.
///
/// # Arguments
/// - `data`: grid values in row-major order
/// - `width`, `height`: grid dimensions
/// - `style`: color-stop mapping
///
/// # Returns
/// RGBA pixel data (4 bytes per pixel).
pub fn render_grid(data: &[f32], width: usize, height: usize, style: &ReflectivityStyle) -> Vec<u8> {
    let stops = resolve_stops(style);
    let mut pixels = vec![0u8; width * height * 4];

    for (idx, &value) in data.iter().take(width * height).enumerate() {
        let color = color_for_value(value, &stops);
        let pixel_idx = idx * 4;
        pixels[pixel_idx] = color.r;
        pixels[pixel_idx + 1] = color.g;
        pixels[pixel_idx + 2] = color.b;
        pixels[pixel_idx + 3] = color.a;
    }

    pixels
}

/// Resample grid data to a different resolution using bilinear
/// interpolation. NaN cells fall back to the nearest source value so gaps
/// stay sharp instead of bleeding.
pub fn resample_grid(
    data: &[f32],
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
) -> Vec<f32> {
    if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
        return vec![f32::NAN; dst_width * dst_height];
    }
    if src_width == dst_width && src_height == dst_height {
        return data.to_vec();
    }

    let mut output = vec![0.0f32; dst_width * dst_height];

    let x_ratio = (src_width.max(2) - 1) as f32 / (dst_width.max(2) - 1) as f32;
    let y_ratio = (src_height.max(2) - 1) as f32 / (dst_height.max(2) - 1) as f32;

    for y in 0..dst_height {
        for x in 0..dst_width {
            let src_x = x as f32 * x_ratio;
            let src_y = y as f32 * y_ratio;

            let x1 = (src_x.floor() as usize).min(src_width - 1);
            let y1 = (src_y.floor() as usize).min(src_height - 1);
            let x2 = (x1 + 1).min(src_width - 1);
            let y2 = (y1 + 1).min(src_height - 1);

            let dx = src_x - x1 as f32;
            let dy = src_y - y1 as f32;

            let v11 = data[y1 * src_width + x1];
            let v21 = data[y1 * src_width + x2];
            let v12 = data[y2 * src_width + x1];
            let v22 = data[y2 * src_width + x2];

            let value = if v11.is_nan() || v21.is_nan() || v12.is_nan() || v22.is_nan() {
                // nearest neighbour
                let nx = if dx < 0.5 { x1 } else { x2 };
                let ny = if dy < 0.5 { y1 } else { y2 };
                data[ny * src_width + nx]
            } else {
                let v1 = v11 * (1.0 - dx) + v21 * dx;
                let v2 = v12 * (1.0 - dx) + v22 * dx;
                v1 * (1.0 - dy) + v2 * dy
            };

            output[y * dst_width + x] = value;
        }
    }

    output
}
