//! Single-frame map rendering.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use radar_grid::{naming, BoundingBox, Frame, QuickplotResult};

use crate::config::PlotConfig;
use crate::display;
use crate::figure::{Figure, PlotRect};
use crate::gradient;
use crate::png;
use crate::style::ReflectivityStyle;
use crate::text;

/// What a render call did with its figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Figure encoded and written to this path.
    Saved(PathBuf),
    /// Figure handed to the platform viewer.
    Displayed,
    /// Nothing produced (no display backend, or keogram without a path).
    Skipped,
}

/// Legend inset rectangle as canvas fractions, bottom-left origin.
const LEGEND_X: f64 = 0.90;
const LEGEND_BOTTOM: f64 = 0.15;
const LEGEND_WIDTH: f64 = 0.055;
const LEGEND_HEIGHT: f64 = 0.30;

const TICK_FONT: f32 = 14.0;
const TITLE_FONT: f32 = 20.0;

/// Draw one reflectivity frame over the fixed-extent map view.
///
/// The frame is placed in geographic coordinates taken from its own axes,
/// not the view's: a frame smaller than the view covers only its own
/// extent, and anything outside the view is clipped. With an output path
/// the figure is encoded at the configured density and written; without
/// one it is handed to the platform viewer, and a missing viewer degrades
/// to [`RenderOutcome::Skipped`] rather than an error.
pub fn render_map(
    frame: &Frame,
    output: Option<&Path>,
    cfg: &PlotConfig,
    lat_tick: Option<f64>,
    legend: Option<&RgbaImage>,
    style: &ReflectivityStyle,
) -> QuickplotResult<RenderOutcome> {
    let (w, h) = cfg.map_canvas();
    let mut fig = Figure::new(w, h);
    let view = cfg.view();
    let grid_color = Rgba([cfg.grid_color[0], cfg.grid_color[1], cfg.grid_color[2], 255]);

    draw_frame(&mut fig, frame, &view, style);
    draw_graticule(&mut fig, cfg, &view, lat_tick, grid_color);
    fig.draw_border(grid_color);

    let title = naming::frame_title(frame.stem());
    text::draw_label_centered(
        &mut fig.img,
        title,
        w as i32 / 2,
        (fig.plot.y0 as i32 - text::line_height(TITLE_FONT) as i32 - 8).max(0),
        TITLE_FONT,
        Rgba([0, 0, 0, 255]),
    );

    if let Some(legend) = legend {
        overlay_legend(&mut fig.img, legend);
    }

    match output {
        Some(path) => {
            let encoded = png::encode_auto(fig.img.as_raw(), w as usize, h as usize)?;
            std::fs::write(path, encoded)?;
            tracing::info!(path = %path.display(), "saved radar map");
            Ok(RenderOutcome::Saved(path.to_path_buf()))
        }
        None => match display::show_image(&fig.img) {
            Ok(()) => Ok(RenderOutcome::Displayed),
            Err(e) => {
                tracing::error!(error = %e, "skipping map display");
                Ok(RenderOutcome::Skipped)
            }
        },
    }
}

fn lon_to_x(plot: &PlotRect, view: &BoundingBox, lon: f64) -> f64 {
    plot.x0 as f64 + (lon - view.min_lon) / view.width() * plot.width() as f64
}

fn lat_to_y(plot: &PlotRect, view: &BoundingBox, lat: f64) -> f64 {
    plot.y0 as f64 + (view.max_lat - lat) / view.height() * plot.height() as f64
}

/// Rasterize the frame into its geographic rectangle on the canvas.
fn draw_frame(fig: &mut Figure, frame: &Frame, view: &BoundingBox, style: &ReflectivityStyle) {
    let extent = frame.extent();
    if !extent.intersects(view) {
        tracing::warn!("frame extent lies outside the map view");
        return;
    }

    let x0 = lon_to_x(&fig.plot, view, extent.min_lon);
    let x1 = lon_to_x(&fig.plot, view, extent.max_lon);
    let y0 = lat_to_y(&fig.plot, view, extent.max_lat);
    let y1 = lat_to_y(&fig.plot, view, extent.min_lat);

    let dst_w = (x1 - x0).round().max(1.0) as usize;
    let dst_h = (y1 - y0).round().max(1.0) as usize;

    let resampled = gradient::resample_grid(
        frame.data(),
        frame.ncols(),
        frame.nrows(),
        dst_w,
        dst_h,
    );
    let pixels = gradient::render_grid(&resampled, dst_w, dst_h, style);

    fig.paste_rgba(&pixels, dst_w, dst_h, x0.round() as i64, y0.round() as i64);
}

/// Gridlines at the configured parallels and meridians, with degree
/// labels in the margins.
fn draw_graticule(
    fig: &mut Figure,
    cfg: &PlotConfig,
    view: &BoundingBox,
    lat_tick: Option<f64>,
    color: Rgba<u8>,
) {
    let mut parallels = cfg.parallels.clone();
    if let Some(extra) = lat_tick {
        parallels.push(extra);
    }

    for &lat in &parallels {
        if lat < view.min_lat || lat > view.max_lat {
            continue;
        }
        let y = lat_to_y(&fig.plot, view, lat);
        fig.draw_hline(y.round() as i64, cfg.grid_linewidth, color);

        let label = lat_label(lat);
        let lw = text::text_width(&label, TICK_FONT);
        text::draw_label(
            &mut fig.img,
            &label,
            (fig.plot.x0 as i32 - lw as i32 - 8).max(0),
            y as i32 - (text::line_height(TICK_FONT) / 2.0) as i32,
            TICK_FONT,
            color,
        );
    }

    for &lon in &cfg.meridians {
        if lon < view.min_lon || lon > view.max_lon {
            continue;
        }
        let x = lon_to_x(&fig.plot, view, lon);
        fig.draw_vline(x.round() as i64, cfg.grid_linewidth, color);

        text::draw_label_centered(
            &mut fig.img,
            &lon_label(lon),
            x as i32,
            fig.plot.y1 as i32 + 8,
            TICK_FONT,
            color,
        );
    }
}

fn lat_label(lat: f64) -> String {
    if lat < 0.0 {
        format!("{:.0}°S", -lat)
    } else {
        format!("{lat:.0}°N")
    }
}

fn lon_label(lon: f64) -> String {
    if lon < 0.0 {
        format!("{:.0}°W", -lon)
    } else {
        format!("{lon:.0}°E")
    }
}

/// Composite the scale legend into its fixed corner inset.
fn overlay_legend(img: &mut RgbaImage, legend: &RgbaImage) {
    let (w, h) = img.dimensions();
    let inset_w = ((LEGEND_WIDTH * w as f64) as u32).max(1);
    let inset_h = ((LEGEND_HEIGHT * h as f64) as u32).max(1);
    let x = (LEGEND_X * w as f64) as i64;
    let y = (h as f64 - (LEGEND_BOTTOM + LEGEND_HEIGHT) * h as f64) as i64;

    let scaled = imageops::resize(legend, inset_w, inset_h, FilterType::Triangle);
    imageops::overlay(img, &scaled, x, y);
}
