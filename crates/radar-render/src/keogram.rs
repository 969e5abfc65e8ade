//! Keogram rendering: a time-vs-position strip with a formatted time axis.

use std::path::Path;

use chrono::{DateTime, Utc};
use image::Rgba;

use radar_grid::{Keogram, QuickplotResult};

use crate::config::PlotConfig;
use crate::figure::{trim_to_content, Figure};
use crate::gradient;
use crate::map::RenderOutcome;
use crate::png;
use crate::style::ReflectivityStyle;
use crate::text;

const N_TIME_TICKS: usize = 6;
const N_SPATIAL_TICKS: usize = 6;
const TICK_FONT: f32 = 14.0;
const TITLE_FONT: f32 = 18.0;
const LABEL_ROTATION_DEG: f32 = 30.0;
const TRIM_PAD: u32 = 10;

/// Draw a keogram on a wide canvas: time horizontal, the spatial cut
/// vertical, hour:minute:second tick labels rotated automatically when
/// they would overlap.
///
/// With an output path the figure is tight-cropped and written at the
/// configured density. Without one nothing is rendered at all - unlike
/// the map renderer there is no viewer fallback - and the call reports
/// [`RenderOutcome::Skipped`].
pub fn render_keogram(
    keo: &Keogram,
    output: Option<&Path>,
    cfg: &PlotConfig,
    style: &ReflectivityStyle,
) -> QuickplotResult<RenderOutcome> {
    let Some(path) = output else {
        tracing::debug!("no output path given, keogram not rendered");
        return Ok(RenderOutcome::Skipped);
    };

    let (w, h) = cfg.keogram_canvas();
    let mut fig = Figure::new(w, h);
    let black = Rgba([0, 0, 0, 255]);

    // the strip fills the plot area; columns are time steps
    let plot_w = fig.plot.width() as usize;
    let plot_h = fig.plot.height() as usize;
    let resampled =
        gradient::resample_grid(keo.data(), keo.ncols(), keo.nrows(), plot_w, plot_h);
    let pixels = gradient::render_grid(&resampled, plot_w, plot_h, style);
    fig.paste_rgba(
        &pixels,
        plot_w,
        plot_h,
        fig.plot.x0 as i64,
        fig.plot.y0 as i64,
    );
    fig.draw_border(black);

    draw_time_axis(&mut fig, keo, black);
    draw_spatial_axis(&mut fig, keo, black);
    draw_titles(&mut fig, keo, black);

    let trimmed = trim_to_content(&fig.img, TRIM_PAD);
    let encoded = png::encode_auto(
        trimmed.as_raw(),
        trimmed.width() as usize,
        trimmed.height() as usize,
    )?;
    std::fs::write(path, encoded)?;
    tracing::info!(path = %path.display(), "saved keogram");

    Ok(RenderOutcome::Saved(path.to_path_buf()))
}

fn time_tick_label(t: &DateTime<Utc>) -> String {
    t.format("%H:%M:%S").to_string()
}

/// Rotate tick labels once the widest one would collide with its
/// neighbour.
fn labels_need_rotation(label_width: f32, tick_spacing: f32) -> bool {
    label_width > tick_spacing * 0.8
}

fn draw_time_axis(fig: &mut Figure, keo: &Keogram, color: Rgba<u8>) {
    let (t0, t1) = keo.time_span();
    let span = (t1 - t0).num_seconds().max(1) as f64;
    let spacing = fig.plot.width() as f32 / (N_TIME_TICKS - 1) as f32;

    let widest = text::text_width(&time_tick_label(&t0), TICK_FONT);
    let rotate = labels_need_rotation(widest, spacing);

    for i in 0..N_TIME_TICKS {
        let frac = i as f64 / (N_TIME_TICKS - 1) as f64;
        let t = t0 + chrono::Duration::seconds((span * frac).round() as i64);
        let x = fig.plot.x0 as f64 + frac * fig.plot.width() as f64;

        // tick mark below the strip
        for dy in 0..5i64 {
            let y = fig.plot.y1 as i64 + dy;
            if (y as u32) < fig.img.height() {
                fig.img.put_pixel(x as u32, y as u32, color);
            }
        }

        let label = time_tick_label(&t);
        if rotate {
            let lw = text::text_width(&label, TICK_FONT);
            text::draw_label_rotated(
                &mut fig.img,
                &label,
                x as i32 - (lw / 3.0) as i32,
                fig.plot.y1 as i32 + 8 + (lw / 3.0) as i32,
                TICK_FONT,
                color,
                LABEL_ROTATION_DEG,
            );
        } else {
            text::draw_label_centered(
                &mut fig.img,
                &label,
                x as i32,
                fig.plot.y1 as i32 + 8,
                TICK_FONT,
                color,
            );
        }
    }

    let label_y = fig.img.height() as i32 - text::line_height(TICK_FONT) as i32 - 4;
    text::draw_label_centered(
        &mut fig.img,
        "Time [UTC]",
        (fig.plot.x0 + fig.plot.width() / 2) as i32,
        label_y,
        TICK_FONT,
        color,
    );
}

fn draw_spatial_axis(fig: &mut Figure, keo: &Keogram, color: Rgba<u8>) {
    let spatial = keo.spatial();
    let first = spatial[0];
    let last = *spatial.last().expect("non-empty spatial axis");

    for i in 0..N_SPATIAL_TICKS {
        let frac = i as f64 / (N_SPATIAL_TICKS - 1) as f64;
        let value = first + frac * (last - first);
        let y = fig.plot.y0 as f64 + frac * fig.plot.height() as f64;

        let label = format!("{value:.1}");
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

    text::draw_label_rotated(
        &mut fig.img,
        keo.cut().axis.spatial_label(),
        14,
        (fig.plot.y0 + fig.plot.height() / 2) as i32,
        TICK_FONT,
        color,
        90.0,
    );
}

fn draw_titles(fig: &mut Figure, keo: &Keogram, color: Rgba<u8>) {
    let (t0, t1) = keo.time_span();
    let cut = keo.cut();
    let line1 = format!("Radar keogram: cut at {}={}", cut.axis, cut.value);
    let line2 = format!(
        "{} to {}",
        t0.format("%Y-%m-%d %H:%M:%S"),
        t1.format("%Y-%m-%d %H:%M:%S")
    );

    let lh = text::line_height(TITLE_FONT) as i32;
    let cx = fig.img.width() as i32 / 2;
    text::draw_label_centered(
        &mut fig.img,
        &line1,
        cx,
        (fig.plot.y0 as i32 - 2 * lh - 10).max(0),
        TITLE_FONT,
        color,
    );
    text::draw_label_centered(
        &mut fig.img,
        &line2,
        cx,
        (fig.plot.y0 as i32 - lh - 4).max(0),
        TITLE_FONT,
        color,
    );
}
