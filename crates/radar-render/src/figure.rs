//! Figure canvas and plot-area plumbing shared by the map and keogram
//! renderers.

use image::{Pixel, Rgba, RgbaImage};

/// Canvas background.
pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Pixel margins reserved around the plot area for labels and titles.
pub const MARGIN_LEFT: u32 = 90;
pub const MARGIN_RIGHT: u32 = 40;
pub const MARGIN_TOP: u32 = 60;
pub const MARGIN_BOTTOM: u32 = 70;

/// The plot area of a figure, in canvas pixels. `x1`/`y1` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PlotRect {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x0 as i64 && x < self.x1 as i64 && y >= self.y0 as i64 && y < self.y1 as i64
    }
}

/// A white canvas with a margin-inset plot area.
pub struct Figure {
    pub img: RgbaImage,
    pub plot: PlotRect,
}

impl Figure {
    pub fn new(width: u32, height: u32) -> Self {
        let img = RgbaImage::from_pixel(width, height, BACKGROUND);

        // degrade margins on tiny canvases so the plot area stays non-empty
        let x0 = MARGIN_LEFT.min(width / 4);
        let x1 = (width - MARGIN_RIGHT.min(width / 4)).max(x0 + 1);
        let y0 = MARGIN_TOP.min(height / 4);
        let y1 = (height - MARGIN_BOTTOM.min(height / 4)).max(y0 + 1);

        Self {
            img,
            plot: PlotRect { x0, y0, x1, y1 },
        }
    }

    /// Horizontal line across the plot area, `thickness` pixels tall,
    /// centered on `y`.
    pub fn draw_hline(&mut self, y: i64, thickness: u32, color: Rgba<u8>) {
        let half = thickness as i64 / 2;
        for dy in 0..thickness as i64 {
            let yy = y - half + dy;
            for x in self.plot.x0..self.plot.x1 {
                if self.plot.contains(x as i64, yy) {
                    self.img.put_pixel(x, yy as u32, color);
                }
            }
        }
    }

    /// Vertical line across the plot area, `thickness` pixels wide,
    /// centered on `x`.
    pub fn draw_vline(&mut self, x: i64, thickness: u32, color: Rgba<u8>) {
        let half = thickness as i64 / 2;
        for dx in 0..thickness as i64 {
            let xx = x - half + dx;
            for y in self.plot.y0..self.plot.y1 {
                if self.plot.contains(xx, y as i64) {
                    self.img.put_pixel(xx as u32, y, color);
                }
            }
        }
    }

    /// One-pixel frame around the plot area.
    pub fn draw_border(&mut self, color: Rgba<u8>) {
        for x in self.plot.x0..self.plot.x1 {
            self.img.put_pixel(x, self.plot.y0, color);
            self.img.put_pixel(x, self.plot.y1 - 1, color);
        }
        for y in self.plot.y0..self.plot.y1 {
            self.img.put_pixel(self.plot.x0, y, color);
            self.img.put_pixel(self.plot.x1 - 1, y, color);
        }
    }

    /// Composite an RGBA buffer with its top-left corner at
    /// (dest_x, dest_y), alpha-blended and clipped to the plot area.
    pub fn paste_rgba(&mut self, pixels: &[u8], w: usize, h: usize, dest_x: i64, dest_y: i64) {
        for sy in 0..h {
            let y = dest_y + sy as i64;
            for sx in 0..w {
                let x = dest_x + sx as i64;
                if !self.plot.contains(x, y) {
                    continue;
                }
                let idx = (sy * w + sx) * 4;
                let src = Rgba([pixels[idx], pixels[idx + 1], pixels[idx + 2], pixels[idx + 3]]);
                if src.0[3] == 0 {
                    continue;
                }
                let mut base = *self.img.get_pixel(x as u32, y as u32);
                base.blend(&src);
                self.img.put_pixel(x as u32, y as u32, base);
            }
        }
    }
}

/// Crop a figure to its non-background content plus `pad` pixels on every
/// side. Returns the input unchanged when nothing was drawn.
pub fn trim_to_content(img: &RgbaImage, pad: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let mut min_x = w;
    let mut min_y = h;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, px) in img.enumerate_pixels() {
        if *px != BACKGROUND {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            found = true;
        }
    }

    if !found {
        return img.clone();
    }

    let x0 = min_x.saturating_sub(pad);
    let y0 = min_y.saturating_sub(pad);
    let x1 = (max_x + pad + 1).min(w);
    let y1 = (max_y + pad + 1).min(h);

    image::imageops::crop_imm(img, x0, y0, x1 - x0, y1 - y0).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_area_inside_canvas() {
        let fig = Figure::new(1200, 800);
        assert_eq!(fig.plot.x0, MARGIN_LEFT);
        assert_eq!(fig.plot.x1, 1200 - MARGIN_RIGHT);
        assert!(fig.plot.width() > 0);
        assert!(fig.plot.height() > 0);
    }

    #[test]
    fn test_tiny_canvas_keeps_nonempty_plot() {
        let fig = Figure::new(16, 16);
        assert!(fig.plot.width() > 0);
        assert!(fig.plot.height() > 0);
    }

    #[test]
    fn test_hline_clipped_to_plot() {
        let mut fig = Figure::new(200, 200);
        fig.draw_hline(fig.plot.y0 as i64 + 5, 2, Rgba([0, 0, 0, 255]));

        // inside the plot area: drawn
        assert_eq!(
            *fig.img.get_pixel(fig.plot.x0, fig.plot.y0 + 5),
            Rgba([0, 0, 0, 255])
        );
        // left margin: untouched
        assert_eq!(*fig.img.get_pixel(0, fig.plot.y0 + 5), BACKGROUND);
    }

    #[test]
    fn test_paste_clips_and_blends() {
        let mut fig = Figure::new(200, 200);
        // a 2x1 buffer: opaque red, transparent
        let buf = [255, 0, 0, 255, 0, 255, 0, 0];
        let x = fig.plot.x0 as i64;
        let y = fig.plot.y0 as i64;
        fig.paste_rgba(&buf, 2, 1, x, y);

        assert_eq!(*fig.img.get_pixel(x as u32, y as u32), Rgba([255, 0, 0, 255]));
        // transparent source leaves background
        assert_eq!(*fig.img.get_pixel(x as u32 + 1, y as u32), BACKGROUND);

        // pasting outside the plot area is a no-op
        fig.paste_rgba(&buf, 2, 1, 0, 0);
        assert_eq!(*fig.img.get_pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn test_trim_to_content() {
        let mut img = RgbaImage::from_pixel(50, 50, BACKGROUND);
        img.put_pixel(20, 25, Rgba([0, 0, 0, 255]));
        img.put_pixel(30, 28, Rgba([0, 0, 0, 255]));

        let trimmed = trim_to_content(&img, 2);
        assert_eq!(trimmed.dimensions(), (15, 8));
    }

    #[test]
    fn test_trim_empty_returns_whole() {
        let img = RgbaImage::from_pixel(10, 10, BACKGROUND);
        assert_eq!(trim_to_content(&img, 2).dimensions(), (10, 10));
    }
}
