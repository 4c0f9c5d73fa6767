/// Half-block pixel canvas for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use meshview_core::DrawSurface;
use nalgebra::Point2;
use palette::Srgb;
use std::io::Write;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '\u{2580}';

/// Pixel buffer where every terminal cell holds two vertically stacked
/// pixels. The square viewport is centred inside the buffer.
pub struct PixelCanvas {
    width: usize,
    height: usize,
    origin: (f64, f64),
    pixels: Vec<Option<Srgb<u8>>>,
}

impl PixelCanvas {
    /// Canvas covering a terminal of `columns x rows` cells.
    pub fn for_terminal(columns: u16, rows: u16, viewport_size: f64) -> Self {
        Self::new(columns as usize, rows as usize * 2, viewport_size)
    }

    pub fn new(width: usize, height: usize, viewport_size: f64) -> Self {
        Self {
            width,
            height,
            origin: (
                (width as f64 - viewport_size) / 2.0,
                (height as f64 - viewport_size) / 2.0,
            ),
            pixels: vec![None; width * height],
        }
    }

    /// Largest square viewport that fits a terminal of `columns x rows` cells.
    pub fn viewport_size(columns: u16, rows: u16) -> f64 {
        f64::from(columns).min(f64::from(rows) * 2.0)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Srgb<u8>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y * self.width + x]
    }

    /// Viewport coordinates of the centre of the top pixel in a cell.
    pub fn cell_to_viewport(&self, column: u16, row: u16) -> Point2<f64> {
        Point2::new(
            f64::from(column) + 0.5 - self.origin.0,
            f64::from(row) * 2.0 + 0.5 - self.origin.1,
        )
    }

    fn to_pixel(&self, point: &Point2<f64>) -> (f64, f64) {
        (point.x + self.origin.0, point.y + self.origin.1)
    }

    fn plot(&mut self, x: i64, y: i64, color: Srgb<u8>) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = Some(color);
    }

    /// Pixels whose centres lie within `radius`, plus the pixel holding the
    /// centre so that sub-pixel markers stay visible.
    fn fill_disc(&mut self, (cx, cy): (f64, f64), radius: f64, color: Srgb<u8>) {
        self.plot(cx.floor() as i64, cy.floor() as i64, color);

        let min_x = (cx - radius).floor() as i64;
        let max_x = (cx + radius).ceil() as i64;
        let min_y = (cy - radius).floor() as i64;
        let max_y = (cy + radius).ceil() as i64;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.plot(x, y, color);
                }
            }
        }
    }

    fn stroke(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Srgb<u8>) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;

        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let p = (from.0 + dx * t, from.1 + dy * t);
            if width > 1.0 {
                self.fill_disc(p, width / 2.0, color);
            } else {
                self.plot(p.0.floor() as i64, p.1.floor() as i64, color);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Srgb<u8>) {
        if points.len() < 3 {
            return;
        }

        // Bounding box, clipped to the buffer
        let min_x = points
            .iter()
            .map(|p| p.0)
            .fold(f64::INFINITY, f64::min)
            .floor()
            .max(0.0) as i64;
        let max_x = points
            .iter()
            .map(|p| p.0)
            .fold(f64::NEG_INFINITY, f64::max)
            .ceil()
            .min(self.width as f64 - 1.0) as i64;
        let min_y = points
            .iter()
            .map(|p| p.1)
            .fold(f64::INFINITY, f64::min)
            .floor()
            .max(0.0) as i64;
        let max_y = points
            .iter()
            .map(|p| p.1)
            .fold(f64::NEG_INFINITY, f64::max)
            .ceil()
            .min(self.height as f64 - 1.0) as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if contains(points, (x as f64 + 0.5, y as f64 + 0.5)) {
                    self.plot(x, y, color);
                }
            }
        }
    }

    /// Queue the buffer to `writer`, two pixel rows per terminal row.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.height.div_ceil(2) {
            for x in 0..self.width {
                let top = self.pixel(x, row * 2);
                let bottom = self.pixel(x, row * 2 + 1);

                writer.queue(SetForegroundColor(terminal_color(top)))?;
                writer.queue(SetBackgroundColor(terminal_color(bottom)))?;
                writer.queue(Print(HALF_BLOCK))?;
            }
            writer.queue(ResetColor)?;
            if row + 1 < self.height.div_ceil(2) {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for PixelCanvas {
    fn clear(&mut self) {
        self.pixels.fill(None);
    }

    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Srgb<u8>) {
        let (from, to) = (self.to_pixel(&from), self.to_pixel(&to));
        self.stroke(from, to, 1.0, color);
    }

    fn draw_filled_polygon(
        &mut self,
        points: &[Point2<f64>],
        outline: Srgb<u8>,
        fill: Srgb<u8>,
        stroke_width: f64,
    ) {
        let points: Vec<(f64, f64)> = points.iter().map(|p| self.to_pixel(p)).collect();
        self.fill_polygon(&points, fill);
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.stroke(from, to, stroke_width, outline);
        }
    }

    fn draw_point_marker(&mut self, center: Point2<f64>, radius: f64, color: Srgb<u8>) {
        let center = self.to_pixel(&center);
        self.fill_disc(center, radius, color);
    }
}

fn terminal_color(pixel: Option<Srgb<u8>>) -> Color {
    match pixel {
        Some(c) => Color::Rgb {
            r: c.red,
            g: c.green,
            b: c.blue,
        },
        None => Color::Reset,
    }
}

/// Even-odd point-in-polygon test
fn contains(points: &[(f64, f64)], (px, py): (f64, f64)) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
