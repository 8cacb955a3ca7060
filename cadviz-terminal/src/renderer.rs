/// ASCII rasterizer for terminal rendering
use cadviz_core::{Rgb, ScreenPoint, Surface, Viewport};
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Virtual pixels per terminal cell, horizontally
pub const CELL_WIDTH: u32 = 8;

/// Virtual pixels per terminal cell, vertically
pub const CELL_HEIGHT: u32 = 16;

/// How cells are written to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 24-bit background fills with colored line glyphs
    #[default]
    TrueColor,
    /// Plain characters: fills become ramp glyphs by luminance
    Ascii,
}

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Composited fill color
    pub background: Rgb,
    /// Line glyph and its color, if a line crossed this cell after the last fill
    pub glyph: Option<(char, Rgb)>,
}

/// Character-grid draw surface.
///
/// Shapes draw in virtual pixel coordinates ([`CELL_WIDTH`] x [`CELL_HEIGHT`]
/// per cell) so the projection keeps its on-screen scale. Calls are
/// composited strictly in submission order.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    clear_color: Rgb,
    mode: ColorMode,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_mode(width, height, ColorMode::default())
    }

    pub fn with_mode(width: usize, height: usize, mode: ColorMode) -> Self {
        let clear_color = Rgb::BACKGROUND;
        Self {
            width,
            height,
            clear_color,
            mode,
            cells: vec![
                Cell {
                    background: clear_color,
                    glyph: None,
                };
                width * height
            ],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Virtual pixel size handed to the projection
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.width as u32 * CELL_WIDTH,
            self.height as u32 * CELL_HEIGHT,
        )
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.background = self.clear_color;
            cell.glyph = None;
        }
    }

    fn fill_span(&mut self, row: usize, x_start: f64, x_end: f64, color: Rgb, alpha: u8) {
        let cell_w = CELL_WIDTH as f64;
        // first and last cells whose centre lies in [x_start, x_end)
        let first = ((x_start / cell_w) - 0.5).ceil().max(0.0);
        let last = ((x_end / cell_w) - 0.5).ceil() - 1.0;
        let last = last.min(self.width as f64 - 1.0);
        if last < first {
            return;
        }
        for col in first as usize..=last as usize {
            let cell = &mut self.cells[row * self.width + col];
            cell.background = color.blend_over(cell.background, alpha);
            cell.glyph = None;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<(Rgb, Rgb)> = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                match self.mode {
                    ColorMode::TrueColor => {
                        let (c, fg) = cell.glyph.unwrap_or((' ', cell.background));
                        if current != Some((cell.background, fg)) {
                            writer.queue(SetBackgroundColor(to_color(cell.background)))?;
                            writer.queue(SetForegroundColor(to_color(fg)))?;
                            current = Some((cell.background, fg));
                        }
                        writer.queue(Print(c))?;
                    }
                    ColorMode::Ascii => {
                        let c = match cell.glyph {
                            Some((c, _)) => c,
                            None if cell.background == self.clear_color => ' ',
                            None => ramp_char(cell.background),
                        };
                        writer.queue(Print(c))?;
                    }
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for AsciiRenderer {
    /// Even-odd scanline fill sampled at cell centres
    fn draw_polygon(&mut self, points: &[ScreenPoint], color: Rgb, alpha: u8) {
        if points.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }

        let ys = points.iter().map(|p| p.y as f64);
        let min_y = ys.clone().fold(f64::INFINITY, f64::min);
        let max_y = ys.fold(f64::NEG_INFINITY, f64::max);
        let cell_h = CELL_HEIGHT as f64;
        let first_row = ((min_y / cell_h) - 0.5).ceil().max(0.0);
        let last_row = ((max_y / cell_h) - 0.5).floor().min(self.height as f64 - 1.0);
        if last_row < first_row {
            return;
        }

        let mut crossings = Vec::with_capacity(points.len());
        for row in first_row as usize..=last_row as usize {
            let sample_y = (row as f64 + 0.5) * cell_h;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let (ay, by) = (a.y as f64, b.y as f64);
                if (ay <= sample_y && sample_y < by) || (by <= sample_y && sample_y < ay) {
                    let t = (sample_y - ay) / (by - ay);
                    crossings.push(a.x as f64 + t * (b.x as f64 - a.x as f64));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for span in crossings.chunks_exact(2) {
                self.fill_span(row, span[0], span[1], color, alpha);
            }
        }
    }

    /// Bresenham between cell centres; `thickness` is ignored because one
    /// cell is already wider than any line the shapes ask for
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb, _thickness: u32) {
        let glyph = slope_char(from, to);
        let start = (
            from.x as f64 / CELL_WIDTH as f64,
            from.y as f64 / CELL_HEIGHT as f64,
        );
        let end = (
            to.x as f64 / CELL_WIDTH as f64,
            to.y as f64 / CELL_HEIGHT as f64,
        );
        let Some((start, end)) = clip_line(start, end, self.width, self.height) else {
            return;
        };

        let (mut x0, mut y0) = (start.0.floor() as isize, start.1.floor() as isize);
        let (x1, y1) = (end.0.floor() as isize, end.1.floor() as isize);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if x0 >= 0 && x0 < self.width as isize && y0 >= 0 && y0 < self.height as isize {
                self.cells[y0 as usize * self.width + x0 as usize].glyph = Some((glyph, color));
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn ramp_char(color: Rgb) -> char {
    let index = (color.luminance() * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Glyph approximating the on-screen direction of a segment
fn slope_char(from: ScreenPoint, to: ScreenPoint) -> char {
    let dx = (to.x as f64) - (from.x as f64);
    let dy = (from.y as f64) - (to.y as f64);
    if dx == 0.0 && dy == 0.0 {
        return '*';
    }
    let angle = dy.atan2(dx).to_degrees().rem_euclid(180.0);
    match angle {
        a if a < 22.5 || a >= 157.5 => '-',
        a if a < 67.5 => '/',
        a if a < 112.5 => '|',
        _ => '\\',
    }
}

/// Liang-Barsky clip of a segment (in cell units) to the grid rectangle
fn clip_line(
    start: (f64, f64),
    end: (f64, f64),
    width: usize,
    height: usize,
) -> Option<((f64, f64), (f64, f64))> {
    if width == 0 || height == 0 {
        return None;
    }
    // keep strictly inside so floor() never lands on width/height
    let (x_min, y_min) = (0.0, 0.0);
    let x_max = width as f64 - 1e-6;
    let y_max = height as f64 - 1e-6;

    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in [
        (-dx, start.0 - x_min),
        (dx, x_max - start.0),
        (-dy, start.1 - y_min),
        (dy, y_max - start.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    if t0 > t1 {
        return None;
    }
    Some((
        (start.0 + t0 * dx, start.1 + t0 * dy),
        (start.0 + t1 * dx, start.1 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(col: f64, row: f64) -> ScreenPoint {
        ScreenPoint::new(
            (col * CELL_WIDTH as f64) as i32,
            (row * CELL_HEIGHT as f64) as i32,
        )
    }

    #[test]
    fn test_viewport_is_virtual_pixels() {
        let renderer = AsciiRenderer::new(80, 24);
        assert_eq!(renderer.viewport(), Viewport::new(640, 384));
    }

    #[test]
    fn test_polygon_fills_interior_cells() {
        let mut renderer = AsciiRenderer::new(10, 10);
        let square = [px(2.0, 2.0), px(6.0, 2.0), px(6.0, 6.0), px(2.0, 6.0)];
        renderer.draw_polygon(&square, Rgb::RED, 255);

        for y in 0..10 {
            for x in 0..10 {
                let inside = (2..6).contains(&x) && (2..6).contains(&y);
                let cell = renderer.cell(x, y).unwrap();
                assert_eq!(cell.background == Rgb::RED, inside, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_translucent_polygon_blends() {
        let mut renderer = AsciiRenderer::new(4, 4);
        let all = [px(0.0, 0.0), px(4.0, 0.0), px(4.0, 4.0), px(0.0, 4.0)];
        renderer.draw_polygon(&all, Rgb::BLACK, 255);
        renderer.draw_polygon(&all, Rgb::WHITE, 128);
        assert_eq!(
            renderer.cell(1, 1).unwrap().background,
            Rgb::new(128, 128, 128)
        );
    }

    #[test]
    fn test_later_fill_covers_earlier_line() {
        let mut renderer = AsciiRenderer::new(10, 4);
        renderer.draw_line(px(0.5, 1.5), px(9.5, 1.5), Rgb::BLACK, 2);
        assert_eq!(renderer.cell(5, 1).unwrap().glyph, Some(('-', Rgb::BLACK)));

        let block = [px(4.0, 0.0), px(7.0, 0.0), px(7.0, 4.0), px(4.0, 4.0)];
        renderer.draw_polygon(&block, Rgb::GREY, 255);
        assert_eq!(renderer.cell(5, 1).unwrap().glyph, None);
        assert_eq!(renderer.cell(2, 1).unwrap().glyph, Some(('-', Rgb::BLACK)));
    }

    #[test]
    fn test_line_glyphs_follow_slope() {
        let a = ScreenPoint::new(0, 0);
        assert_eq!(slope_char(a, ScreenPoint::new(10, 0)), '-');
        assert_eq!(slope_char(a, ScreenPoint::new(0, 10)), '|');
        assert_eq!(slope_char(a, ScreenPoint::new(10, -10)), '/');
        assert_eq!(slope_char(a, ScreenPoint::new(10, 10)), '\\');
        assert_eq!(slope_char(a, a), '*');
    }

    #[test]
    fn test_far_off_screen_line_is_clipped() {
        let mut renderer = AsciiRenderer::new(20, 10);
        // crosses the whole grid from huge coordinates
        renderer.draw_line(
            ScreenPoint::new(-2_000_000_000, 80),
            ScreenPoint::new(2_000_000_000, 80),
            Rgb::BLUE,
            2,
        );
        for x in 0..20 {
            assert!(renderer.cell(x, 5).unwrap().glyph.is_some());
        }
        // entirely outside
        renderer.clear();
        renderer.draw_line(
            ScreenPoint::new(-500, -500),
            ScreenPoint::new(-10, -900),
            Rgb::BLUE,
            2,
        );
        assert!((0..10).all(|y| (0..20).all(|x| renderer.cell(x, y).unwrap().glyph.is_none())));
    }

    #[test]
    fn test_degenerate_polygon_is_ignored() {
        let mut renderer = AsciiRenderer::new(4, 4);
        renderer.draw_polygon(&[px(0.0, 0.0), px(3.0, 3.0)], Rgb::RED, 255);
        assert!(renderer
            .cells
            .iter()
            .all(|c| c.background == Rgb::BACKGROUND));
    }

    #[test]
    fn test_ascii_mode_uses_ramp() {
        let mut renderer = AsciiRenderer::with_mode(3, 1, ColorMode::Ascii);
        renderer.draw_polygon(
            &[px(0.0, 0.0), px(1.0, 0.0), px(1.0, 1.0), px(0.0, 1.0)],
            Rgb::WHITE,
            255,
        );
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('@'));
    }

    #[test]
    fn test_clear_resets_cells() {
        let mut renderer = AsciiRenderer::new(4, 4);
        renderer.draw_line(px(0.5, 0.5), px(3.5, 3.5), Rgb::RED, 2);
        renderer.clear();
        assert!(renderer
            .cells
            .iter()
            .all(|c| c.glyph.is_none() && c.background == Rgb::BACKGROUND));
    }
}
