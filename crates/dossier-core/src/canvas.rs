//! Page drawing surface and vertical layout cursor

use crate::draw::{DrawLog, DrawOp, PageNo, Point, Rect};
use crate::error::DossierError;
use crate::metrics;
use crate::style::{Align, Rgb, TextStyle};

/// A4 portrait, millimetres
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

/// Current vertical offset on a page.
///
/// Blocks read `y()` for their top edge or baseline and advance the cursor by
/// the space they consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    y: f32,
}

impl Cursor {
    pub const fn at(y: f32) -> Self {
        Self { y }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Move down by `dy` and return the new offset
    pub fn advance(&mut self, dy: f32) -> f32 {
        self.y += dy;
        self.y
    }

    /// Offset `dy` below the cursor without moving it
    pub fn below(&self, dy: f32) -> f32 {
        self.y + dy
    }
}

#[derive(Debug, Default)]
pub struct Canvas {
    log: DrawLog,
    page: PageNo,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&mut self) -> PageNo {
        self.page = self.log.add_page();
        self.page
    }

    pub fn page(&self) -> PageNo {
        self.page
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<(), DossierError> {
        self.log.push(DrawOp::FillRect {
            page: self.page,
            rect,
            color,
        })
    }

    pub fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        color: Rgb,
    ) -> Result<(), DossierError> {
        self.log.push(DrawOp::FillRoundedRect {
            page: self.page,
            rect,
            radius,
            color,
        })
    }

    pub fn line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb,
        width: f32,
    ) -> Result<(), DossierError> {
        self.log.push(DrawOp::Line {
            page: self.page,
            from,
            to,
            color,
            width,
        })
    }

    pub fn curve(
        &mut self,
        points: [Point; 4],
        color: Rgb,
        width: f32,
    ) -> Result<(), DossierError> {
        let [from, ctrl1, ctrl2, to] = points;
        self.log.push(DrawOp::Curve {
            page: self.page,
            from,
            ctrl1,
            ctrl2,
            to,
            color,
            width,
        })
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb) -> Result<(), DossierError> {
        self.log.push(DrawOp::FillCircle {
            page: self.page,
            center,
            radius,
            color,
        })
    }

    pub fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) -> Result<(), DossierError> {
        self.place_text(x, y, text, style, Align::Left)
    }

    /// Text whose right edge sits at `x`
    pub fn text_right(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        style: TextStyle,
    ) -> Result<(), DossierError> {
        self.place_text(x, y, text, style, Align::Right)
    }

    /// Draw pre-wrapped lines from baseline `y`; returns the height consumed
    pub fn text_lines(
        &mut self,
        x: f32,
        y: f32,
        lines: &[String],
        style: TextStyle,
    ) -> Result<f32, DossierError> {
        let step = metrics::line_height(style.size);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            self.text(x, y + i as f32 * step, line, style)?;
        }
        Ok(lines.len() as f32 * step)
    }

    /// Wrap `text` for this style at `max_width` millimetres
    pub fn wrap(&self, text: &str, style: TextStyle, max_width: f32) -> Vec<String> {
        metrics::split_text_to_size(&metrics::normalize(text), style.face, style.size, max_width)
    }

    pub fn finish(self) -> DrawLog {
        self.log
    }

    fn place_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        style: TextStyle,
        align: Align,
    ) -> Result<(), DossierError> {
        self.log.push(DrawOp::Text {
            page: self.page,
            origin: Point::new(x, y),
            text: metrics::normalize(text),
            style,
            align,
        })
    }
}
