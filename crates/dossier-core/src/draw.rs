//! Recorded drawing operations for dossier pages
//!
//! The composer records every primitive into a [`DrawLog`] before anything is
//! serialized. Coordinates are millimetres from the top-left corner of an A4
//! page; text origins are baselines.

use serde::{Deserialize, Serialize};

use crate::error::DossierError;
use crate::style::{Align, Rgb, TextStyle};

pub type PageNo = u32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawOp {
    FillRect {
        page: PageNo,
        rect: Rect,
        color: Rgb,
    },
    FillRoundedRect {
        page: PageNo,
        rect: Rect,
        radius: f32,
        color: Rgb,
    },
    Line {
        page: PageNo,
        from: Point,
        to: Point,
        color: Rgb,
        width: f32,
    },
    /// Cubic bezier stroke
    Curve {
        page: PageNo,
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
        color: Rgb,
        width: f32,
    },
    FillCircle {
        page: PageNo,
        center: Point,
        radius: f32,
        color: Rgb,
    },
    Text {
        page: PageNo,
        origin: Point,
        text: String,
        style: TextStyle,
        #[serde(default)]
        align: Align,
    },
}

impl DrawOp {
    pub fn page(&self) -> PageNo {
        match self {
            DrawOp::FillRect { page, .. } => *page,
            DrawOp::FillRoundedRect { page, .. } => *page,
            DrawOp::Line { page, .. } => *page,
            DrawOp::Curve { page, .. } => *page,
            DrawOp::FillCircle { page, .. } => *page,
            DrawOp::Text { page, .. } => *page,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawLog {
    page_count: u32,
    operations: Vec<DrawOp>,
}

impl DrawLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new page and return its 1-based number
    pub fn add_page(&mut self) -> PageNo {
        self.page_count += 1;
        self.page_count
    }

    pub fn push(&mut self, op: DrawOp) -> Result<(), DossierError> {
        let page = op.page();
        if page == 0 || page > self.page_count {
            return Err(DossierError::Layout(format!(
                "Draw operation targets page {} but {} page(s) exist",
                page, self.page_count
            )));
        }
        self.operations.push(op);
        Ok(())
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn operations(&self) -> &[DrawOp] {
        &self.operations
    }

    pub fn operations_for_page(&self, page: PageNo) -> Vec<&DrawOp> {
        self.operations
            .iter()
            .filter(|op| op.page() == page)
            .collect()
    }

    /// Text strings placed on a page, in drawing order
    pub fn texts_on_page(&self, page: PageNo) -> Vec<&str> {
        self.operations
            .iter()
            .filter(|op| op.page() == page)
            .filter_map(DrawOp::text)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
