use serde::Serialize;

/// A4 portrait, in millimetres.
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const INK: Self = Self(33, 33, 33);
    pub const BLACK: Self = Self(0, 0, 0);
    pub const WHITE: Self = Self(255, 255, 255);
    pub const HEADER: Self = Self(51, 101, 138);
    pub const STRIPE: Self = Self(247, 247, 247);
    pub const TOTALS: Self = Self(240, 240, 240);
    pub const RULE: Self = Self(230, 230, 230);
    pub const GREEN: Self = Self(39, 174, 96);
    pub const RED: Self = Self(255, 0, 0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Regular,
    Bold,
}

/// One absolutely positioned drawing instruction.
///
/// Coordinates are millimetres from the top-left corner of the page; text
/// `y` is the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        weight: FontWeight,
        color: Rgb,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// All text drawn on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

/// The pages of one invoice, ready to be encoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDocument {
    pub title: String,
    pub pages: Vec<Page>,
}

impl InvoiceDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
