use super::metrics::text_width;
use crate::domain::document::{
    DrawOp, FontWeight, InvoiceDocument, MARGIN, PAGE_HEIGHT, Page, Rgb,
};

/// Top of the content area on a continuation page.
pub const TOP: f32 = 20.0;
/// Lowest y any element may reach.
pub const BOTTOM: f32 = PAGE_HEIGHT - MARGIN;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            color: Rgb::INK,
        }
    }

    pub fn color(self, color: Rgb) -> Self {
        Self { color, ..self }
    }

    pub fn bold(self) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Appends draw operations page by page.
///
/// There is always a current page; earlier pages are closed and never
/// touched again.
#[derive(Debug)]
pub struct DocumentBuilder {
    title: String,
    done: Vec<Page>,
    current: Page,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            done: Vec::new(),
            current: Page::default(),
        }
    }

    pub fn add_page(&mut self) {
        self.done.push(std::mem::take(&mut self.current));
    }

    pub fn page_count(&self) -> usize {
        self.done.len() + 1
    }

    /// Starts a new page when `height` more millimetres would not fit below
    /// `y`. Returns the y to continue from.
    pub fn ensure_space(&mut self, y: f32, height: f32) -> f32 {
        if y + height > BOTTOM {
            self.add_page();
            TOP
        } else {
            y
        }
    }

    pub fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        self.text_aligned(x, y, text, style, Align::Left);
    }

    /// Draws `text` anchored at `x`: its left edge, centre or right edge.
    pub fn text_aligned(&mut self, x: f32, y: f32, text: &str, style: TextStyle, align: Align) {
        if text.is_empty() {
            return;
        }
        let bold = style.weight == FontWeight::Bold;
        let x = match align {
            Align::Left => x,
            Align::Center => x - text_width(text, style.size, bold) / 2.0,
            Align::Right => x - text_width(text, style.size, bold),
        };
        self.current.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            size: style.size,
            weight: style.weight,
            color: style.color,
        });
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgb) {
        self.current.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb) {
        self.current.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }

    pub fn finish(mut self) -> InvoiceDocument {
        self.done.push(self.current);
        InvoiceDocument {
            title: self.title,
            pages: self.done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_are_kept_in_order() {
        let mut doc = DocumentBuilder::new("t");
        doc.text(10.0, 10.0, "first", TextStyle::new(10.0));
        doc.add_page();
        doc.text(10.0, 10.0, "second", TextStyle::new(10.0));
        assert_eq!(doc.page_count(), 2);

        let document = doc.finish();
        assert_eq!(document.page_count(), 2);
        assert!(document.pages[0].contains_text("first"));
        assert!(document.pages[1].contains_text("second"));
    }

    #[test]
    fn test_ensure_space_breaks_page() {
        let mut doc = DocumentBuilder::new("t");
        assert_eq!(doc.ensure_space(100.0, 8.0), 100.0);
        assert_eq!(doc.ensure_space(BOTTOM - 4.0, 8.0), TOP);
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_right_alignment_ends_at_anchor() {
        let mut doc = DocumentBuilder::new("t");
        let style = TextStyle::new(10.0);
        doc.text_aligned(100.0, 10.0, "12.50", style, Align::Right);
        let document = doc.finish();
        match &document.pages[0].ops[0] {
            DrawOp::Text { x, .. } => {
                let width = text_width("12.50", 10.0, false);
                assert!((x + width - 100.0).abs() < 1e-4);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_empty_text_is_not_drawn() {
        let mut doc = DocumentBuilder::new("t");
        doc.text(0.0, 0.0, "", TextStyle::new(10.0));
        assert!(doc.finish().pages[0].ops.is_empty());
    }
}
