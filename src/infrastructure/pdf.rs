use crate::domain::document::{DrawOp, FontWeight, InvoiceDocument, PAGE_HEIGHT, PAGE_WIDTH, Page, Rgb};
use crate::domain::ports::DocumentEncoder;
use crate::error::{InvoiceError, Result};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
};
use std::io::BufWriter;
use tracing::debug;

const LAYER: &str = "Layer 1";

/// Renders documents with printpdf using the built-in Helvetica faces.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfEncoder;

impl PdfEncoder {
    pub fn new() -> Self {
        Self
    }
}

fn pdf_error(e: impl ToString) -> InvoiceError {
    InvoiceError::PdfError(e.to_string())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        f32::from(rgb.0) / 255.0,
        f32::from(rgb.1) / 255.0,
        f32::from(rgb.2) / 255.0,
        None,
    ))
}

/// printpdf measures from the bottom-left corner.
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn draw_page(layer: &PdfLayerReference, fonts: &Fonts, page: &Page) {
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                text,
                size,
                weight,
                color: ink,
            } => {
                let font = match weight {
                    FontWeight::Regular => &fonts.regular,
                    FontWeight::Bold => &fonts.bold,
                };
                layer.set_fill_color(color(*ink));
                layer.use_text(text.as_str(), *size, Mm(*x), flip(*y), font);
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                layer.set_fill_color(color(*fill));
                let rect = Rect::new(Mm(*x), flip(y + height), Mm(x + width), flip(*y))
                    .with_mode(PaintMode::Fill);
                layer.add_rect(rect);
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color: stroke,
            } => {
                layer.set_outline_color(color(*stroke));
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x1), flip(*y1)), false),
                        (Point::new(Mm(*x2), flip(*y2)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }
}

impl DocumentEncoder for PdfEncoder {
    fn encode(&self, document: &InvoiceDocument) -> Result<Vec<u8>> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(&document.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_error)?,
        };

        for (index, page) in document.pages.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER)
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);
            draw_page(&layer, &fonts, page);
        }

        let mut writer = BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer).map_err(pdf_error)?;
        let bytes = writer.into_inner().map_err(pdf_error)?;
        debug!(
            title = %document.title,
            pages = document.page_count(),
            bytes = bytes.len(),
            "Encoded PDF"
        );
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}
