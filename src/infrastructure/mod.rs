//! Concrete adapters: CSV sources, document encoders and archive packing.

pub mod archive;
pub mod file_source;
pub mod in_memory;
pub mod json;
pub mod pdf;

use crate::domain::ports::DocumentEncoderBox;
use clap::ValueEnum;

/// Output format for rendered invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pdf,
    Json,
}

impl OutputFormat {
    pub fn encoder(self) -> DocumentEncoderBox {
        match self {
            Self::Pdf => Box::new(pdf::PdfEncoder::new()),
            Self::Json => Box::new(json::JsonEncoder),
        }
    }
}
