use super::document::InvoiceDocument;
use crate::error::Result;
use async_trait::async_trait;
use std::io;
use std::sync::Arc;

/// Somewhere raw CSV text can be read from.
#[async_trait]
pub trait CsvSource: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> String;
    async fn read_text(&self) -> io::Result<String>;
}

pub type CsvSourceRef = Arc<dyn CsvSource>;

/// Serialises a laid-out invoice into a downloadable file.
pub trait DocumentEncoder {
    fn encode(&self, document: &InvoiceDocument) -> Result<Vec<u8>>;
    /// File extension without the dot.
    fn extension(&self) -> &'static str;
}

pub type DocumentEncoderBox = Box<dyn DocumentEncoder>;
