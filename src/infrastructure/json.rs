use crate::domain::document::InvoiceDocument;
use crate::domain::ports::DocumentEncoder;
use crate::error::Result;

/// Dumps the laid-out draw operations as pretty JSON. Useful for inspecting
/// a layout without a PDF viewer.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonEncoder;

impl DocumentEncoder for JsonEncoder {
    fn encode(&self, document: &InvoiceDocument) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(document)?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
