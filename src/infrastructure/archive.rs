use crate::application::converter::ConvertedBundle;
use crate::error::Result;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Packs every file of a bundle into an in-memory zip archive.
pub fn zip_bundle(bundle: &ConvertedBundle) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for file in &bundle.files {
        zip.start_file(file.file_name.as_str(), options)?;
        zip.write_all(file.content.as_bytes())?;
    }

    let bytes = zip.finish()?.into_inner();
    debug!(archive = %bundle.archive_name(), files = bundle.files.len(), bytes = bytes.len(), "Packed archive");
    Ok(bytes)
}
