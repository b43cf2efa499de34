use crate::domain::ports::CsvSource;
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;

/// A CSV file on disk, read with `tokio::fs`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CsvSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_text(&self) -> io::Result<String> {
        let bytes = tokio::fs::read(&self.path).await?;
        // Exports from spreadsheet tools are not always valid UTF-8.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
