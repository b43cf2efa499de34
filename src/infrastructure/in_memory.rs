use crate::domain::ports::CsvSource;
use async_trait::async_trait;
use std::io;

/// CSV text held in memory, e.g. piped input or test fixtures.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    text: String,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl CsvSource for InMemorySource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn read_text(&self) -> io::Result<String> {
        Ok(self.text.clone())
    }
}
