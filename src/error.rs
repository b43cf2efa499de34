use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum InvoiceError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Settings error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),
    #[error("PDF error: {0}")]
    PdfError(String),
    #[error("Failed to read '{source_name}': {reason}")]
    SourceError { source_name: String, reason: String },
    #[error("Invalid month '{0}', expected yyyy-MM")]
    InvalidMonth(String),
    #[error("Unknown project '{0}'")]
    UnknownProject(String),
    #[error("No projects to invoice")]
    NoProjects,
    #[error("Missing '{0}' column in CSV header")]
    MissingColumn(&'static str),
    #[error("Invalid assignment '{0}', expected NAME=VALUE")]
    InvalidAssignment(String),
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
