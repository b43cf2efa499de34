use crate::error::Result;
use crate::interfaces::csv::toptal_reader::{ConvertedEntry, parse_toptal};
use crate::interfaces::csv::toptal_writer::{detail_csv, summary_csv};
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub const DEFAULT_SOURCE: &str = "Toptal";

/// One CSV file destined for the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvArtifact {
    pub file_name: String,
    pub content: String,
}

/// Every file produced from one export, plus how many rows were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedBundle {
    pub label: String,
    pub files: Vec<CsvArtifact>,
    pub skipped: usize,
}

impl ConvertedBundle {
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.label)
    }
}

/// `<source> <period>`, e.g. `Toptal January 2025`.
pub fn bundle_label(source: &str, period: &str) -> String {
    format!("{} {}", source.trim(), period.trim())
        .trim()
        .to_string()
}

/// Worker names become file names; keep them to a single path component.
fn file_safe(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

const SUMMARY_STEM: &str = "Summary";
const COMBINED_STEM: &str = "Combined";

/// `base`, or `base (2)`, `base (3)`... when that stem is already taken.
fn unique_stem(base: String, taken: &mut HashSet<String>) -> String {
    let mut stem = base.clone();
    let mut n = 2;
    while !taken.insert(stem.clone()) {
        stem = format!("{base} ({n})");
        n += 1;
    }
    stem
}

/// Distinct workers in order of first appearance.
fn workers(entries: &[ConvertedEntry]) -> Vec<&str> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|e| e.worker.as_str())
        .filter(|w| seen.insert(*w))
        .collect()
}

/// Parses an export and produces the per-worker, summary and combined files.
pub fn convert(text: &str, source: &str, period: &str) -> Result<ConvertedBundle> {
    let batch = parse_toptal(text, period)?;
    if batch.skipped > 0 {
        warn!(skipped = batch.skipped, "Dropped short rows from export");
    }

    let label = bundle_label(source, period);
    let mut files = Vec::new();
    let mut taken: HashSet<String> = [SUMMARY_STEM, COMBINED_STEM]
        .into_iter()
        .map(String::from)
        .collect();

    for worker in workers(&batch.entries) {
        let content = detail_csv(batch.entries.iter().filter(|e| e.worker == worker))?;
        let stem = unique_stem(file_safe(worker), &mut taken);
        if stem != worker {
            debug!(worker, file = %stem, "Renamed worker file");
        }
        files.push(CsvArtifact {
            file_name: format!("{stem} - {label}.csv"),
            content,
        });
    }
    files.push(CsvArtifact {
        file_name: format!("{SUMMARY_STEM} - {label}.csv"),
        content: summary_csv(&batch.entries)?,
    });
    files.push(CsvArtifact {
        file_name: format!("{COMBINED_STEM} - {label}.csv"),
        content: detail_csv(&batch.entries)?,
    });

    info!(
        label = %label,
        entries = batch.entries.len(),
        files = files.len(),
        "Converted export"
    );
    Ok(ConvertedBundle {
        label,
        files,
        skipped: batch.skipped,
    })
}
