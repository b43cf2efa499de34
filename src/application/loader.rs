use crate::domain::activity::ParsedActivities;
use crate::domain::ports::CsvSourceRef;
use crate::error::{InvoiceError, Result};
use crate::interfaces::csv::activity_reader::parse_activities;
use tracing::{debug, info, warn};

/// Reads every source concurrently and returns their texts in the order given.
///
/// All reads finish before anything is returned. If any of them failed the
/// whole load fails with the first failing source (in input order) named.
pub async fn read_all(sources: &[CsvSourceRef]) -> Result<Vec<(String, String)>> {
    let handles: Vec<_> = sources
        .iter()
        .cloned()
        .map(|source| {
            tokio::spawn(async move {
                let name = source.name();
                let text = source.read_text().await;
                (name, text)
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (handle, source) in handles.into_iter().zip(sources) {
        let result = match handle.await {
            Ok((name, Ok(text))) => {
                debug!(source = %name, bytes = text.len(), "Read source");
                Ok((name, text))
            }
            Ok((name, Err(e))) => Err(InvoiceError::SourceError {
                source_name: name,
                reason: e.to_string(),
            }),
            Err(e) => Err(InvoiceError::SourceError {
                source_name: source.name(),
                reason: e.to_string(),
            }),
        };
        results.push(result);
    }

    results.into_iter().collect()
}

/// Loads and parses activity CSVs, merging them in source order.
///
/// Dropped rows are logged per source; they never fail the load.
pub async fn load_activities(sources: &[CsvSourceRef]) -> Result<ParsedActivities> {
    let mut parsed = ParsedActivities::default();

    for (name, text) in read_all(sources).await? {
        let batch = parse_activities(&text)?;
        if !batch.skipped.is_empty() {
            warn!(
                source = %name,
                skipped = batch.skipped.len(),
                "Dropped malformed rows"
            );
            for row in &batch.skipped {
                debug!(source = %name, line = row.line, reason = %row.reason, "Skipped row");
            }
        }
        parsed.extend(batch);
    }

    info!(
        sources = sources.len(),
        records = parsed.records.len(),
        skipped = parsed.skipped.len(),
        "Loaded activities"
    );
    Ok(parsed)
}
