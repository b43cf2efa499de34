use crate::domain::activity::{ActivityRecord, ParsedActivities, SkipReason, SkippedRow};
use crate::domain::money::Hours;
use crate::error::{InvoiceError, Result};
use std::io::Read;

const PROJECT: usize = 0;
const WORKER: usize = 1;
const ACTIVITY: usize = 2;
const HOURS: usize = 4;

/// Reads activity records from a positional time-tracking CSV export.
///
/// The first line is a header and is never read as data. Columns are taken
/// by position (`project, worker, activity, <unused>, hours`), fields are
/// split on commas with quoting disabled, and rows that cannot produce a
/// record are dropped and reported in [`ParsedActivities::skipped`].
pub struct ActivityReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActivityReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Reads every row. Only I/O failures are returned as errors.
    pub fn read_all(mut self) -> Result<ParsedActivities> {
        let mut parsed = ParsedActivities::default();

        for result in self.reader.records() {
            match result {
                Ok(row) => {
                    let line = row.position().map(|p| p.line()).unwrap_or_default();
                    match to_record(&row) {
                        Ok(record) => parsed.records.push(record),
                        Err(reason) => parsed.skipped.push(SkippedRow { line, reason }),
                    }
                }
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(InvoiceError::from(e));
                }
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or_default();
                    parsed.skipped.push(SkippedRow {
                        line,
                        reason: SkipReason::Unreadable,
                    });
                }
            }
        }

        Ok(parsed)
    }
}

fn to_record(row: &csv::StringRecord) -> std::result::Result<ActivityRecord, SkipReason> {
    let field = |index: usize| row.get(index).unwrap_or_default();

    if field(PROJECT).is_empty() {
        return Err(SkipReason::MissingProject);
    }
    if field(WORKER).is_empty() {
        return Err(SkipReason::MissingWorker);
    }
    if row.len() <= HOURS {
        return Err(SkipReason::TooFewColumns);
    }
    let hours = Hours::parse(field(HOURS)).ok_or(SkipReason::InvalidHours)?;

    Ok(ActivityRecord::new(
        field(PROJECT),
        field(WORKER),
        field(ACTIVITY),
        hours,
    ))
}

/// Parses CSV text already held in memory.
pub fn parse_activities(text: &str) -> Result<ParsedActivities> {
    ActivityReader::new(text.as_bytes()).read_all()
}
