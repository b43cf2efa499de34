use crate::domain::money::{Hours, within_limit};
use crate::error::{InvoiceError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;

/// One (project, worker, activity) group from a TopTracker export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedEntry {
    pub project: String,
    pub worker: String,
    pub activity: String,
    /// Raw tracked duration in hours.
    pub duration: Hours,
    /// Billable hours: each row's duration rounded to two places, then summed.
    pub hours: Hours,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConvertedBatch {
    /// Groups in order of first appearance.
    pub entries: Vec<ConvertedEntry>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    duration: usize,
    project: usize,
    worker: usize,
    activity: usize,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &'static str, is_match: &dyn Fn(&str) -> bool| {
            lowered
                .iter()
                .position(|h| is_match(h))
                .ok_or(InvoiceError::MissingColumn(name))
        };

        Ok(Self {
            duration: find("duration", &|h| h == "d" || h.contains("duration"))?,
            project: find("project", &|h| h.contains("project"))?,
            worker: find("worker", &|h| h.contains("worker"))?,
            activity: find("activity", &|h| h.contains("activity"))?,
        })
    }

    fn widest(&self) -> usize {
        self.duration
            .max(self.project)
            .max(self.worker)
            .max(self.activity)
    }
}

/// Reads a TopTracker CSV export, resolving columns by header name.
pub struct ToptalReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ToptalReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Reads and groups every row, suffixing project names with ` - <period>`.
    pub fn read_entries(mut self, period: &str) -> Result<ConvertedBatch> {
        let columns = ColumnMap::resolve(self.reader.headers()?)?;
        let period = period.trim();

        let mut batch = ConvertedBatch::default();
        let mut index: HashMap<(String, String, String), usize> = HashMap::new();

        for result in self.reader.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
                Err(_) => {
                    batch.skipped += 1;
                    continue;
                }
            };
            if row.len() <= columns.widest() {
                batch.skipped += 1;
                continue;
            }

            let project = if period.is_empty() {
                row[columns.project].to_string()
            } else {
                format!("{} - {}", &row[columns.project], period)
            };
            let worker = row[columns.worker].to_string();
            let activity = row[columns.activity].to_string();
            let duration = parse_duration(&row[columns.duration]);
            let hours = duration.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

            let key = (project, worker, activity);
            match index.get(&key) {
                Some(&i) => {
                    let entry = &mut batch.entries[i];
                    entry.duration += Hours::new(duration);
                    entry.hours += Hours::new(hours);
                }
                None => {
                    index.insert(key.clone(), batch.entries.len());
                    let (project, worker, activity) = key;
                    batch.entries.push(ConvertedEntry {
                        project,
                        worker,
                        activity,
                        duration: Hours::new(duration),
                        hours: Hours::new(hours),
                    });
                }
            }
        }

        Ok(batch)
    }
}

/// Decimal hours (`1.5`) or a clock duration (`1:30:00`, `1:30`).
/// Anything unparseable or beyond `INPUT_LIMIT` hours is zero.
fn parse_duration(raw: &str) -> Decimal {
    let raw = raw.trim();
    let hours = if raw.contains(':') {
        clock_hours(raw)
    } else {
        Decimal::from_str(raw).ok()
    };
    hours.and_then(within_limit).unwrap_or(Decimal::ZERO)
}

fn clock_hours(raw: &str) -> Option<Decimal> {
    let mut hours = Decimal::ZERO;
    let mut scale = Decimal::ONE;
    for part in raw.split(':').take(3) {
        let value = Decimal::from_str(part.trim()).ok()?;
        hours = hours.checked_add(value.checked_div(scale)?)?;
        scale = scale.checked_mul(dec!(60))?;
    }
    Some(hours)
}

/// Parses CSV text already held in memory.
pub fn parse_toptal(text: &str, period: &str) -> Result<ConvertedBatch> {
    ToptalReader::new(text.as_bytes()).read_entries(period)
}
