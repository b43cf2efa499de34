use super::toptal_reader::ConvertedEntry;
use crate::domain::money::Hours;
use crate::error::{InvoiceError, Result};
use std::collections::HashMap;
use std::io::{self, Write};

pub const DETAIL_HEADER: [&str; 5] = ["Project", "Worker", "Activity", "Duration", "Upwork Hours"];
pub const SUMMARY_HEADER: [&str; 3] = ["Project", "Worker", "Total Upwork Hours"];

/// Writes converted entries as unquoted CSV.
///
/// Fields are never quoted so the detail files can be fed straight back into
/// the positional activity reader (hours land in column 4).
pub struct ToptalWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ToptalWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(sink);
        Self { writer }
    }

    /// Header plus one row per entry.
    pub fn write_detail<'a, I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a ConvertedEntry>,
    {
        self.writer.write_record(DETAIL_HEADER)?;
        for entry in entries {
            let duration = entry.duration.to_string();
            let hours = entry.hours.to_string();
            self.writer.write_record([
                entry.project.as_str(),
                entry.worker.as_str(),
                entry.activity.as_str(),
                duration.as_str(),
                hours.as_str(),
            ])?;
        }
        Ok(())
    }

    /// Header plus one row per (project, worker), in first-appearance order.
    pub fn write_summary(&mut self, entries: &[ConvertedEntry]) -> Result<()> {
        self.writer.write_record(SUMMARY_HEADER)?;
        for (project, worker, hours) in summarize(entries) {
            let hours = hours.to_string();
            self.writer.write_record([project, worker, hours.as_str()])?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| InvoiceError::from(io::Error::new(e.error().kind(), e.error().to_string())))
    }
}

fn summarize(entries: &[ConvertedEntry]) -> Vec<(&str, &str, Hours)> {
    let mut rows: Vec<(&str, &str, Hours)> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for entry in entries {
        let key = (entry.project.as_str(), entry.worker.as_str());
        match index.get(&key) {
            Some(&i) => rows[i].2 += entry.hours,
            None => {
                index.insert(key, rows.len());
                rows.push((key.0, key.1, entry.hours));
            }
        }
    }

    rows
}

fn to_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Detail CSV text for the given entries.
pub fn detail_csv<'a, I>(entries: I) -> Result<String>
where
    I: IntoIterator<Item = &'a ConvertedEntry>,
{
    let mut writer = ToptalWriter::new(Vec::new());
    writer.write_detail(entries)?;
    to_text(writer.into_inner()?)
}

/// Summary CSV text for the given entries.
pub fn summary_csv(entries: &[ConvertedEntry]) -> Result<String> {
    let mut writer = ToptalWriter::new(Vec::new());
    writer.write_summary(entries)?;
    to_text(writer.into_inner()?)
}
