use super::money::Hours;
use serde::{Deserialize, Serialize};

/// One row of tracked work, as read from a time-tracking export.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ActivityRecord {
    pub project: String,
    pub worker: String,
    pub activity: String,
    pub hours: Hours,
}

impl ActivityRecord {
    pub fn new(
        project: impl Into<String>,
        worker: impl Into<String>,
        activity: impl Into<String>,
        hours: Hours,
    ) -> Self {
        Self {
            project: project.into(),
            worker: worker.into(),
            activity: activity.into(),
            hours,
        }
    }
}

/// Why a CSV row was left out of the parsed records.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SkipReason {
    MissingProject,
    MissingWorker,
    InvalidHours,
    TooFewColumns,
    Unreadable,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            SkipReason::MissingProject => "missing project",
            SkipReason::MissingWorker => "missing worker",
            SkipReason::InvalidHours => "hours not a non-negative number",
            SkipReason::TooFewColumns => "too few columns",
            SkipReason::Unreadable => "row could not be decoded",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SkippedRow {
    /// 1-based line number in the source text.
    pub line: u64,
    pub reason: SkipReason,
}

/// Records parsed from one or more CSV sources plus the rows that were dropped.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ParsedActivities {
    pub records: Vec<ActivityRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl ParsedActivities {
    /// Appends another source's results, keeping source order.
    pub fn extend(&mut self, other: ParsedActivities) {
        self.records.extend(other.records);
        self.skipped.extend(other.skipped);
    }

    /// Distinct worker names in order of first appearance.
    pub fn workers(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.worker.as_str()))
            .map(|r| r.worker.clone())
            .collect()
    }
}
