use super::activity::ActivityRecord;
use super::money::{Hours, Money};
use super::rates::RateTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// Hours and amount accumulated for one worker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkerSummary {
    pub total_hours: Hours,
    pub total_amount: Money,
}

impl WorkerSummary {
    fn add(&mut self, hours: Hours, amount: Money) {
        self.total_hours += hours;
        self.total_amount += amount;
    }
}

/// An activity with the rate and amount applied at aggregation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedActivity {
    pub worker: String,
    pub activity: String,
    pub hours: Hours,
    pub rate: Money,
    pub amount: Money,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectAggregate {
    pub total_hours: Hours,
    pub total_amount: Money,
    /// In input order.
    pub activities: Vec<PricedActivity>,
    pub workers: BTreeMap<String, WorkerSummary>,
}

/// Per-project totals, keyed in sorted order so the result does not depend
/// on the order the records arrived in.
pub type ProjectTotals = BTreeMap<String, ProjectAggregate>;

/// Groups records by project and prices them with the current rates.
pub fn aggregate(records: &[ActivityRecord], rates: &RateTable) -> ProjectTotals {
    let mut totals = ProjectTotals::new();

    for record in records {
        let rate = rates.rate_for(&record.worker);
        let amount = record.hours * rate;

        let project = totals.entry(record.project.clone()).or_default();
        project.total_hours += record.hours;
        project.total_amount += amount;
        project.activities.push(PricedActivity {
            worker: record.worker.clone(),
            activity: record.activity.clone(),
            hours: record.hours,
            rate,
            amount,
        });
        project
            .workers
            .entry(record.worker.clone())
            .or_default()
            .add(record.hours, amount);
    }

    totals
}

/// Merges the per-worker summaries of the selected projects.
///
/// Names with no aggregate are ignored; callers validate the selection.
pub fn combine_across_projects<S: AsRef<str>>(
    selected: &[S],
    totals: &ProjectTotals,
) -> BTreeMap<String, WorkerSummary> {
    let mut combined: BTreeMap<String, WorkerSummary> = BTreeMap::new();

    for project in selected.iter().filter_map(|p| totals.get(p.as_ref())) {
        for (worker, summary) in &project.workers {
            combined
                .entry(worker.clone())
                .or_default()
                .add(summary.total_hours, summary.total_amount);
        }
    }

    combined
}
