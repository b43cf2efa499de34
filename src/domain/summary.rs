use super::adjustment::Adjustments;
use super::aggregate::{ProjectTotals, WorkerSummary, combine_across_projects};
use super::money::{Hours, Money};
use super::rates::RateTable;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMemberRow {
    pub worker: String,
    pub working_hours: Hours,
    pub adjusted_hours: Hours,
    pub amount: Money,
    pub adjusted_amount: Money,
}

impl TeamMemberRow {
    /// Adjusted amount minus the original amount. Only the sign matters for
    /// display.
    pub fn difference(&self) -> Money {
        self.adjusted_amount - self.amount
    }
}

/// Worker hours across the selected projects, with hour overrides applied.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSummary {
    pub rows: Vec<TeamMemberRow>,
}

impl TeamSummary {
    pub fn build<S: AsRef<str>>(
        selected: &[S],
        totals: &ProjectTotals,
        rates: &RateTable,
        adjustments: &Adjustments,
    ) -> Self {
        let combined = combine_across_projects(selected, totals);
        let rows = combined
            .into_iter()
            .map(|(worker, WorkerSummary { total_hours, total_amount })| {
                let adjusted_hours = adjustments.adjusted_hours(&worker, total_hours);
                let adjusted_amount = adjusted_hours * rates.rate_for(&worker);
                TeamMemberRow {
                    worker,
                    working_hours: total_hours,
                    adjusted_hours,
                    amount: total_amount,
                    adjusted_amount,
                }
            })
            .collect();
        Self { rows }
    }

    pub fn working_hours(&self) -> Hours {
        self.rows.iter().map(|r| r.working_hours).sum()
    }

    pub fn adjusted_hours(&self) -> Hours {
        self.rows.iter().map(|r| r.adjusted_hours).sum()
    }

    pub fn adjusted_amount(&self) -> Money {
        self.rows.iter().map(|r| r.adjusted_amount).sum()
    }

    pub fn difference(&self) -> Money {
        self.rows.iter().map(TeamMemberRow::difference).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummaryRow {
    pub project: String,
    pub hours: Hours,
    pub amount: Money,
    pub deduction: Money,
}

impl ProjectSummaryRow {
    /// Project total minus its deduction.
    pub fn payable(&self) -> Money {
        self.amount - self.deduction
    }
}

/// The selected projects in selection order with their payable amounts.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectsSummary {
    pub rows: Vec<ProjectSummaryRow>,
}

impl ProjectsSummary {
    pub fn build<S: AsRef<str>>(
        selected: &[S],
        totals: &ProjectTotals,
        adjustments: &Adjustments,
    ) -> Self {
        let rows = selected
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                totals.get(name).map(|project| ProjectSummaryRow {
                    project: name.to_string(),
                    hours: project.total_hours,
                    amount: project.total_amount,
                    deduction: adjustments.deduction_for(name),
                })
            })
            .collect();
        Self { rows }
    }

    pub fn total_hours(&self) -> Hours {
        self.rows.iter().map(|r| r.hours).sum()
    }

    pub fn total_payable(&self) -> Money {
        self.rows.iter().map(ProjectSummaryRow::payable).sum()
    }
}
