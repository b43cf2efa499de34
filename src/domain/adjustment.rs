use super::money::{Hours, Money, parse_or_zero};
use std::collections::BTreeMap;

/// User-entered overrides that change displayed totals without touching the
/// underlying records.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Adjustments {
    deductions: BTreeMap<String, Money>,
    hours_overrides: BTreeMap<String, Hours>,
}

impl Adjustments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flat deduction for a project. Zero or negative values clear it.
    pub fn set_deduction(&mut self, project: impl Into<String>, amount: Money) {
        let project = project.into();
        if amount.is_positive() {
            self.deductions.insert(project, amount);
        } else {
            self.deductions.remove(&project);
        }
    }

    /// Same as [`Adjustments::set_deduction`] for raw form input; anything
    /// unparseable counts as zero.
    pub fn set_deduction_input(&mut self, project: impl Into<String>, raw: &str) {
        self.set_deduction(project, Money::new(parse_or_zero(raw)));
    }

    /// Replaces a worker's combined hours across the selected projects.
    /// A zero (or negative) override means "no override".
    pub fn set_hours_override(&mut self, worker: impl Into<String>, hours: Hours) {
        let worker = worker.into();
        if hours.value().is_sign_positive() && !hours.is_zero() {
            self.hours_overrides.insert(worker, hours);
        } else {
            self.hours_overrides.remove(&worker);
        }
    }

    pub fn set_hours_input(&mut self, worker: impl Into<String>, raw: &str) {
        self.set_hours_override(worker, Hours::new(parse_or_zero(raw)));
    }

    pub fn deduction_for(&self, project: &str) -> Money {
        self.deductions.get(project).copied().unwrap_or(Money::ZERO)
    }

    /// The override for `worker`, or `working` when none is set.
    pub fn adjusted_hours(&self, worker: &str, working: Hours) -> Hours {
        self.hours_overrides.get(worker).copied().unwrap_or(working)
    }

    pub fn has_hours_override(&self, worker: &str) -> bool {
        self.hours_overrides.contains_key(worker)
    }
}
