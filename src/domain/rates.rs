use super::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hourly rate per worker name.
///
/// Workers without an entry are billed at a zero rate; a missing rate is
/// never an error.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<String, Money>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a zero-rate entry for every worker not yet in the table.
    /// Rates already known are kept, as are entries for workers absent
    /// from `workers`.
    pub fn seed<I, S>(&mut self, workers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for worker in workers {
            let worker = worker.into();
            if worker.is_empty() {
                continue;
            }
            self.rates.entry(worker).or_insert(Money::ZERO);
        }
    }

    /// Sets a rate. Negative rates are clamped to zero.
    pub fn set(&mut self, worker: impl Into<String>, rate: Money) {
        let rate = if rate.is_negative() { Money::ZERO } else { rate };
        self.rates.insert(worker.into(), rate);
    }

    pub fn remove(&mut self, worker: &str) -> Option<Money> {
        self.rates.remove(worker)
    }

    pub fn rate_for(&self, worker: &str) -> Money {
        self.rates.get(worker).copied().unwrap_or(Money::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Money)> {
        self.rates.iter()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(String, Money)> for RateTable {
    fn from_iter<T: IntoIterator<Item = (String, Money)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (worker, rate) in iter {
            table.set(worker, rate);
        }
        table
    }
}
