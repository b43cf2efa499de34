//! Invoice settings loaded from a JSON file and merged with command-line
//! overrides.

use super::invoice::InvoiceRequest;
use super::layout::RenderOptions;
use crate::domain::activity::ParsedActivities;
use crate::domain::adjustment::Adjustments;
use crate::domain::money::{Hours, Money, parse_or_zero, within_limit};
use crate::domain::month::InvoiceMonth;
use crate::domain::party::{ClientInfo, PayeeInfo};
use crate::domain::rates::RateTable;
use crate::error::{InvoiceError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Settings file contents. Every field is optional.
///
/// Figures may be written as numbers or numeric strings; anything else
/// counts as zero.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct InvoiceSettings {
    /// `yyyy-MM`; the current month when absent.
    pub month: Option<String>,
    pub client: ClientInfo,
    pub payee: PayeeInfo,
    pub rates: BTreeMap<String, Value>,
    pub deductions: BTreeMap<String, Value>,
    pub hours_overrides: BTreeMap<String, Value>,
    pub projects: Vec<String>,
    pub options: RenderOptions,
}

/// Values given on the command line. They win over the settings file key by
/// key.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub month: Option<InvoiceMonth>,
    pub rates: Vec<(String, String)>,
    pub deductions: Vec<(String, String)>,
    pub hours: Vec<(String, String)>,
    pub projects: Vec<String>,
}

fn lenient_decimal(key: &str, value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_or_zero(&n.to_string()),
        Value::String(s) => match s.trim().parse::<Decimal>() {
            Ok(parsed) => within_limit(parsed).unwrap_or(Decimal::ZERO),
            Err(_) => {
                if !s.trim().is_empty() {
                    warn!(key, value = %s, "Treating unparseable value as zero");
                }
                Decimal::ZERO
            }
        },
        Value::Null => Decimal::ZERO,
        other => {
            warn!(key, value = %other, "Treating non-numeric value as zero");
            Decimal::ZERO
        }
    }
}

impl InvoiceSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&text)?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    pub fn month(&self) -> Result<InvoiceMonth> {
        match &self.month {
            Some(raw) => raw.parse(),
            None => Ok(InvoiceMonth::current()),
        }
    }

    /// Rates from the file, then CLI rates, then every worker in the data
    /// seeded at zero if not already known.
    pub fn rate_table(&self, workers: &[String], overrides: &Overrides) -> RateTable {
        let mut rates = RateTable::new();
        for (worker, value) in &self.rates {
            rates.set(worker.clone(), Money::new(lenient_decimal(worker, value)));
        }
        for (worker, raw) in &overrides.rates {
            rates.set(worker.clone(), Money::new(parse_or_zero(raw)));
        }
        rates.seed(workers);
        rates
    }

    pub fn adjustments(&self, overrides: &Overrides) -> Adjustments {
        let mut adjustments = Adjustments::new();
        for (project, value) in &self.deductions {
            adjustments.set_deduction(project.clone(), Money::new(lenient_decimal(project, value)));
        }
        for (worker, value) in &self.hours_overrides {
            adjustments.set_hours_override(worker.clone(), Hours::new(lenient_decimal(worker, value)));
        }
        for (project, raw) in &overrides.deductions {
            adjustments.set_deduction_input(project.clone(), raw);
        }
        for (worker, raw) in &overrides.hours {
            adjustments.set_hours_input(worker.clone(), raw);
        }
        adjustments
    }

    /// Builds the request snapshot for one generation.
    pub fn into_request(self, parsed: ParsedActivities, overrides: &Overrides) -> Result<InvoiceRequest> {
        let month = match overrides.month {
            Some(month) => month,
            None => self.month()?,
        };
        let rates = self.rate_table(&parsed.workers(), overrides);
        let adjustments = self.adjustments(overrides);
        let selected = if overrides.projects.is_empty() {
            self.projects
        } else {
            overrides.projects.clone()
        };

        Ok(InvoiceRequest {
            records: parsed.records,
            rates,
            adjustments,
            selected,
            month,
            client: self.client,
            payee: self.payee,
            options: self.options,
        })
    }
}

/// Splits `NAME=VALUE` at the last `=`, so names may themselves contain one.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    match raw.rsplit_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(InvoiceError::InvalidAssignment(raw.to_string())),
    }
}
