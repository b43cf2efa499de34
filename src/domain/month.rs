use crate::error::{InvoiceError, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// The billing month an invoice covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct InvoiceMonth(NaiveDate);

impl InvoiceMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| InvoiceError::InvalidMonth(format!("{year}-{month:02}")))
    }

    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self(today.with_day(1).unwrap_or(today))
    }

    /// Six-digit identifier derived from the first day of the month, e.g.
    /// `250101` for January 2025.
    pub fn invoice_id(&self) -> String {
        self.0.format("%y%m%d").to_string()
    }

    /// `yyyy-MM`.
    pub fn label(&self) -> String {
        self.0.format("%Y-%m").to_string()
    }

    /// Full English month name.
    pub fn month_name(&self) -> String {
        self.0.format("%B").to_string()
    }
}

impl FromStr for InvoiceMonth {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| InvoiceError::InvalidMonth(trimmed.to_string()))
    }
}

impl fmt::Display for InvoiceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
