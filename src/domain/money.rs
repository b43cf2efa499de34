use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

/// Worked time in decimal hours.
///
/// Wraps `rust_decimal::Decimal` so that sums over hundreds of rows stay exact
/// and the same figure prints identically on every page it appears on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Hours(pub Decimal);

/// A currency value. Hourly rates are `Money` per hour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub Decimal);

/// Largest magnitude accepted from input for hours, rates and adjustments.
/// Sums and products of bounded inputs stay well inside `Decimal`'s range.
pub const INPUT_LIMIT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// `Some(value)` when it lies within `INPUT_LIMIT` either side of zero.
pub fn within_limit(value: Decimal) -> Option<Decimal> {
    (value.abs() <= INPUT_LIMIT).then_some(value)
}

impl Hours {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parses a non-negative hours value no larger than `INPUT_LIMIT`.
    /// Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = within_limit(Decimal::from_str(raw.trim()).ok()?)?;
        if value.is_sign_negative() && !value.is_zero() {
            return None;
        }
        Some(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// `$12.50`, or `-$12.50` for negative values.
    pub fn currency(&self) -> String {
        let rounded = round_two_places(self.0);
        if rounded < Decimal::ZERO {
            format!("-${}", format_two_places(-rounded))
        } else {
            format!("${}", format_two_places(rounded))
        }
    }
}

/// Parses user-entered numeric input, treating anything unparseable or
/// beyond `INPUT_LIMIT` as zero.
pub fn parse_or_zero(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim())
        .ok()
        .and_then(within_limit)
        .unwrap_or(Decimal::ZERO)
}

fn round_two_places(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Renders a figure with exactly two decimals, rounding half away from zero.
///
/// Every table in the invoice goes through this so a project's total prints
/// the same on the summary and on its detail page.
pub fn format_two_places(value: Decimal) -> String {
    format!("{:.2}", round_two_places(value))
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_two_places(self.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_two_places(self.0))
    }
}

impl Mul<Money> for Hours {
    type Output = Money;
    fn mul(self, rate: Money) -> Money {
        Money(self.0 * rate.0)
    }
}

impl Add for Hours {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Hours {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, h| acc + h)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc + m)
    }
}
