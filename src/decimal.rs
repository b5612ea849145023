use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub};
use std::str::FromStr;

use crate::interest::MONTHS_PER_YEAR;

/// decimal places kept on every money amount
const MONEY_DP: u32 = 8;

/// currency amount, rounded to 8 decimal places after every operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn from_decimal(amount: Decimal) -> Self {
        Money(amount.round_dp(MONEY_DP))
    }

    /// parse a decimal string such as `"1861.14"`
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Decimal::from_str(s).map(Money::from_decimal)
    }

    /// whole currency units
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// portion of this amount given by `ratio` (a down payment of 0.2, say)
    pub fn scale(&self, ratio: Rate) -> Self {
        *self * ratio.as_decimal()
    }

    /// monthly share of an annual amount
    pub fn per_month(&self) -> Self {
        *self / Decimal::from(MONTHS_PER_YEAR)
    }

    /// `None` on overflow
    pub fn checked_mul(&self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Money::from_decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_decimal(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::from_decimal(self.0 - other.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, factor: Decimal) -> Money {
        Money::from_decimal(self.0 * factor)
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, divisor: Decimal) -> Money {
        Money::from_decimal(self.0 / divisor)
    }
}

/// interest rate, growth rate or ratio stored as a fraction (5% is `0.05`)
///
/// Rates are never rounded since they feed into compounding. They may be
/// negative, which is how depreciation is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);
    pub const ONE: Rate = Rate(Decimal::ONE);

    pub fn from_decimal(fraction: Decimal) -> Self {
        Rate(fraction)
    }

    /// e.g. 5 for 5%, -3 for -3%
    pub fn from_percentage(percent: i32) -> Self {
        Rate(Decimal::new(i64::from(percent), 2))
    }

    /// e.g. 475 for 4.75%
    pub fn from_bps(bps: i32) -> Self {
        Rate(Decimal::new(i64::from(bps), 4))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// `1 + rate`
    pub fn growth_factor(&self) -> Decimal {
        Decimal::ONE + self.0
    }

    /// nominal monthly rate, without compounding
    pub fn monthly_rate(&self) -> Rate {
        Rate(self.0 / Decimal::from(MONTHS_PER_YEAR))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}
