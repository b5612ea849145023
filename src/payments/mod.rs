pub mod amortization;

use rust_decimal::{Decimal, MathematicalOps};

use crate::decimal::{Money, Rate};
use crate::errors::{HousingError, Result};

pub use amortization::{AmortizationSchedule, ScheduledPayment};

/// fixed payment that repays `amount` over `periods` at `periodic_rate`
///
/// Standard annuity formula `P * r(1 + r)^n / ((1 + r)^n - 1)`. A zero rate
/// falls back to straight-line repayment `P / n`. `periods` may be
/// fractional when the term is not a whole number of months.
pub fn annuity_payment(amount: Money, periodic_rate: Rate, periods: Decimal) -> Result<Money> {
    if periods <= Decimal::ZERO {
        return Err(HousingError::CalculationError {
            message: format!("payment periods must be positive, got {}", periods),
        });
    }

    if periodic_rate.is_zero() {
        return Ok(amount / periods);
    }

    let r = periodic_rate.as_decimal();
    let compound = periodic_rate
        .growth_factor()
        .checked_powd(periods)
        .ok_or_else(|| HousingError::overflow("compound factor"))?;

    let numerator = amount
        .as_decimal()
        .checked_mul(r)
        .and_then(|v| v.checked_mul(compound))
        .ok_or_else(|| HousingError::overflow("annuity numerator"))?;
    let denominator = compound - Decimal::ONE;

    numerator
        .checked_div(denominator)
        .map(Money::from_decimal)
        .ok_or_else(|| HousingError::overflow("annuity payment"))
}
