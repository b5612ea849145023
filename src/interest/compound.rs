use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::Rate;
use crate::errors::{HousingError, Result};
use crate::interest::MONTHS_PER_YEAR;

/// compounding frequency of a nominal annual rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundingFrequency {
    Monthly,
    Quarterly,
    #[default]
    SemiAnnually,
    Annually,
}

impl CompoundingFrequency {
    pub const ALL: [CompoundingFrequency; 4] = [
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::SemiAnnually,
        CompoundingFrequency::Annually,
    ];

    /// get number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Annually => 1,
        }
    }

    /// option name as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            CompoundingFrequency::Monthly => "monthly",
            CompoundingFrequency::Quarterly => "quarterly",
            CompoundingFrequency::SemiAnnually => "semi-annually",
            CompoundingFrequency::Annually => "annually",
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompoundingFrequency {
    type Err = HousingError;

    fn from_str(s: &str) -> Result<Self> {
        CompoundingFrequency::ALL
            .iter()
            .copied()
            .find(|frequency| frequency.name() == s)
            .ok_or_else(|| {
                HousingError::invalid("compounding", format!("unknown compounding method: {}", s))
            })
    }
}

/// monthly rate equivalent to `nominal` compounded `frequency` times a year
///
/// `(1 + nominal / m) ^ (m / 12) - 1`
pub fn effective_periodic_rate(nominal: Rate, frequency: CompoundingFrequency) -> Result<Rate> {
    let m = Decimal::from(frequency.periods_per_year());
    let base = Decimal::ONE + nominal.as_decimal() / m;
    let exponent = m / Decimal::from(MONTHS_PER_YEAR);

    let factor = base
        .checked_powd(exponent)
        .ok_or_else(|| HousingError::overflow("effective periodic rate"))?;

    Ok(Rate::from_decimal(factor - Decimal::ONE))
}

/// effective annual rate (APY) of a nominal rate, `(1 + nominal / m) ^ m - 1`
pub fn effective_annual_rate(nominal: Rate, frequency: CompoundingFrequency) -> Result<Rate> {
    let periods = frequency.periods_per_year();
    let base = Decimal::ONE + nominal.as_decimal() / Decimal::from(periods);

    let factor = base
        .checked_powu(u64::from(periods))
        .ok_or_else(|| HousingError::overflow("effective annual rate"))?;

    Ok(Rate::from_decimal(factor - Decimal::ONE))
}
