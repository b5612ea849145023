use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::house::House;
use crate::interest::CompoundingFrequency;
use crate::mortgage::Mortgage;

/// mortgage terms, as read from a scenario file
///
/// Amounts and rates are decimal strings (`"400000"`, `"0.05"`). Validation
/// happens in [`MortgageConfig::build`], not during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageConfig {
    pub principal: Money,
    pub down_payment_ratio: Rate,
    pub mortgage_rate: Rate,
    pub amortization_years: Decimal,
    #[serde(default)]
    pub compounding: CompoundingFrequency,
}

impl MortgageConfig {
    pub fn build(&self) -> Result<Mortgage> {
        Mortgage::new(
            self.principal,
            self.down_payment_ratio,
            self.mortgage_rate,
            self.amortization_years,
            self.compounding,
        )
    }
}

impl From<&Mortgage> for MortgageConfig {
    fn from(mortgage: &Mortgage) -> Self {
        Self {
            principal: mortgage.principal(),
            down_payment_ratio: mortgage.down_payment_ratio(),
            mortgage_rate: mortgage.mortgage_rate(),
            amortization_years: mortgage.amortization(),
            compounding: mortgage.compounding(),
        }
    }
}

/// house parameters, as read from a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseConfig {
    pub house_price: Money,
    pub bedrooms: i64,
    pub bathrooms: i64,
    /// annual
    pub property_taxes: Money,
    /// monthly
    pub maintenance_fees: Money,
}

impl HouseConfig {
    pub fn build(&self) -> Result<House> {
        House::new(
            self.house_price,
            self.bedrooms,
            self.bathrooms,
            self.property_taxes,
            self.maintenance_fees,
        )
    }
}
