use log::{debug, trace, warn};

use crate::decimal::{Money, Rate};
use crate::errors::{HousingError, Result};

/// house with a market value and monthly carrying costs
///
/// Carrying cost is property tax (charged annually, accrued monthly) plus a
/// monthly maintenance fee. The monthly tax share is always derived from the
/// current `property_taxes`, so changing the taxes takes effect on the next
/// accrual.
#[derive(Debug, Clone, PartialEq)]
pub struct House {
    house_price: Money,
    bedrooms: u32,
    bathrooms: u32,
    property_taxes: Money,
    maintenance_fees: Money,
    expenses: Money,
    month: u32,
}

impl House {
    /// create new house
    ///
    /// Room counts are taken signed so that negative input can be reported
    /// like any other invalid parameter.
    pub fn new(
        house_price: Money,
        bedrooms: i64,
        bathrooms: i64,
        property_taxes: Money,
        maintenance_fees: Money,
    ) -> Result<Self> {
        validate_house_price(house_price)?;
        let bedrooms = room_count("bedrooms", bedrooms)?;
        let bathrooms = room_count("bathrooms", bathrooms)?;
        validate_property_taxes(property_taxes)?;
        validate_maintenance_fees(maintenance_fees)?;

        debug!(
            "house created: price {}, {} bed / {} bath, taxes {}/yr, maintenance {}/mo",
            house_price, bedrooms, bathrooms, property_taxes, maintenance_fees
        );

        Ok(Self {
            house_price,
            bedrooms,
            bathrooms,
            property_taxes,
            maintenance_fees,
            expenses: Money::ZERO,
            month: 0,
        })
    }

    pub fn house_price(&self) -> Money {
        self.house_price
    }

    pub fn bedrooms(&self) -> u32 {
        self.bedrooms
    }

    pub fn bathrooms(&self) -> u32 {
        self.bathrooms
    }

    /// annual property taxes
    pub fn property_taxes(&self) -> Money {
        self.property_taxes
    }

    /// monthly share of the annual property taxes
    pub fn monthly_taxes(&self) -> Money {
        self.property_taxes.per_month()
    }

    /// monthly maintenance fees
    pub fn maintenance_fees(&self) -> Money {
        self.maintenance_fees
    }

    /// amount added to expenses by one month of accrual
    pub fn monthly_carrying_cost(&self) -> Money {
        self.monthly_taxes() + self.maintenance_fees
    }

    /// cumulative carrying cost since construction
    pub fn expenses(&self) -> Money {
        self.expenses
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn set_house_price(&mut self, house_price: Money) -> Result<()> {
        validate_house_price(house_price)?;
        self.house_price = house_price;
        Ok(())
    }

    pub fn set_bedrooms(&mut self, bedrooms: i64) -> Result<()> {
        self.bedrooms = room_count("bedrooms", bedrooms)?;
        Ok(())
    }

    pub fn set_bathrooms(&mut self, bathrooms: i64) -> Result<()> {
        self.bathrooms = room_count("bathrooms", bathrooms)?;
        Ok(())
    }

    pub fn set_property_taxes(&mut self, property_taxes: Money) -> Result<()> {
        validate_property_taxes(property_taxes)?;
        self.property_taxes = property_taxes;
        Ok(())
    }

    pub fn set_maintenance_fees(&mut self, maintenance_fees: Money) -> Result<()> {
        validate_maintenance_fees(maintenance_fees)?;
        self.maintenance_fees = maintenance_fees;
        Ok(())
    }

    /// apply one month of appreciation (or depreciation, for a negative
    /// rate) and accrue that month's expenses
    ///
    /// A rate of -100% or lower would leave the house without a positive
    /// price; it is rejected and neither the price nor the expenses move.
    pub fn update_house_price(&mut self, growth_rate: Rate) -> Result<()> {
        let new_price = self.house_price * growth_rate.growth_factor();
        if !new_price.is_positive() {
            warn!("rejected growth rate {} for house priced {}", growth_rate, self.house_price);
            return Err(HousingError::invalid(
                "growth_rate",
                format!("a growth rate of {} leaves the house price at {}", growth_rate, new_price),
            ));
        }

        self.house_price = new_price;
        self.update_expenses();
        Ok(())
    }

    /// accrue one month of property taxes and maintenance
    pub fn update_expenses(&mut self) {
        let monthly_property_taxes = self.monthly_taxes();
        self.expenses += monthly_property_taxes + self.maintenance_fees;
        self.update_month();

        trace!(
            "house month {}: price {}, expenses {}",
            self.month, self.house_price, self.expenses
        );
    }

    pub fn update_month(&mut self) {
        self.month += 1;
    }
}

fn validate_house_price(house_price: Money) -> Result<()> {
    if !house_price.is_positive() {
        return Err(HousingError::invalid("house_price", "the house price may not be zero or less"));
    }
    Ok(())
}

fn room_count(parameter: &'static str, count: i64) -> Result<u32> {
    if count < 0 {
        return Err(HousingError::invalid(
            parameter,
            format!("the number of {} may not be negative", parameter),
        ));
    }
    u32::try_from(count).map_err(|_| {
        HousingError::invalid(parameter, format!("the number of {} is out of range", parameter))
    })
}

fn validate_property_taxes(property_taxes: Money) -> Result<()> {
    if property_taxes.is_negative() {
        return Err(HousingError::invalid("property_taxes", "property taxes may not be negative"));
    }
    Ok(())
}

fn validate_maintenance_fees(maintenance_fees: Money) -> Result<()> {
    if maintenance_fees.is_negative() {
        return Err(HousingError::invalid(
            "maintenance_fees",
            "maintenance fees may not be negative",
        ));
    }
    Ok(())
}
