use log::debug;
use rust_decimal::prelude::ToPrimitive;

use crate::decimal::Money;
use crate::errors::{HousingError, Result};
use crate::mortgage::Mortgage;

/// one period of an amortization schedule
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub ending_balance: Money,
    pub total_paid: Money,
}

/// amortization schedule projected from a mortgage's current state
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    pub loan_amount: Money,
    pub starting_balance: Money,
    pub first_payment_number: u32,
    pub monthly_payment: Money,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// project the remaining payments of `mortgage`
    ///
    /// The mortgage itself is not advanced; periods are simulated on a copy
    /// until the period counter reaches the whole number of payment periods
    /// (rounded up for fractional terms).
    pub fn generate(mortgage: &Mortgage) -> Result<Self> {
        let term = mortgage
            .payment_periods()
            .ceil()
            .to_u32()
            .ok_or_else(|| HousingError::CalculationError {
                message: format!("payment periods {} out of range", mortgage.payment_periods()),
            })?;

        let monthly_payment = mortgage.monthly_payment()?;
        let mut projection = mortgage.clone();
        let mut payments = Vec::with_capacity(term.saturating_sub(mortgage.period()) as usize);

        while projection.period() < term {
            let beginning_balance = projection.balance();
            projection.update_balance()?;
            let ending_balance = projection.balance();

            let principal_portion = beginning_balance - ending_balance;
            payments.push(ScheduledPayment {
                payment_number: projection.period(),
                beginning_balance,
                payment_amount: monthly_payment,
                interest_portion: monthly_payment - principal_portion,
                principal_portion,
                ending_balance,
                total_paid: projection.total_paid(),
            });
        }

        let total_interest = payments
            .iter()
            .map(|p| p.interest_portion)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_payment = payments
            .iter()
            .map(|p| p.payment_amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        debug!(
            "generated {} scheduled payments of {} (total interest {})",
            payments.len(),
            monthly_payment,
            total_interest
        );

        Ok(Self {
            loan_amount: mortgage.loan_amount(),
            starting_balance: mortgage.balance(),
            first_payment_number: mortgage.period() + 1,
            monthly_payment,
            payments,
            total_interest,
            total_payment,
        })
    }

    /// get payment by its period number
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        let index = payment_number.checked_sub(self.first_payment_number)?;
        self.payments.get(index as usize)
    }

    /// remaining balance after the given payment, or the starting balance
    /// for periods before the schedule begins
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.starting_balance)
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}
