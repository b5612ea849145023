use log::{debug, trace};
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{HousingError, Result};
use crate::interest::{effective_periodic_rate, CompoundingFrequency, MONTHS_PER_YEAR};
use crate::payments::{annuity_payment, AmortizationSchedule};

/// fixed-rate mortgage stepped one monthly payment at a time
///
/// The four loan terms (principal, down payment ratio, rate and amortization)
/// are always strictly positive. `balance`, `period` and `total_paid` are the
/// running state and only move through [`Mortgage::update_balance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mortgage {
    principal: Money,
    down_payment_ratio: Rate,
    mortgage_rate: Rate,
    amortization: Decimal,
    compounding: CompoundingFrequency,
    balance: Money,
    period: u32,
    total_paid: Money,
}

impl Mortgage {
    /// create new mortgage
    ///
    /// `amortization` is the term in years and may be fractional. Parameters
    /// are checked in order and the first non-positive one is reported.
    pub fn new(
        principal: Money,
        down_payment_ratio: Rate,
        mortgage_rate: Rate,
        amortization: Decimal,
        compounding: CompoundingFrequency,
    ) -> Result<Self> {
        validate_terms(principal, down_payment_ratio, mortgage_rate, amortization)?;

        let mut mortgage = Self {
            principal,
            down_payment_ratio,
            mortgage_rate,
            amortization,
            compounding,
            balance: Money::ZERO,
            period: 0,
            total_paid: Money::ZERO,
        };
        mortgage.balance = mortgage.loan_amount();
        mortgage.total_paid = mortgage.down_payment();

        debug!(
            "mortgage created: principal {}, down payment {}, rate {} compounded {}, {} years",
            principal, mortgage.total_paid, mortgage_rate, compounding, amortization
        );

        Ok(mortgage)
    }

    /// create new mortgage with compounding given by option name
    /// (`monthly`, `quarterly`, `semi-annually` or `annually`)
    ///
    /// The numeric terms are checked before the name is resolved.
    pub fn with_compounding_name(
        principal: Money,
        down_payment_ratio: Rate,
        mortgage_rate: Rate,
        amortization: Decimal,
        compounding: &str,
    ) -> Result<Self> {
        validate_terms(principal, down_payment_ratio, mortgage_rate, amortization)?;
        let compounding: CompoundingFrequency = compounding.parse()?;
        Self::new(principal, down_payment_ratio, mortgage_rate, amortization, compounding)
    }

    pub fn builder() -> MortgageBuilder {
        MortgageBuilder::new()
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn down_payment_ratio(&self) -> Rate {
        self.down_payment_ratio
    }

    pub fn mortgage_rate(&self) -> Rate {
        self.mortgage_rate
    }

    /// amortization term in years
    pub fn amortization(&self) -> Decimal {
        self.amortization
    }

    pub fn compounding(&self) -> CompoundingFrequency {
        self.compounding
    }

    pub fn compound_periods(&self) -> u32 {
        self.compounding.periods_per_year()
    }

    /// outstanding principal
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// number of payments made so far
    pub fn period(&self) -> u32 {
        self.period
    }

    /// down payment plus every monthly payment made so far
    pub fn total_paid(&self) -> Money {
        self.total_paid
    }

    pub fn set_principal(&mut self, principal: Money) -> Result<()> {
        validate_principal(principal)?;
        self.principal = principal;
        Ok(())
    }

    pub fn set_down_payment_ratio(&mut self, down_payment_ratio: Rate) -> Result<()> {
        validate_down_payment_ratio(down_payment_ratio)?;
        self.down_payment_ratio = down_payment_ratio;
        Ok(())
    }

    pub fn set_mortgage_rate(&mut self, mortgage_rate: Rate) -> Result<()> {
        validate_mortgage_rate(mortgage_rate)?;
        self.mortgage_rate = mortgage_rate;
        Ok(())
    }

    pub fn set_amortization(&mut self, amortization: Decimal) -> Result<()> {
        validate_amortization(amortization)?;
        self.amortization = amortization;
        Ok(())
    }

    pub fn set_compounding(&mut self, compounding: CompoundingFrequency) {
        self.compounding = compounding;
    }

    pub fn down_payment(&self) -> Money {
        self.principal.scale(self.down_payment_ratio)
    }

    /// amount actually borrowed
    pub fn loan_amount(&self) -> Money {
        self.principal - self.down_payment()
    }

    /// total number of monthly payments over the amortization term
    pub fn payment_periods(&self) -> Decimal {
        self.amortization * Decimal::from(MONTHS_PER_YEAR)
    }

    /// monthly rate equivalent to the nominal rate under this compounding
    pub fn effective_interest_rate(&self) -> Result<Rate> {
        effective_periodic_rate(self.mortgage_rate, self.compounding)
    }

    /// fixed payment that amortizes the loan amount over the full term
    pub fn monthly_payment(&self) -> Result<Money> {
        annuity_payment(
            self.loan_amount(),
            self.effective_interest_rate()?,
            self.payment_periods(),
        )
    }

    /// interest paid so far
    pub fn interest_paid(&self) -> Money {
        let principal_repaid = self.loan_amount() - self.balance;
        self.total_paid - self.down_payment() - principal_repaid
    }

    /// advance one period: accrue interest on the balance, then make the
    /// fixed monthly payment
    ///
    /// Nothing is changed if the rate or payment cannot be computed.
    pub fn update_balance(&mut self) -> Result<()> {
        let rate = self.effective_interest_rate()?;
        let payment = self.monthly_payment()?;

        let grown = self
            .balance
            .checked_mul(rate.growth_factor())
            .ok_or_else(|| HousingError::overflow("mortgage balance"))?;

        self.balance = grown - payment;
        self.update_period();
        self.update_total_paid(payment);

        trace!(
            "mortgage period {}: paid {}, balance {}, total paid {}",
            self.period, payment, self.balance, self.total_paid
        );

        Ok(())
    }

    pub fn update_period(&mut self) {
        self.period += 1;
    }

    fn update_total_paid(&mut self, payment: Money) {
        self.total_paid += payment;
    }

    /// project the remaining payments without advancing this mortgage
    pub fn schedule(&self) -> Result<AmortizationSchedule> {
        AmortizationSchedule::generate(self)
    }
}

fn validate_terms(
    principal: Money,
    down_payment_ratio: Rate,
    mortgage_rate: Rate,
    amortization: Decimal,
) -> Result<()> {
    validate_principal(principal)?;
    validate_down_payment_ratio(down_payment_ratio)?;
    validate_mortgage_rate(mortgage_rate)?;
    validate_amortization(amortization)
}

fn validate_principal(principal: Money) -> Result<()> {
    if !principal.is_positive() {
        return Err(HousingError::invalid("principal", "the principal may not be zero or less"));
    }
    Ok(())
}

fn validate_down_payment_ratio(ratio: Rate) -> Result<()> {
    if !ratio.is_positive() {
        return Err(HousingError::invalid(
            "down_payment_ratio",
            "the down payment ratio may not be zero or less",
        ));
    }
    Ok(())
}

fn validate_mortgage_rate(rate: Rate) -> Result<()> {
    if !rate.is_positive() {
        return Err(HousingError::invalid(
            "mortgage_rate",
            "the mortgage rate may not be zero or less",
        ));
    }
    Ok(())
}

fn validate_amortization(years: Decimal) -> Result<()> {
    if years <= Decimal::ZERO {
        return Err(HousingError::invalid(
            "amortization",
            "the amortization period may not be zero years or less",
        ));
    }
    Ok(())
}

/// builder for creating mortgages
#[derive(Debug, Clone, Default)]
pub struct MortgageBuilder {
    principal: Option<Money>,
    down_payment_ratio: Option<Rate>,
    mortgage_rate: Option<Rate>,
    amortization: Option<Decimal>,
    compounding: Option<CompoundingFrequency>,
}

impl MortgageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn down_payment_ratio(mut self, ratio: Rate) -> Self {
        self.down_payment_ratio = Some(ratio);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.mortgage_rate = Some(rate);
        self
    }

    pub fn amortization_years(mut self, years: Decimal) -> Self {
        self.amortization = Some(years);
        self
    }

    pub fn compounding(mut self, compounding: CompoundingFrequency) -> Self {
        self.compounding = Some(compounding);
        self
    }

    pub fn build(self) -> Result<Mortgage> {
        let principal = self
            .principal
            .ok_or_else(|| HousingError::invalid("principal", "principal required"))?;
        let down_payment_ratio = self.down_payment_ratio.ok_or_else(|| {
            HousingError::invalid("down_payment_ratio", "down payment ratio required")
        })?;
        let mortgage_rate = self
            .mortgage_rate
            .ok_or_else(|| HousingError::invalid("mortgage_rate", "mortgage rate required"))?;
        let amortization = self
            .amortization
            .ok_or_else(|| HousingError::invalid("amortization", "amortization period required"))?;

        Mortgage::new(
            principal,
            down_payment_ratio,
            mortgage_rate,
            amortization,
            self.compounding.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_mortgage() -> Mortgage {
        Mortgage::with_compounding_name(
            Money::from_major(400_000),
            Rate::from_decimal(dec!(0.2)),
            Rate::from_decimal(dec!(0.05)),
            dec!(25),
            "semi-annually",
        )
        .unwrap()
    }

    fn assert_invalid(result: Result<Mortgage>, expected: &str) {
        match result {
            Err(HousingError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, expected)
            }
            other => panic!("expected invalid {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_mortgage_creation() {
        let mortgage = standard_mortgage();

        assert_eq!(mortgage.down_payment(), Money::from_major(80_000));
        assert_eq!(mortgage.loan_amount(), Money::from_major(320_000));
        assert_eq!(mortgage.payment_periods(), dec!(300));
        assert_eq!(mortgage.compound_periods(), 2);
        assert_eq!(mortgage.balance(), Money::from_major(320_000));
        assert_eq!(mortgage.period(), 0);
        assert_eq!(mortgage.total_paid(), Money::from_major(80_000));
        assert_eq!(mortgage.interest_paid(), Money::ZERO);
    }

    #[test]
    fn test_down_payment_plus_loan_is_principal() {
        for (principal, ratio) in [(400_000, dec!(0.2)), (123_457, dec!(0.0731)), (99, dec!(1.5))] {
            let mortgage = Mortgage::new(
                Money::from_major(principal),
                Rate::from_decimal(ratio),
                Rate::from_percentage(4),
                dec!(30),
                CompoundingFrequency::Monthly,
            )
            .unwrap();
            assert_eq!(mortgage.down_payment() + mortgage.loan_amount(), mortgage.principal());
        }
    }

    #[test]
    fn test_payment_periods_always_monthly() {
        for frequency in CompoundingFrequency::ALL {
            let mut mortgage = standard_mortgage();
            mortgage.set_compounding(frequency);
            assert_eq!(mortgage.payment_periods(), dec!(300));
        }

        let mut mortgage = standard_mortgage();
        mortgage.set_amortization(dec!(2.5)).unwrap();
        assert_eq!(mortgage.payment_periods(), dec!(30));
    }

    #[test]
    fn test_default_compounding_is_semi_annual() {
        let mortgage = Mortgage::builder()
            .principal(Money::from_major(400_000))
            .down_payment_ratio(Rate::from_percentage(20))
            .rate(Rate::from_percentage(5))
            .amortization_years(dec!(25))
            .build()
            .unwrap();

        assert_eq!(mortgage.compounding(), CompoundingFrequency::SemiAnnually);
        assert_eq!(mortgage, standard_mortgage());
    }

    #[test]
    fn test_monthly_payment() {
        let payment = standard_mortgage().monthly_payment().unwrap();
        let expected = Money::from_decimal(dec!(1861.1360));
        assert!((payment - expected).abs() < Money::from_decimal(dec!(0.001)));
    }

    #[test]
    fn test_effective_rate_tracks_rate_changes() {
        let mut mortgage = standard_mortgage();
        let before = mortgage.effective_interest_rate().unwrap();

        mortgage.set_mortgage_rate(Rate::from_percentage(6)).unwrap();
        let after = mortgage.effective_interest_rate().unwrap();
        assert!(after > before);

        mortgage.set_compounding(CompoundingFrequency::Monthly);
        assert_eq!(mortgage.effective_interest_rate().unwrap().as_decimal(), dec!(0.005));
    }

    #[test]
    fn test_update_balance() {
        let mut mortgage = standard_mortgage();
        let rate = mortgage.effective_interest_rate().unwrap();
        let payment = mortgage.monthly_payment().unwrap();

        mortgage.update_balance().unwrap();

        let expected = Money::from_major(320_000) * rate.growth_factor() - payment;
        assert_eq!(mortgage.balance(), expected);
        let after_one = Money::from_decimal(dec!(319458.5170));
        assert!((mortgage.balance() - after_one).abs() < Money::from_decimal(dec!(0.001)));
        assert_eq!(mortgage.period(), 1);
        assert_eq!(mortgage.total_paid(), Money::from_major(80_000) + payment);
        assert!(mortgage.interest_paid() > Money::from_major(1_319));
        assert!(mortgage.interest_paid() < Money::from_major(1_320));
    }

    #[test]
    fn test_total_paid_after_n_periods() {
        let mut mortgage = standard_mortgage();
        let payment = mortgage.monthly_payment().unwrap();

        for _ in 0..120 {
            mortgage.update_balance().unwrap();
        }

        assert_eq!(mortgage.period(), 120);
        assert_eq!(mortgage.total_paid(), mortgage.down_payment() + payment * dec!(120));
        assert!(mortgage.balance() < mortgage.loan_amount());
    }

    #[test]
    fn test_balance_reaches_zero_at_end_of_term() {
        let mut mortgage = standard_mortgage();
        for _ in 0..300 {
            mortgage.update_balance().unwrap();
        }
        assert!(mortgage.balance().abs() < Money::from_decimal(dec!(0.01)));

        // no terminal condition: stepping past the term overpays
        mortgage.update_balance().unwrap();
        assert_eq!(mortgage.period(), 301);
        assert!(mortgage.balance().is_negative());
    }

    #[test]
    fn test_invalid_construction() {
        let build = |principal: i64, ratio: Decimal, rate: Decimal, years: Decimal| {
            Mortgage::new(
                Money::from_major(principal),
                Rate::from_decimal(ratio),
                Rate::from_decimal(rate),
                years,
                CompoundingFrequency::SemiAnnually,
            )
        };

        assert_invalid(build(0, dec!(0.2), dec!(0.05), dec!(25)), "principal");
        assert_invalid(build(400_000, dec!(-1), dec!(0.05), dec!(25)), "down_payment_ratio");
        assert_invalid(build(400_000, dec!(0.2), dec!(0), dec!(25)), "mortgage_rate");
        assert_invalid(build(400_000, dec!(0.2), dec!(0.05), dec!(-5)), "amortization");

        // first violation wins
        assert_invalid(build(-1, dec!(0), dec!(0), dec!(0)), "principal");
        assert_invalid(build(400_000, dec!(0.2), dec!(-0.01), dec!(0)), "mortgage_rate");
    }

    #[test]
    fn test_unknown_compounding_name() {
        let result = Mortgage::with_compounding_name(
            Money::from_major(400_000),
            Rate::from_percentage(20),
            Rate::from_percentage(5),
            dec!(25),
            "weekly",
        );
        assert_invalid(result, "compounding");
    }

    #[test]
    fn test_numeric_terms_checked_before_compounding_name() {
        let result = Mortgage::with_compounding_name(
            Money::ZERO,
            Rate::from_percentage(20),
            Rate::from_percentage(5),
            dec!(25),
            "weekly",
        );
        assert_invalid(result, "principal");

        let result = Mortgage::with_compounding_name(
            Money::from_major(400_000),
            Rate::from_percentage(20),
            Rate::from_percentage(5),
            dec!(-5),
            "weekly",
        );
        assert_invalid(result, "amortization");

        // valid terms fall through to the name
        let result = Mortgage::with_compounding_name(
            Money::from_major(400_000),
            Rate::from_percentage(20),
            Rate::from_percentage(5),
            dec!(25),
            "Monthly",
        );
        assert_invalid(result, "compounding");
    }

    #[test]
    fn test_builder_requires_terms() {
        let result = Mortgage::builder()
            .principal(Money::from_major(400_000))
            .rate(Rate::from_percentage(5))
            .amortization_years(dec!(25))
            .build();
        assert_invalid(result, "down_payment_ratio");
    }

    #[test]
    fn test_setters_reject_invalid_values() {
        let mut mortgage = standard_mortgage();
        let original = mortgage.clone();

        assert!(mortgage.set_principal(Money::ZERO).is_err());
        assert!(mortgage.set_down_payment_ratio(Rate::ZERO).is_err());
        assert!(mortgage.set_mortgage_rate(Rate::from_percentage(-1)).is_err());
        assert!(mortgage.set_amortization(dec!(0)).is_err());
        assert_eq!(mortgage, original);

        mortgage.set_principal(Money::from_major(500_000)).unwrap();
        assert_eq!(mortgage.loan_amount(), Money::from_major(400_000));
        // running state is left alone
        assert_eq!(mortgage.balance(), Money::from_major(320_000));
    }

    #[test]
    fn test_mortgage_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Mortgage>();
    }

    #[test]
    fn test_instances_are_independent() {
        let mut first = standard_mortgage();
        let second = first.clone();

        first.update_balance().unwrap();

        assert_eq!(first.period(), 1);
        assert_eq!(second.period(), 0);
        assert_eq!(second.balance(), Money::from_major(320_000));
    }
}
