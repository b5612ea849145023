pub mod config;
pub mod decimal;
pub mod errors;
pub mod house;
pub mod interest;
pub mod mortgage;
pub mod payments;

// re-export key types
pub use config::{HouseConfig, MortgageConfig};
pub use decimal::{Money, Rate};
pub use errors::{HousingError, Result};
pub use house::House;
pub use interest::{
    effective_annual_rate, effective_periodic_rate, CompoundingFrequency, MONTHS_PER_YEAR,
};
pub use mortgage::{Mortgage, MortgageBuilder};
pub use payments::{annuity_payment, AmortizationSchedule, ScheduledPayment};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
