pub mod compound;

pub use compound::{effective_annual_rate, effective_periodic_rate, CompoundingFrequency};

/// number of monthly payments per year, regardless of compounding
pub const MONTHS_PER_YEAR: u32 = 12;
