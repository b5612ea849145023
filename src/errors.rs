use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HousingError {
    #[error("invalid parameter {parameter}: {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

impl HousingError {
    pub(crate) fn invalid(parameter: &'static str, message: impl Into<String>) -> Self {
        HousingError::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }

    pub(crate) fn overflow(what: &str) -> Self {
        HousingError::CalculationError {
            message: format!("{} overflowed", what),
        }
    }
}

pub type Result<T> = std::result::Result<T, HousingError>;
