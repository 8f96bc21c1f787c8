use rust_decimal::Decimal;

use crate::model::{Ms, PeriodId};

#[derive(Debug)]
pub enum PriceError {
    /// Amounts must be strictly positive; raised at `Amount` construction.
    InvalidAmount(Decimal),
    /// A period's span must satisfy `start < end`.
    InvalidPeriod { start: Ms, end: Ms },
    NotFound(PeriodId),
    /// Opaque failure propagated from the repository.
    Storage(String),
}

impl std::fmt::Display for PriceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceError::InvalidAmount(value) => {
                write!(f, "amount must be positive, got {value}")
            }
            PriceError::InvalidPeriod { start, end } => {
                write!(f, "invalid period span [{start}, {end})")
            }
            PriceError::NotFound(id) => write!(f, "period not found: {id}"),
            PriceError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl std::error::Error for PriceError {}
