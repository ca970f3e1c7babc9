use thiserror::Error;

#[derive(Debug, Error)]
pub enum RatesError {
    #[error("age breakpoints must be strictly increasing: {got} years follows {last} years")]
    NonIncreasingAge { last: f64, got: f64 },

    #[error("rate at {age} years must be finite and non-negative, got {rate}")]
    InvalidRate { age: f64, rate: f64 },

    #[error("unknown interpolation type {0:?}")]
    UnknownInterpolation(String),
}

pub type RatesResult<T> = Result<T, RatesError>;
