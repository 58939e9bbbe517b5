// Error type for ratio construction and conversion.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatioError {
    /// Numerator or denominator below 1.
    #[error("cannot build a ratio from {num}/{denom}: both parts must be at least 1")]
    NonPositive { num: i128, denom: i128 },

    /// A non-prime key passed to the strict exponent-map constructor.
    #[error("{0} is not a prime number")]
    NotPrime(u64),

    /// The value of an exponent vector does not fit in an `i128` fraction.
    #[error("ratio is too large to represent as a fraction")]
    Overflow,

    #[error("cannot parse ratio from {0:?}")]
    Parse(String),
}
