// Error type for comma lookup, notation rendering and config loading.

use ji_ratio::RatioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotationError {
    /// Commas exist only for primes 5 and up; 2 and 3 are the Pythagorean
    /// basis itself.
    #[error("{0} is not a prime number greater than 4")]
    NotCommaPrime(u64),

    #[error(transparent)]
    Ratio(#[from] RatioError),

    #[error("invalid notation config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("cannot read notation config: {0}")]
    Io(#[from] std::io::Error),
}
