// Pythagorean split: factor a ratio into a 3-limit part and a comma part.
//
// Each prime p >= 5 with exponent e in the ratio contributes comma(p)^e to
// the comma part. Since every comma contains p exactly once, dividing the
// comma part out removes all higher primes and leaves a pure 2^x * 3^y,
// which is what the renderer turns into a letter, accidentals and octave.
//
// A comma raised to e scales its powers of 2 and 3 by e as well, so a
// large enough exponent fails with `RatioError::Overflow` here even though
// the input itself fits.

use crate::comma::CommaCache;
use crate::error::NotationError;
use ji_ratio::{Factors, RatioError};
use serde::Serialize;
use tracing::trace;

/// The two factors of a ratio, with `pythagorean * commas == original`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PythagSplit {
    /// Powers of 2 and 3 only.
    pub pythagorean: Factors,
    /// Product of prime commas raised to the ratio's higher-prime exponents.
    pub commas: Factors,
}

impl PythagSplit {
    /// Multiply the parts back together.
    pub fn recombine(&self) -> Result<Factors, RatioError> {
        self.pythagorean.multiply(&self.commas)
    }
}

pub fn pythag_split(factors: &Factors, cache: &CommaCache) -> Result<PythagSplit, NotationError> {
    let mut commas = Factors::one();
    for (prime, power) in factors.factor_items() {
        if prime > 4 {
            commas = commas.multiply(&cache.get(prime)?.power(power)?)?;
        }
    }
    let pythagorean = factors.divide(&commas)?;
    trace!(%factors, %pythagorean, %commas, "pythagorean split");
    Ok(PythagSplit {
        pythagorean,
        commas,
    })
}
