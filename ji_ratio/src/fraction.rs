// Reduced positive fractions.
//
// `Fraction` is the exact value behind a `Factors` vector and the text that
// appears inside a notation's comma bracket. Construction always reduces by
// the gcd, so two equal ratios compare equal field by field.

use crate::error::RatioError;
use crate::primes::gcd;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Decimal places beyond this carry no information in an `f64`.
pub const MAX_CENTS_PRECISION: i32 = 15;

/// A positive rational number `num / denom` in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fraction {
    num: i128,
    denom: i128,
}

impl Fraction {
    /// Build and reduce `num / denom`. Both parts must be at least 1.
    pub fn new(num: i128, denom: i128) -> Result<Self, RatioError> {
        if num < 1 || denom < 1 {
            return Err(RatioError::NonPositive { num, denom });
        }
        let g = gcd(num, denom);
        Ok(Fraction {
            num: num / g,
            denom: denom / g,
        })
    }

    /// The whole number `n / 1`.
    pub fn from_int(n: i128) -> Result<Self, RatioError> {
        Fraction::new(n, 1)
    }

    pub fn one() -> Self {
        Fraction { num: 1, denom: 1 }
    }

    pub fn num(&self) -> i128 {
        self.num
    }

    pub fn denom(&self) -> i128 {
        self.denom
    }

    /// Floating-point value of the ratio.
    pub fn value(&self) -> f64 {
        self.num as f64 / self.denom as f64
    }

    /// Size of the interval in cents (1200 per octave).
    ///
    /// Taken as a difference of logs so ratios with huge parts keep their
    /// precision.
    pub fn cents(&self) -> f64 {
        1200.0 * ((self.num as f64).log2() - (self.denom as f64).log2())
    }

    /// Cents rounded to `precision` decimal places. A precision below 1
    /// truncates toward zero to a whole number of cents; precisions above
    /// `MAX_CENTS_PRECISION` are treated as `MAX_CENTS_PRECISION`.
    pub fn cents_at(&self, precision: i32) -> f64 {
        let cents = self.cents();
        if precision < 1 {
            return cents.trunc();
        }
        let scale = 10f64.powi(precision.min(MAX_CENTS_PRECISION));
        (cents * scale).round() / scale
    }

    /// Cents as text: an integer literal for precision below 1, otherwise a
    /// decimal with `precision` places (at most `MAX_CENTS_PRECISION`).
    pub fn format_cents(&self, precision: i32) -> String {
        let cents = self.cents_at(precision);
        if precision < 1 {
            format!("{}", cents as i64)
        } else {
            format!("{:.*}", precision.min(MAX_CENTS_PRECISION) as usize, cents)
        }
    }

    /// Exact product. Cross-cancels before multiplying to stay in range as
    /// long as the reduced result fits.
    pub fn multiply(&self, other: &Fraction) -> Result<Fraction, RatioError> {
        let g1 = gcd(self.num, other.denom);
        let g2 = gcd(other.num, self.denom);
        let num = (self.num / g1)
            .checked_mul(other.num / g2)
            .ok_or(RatioError::Overflow)?;
        let denom = (self.denom / g2)
            .checked_mul(other.denom / g1)
            .ok_or(RatioError::Overflow)?;
        Ok(Fraction { num, denom })
    }

    pub fn divide(&self, other: &Fraction) -> Result<Fraction, RatioError> {
        self.multiply(&other.reciprocal())
    }

    pub fn reciprocal(&self) -> Fraction {
        Fraction {
            num: self.denom,
            denom: self.num,
        }
    }
}

impl fmt::Display for Fraction {
    /// `"n"` for whole numbers, `"n/d"` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.denom)
        }
    }
}

impl FromStr for Fraction {
    type Err = RatioError;

    /// Parse `"n"` or `"n/d"`, surrounding whitespace allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_part = |part: &str| {
            part.trim()
                .parse::<i128>()
                .map_err(|_| RatioError::Parse(s.to_string()))
        };
        match s.split_once('/') {
            Some((num, denom)) => Fraction::new(parse_part(num)?, parse_part(denom)?),
            None => Fraction::new(parse_part(s)?, 1),
        }
    }
}
