// Prime exponent vectors.
//
// `Factors` represents a positive rational as a map from prime to nonzero
// signed exponent, e.g. 90/7 = {2: 1, 3: 2, 5: 1, 7: -1}. Multiplying ratios
// adds exponents, dividing subtracts them and raising to a power scales
// them, so all of the arithmetic here is exact. Exponents are `i32`; an
// operation whose result exponent would leave that range returns
// `RatioError::Overflow` instead of wrapping. Converting back to a
// `Fraction` can also overflow once the value exceeds `i128`.
//
// Invariants (upheld by routing every write through `primes.rs`):
// - every key is prime
// - no stored exponent is zero
// - the empty map is the value 1

use crate::error::RatioError;
use crate::fraction::Fraction;
use crate::primes::{
    PowerUpdate, PrimePowers, factorise, factorise2, is_prime, store_power, update_factor_dict,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Factors {
    factors: PrimePowers,
}

impl Factors {
    /// The identity, 1/1.
    pub fn one() -> Self {
        Factors::default()
    }

    /// Factorise a whole number. Fails for 0.
    pub fn from_int(n: u64) -> Result<Self, RatioError> {
        if n < 1 {
            return Err(RatioError::NonPositive {
                num: i128::from(n),
                denom: 1,
            });
        }
        Ok(Factors {
            factors: factorise(n),
        })
    }

    /// Factorise `num / denom`; the pair does not need to be reduced.
    pub fn from_ratio(num: u64, denom: u64) -> Result<Self, RatioError> {
        if num < 1 || denom < 1 {
            return Err(RatioError::NonPositive {
                num: i128::from(num),
                denom: i128::from(denom),
            });
        }
        Ok(Factors {
            factors: factorise2(num, denom),
        })
    }

    /// Build from explicit (prime, exponent) pairs.
    ///
    /// Permissive: non-prime keys and zero exponents are dropped without
    /// complaint. Repeated primes accumulate; a repeat that would push the
    /// total out of `i32` range is dropped the same way.
    pub fn from_powers(powers: impl IntoIterator<Item = (u64, i32)>) -> Self {
        let mut factors = PrimePowers::new();
        for (prime, power) in powers {
            if !is_prime(prime) || power == 0 {
                continue;
            }
            // A failed update leaves the map as it was.
            let _ = update_factor_dict(&mut factors, prime, PowerUpdate::Add(power));
        }
        Factors { factors }
    }

    /// Strict form of `from_powers`: a non-prime key or an accumulated
    /// exponent outside `i32` is an error. Zero exponents are still skipped
    /// since they do not change the value.
    pub fn try_from_powers(
        powers: impl IntoIterator<Item = (u64, i32)>,
    ) -> Result<Self, RatioError> {
        let mut factors = PrimePowers::new();
        for (prime, power) in powers {
            if !is_prime(prime) {
                return Err(RatioError::NotPrime(prime));
            }
            update_factor_dict(&mut factors, prime, PowerUpdate::Add(power))?;
        }
        Ok(Factors { factors })
    }

    /// Exact conversion of a fraction. Fails only if a part exceeds `u64`.
    pub fn from_fraction(fraction: &Fraction) -> Result<Self, RatioError> {
        let num = u64::try_from(fraction.num()).map_err(|_| RatioError::Overflow)?;
        let denom = u64::try_from(fraction.denom()).map_err(|_| RatioError::Overflow)?;
        Factors::from_ratio(num, denom)
    }

    /// The underlying prime -> exponent map.
    pub fn factor_dict(&self) -> &PrimePowers {
        &self.factors
    }

    /// (prime, exponent) pairs in ascending prime order.
    pub fn factor_items(&self) -> impl Iterator<Item = (u64, i32)> + '_ {
        self.factors.iter().map(|(&prime, &power)| (prime, power))
    }

    pub fn count_prime_factors(&self) -> usize {
        self.factors.len()
    }

    pub fn is_one(&self) -> bool {
        self.factors.is_empty()
    }

    /// Exponent of `prime`, 0 if it does not appear.
    pub fn get_power(&self, prime: u64) -> i32 {
        self.factors.get(&prime).copied().unwrap_or(0)
    }

    /// Overwrite the exponent of `prime`. Setting 0 removes it; a non-prime
    /// key is ignored to keep the vector well-formed.
    pub fn set_power(&mut self, prime: u64, power: i32) {
        if is_prime(prime) {
            store_power(&mut self.factors, prime, power);
        }
    }

    pub fn clear_power(&mut self, prime: u64) {
        self.set_power(prime, 0);
    }

    /// `self * other`.
    pub fn multiply(&self, other: &Factors) -> Result<Factors, RatioError> {
        let mut res = self.clone();
        for (prime, power) in other.factor_items() {
            update_factor_dict(&mut res.factors, prime, PowerUpdate::Add(power))?;
        }
        Ok(res)
    }

    /// `self / other`. Primes left with negative exponents belong to the
    /// denominator.
    pub fn divide(&self, other: &Factors) -> Result<Factors, RatioError> {
        let mut res = self.clone();
        for (prime, power) in other.factor_items() {
            update_factor_dict(&mut res.factors, prime, PowerUpdate::Subtract(power))?;
        }
        Ok(res)
    }

    /// `self` raised to an integer power, by repeated squaring.
    ///
    /// A negative power inverts first and then squares, so `i32::MIN` is
    /// handled whenever the result itself fits.
    pub fn power(&self, n: i32) -> Result<Factors, RatioError> {
        if n < 0 {
            return Factors::one().divide(self)?.power_unsigned(n.unsigned_abs());
        }
        self.power_unsigned(n.unsigned_abs())
    }

    fn power_unsigned(&self, n: u32) -> Result<Factors, RatioError> {
        match n {
            0 => Ok(Factors::one()),
            1 => Ok(self.clone()),
            n => {
                let half = self.power_unsigned(n / 2)?;
                let squared = half.multiply(&half)?;
                if n % 2 == 0 {
                    Ok(squared)
                } else {
                    squared.multiply(self)
                }
            }
        }
    }

    /// The exact value as a reduced fraction: positive exponents build the
    /// numerator, negative ones the denominator.
    pub fn to_fraction(&self) -> Result<Fraction, RatioError> {
        let mut num: i128 = 1;
        let mut denom: i128 = 1;
        for (prime, power) in self.factor_items() {
            let base = i128::from(prime);
            let term = base
                .checked_pow(power.unsigned_abs())
                .ok_or(RatioError::Overflow)?;
            let side = if power > 0 { &mut num } else { &mut denom };
            *side = side.checked_mul(term).ok_or(RatioError::Overflow)?;
        }
        Fraction::new(num, denom)
    }
}

impl fmt::Display for Factors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (prime, power)) in self.factor_items().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{prime}: {power}")?;
        }
        write!(f, "}}")
    }
}
