// Exact rational arithmetic for just-intonation ratios.
//
// A frequency ratio is held two ways: as a reduced `Fraction` (numerator over
// denominator) and as a `Factors` prime exponent vector, where 45/32 becomes
// {2: -5, 3: 2, 5: 1}. The vector form turns multiplication, division and
// powers of ratios into exponent-wise integer arithmetic, which is what the
// notation crate builds on.
//
// Architecture:
// - `primes.rs`: gcd, primality, factorisation, and `update_factor_dict`, the
//   only function allowed to write into a prime exponent map
// - `fraction.rs`: `Fraction` with reduction, cents and text form
// - `factors.rs`: `Factors` with multiply/divide/power and fraction conversion
// - `error.rs`: `RatioError`
//
// Everything here is a pure value type. Maps are `BTreeMap` so iteration and
// printed output are ordered by prime and identical across runs.

pub mod error;
pub mod factors;
pub mod fraction;
pub mod primes;

pub use error::RatioError;
pub use factors::Factors;
pub use fraction::Fraction;
pub use primes::{PowerUpdate, PrimePowers};
