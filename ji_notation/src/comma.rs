// Prime commas: the bridge from a higher prime into 3-limit space.
//
// For a prime p >= 5 the comma is the ratio 2^a * 3^b * p that sits closest
// to 1/1 while staying simple. p is then notated as the Pythagorean interval
// p / comma plus one comma mark. For 5 the search lands on 80/81 (the
// syntonic comma inverted), for 7 on 63/64.
//
// The search scores each candidate power of 3 by size (log distance from
// unison) times complexity (a Tenney-style height) and keeps the smallest.
// The candidate window is wide enough to always contain the optimum without
// searching unboundedly. Ties go to the lowest power of 3.
//
// Results depend only on the prime, so `CommaCache` memoises them.

use crate::error::NotationError;
use ji_ratio::Factors;
use ji_ratio::primes::is_prime;
use std::collections::BTreeMap;
use std::f64::consts::LN_2;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Half-width of the window of powers of 3 searched around the midpoint.
const SEARCH_HALF_WIDTH: f64 = 5.5;

/// Compute the comma for `prime` as `{prime: 1, 2: a, 3: b}`.
pub fn prime_comma(prime: u64) -> Result<Factors, NotationError> {
    if prime < 5 || !is_prime(prime) {
        return Err(NotationError::NotCommaPrime(prime));
    }

    let l3 = 3f64.ln();
    let lp = (prime as f64).ln();
    let mid3 = 0.5 * lp / l3;
    // Round half to even at exact .5 midpoints.
    let min3 = ((mid3 - SEARCH_HALF_WIDTH).round_ties_even() as i32).min(0);
    let max3 = ((mid3 + SEARCH_HALF_WIDTH).round_ties_even() as i32)
        .max((mid3 * 2.0).round_ties_even() as i32);

    let mut best: Option<(f64, i32, i32)> = None;
    for b in -max3..=-min3 {
        let height2 = lp + f64::from(b) * l3;
        let a = -((height2 / LN_2).round_ties_even() as i32);
        let size = (lp + f64::from(a) * LN_2 + f64::from(b) * l3).abs();
        let complexity = lp + f64::from(a.abs()) * LN_2 + f64::from(b.abs()) * l3;
        let measure = size * complexity;
        if best.is_none_or(|(best_measure, _, _)| measure < best_measure) {
            best = Some((measure, a, b));
        }
    }

    // The window always holds at least one candidate since min3 <= 0 <= max3.
    let (_, a, b) = best.ok_or(NotationError::NotCommaPrime(prime))?;
    Ok(Factors::from_powers([(prime, 1), (2, a), (3, b)]))
}

/// Memo table of prime commas, keyed by prime.
///
/// Safe to share between threads; lookups take a read lock and only a miss
/// takes the write lock.
#[derive(Debug, Default)]
pub struct CommaCache {
    commas: RwLock<BTreeMap<u64, Factors>>,
}

impl CommaCache {
    pub fn new() -> Self {
        CommaCache::default()
    }

    /// The comma for `prime`, computing and storing it on first use.
    pub fn get(&self, prime: u64) -> Result<Factors, NotationError> {
        let cached = self
            .commas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&prime)
            .cloned();
        if let Some(comma) = cached {
            return Ok(comma);
        }

        let comma = prime_comma(prime)?;
        debug!(prime, comma = %comma, "computed prime comma");
        self.commas
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(prime, comma.clone());
        Ok(comma)
    }

    /// Number of primes whose comma has been computed.
    pub fn len(&self) -> usize {
        self.commas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
