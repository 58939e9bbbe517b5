// Integer utilities: gcd, primality, and factorisation into prime powers.
//
// Factorisations are `PrimePowers` maps (prime -> signed exponent). The
// invariant that no exponent is ever stored as zero is enforced in exactly
// one place, `store_power`, which sits under `update_factor_dict`; callers
// never insert into a map directly.

use crate::error::RatioError;
use std::collections::BTreeMap;

/// Prime -> exponent map. Negative exponents are denominator primes.
pub type PrimePowers = BTreeMap<u64, i32>;

/// How `update_factor_dict` changes a prime's exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpdate {
    Set(i32),
    Add(i32),
    Subtract(i32),
}

/// Greatest common divisor by Euclid's algorithm.
///
/// The result is never negative, so dividing a numerator/denominator pair by
/// it keeps the denominator's sign. `gcd(0, 0)` is 0.
pub fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    // Only gcd(i128::MIN, 0) or gcd(i128::MIN, i128::MIN) exceeds i128::MAX.
    i128::try_from(a).unwrap_or(i128::MAX)
}

/// Witnesses that make Miller-Rabin exact for every `u64`.
const MILLER_RABIN_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Exact primality test.
///
/// Small numbers are settled by trial division; above `SMALL_LIMIT` a
/// deterministic Miller-Rabin test is used, so the cost stays logarithmic
/// even for primes near `u64::MAX`.
pub fn is_prime(n: u64) -> bool {
    const SMALL_LIMIT: u64 = 1 << 20;
    if n < 4 {
        return n >= 2;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    if n >= SMALL_LIMIT {
        return miller_rabin(n);
    }
    let mut d = 5u64;
    while d * d <= n {
        if n % d == 0 || n % (d + 2) == 0 {
            return false;
        }
        d += 6;
    }
    true
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1u64;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Miller-Rabin for odd `n` above every base.
fn miller_rabin(n: u64) -> bool {
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;
    'bases: for a in MILLER_RABIN_BASES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'bases;
            }
        }
        return false;
    }
    true
}

/// Factorise `n` into prime powers. 0 and 1 give the empty map.
///
/// Trial division stops as soon as the divisor squared exceeds what is left
/// or what is left is prime, so prime inputs and inputs with one large prime
/// factor are cheap. A product of two large primes still costs about the
/// square root of the smaller one in divisions (around 2^32 at worst).
pub fn factorise(n: u64) -> PrimePowers {
    let mut factors = PrimePowers::new();
    if n < 2 {
        return factors;
    }
    let mut rest = n;
    let mut divide_out = |rest: &mut u64, p: u64| {
        let mut count = 0;
        while *rest % p == 0 {
            *rest /= p;
            count += 1;
        }
        store_power(&mut factors, p, count);
    };
    divide_out(&mut rest, 2);
    divide_out(&mut rest, 3);
    let mut rest_is_prime = is_prime(rest);
    let mut d = 5u64;
    while rest > 1 && !rest_is_prime && d.saturating_mul(d) <= rest {
        let before = rest;
        divide_out(&mut rest, d);
        divide_out(&mut rest, d + 2);
        if rest != before {
            rest_is_prime = is_prime(rest);
        }
        d += 6;
    }
    if rest > 1 {
        store_power(&mut factors, rest, 1);
    }
    factors
}

/// Signed factorisation of `num / denom`. The pair need not be reduced:
/// shared primes cancel.
pub fn factorise2(num: u64, denom: u64) -> PrimePowers {
    let mut factors = factorise(num);
    for (prime, power) in factorise(denom) {
        // Both exponents are at most 64, so the difference is in range.
        let num_power = factors.get(&prime).copied().unwrap_or(0);
        store_power(&mut factors, prime, num_power - power);
    }
    factors
}

/// Set, add to, or subtract from the exponent of `prime`, removing the entry
/// when the result is zero.
///
/// Fails with `RatioError::Overflow` if the new exponent does not fit in an
/// `i32`; the map is left unchanged in that case.
pub fn update_factor_dict(
    factors: &mut PrimePowers,
    prime: u64,
    update: PowerUpdate,
) -> Result<(), RatioError> {
    let current = factors.get(&prime).copied().unwrap_or(0);
    let new_power = match update {
        PowerUpdate::Set(power) => Some(power),
        PowerUpdate::Add(power) => current.checked_add(power),
        PowerUpdate::Subtract(power) => current.checked_sub(power),
    }
    .ok_or(RatioError::Overflow)?;
    store_power(factors, prime, new_power);
    Ok(())
}

/// Write an exponent, dropping the entry when it is zero.
pub(crate) fn store_power(factors: &mut PrimePowers, prime: u64, power: i32) {
    if power == 0 {
        factors.remove(&prime);
    } else {
        factors.insert(prime, power);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_basic() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(gcd(81, 27), 27);
    }

    #[test]
    fn gcd_signs_and_zero() {
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(12, -18), 6);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn small_primes() {
        let primes: Vec<u64> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
    }

    #[test]
    fn composite_squares_are_not_prime() {
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(121));
        assert!(!is_prime(7919 * 7919));
        assert!(is_prime(7919));
    }

    #[test]
    fn factorise_composites() {
        assert_eq!(factorise(360), PrimePowers::from([(2, 3), (3, 2), (5, 1)]));
        assert_eq!(factorise(2187), PrimePowers::from([(3, 7)]));
        assert_eq!(factorise(77), PrimePowers::from([(7, 1), (11, 1)]));
    }

    #[test]
    fn factorise_large_prime_cofactor() {
        // 2 * 1_000_003, the cofactor is left over after the sqrt cutoff.
        assert_eq!(
            factorise(2_000_006),
            PrimePowers::from([(2, 1), (1_000_003, 1)])
        );
    }

    #[test]
    fn factorise_trivial() {
        assert!(factorise(0).is_empty());
        assert!(factorise(1).is_empty());
    }

    #[test]
    fn factorise2_cancels_shared_primes() {
        // 90/15 = 6, the 3 and 5 partly cancel.
        assert_eq!(factorise2(90, 15), PrimePowers::from([(2, 1), (3, 1)]));
        assert_eq!(factorise2(80, 81), PrimePowers::from([(2, 4), (3, -4), (5, 1)]));
        assert!(factorise2(12, 12).is_empty());
    }

    #[test]
    fn update_removes_zero_entries() {
        let mut factors = PrimePowers::from([(2, 3)]);
        update_factor_dict(&mut factors, 2, PowerUpdate::Subtract(3)).unwrap();
        assert!(factors.is_empty());

        update_factor_dict(&mut factors, 5, PowerUpdate::Add(2)).unwrap();
        assert_eq!(factors.get(&5), Some(&2));

        update_factor_dict(&mut factors, 5, PowerUpdate::Set(0)).unwrap();
        assert!(factors.is_empty());

        update_factor_dict(&mut factors, 7, PowerUpdate::Set(-1)).unwrap();
        assert_eq!(factors.get(&7), Some(&-1));
    }

    #[test]
    fn update_reports_exponent_overflow() {
        let mut factors = PrimePowers::from([(3, i32::MAX), (2, i32::MIN)]);
        assert_eq!(
            update_factor_dict(&mut factors, 3, PowerUpdate::Add(1)),
            Err(RatioError::Overflow)
        );
        assert_eq!(
            update_factor_dict(&mut factors, 2, PowerUpdate::Subtract(1)),
            Err(RatioError::Overflow)
        );
        // Unchanged after the failed updates.
        assert_eq!(factors, PrimePowers::from([(3, i32::MAX), (2, i32::MIN)]));
    }

    #[test]
    fn large_primes_and_pseudoprimes() {
        assert!(is_prime(18_446_744_073_709_551_557)); // largest u64 prime
        assert!(is_prime(4_294_967_291));
        assert!(is_prime(1_000_003));
        assert!(!is_prime(u64::MAX));
        assert!(!is_prime(3_215_031_751)); // strong pseudoprime to bases 2, 3, 5, 7
        assert!(!is_prime(4_294_967_291 * 4_294_967_279));
        assert!(!is_prime(1_000_003 * 1_000_033));
    }

    #[test]
    fn miller_rabin_agrees_with_trial_division() {
        fn trial(n: u64) -> bool {
            n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
        }
        for n in (1u64 << 20)..(1u64 << 20) + 2_000 {
            assert_eq!(is_prime(n), trial(n), "{n}");
        }
    }

    #[test]
    fn factorise_large_prime_is_fast() {
        let p = 18_446_744_073_709_551_557;
        assert_eq!(factorise(p), PrimePowers::from([(p, 1)]));
        assert_eq!(
            factorise(8 * 1_152_921_504_606_846_883),
            PrimePowers::from([(2, 3), (1_152_921_504_606_846_883, 1)])
        );
    }
}
