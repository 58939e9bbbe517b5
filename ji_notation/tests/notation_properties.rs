//! Properties of the Pythagorean split and the rendered note names.

use ji_notation::notation::{NOTE_LETTERS, Notator};
use ji_notation::{CommaCache, NotationConfig, NotationError, prime_comma, pythag_split};
use ji_ratio::{Factors, RatioError};
use proptest::prelude::*;

const PRIMES: [u64; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

fn factors_strategy() -> impl Strategy<Value = Factors> {
    prop::collection::vec((prop::sample::select(PRIMES.to_vec()), -3i32..=3), 0..5)
        .prop_map(Factors::from_powers)
}

/// Check a notation string against
/// LETTER (x*#? | b*) (’* | .*) OCTAVE [" [" n["/"d] "]"].
fn is_well_formed(notation: &str, max_marks: usize) -> bool {
    let (head, bracket) = match notation.split_once(" [") {
        Some((head, rest)) => match rest.strip_suffix(']') {
            Some(fraction) => (head, Some(fraction)),
            None => return false,
        },
        None => (notation, None),
    };
    if let Some(fraction) = bracket {
        let mut parts = fraction.split('/');
        let ok = parts.by_ref().take(2).all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
        if !ok || parts.next().is_some() {
            return false;
        }
    }

    let mut chars = head.chars().peekable();
    match chars.next() {
        Some(letter) if NOTE_LETTERS.contains(&letter) => {}
        _ => return false,
    }
    let mut accidentals = String::new();
    while let Some(&c) = chars.peek() {
        if c == 'x' || c == '#' || c == 'b' {
            accidentals.push(c);
            chars.next();
        } else {
            break;
        }
    }
    let sharps_ok = accidentals.trim_end_matches('#').len() + 1 >= accidentals.len()
        && accidentals.trim_end_matches('#').chars().all(|c| c == 'x');
    let flats_ok = accidentals.chars().all(|c| c == 'b');
    if !(sharps_ok || flats_ok) {
        return false;
    }
    let mut marks = String::new();
    while let Some(&c) = chars.peek() {
        if c == '’' || c == '.' {
            marks.push(c);
            chars.next();
        } else {
            break;
        }
    }
    let uniform = marks.chars().all(|c| c == '’') || marks.chars().all(|c| c == '.');
    if !uniform || marks.chars().count() > max_marks {
        return false;
    }
    let octave: String = chars.collect();
    octave.parse::<i32>().is_ok()
}

#[test]
fn syntonic_comma_vector() {
    assert_eq!(
        prime_comma(5).unwrap(),
        Factors::from_powers([(2, 4), (3, -4), (5, 1)])
    );
}

#[test]
fn reference_notations() {
    let notator = Notator::default();
    let cases = [
        ((1, 1), "C4"),
        ((3, 2), "G4"),
        ((2, 1), "C5"),
        ((81, 80), "C.4"),
        ((5, 4), "E’4"),
        ((7, 4), "Bb4 [7]"),
        ((2187, 2048), "C#4"),
        ((625, 1), "Dx13 [625]"),
    ];
    for ((num, denom), expected) in cases {
        let fs = Factors::from_ratio(num, denom).unwrap();
        assert_eq!(notator.ji_notation(&fs).unwrap(), expected, "{num}/{denom}");
    }
}

#[test]
fn grammar_checker_rejects_bad_strings() {
    assert!(is_well_formed("Dx13 [625]", 3));
    assert!(!is_well_formed("H4", 3));
    assert!(!is_well_formed("C#x4", 3));
    assert!(!is_well_formed("C’.4", 3));
    assert!(!is_well_formed("C4 [7", 3));
    assert!(!is_well_formed("C’’’’4", 3));
}

proptest! {
    #[test]
    fn split_is_exact(v in factors_strategy()) {
        let split = pythag_split(&v, &CommaCache::new()).unwrap();
        prop_assert_eq!(split.pythagorean.multiply(&split.commas).unwrap(), v);
        prop_assert!(split.pythagorean.factor_items().all(|(p, _)| p == 2 || p == 3));
    }

    #[test]
    fn comma_part_keeps_higher_prime_exponents(v in factors_strategy()) {
        let split = pythag_split(&v, &CommaCache::new()).unwrap();
        for (prime, power) in v.factor_items().filter(|&(p, _)| p > 3) {
            prop_assert_eq!(split.commas.get_power(prime), power);
        }
    }

    #[test]
    fn notation_is_well_formed(v in factors_strategy(), threshold in 0u32..=4) {
        let notator = Notator::new(NotationConfig {
            max_shorthand_commas: threshold,
            ..Default::default()
        });
        let notation = notator.ji_notation(&v).unwrap();
        prop_assert!(is_well_formed(&notation, threshold as usize), "{}", notation);
    }

    #[test]
    fn octave_shift_changes_only_the_octave(v in factors_strategy(), k in -3i32..=3) {
        let notator = Notator::default();
        let base = notator.notation_data(&v).unwrap();
        let octaves = Factors::from_powers([(2, k)]);
        let shifted = notator.notation_data(&v.multiply(&octaves).unwrap()).unwrap();
        prop_assert_eq!(shifted.octave, base.octave + k);
        prop_assert_eq!(shifted.letter, base.letter);
        prop_assert_eq!(&shifted.accidentals, &base.accidentals);
        prop_assert_eq!(&shifted.shorthand, &base.shorthand);
        prop_assert_eq!(shifted.comma, base.comma);
    }

    #[test]
    fn pythagorean_ratios_have_plain_names(pow2 in -10i32..=10, pow3 in -12i32..=12) {
        let fs = Factors::from_powers([(2, pow2), (3, pow3)]);
        let data = Notator::default().notation_data(&fs).unwrap();
        prop_assert!(data.shorthand.is_empty());
        prop_assert!(data.comma.is_none());
    }

    #[test]
    fn extreme_exponents_fail_cleanly(
        prime in prop::sample::select(PRIMES.to_vec()),
        power in prop_oneof![Just(i32::MIN), Just(i32::MAX), -10_000i32..=10_000]
    ) {
        let fs = Factors::from_powers([(prime, power)]);
        match Notator::default().notation_data(&fs) {
            Ok(data) => prop_assert!(is_well_formed(&data.to_string(), 3)),
            Err(err) => prop_assert!(matches!(err, NotationError::Ratio(RatioError::Overflow))),
        }
    }
}
