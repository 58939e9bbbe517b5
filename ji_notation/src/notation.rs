// Just-intonation note names from prime exponent vectors.
//
// A ratio is split into its Pythagorean part and comma part (see split.rs).
// The Pythagorean part 2^x * 3^y is read off the chain of fifths:
//
//   ... Bb  F  C  G  D  A  E  B  F# ...
//       -2 -1  0  1  2  3  4  5   6      (power of 3)
//
// The letter repeats every 7 fifths, and each full lap adds one sharp (or,
// going down, one flat). What remains after dividing out the letter's own
// ratio and the sharps is a power of 2, which gives the octave.
//
// The comma part, with its own 2s and 3s removed, holds one exponent per
// higher prime. Small powers of 5 become comma marks (’ up, . down); any
// other primes are shown as a bracketed fraction after the octave.
//
// Output grammar: LETTER ACCIDENTALS SHORTHAND OCTAVE [" [" FRACTION "]"]
//   5/4 -> E’4, 7/4 -> Bb4 [7], 81/80 -> C.4, 2187/2048 -> C#4

use crate::comma::CommaCache;
use crate::config::NotationConfig;
use crate::error::NotationError;
use crate::split::pythag_split;
use ji_ratio::{Factors, Fraction, RatioError};
use serde::Serialize;
use std::fmt;
use std::iter::repeat_n;

/// Note letters in chain-of-fifths order, starting one fifth below C.
pub const NOTE_LETTERS: [char; 7] = ['F', 'C', 'G', 'D', 'A', 'E', 'B'];

/// (power of 2, power of 3) of each letter's ratio in the reference octave:
/// 4/3, 1/1, 3/2, 9/8, 27/16, 81/64, 243/128.
const NOTE_POWERS: [(i32, i32); 7] = [
    (2, -1),
    (0, 0),
    (-1, 1),
    (-3, 2),
    (-4, 3),
    (-6, 4),
    (-7, 5),
];

/// The Pythagorean chromatic semitone 2187/2048 = 3^7 / 2^11.
const SHARP_POWERS: (i32, i32) = (-11, 7);

pub const CHAR_SHARP: char = '#';
pub const CHAR_FLAT: char = 'b';
pub const CHAR_DOUBLE_SHARP: char = 'x';
/// Slanted so that two marks do not read as "11".
pub const CHAR_COMMA_UP: char = '’';
pub const CHAR_COMMA_DOWN: char = '.';

/// Prime whose comma gets written as marks instead of a fraction.
pub const SHORTHAND_PRIME: u64 = 5;

fn pythagorean(powers: (i32, i32)) -> Factors {
    Factors::from_powers([(2, powers.0), (3, powers.1)])
}

/// The parts of a rendered note name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotationData {
    pub letter: char,
    /// Sharps, double sharps or flats; empty for a natural.
    pub accidentals: String,
    /// 5-comma marks.
    pub shorthand: String,
    pub octave: i32,
    /// Remaining higher-prime commas, shown in brackets.
    pub comma: Option<Fraction>,
}

impl fmt::Display for NotationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.letter, self.accidentals, self.shorthand, self.octave
        )?;
        if let Some(comma) = &self.comma {
            write!(f, " [{comma}]")?;
        }
        Ok(())
    }
}

/// Renders ratios with a fixed config, reusing prime commas between calls.
#[derive(Debug, Default)]
pub struct Notator {
    config: NotationConfig,
    commas: CommaCache,
}

impl Notator {
    pub fn new(config: NotationConfig) -> Self {
        Notator {
            config,
            commas: CommaCache::new(),
        }
    }

    pub fn config(&self) -> &NotationConfig {
        &self.config
    }

    pub fn commas(&self) -> &CommaCache {
        &self.commas
    }

    /// Work out letter, accidentals, comma marks, octave and bracketed
    /// commas for `factors`.
    pub fn notation_data(&self, factors: &Factors) -> Result<NotationData, NotationError> {
        let split = pythag_split(factors, &self.commas)?;

        let fifths = split
            .pythagorean
            .get_power(3)
            .checked_add(1)
            .ok_or(RatioError::Overflow)?;
        let letter_index = fifths.rem_euclid(7);
        let sharp_index = fifths.div_euclid(7);
        let letter = NOTE_LETTERS[letter_index as usize];

        let reference = pythagorean(NOTE_POWERS[letter_index as usize])
            .multiply(&pythagorean(SHARP_POWERS).power(sharp_index)?)?;
        let octave = split
            .pythagorean
            .divide(&reference)?
            .get_power(2)
            .checked_add(self.config.reference_octave)
            .ok_or(RatioError::Overflow)?;
        let accidentals = self.accidentals(sharp_index);

        // Each comma is 2^a * 3^b * p, so without 2 and 3 only the higher
        // primes are left, at the exponents they had in `factors`.
        let mut residual = split.commas;
        residual.clear_power(2);
        residual.clear_power(3);

        let mut shorthand = String::new();
        let pow5 = residual.get_power(SHORTHAND_PRIME);
        if pow5.unsigned_abs() <= self.config.max_shorthand_commas {
            residual.clear_power(SHORTHAND_PRIME);
            let mark = if pow5 > 0 { CHAR_COMMA_UP } else { CHAR_COMMA_DOWN };
            shorthand.extend(repeat_n(mark, pow5.unsigned_abs() as usize));
        }

        let comma = if residual.is_one() {
            None
        } else {
            Some(residual.to_fraction()?)
        };

        Ok(NotationData {
            letter,
            accidentals,
            shorthand,
            octave,
            comma,
        })
    }

    /// The full notation string for `factors`, e.g. `"Bb4 [7]"`.
    pub fn ji_notation(&self, factors: &Factors) -> Result<String, NotationError> {
        Ok(self.notation_data(factors)?.to_string())
    }

    fn accidentals(&self, sharp_index: i32) -> String {
        let count = sharp_index.unsigned_abs() as usize;
        if sharp_index < 0 {
            return repeat_n(CHAR_FLAT, count).collect();
        }
        if self.config.use_double_sharp {
            repeat_n(CHAR_DOUBLE_SHARP, count / 2)
                .chain(repeat_n(CHAR_SHARP, count % 2))
                .collect()
        } else {
            repeat_n(CHAR_SHARP, count).collect()
        }
    }
}

/// Notation for `factors` with the default config.
pub fn ji_notation(factors: &Factors) -> Result<String, NotationError> {
    Notator::default().ji_notation(factors)
}
