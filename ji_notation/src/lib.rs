// Just-intonation notation engine.
//
// Turns exact frequency ratios into note names such as `E’4` (5/4) or
// `Bb4 [7]` (7/4). Any ratio is split into a Pythagorean part, which maps
// onto the familiar letters, sharps, flats and octaves, and a product of
// prime commas, which is written as 5-comma marks or a bracketed fraction.
//
// Architecture:
// - comma.rs: prime comma search and `CommaCache`
// - split.rs: Pythagorean split of a `Factors` into 3-limit part and commas
// - notation.rs: letter/accidental/octave rendering, `Notator`
// - config.rs: `NotationConfig` (shorthand threshold, double sharps,
//   reference octave), JSON-loadable
// - table.rs: rows of ratio, cents and notation for the `notate` binary
// - error.rs: `NotationError`
//
// Arithmetic lives in the `ji_ratio` crate. Rendering is pure and
// deterministic; the only shared state is the comma memo table.

pub mod comma;
pub mod config;
pub mod error;
pub mod notation;
pub mod split;
pub mod table;

pub use comma::{CommaCache, prime_comma};
pub use config::NotationConfig;
pub use error::NotationError;
pub use notation::{NotationData, Notator, ji_notation};
pub use split::{PythagSplit, pythag_split};
