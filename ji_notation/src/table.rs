// Tabulating a list of ratios: ratio text, cents and notation per row.
//
// Backs the `notate` binary; kept in the library so it can be tested.

use crate::error::NotationError;
use crate::notation::Notator;
use ji_ratio::{Factors, Fraction};
use serde::Serialize;
use std::fmt::Write;

/// Ratios shown when `notate` is run without arguments: a 5-limit major
/// scale with its octave.
pub const DEMO_RATIOS: [&str; 8] = ["1/1", "9/8", "5/4", "4/3", "3/2", "5/3", "15/8", "2/1"];

/// One ratio with its size and name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotationRow {
    pub ratio: Fraction,
    pub cents: f64,
    pub notation: String,
}

impl NotationRow {
    /// `precision` is passed to `Fraction::cents_at`.
    pub fn build(notator: &Notator, ratio: Fraction, precision: i32) -> Result<Self, NotationError> {
        let factors = Factors::from_fraction(&ratio)?;
        Ok(NotationRow {
            ratio,
            cents: ratio.cents_at(precision),
            notation: notator.ji_notation(&factors)?,
        })
    }
}

/// Build one row per ratio, stopping at the first failure.
pub fn notation_table(
    notator: &Notator,
    ratios: &[Fraction],
    precision: i32,
) -> Result<Vec<NotationRow>, NotationError> {
    ratios
        .iter()
        .map(|&ratio| NotationRow::build(notator, ratio, precision))
        .collect()
}

/// Plain-text table with aligned columns.
pub fn render_table(rows: &[NotationRow], precision: i32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<16} {:>12}  notation", "ratio", "cents");
    for row in rows {
        let ratio = row.ratio.to_string();
        let cents = row.ratio.format_cents(precision);
        let _ = writeln!(out, "{ratio:<16} {cents:>12}  {}", row.notation);
    }
    out
}
