// Renderer options, loadable from JSON.
//
// Follows the usual JSON-string-in, typed-struct-out pattern: every field
// has a default, so a config file only needs the fields it changes.
//
// Example:
//   { "max_shorthand_commas": 2, "use_double_sharp": false }

use crate::error::NotationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotationConfig {
    /// Largest number of 5-comma marks written out before falling back to a
    /// bracketed fraction ("625" rather than four marks).
    pub max_shorthand_commas: u32,
    /// Write pairs of sharps as `x`. When false every sharp is a `#`.
    pub use_double_sharp: bool,
    /// Octave number given to 1/1 (4 makes 1/1 read as C4).
    pub reference_octave: i32,
}

impl Default for NotationConfig {
    fn default() -> Self {
        NotationConfig {
            max_shorthand_commas: 3,
            use_double_sharp: true,
            reference_octave: 4,
        }
    }
}

impl NotationConfig {
    pub fn from_json(json: &str) -> Result<Self, NotationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, NotationError> {
        let json = std::fs::read_to_string(path)?;
        NotationConfig::from_json(&json)
    }
}
