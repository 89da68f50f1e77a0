//! # Tuning Options
//!
//! The three knobs of the playground sliders. A [`ScoringOptions`] value is
//! passed into every scoring call; the scorer only reads it.
//!
//! Callers that receive partial input (a JSON body with some fields missing)
//! use [`ScoringOptionsPatch`] and resolve it against the defaults at the
//! boundary, before scoring starts.

use serde::{Deserialize, Serialize};

/// Default cap for the intensifier boost.
pub const DEFAULT_INTENSIFIER_BOOST_MAX: u32 = 2;
/// Default cap for the exclamation bonus.
pub const DEFAULT_EXCLAMATION_POWER: u32 = 1;
/// Negation flips by default.
pub const DEFAULT_FLIP_ON_NEGATION: bool = true;

/// Fully resolved tuning knobs, read-only during scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    /// Maximum boost intensifiers in the window can add to a sentiment word.
    pub intensifier_boost_max: u32,
    /// Maximum bonus `!` marks can add to each sentiment word.
    pub exclamation_power: u32,
    /// Whether a negation in the window flips the sentiment word.
    pub flip_on_negation: bool,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            intensifier_boost_max: DEFAULT_INTENSIFIER_BOOST_MAX,
            exclamation_power: DEFAULT_EXCLAMATION_POWER,
            flip_on_negation: DEFAULT_FLIP_ON_NEGATION,
        }
    }
}

impl ScoringOptions {
    /// True when any knob differs from its documented default.
    pub fn is_tuned(&self) -> bool {
        *self != Self::default()
    }
}

/// Partially specified options, as they arrive from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringOptionsPatch {
    /// `None` falls back to [`DEFAULT_INTENSIFIER_BOOST_MAX`].
    #[serde(default)]
    pub intensifier_boost_max: Option<u32>,
    #[serde(default)]
    pub exclamation_power: Option<u32>,
    #[serde(default)]
    pub flip_on_negation: Option<bool>,
}

impl ScoringOptionsPatch {
    /// Fills the missing fields from [`ScoringOptions::default`].
    pub fn resolve(self) -> ScoringOptions {
        let defaults = ScoringOptions::default();
        ScoringOptions {
            intensifier_boost_max: self
                .intensifier_boost_max
                .unwrap_or(defaults.intensifier_boost_max),
            exclamation_power: self.exclamation_power.unwrap_or(defaults.exclamation_power),
            flip_on_negation: self.flip_on_negation.unwrap_or(defaults.flip_on_negation),
        }
    }
}

impl From<ScoringOptions> for ScoringOptionsPatch {
    fn from(options: ScoringOptions) -> Self {
        Self {
            intensifier_boost_max: Some(options.intensifier_boost_max),
            exclamation_power: Some(options.exclamation_power),
            flip_on_negation: Some(options.flip_on_negation),
        }
    }
}
