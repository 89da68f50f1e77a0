//! # Contextual Modifiers
//!
//! The two rules shared by both scoring strategies:
//!
//! - **Punctuation emphasis**: `!` marks add excitement, a pile of `?` marks
//!   removes certainty. The resulting scalar is added to *every*
//!   sentiment-bearing token, not once to the total.
//! - **Lookback window**: the two tokens before a sentiment word decide whether
//!   it is negated and how many intensifiers boost it. Modifier tokens are
//!   never consumed, so one `not` can affect two neighbouring words.

use serde::{Deserialize, Serialize};

use crate::lexicon::LexiconTable;
use crate::options::ScoringOptions;
use crate::tokenizer::Token;

/// Number of tokens inspected before a sentiment word.
pub const WINDOW_SIZE: usize = 2;

/// More than this many `?` marks costs one point.
pub const QUESTION_PENALTY_THRESHOLD: usize = 2;

/// Counts of `!` and `?` in the raw text and the derived emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunctuationEmphasis {
    /// Number of `!` anywhere in the text.
    pub exclamations: usize,
    /// Number of `?` anywhere in the text.
    pub questions: usize,
    /// `min(exclamation_power, exclamations)`.
    pub exclamation_bonus: i32,
    /// 1 when there are more than two `?`, else 0.
    pub question_penalty: i32,
}

impl PunctuationEmphasis {
    /// Measures the original, untokenized text.
    pub fn measure(text: &str, options: &ScoringOptions) -> Self {
        let exclamations = text.chars().filter(|&c| c == '!').count();
        let questions = text.chars().filter(|&c| c == '?').count();

        let power = usize::try_from(options.exclamation_power).unwrap_or(usize::MAX);
        let exclamation_bonus = i32::try_from(power.min(exclamations)).unwrap_or(i32::MAX);
        let question_penalty = i32::from(questions > QUESTION_PENALTY_THRESHOLD);

        Self {
            exclamations,
            questions,
            exclamation_bonus,
            question_penalty,
        }
    }

    /// Value added to each sentiment-bearing token.
    pub fn value(&self) -> i32 {
        self.exclamation_bonus - self.question_penalty
    }

    pub fn has_exclamations(&self) -> bool {
        self.exclamations > 0
    }

    /// More than [`QUESTION_PENALTY_THRESHOLD`] question marks.
    pub fn has_question_penalty(&self) -> bool {
        self.question_penalty > 0
    }
}

/// What the lookback window found for one sentiment word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContextWindow {
    /// A negation word sits in the window.
    pub has_negation: bool,
    /// Intensifiers in the window (0, 1 or 2).
    pub intensifier_count: usize,
}

impl ContextWindow {
    /// Inspects `tokens[max(0, i-2)..i]`.
    pub fn lookback(tokens: &[Token], position: usize, lexicon: &LexiconTable) -> Self {
        let end = position.min(tokens.len());
        let start = end.saturating_sub(WINDOW_SIZE);
        let window = &tokens[start..end];

        Self {
            has_negation: window.iter().any(|t| lexicon.is_negation(t.key())),
            intensifier_count: window
                .iter()
                .filter(|t| lexicon.is_intensifier(t.key()))
                .count(),
        }
    }

    /// Applies negation, intensifier boost and punctuation emphasis to a base value.
    ///
    /// Saturates at the `i32` bounds.
    pub fn apply(&self, base: i32, emphasis: i32, options: &ScoringOptions) -> i32 {
        let mut value = base;
        if self.has_negation && options.flip_on_negation {
            value = value.saturating_neg();
        }
        value.saturating_add(self.boost(options)).saturating_add(emphasis)
    }

    /// `min(intensifier_boost_max, intensifier_count)`.
    pub fn boost(&self, options: &ScoringOptions) -> i32 {
        let cap = usize::try_from(options.intensifier_boost_max).unwrap_or(usize::MAX);
        i32::try_from(cap.min(self.intensifier_count)).unwrap_or(i32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_emphasis_defaults() {
        let options = ScoringOptions::default();
        let emphasis = PunctuationEmphasis::measure("wow!!! so good!", &options);
        assert_eq!(emphasis.exclamations, 4);
        assert_eq!(emphasis.exclamation_bonus, 1);
        assert_eq!(emphasis.value(), 1);
    }

    #[test]
    fn test_question_penalty_needs_three_marks() {
        let options = ScoringOptions::default();
        assert_eq!(PunctuationEmphasis::measure("why??", &options).value(), 0);
        assert_eq!(PunctuationEmphasis::measure("why???", &options).value(), -1);
        assert_eq!(PunctuationEmphasis::measure("yes! why???", &options).value(), 0);
    }

    #[test]
    fn test_exclamation_power_zero_disables_bonus() {
        let options = ScoringOptions {
            exclamation_power: 0,
            ..ScoringOptions::default()
        };
        let emphasis = PunctuationEmphasis::measure("great!!!", &options);
        assert_eq!(emphasis.value(), 0);
        assert!(emphasis.has_exclamations());
    }

    #[test]
    fn test_window_only_looks_two_back() {
        let lexicon = LexiconTable::global();
        let tokens = tokenize("not at all good");
        let window = ContextWindow::lookback(&tokens, 3, lexicon);
        assert!(!window.has_negation);

        let tokens = tokenize("not very good");
        let window = ContextWindow::lookback(&tokens, 2, lexicon);
        assert!(window.has_negation);
        assert_eq!(window.intensifier_count, 1);
    }

    #[test]
    fn test_window_at_start_is_empty() {
        let tokens = tokenize("good");
        let window = ContextWindow::lookback(&tokens, 0, LexiconTable::global());
        assert_eq!(window, ContextWindow::default());
    }

    #[test]
    fn test_apply_caps_boost_and_flips() {
        let options = ScoringOptions::default();
        let window = ContextWindow {
            has_negation: true,
            intensifier_count: 5,
        };
        // -(1) + min(2, 5) + 1
        assert_eq!(window.apply(1, 1, &options), 2);

        let no_flip = ScoringOptions {
            flip_on_negation: false,
            ..options
        };
        assert_eq!(window.apply(1, 1, &no_flip), 4);
    }

    #[test]
    fn test_apply_saturates() {
        let options = ScoringOptions::default();
        let negated = ContextWindow {
            has_negation: true,
            intensifier_count: 0,
        };
        assert_eq!(negated.apply(i32::MIN, 0, &options), i32::MAX);
        assert_eq!(ContextWindow::default().apply(1, i32::MAX, &options), i32::MAX);
    }
}
