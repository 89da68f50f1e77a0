//! # Sentiment Scorer: Two Strategies, One Loop
//!
//! Scoring walks the tokens left to right and gives each one a contribution:
//!
//! 1. **Emoji** (lexicon strategy only): the emoji table value, no context.
//! 2. **Modifiers** (intensifiers, negations): score nothing themselves, they
//!    only change the sentiment words that follow them.
//! 3. **Sentiment words**: a base value from the strategy's table...
//! 4. ...adjusted by the lookback window (negation flip, intensifier boost)
//!    and by the punctuation emphasis.
//!
//! The score is the sum of the contributions, saturating at the `i32` bounds.
//! The label is a step function of the score:
//!
//! | Score      | Label    | Icon |
//! |------------|----------|------|
//! | `>= 2`     | Positive | 😄   |
//! | `<= -2`    | Negative | 🙁   |
//! | otherwise  | Neutral  | 😐   |
//!
//! ## Strategies
//!
//! - [`LexiconScorer`]: every word is simply "good" (+1) or "bad" (-1).
//! - [`ValenceScorer`]: graded AFINN-style intensities, emoji ignored.
//!
//! Both implement [`SentimentSource`] and run through [`score_with_source`], so a
//! side-by-side comparison isolates the difference in lexicon weighting.
//!
//! ```rust
//! use sentiment_core::{score_with_lexicon, Label, ScoringOptions};
//!
//! let result = score_with_lexicon("This is very very good!", &ScoringOptions::default());
//! assert_eq!(result.score, 4);
//! assert_eq!(result.label, Label::Positive);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{ContextWindow, PunctuationEmphasis};
use crate::lexicon::{EmojiTable, LexiconTable, ValenceTable};
use crate::options::ScoringOptions;
use crate::tokenizer::{is_blank, tokenize_with_mode, Token, TokenizerMode};

/// Explanation returned for empty input.
pub const EMPTY_EXPLANATION: &str = "No text yet.";

/// Note added when more than two `?` cost a point.
pub const QUESTION_PENALTY_EXPLANATION: &str = "Many question marks reduce certainty (-1)";

/// Minimum absolute score for a non-neutral label.
pub const LABEL_THRESHOLD: i32 = 2;

/// Polarity class of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Contribution above zero.
    Positive,
    /// Contribution below zero.
    Negative,
    /// Zero, or a token that is not sentiment-bearing.
    Neutral,
}

impl Polarity {
    /// Sign of a contribution.
    pub fn of(value: i32) -> Self {
        match value.signum() {
            1 => Polarity::Positive,
            -1 => Polarity::Negative,
            _ => Polarity::Neutral,
        }
    }
}

/// Overall label of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Neutral,
    Negative,
}

impl Label {
    /// Step function over [`LABEL_THRESHOLD`].
    pub fn from_score(score: i32) -> Self {
        if score >= LABEL_THRESHOLD {
            Label::Positive
        } else if score <= -LABEL_THRESHOLD {
            Label::Negative
        } else {
            Label::Neutral
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Label::Positive => "Positive",
            Label::Neutral => "Neutral",
            Label::Negative => "Negative",
        }
    }

    /// Face shown next to the score.
    pub fn icon(&self) -> &'static str {
        match self {
            Label::Positive => "😄",
            Label::Neutral => "😐",
            Label::Negative => "🙁",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-token record used for the explanatory rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAnnotation {
    /// Token text as produced by the tokenizer (`!`/`?` included).
    pub token: String,
    /// Sign of `contribution`.
    pub polarity: Polarity,
    /// Points this token adds to the score, after window and emphasis.
    pub contribution: i32,
}

impl TokenAnnotation {
    fn neutral(token: &Token) -> Self {
        Self {
            token: token.text.clone(),
            polarity: Polarity::Neutral,
            contribution: 0,
        }
    }
}

/// Full outcome of one scoring call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Sum of the annotation contributions.
    pub score: i32,
    pub label: Label,
    /// Face matching `label`.
    pub icon: String,
    /// One entry per token, in input order.
    pub annotations: Vec<TokenAnnotation>,
    /// Emphasis notes first, then one note per modifier or sentiment token.
    pub explanations: Vec<String>,
}

impl ScoreResult {
    /// Result for empty, whitespace-only or absent input.
    pub fn empty() -> Self {
        Self {
            score: 0,
            label: Label::Neutral,
            icon: Label::Neutral.icon().to_string(),
            annotations: vec![],
            explanations: vec![EMPTY_EXPLANATION.to_string()],
        }
    }

    fn from_parts(annotations: Vec<TokenAnnotation>, explanations: Vec<String>) -> Self {
        let score = annotations
            .iter()
            .fold(0i32, |total, a| total.saturating_add(a.contribution));
        let label = Label::from_score(score);
        Self {
            score,
            label,
            icon: label.icon().to_string(),
            annotations,
            explanations,
        }
    }
}

/// The tables behind one scoring strategy.
///
/// Everything else (tokenization rules, window, emphasis, labels) is shared
/// and lives in [`score_with_source`].
pub trait SentimentSource {
    /// Short identifier (for logs and UI).
    fn name(&self) -> &'static str;

    /// Whether emoji reach the scoring loop as tokens.
    fn tokenizer_mode(&self) -> TokenizerMode;

    /// Negation and intensifier sets used by the window.
    fn lexicon(&self) -> &LexiconTable;

    /// Valence of an emoji token, if this strategy scores emoji.
    fn emoji_valence(&self, _key: &str) -> Option<i32> {
        None
    }

    /// Base value of a sentiment word; `None` means "not a sentiment word".
    fn base_value(&self, key: &str) -> Option<i32>;

    /// Note emitted once when the text contains `!`.
    fn explain_exclamation(&self, bonus: i32) -> String;

    /// Fragment describing the intensifier boost, e.g. `"2 intensifier(s) boost "`.
    fn explain_boost(&self, intensifier_count: usize) -> String;
}

/// Binary polarity lexicon plus emoji.
#[derive(Debug, Clone, Copy)]
pub struct LexiconScorer<'a> {
    lexicon: &'a LexiconTable,
    emoji: &'a EmojiTable,
}

impl<'a> LexiconScorer<'a> {
    pub fn new(lexicon: &'a LexiconTable, emoji: &'a EmojiTable) -> Self {
        Self { lexicon, emoji }
    }
}

impl Default for LexiconScorer<'static> {
    fn default() -> Self {
        Self::new(LexiconTable::global(), EmojiTable::global())
    }
}

impl SentimentSource for LexiconScorer<'_> {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn tokenizer_mode(&self) -> TokenizerMode {
        TokenizerMode::EmojiAware
    }

    fn lexicon(&self) -> &LexiconTable {
        self.lexicon
    }

    fn emoji_valence(&self, key: &str) -> Option<i32> {
        self.emoji.valence(key)
    }

    fn base_value(&self, key: &str) -> Option<i32> {
        self.lexicon.polarity(key)
    }

    fn explain_exclamation(&self, bonus: i32) -> String {
        format!("Exclamation mark adds excitement (+{bonus})")
    }

    fn explain_boost(&self, intensifier_count: usize) -> String {
        format!("{intensifier_count} intensifier(s) boost ")
    }
}

/// Graded valence table, emoji stripped.
#[derive(Debug, Clone, Copy)]
pub struct ValenceScorer<'a> {
    lexicon: &'a LexiconTable,
    valence: &'a ValenceTable,
}

impl<'a> ValenceScorer<'a> {
    pub fn new(lexicon: &'a LexiconTable, valence: &'a ValenceTable) -> Self {
        Self { lexicon, valence }
    }
}

impl Default for ValenceScorer<'static> {
    fn default() -> Self {
        Self::new(LexiconTable::global(), ValenceTable::global())
    }
}

impl SentimentSource for ValenceScorer<'_> {
    fn name(&self) -> &'static str {
        "valence_table"
    }

    fn tokenizer_mode(&self) -> TokenizerMode {
        TokenizerMode::Plain
    }

    fn lexicon(&self) -> &LexiconTable {
        self.lexicon
    }

    fn base_value(&self, key: &str) -> Option<i32> {
        self.valence.valence(key)
    }

    fn explain_exclamation(&self, bonus: i32) -> String {
        format!("Exclamation adds {bonus}")
    }

    fn explain_boost(&self, intensifier_count: usize) -> String {
        format!("+{intensifier_count} boost ")
    }
}

/// Scores with the curated positive/negative word lists and emoji.
pub fn score_with_lexicon(text: &str, options: &ScoringOptions) -> ScoreResult {
    score_with_source(&LexiconScorer::default(), text, options)
}

/// Scores with the graded valence table.
pub fn score_with_valence_table(text: &str, options: &ScoringOptions) -> ScoreResult {
    score_with_source(&ValenceScorer::default(), text, options)
}

/// Shared scoring loop.
pub fn score_with_source<S>(source: &S, text: &str, options: &ScoringOptions) -> ScoreResult
where
    S: SentimentSource + ?Sized,
{
    if is_blank(text) {
        return ScoreResult::empty();
    }

    let tokens = tokenize_with_mode(text, source.tokenizer_mode());
    let emphasis = PunctuationEmphasis::measure(text, options);

    let mut explanations = Vec::new();
    if emphasis.has_exclamations() {
        explanations.push(source.explain_exclamation(emphasis.exclamation_bonus));
    }
    if emphasis.has_question_penalty() {
        explanations.push(QUESTION_PENALTY_EXPLANATION.to_string());
    }

    let mut annotations = Vec::with_capacity(tokens.len());
    for position in 0..tokens.len() {
        let (annotation, explanation) =
            score_token(source, &tokens, position, emphasis.value(), options);
        annotations.push(annotation);
        explanations.extend(explanation);
    }

    let result = ScoreResult::from_parts(annotations, explanations);
    debug!(
        source = source.name(),
        tokens = tokens.len(),
        score = result.score,
        label = %result.label,
        "text scored"
    );
    result
}

fn score_token<S>(
    source: &S,
    tokens: &[Token],
    position: usize,
    emphasis: i32,
    options: &ScoringOptions,
) -> (TokenAnnotation, Option<String>)
where
    S: SentimentSource + ?Sized,
{
    let token = &tokens[position];
    let key = token.key();
    let lexicon = source.lexicon();

    if let Some(valence) = source.emoji_valence(key).filter(|v| *v != 0) {
        let annotation = TokenAnnotation {
            token: token.text.clone(),
            polarity: Polarity::of(valence),
            contribution: valence,
        };
        let note = format!("Emoji {} contributes {}", token.text, signed(valence));
        return (annotation, Some(note));
    }

    if lexicon.is_intensifier(key) {
        let note = format!("Intensifier “{}” makes nearby feeling stronger", token.text);
        return (TokenAnnotation::neutral(token), Some(note));
    }

    if lexicon.is_negation(key) {
        let note = format!("Negation “{}” flips the next feeling word", token.text);
        return (TokenAnnotation::neutral(token), Some(note));
    }

    let Some(base) = source.base_value(key) else {
        return (TokenAnnotation::neutral(token), None);
    };

    let window = ContextWindow::lookback(tokens, position, lexicon);
    let value = window.apply(base, emphasis, options);

    let mut note = String::new();
    if window.has_negation {
        note.push_str("Negation flips ");
    }
    if window.intensifier_count > 0 {
        note.push_str(&source.explain_boost(window.intensifier_count));
    }
    note.push_str(&format!("“{}” → {}", token.text, signed(value)));

    let annotation = TokenAnnotation {
        token: token.text.clone(),
        polarity: Polarity::of(value),
        contribution: value,
    };
    (annotation, Some(note))
}

/// `+3`, `-2`, `0`.
fn signed(value: i32) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ScoringOptions {
        ScoringOptions::default()
    }

    fn assert_sum_invariant(result: &ScoreResult) {
        let sum: i32 = result.annotations.iter().map(|a| a.contribution).sum();
        assert_eq!(result.score, sum);
        assert_eq!(result.label, Label::from_score(result.score));
        assert_eq!(result.icon, result.label.icon());
    }

    #[test]
    fn test_negation_flips_good() {
        let result = score_with_lexicon("This is not good.", &defaults());
        assert_eq!(result.score, -1);
        assert_eq!(result.label, Label::Neutral);
        let good = &result.annotations[3];
        assert_eq!(good.token, "good");
        assert_eq!(good.contribution, -1);
        assert_eq!(good.polarity, Polarity::Negative);
        assert_eq!(
            result.explanations,
            vec![
                "Negation “not” flips the next feeling word".to_string(),
                "Negation flips “good” → -1".to_string(),
            ]
        );
        assert_sum_invariant(&result);
    }

    #[test]
    fn test_intensifiers_stack_up_to_cap() {
        let result = score_with_lexicon("This is very very good!", &defaults());
        assert_eq!(result.score, 4);
        assert_eq!(result.label, Label::Positive);
        assert_eq!(result.icon, "😄");
        assert_eq!(result.annotations[4].token, "good!");
        assert_eq!(result.annotations[4].contribution, 4);
        assert_eq!(result.explanations[0], "Exclamation mark adds excitement (+1)");
        assert_eq!(result.explanations.last().unwrap(), "2 intensifier(s) boost “good!” → +4");
        assert_sum_invariant(&result);
    }

    #[test]
    fn test_empty_inputs_are_identical() {
        let expected = ScoreResult::empty();
        assert_eq!(score_with_lexicon("", &defaults()), expected);
        assert_eq!(score_with_lexicon("   \n\t", &defaults()), expected);
        assert_eq!(score_with_valence_table("", &defaults()), expected);
        assert_eq!(expected.explanations, vec!["No text yet.".to_string()]);
        assert!(expected.annotations.is_empty());
        assert_eq!(expected.icon, "😐");
    }

    #[test]
    fn test_label_thresholds_partition_scores() {
        for score in -10..=10 {
            let label = Label::from_score(score);
            match score {
                s if s >= 2 => assert_eq!(label, Label::Positive),
                s if s <= -2 => assert_eq!(label, Label::Negative),
                _ => assert_eq!(label, Label::Neutral),
            }
        }
    }

    #[test]
    fn test_emphasis_added_to_every_sentiment_word() {
        let result = score_with_lexicon("good and nice!", &defaults());
        // (1 + 1) + (1 + 1)
        assert_eq!(result.score, 4);
        assert_eq!(result.annotations[0].contribution, 2);
        assert_eq!(result.annotations[1].contribution, 0);
        assert_eq!(result.annotations[2].contribution, 2);
        assert_sum_invariant(&result);
    }

    #[test]
    fn test_question_penalty_can_neutralize_word() {
        let result = score_with_lexicon("good???", &defaults());
        assert_eq!(result.annotations[0].contribution, 0);
        assert_eq!(result.annotations[0].polarity, Polarity::Neutral);
        assert_eq!(result.explanations[0], QUESTION_PENALTY_EXPLANATION);
    }

    #[test]
    fn test_modifiers_are_not_consumed() {
        let result = score_with_lexicon("not good nice", &defaults());
        // "not" is within two tokens of both words
        assert_eq!(result.annotations[1].contribution, -1);
        assert_eq!(result.annotations[2].contribution, -1);
        assert_eq!(result.label, Label::Negative);
    }

    #[test]
    fn test_flip_disabled_leaves_word_unflipped() {
        let options = ScoringOptions {
            flip_on_negation: false,
            ..defaults()
        };
        let flipped = score_with_lexicon("I do not like this", &defaults());
        let kept = score_with_lexicon("I do not like this", &options);
        assert_eq!(flipped.annotations[3].contribution, -1);
        assert_eq!(kept.annotations[3].contribution, 1);
        assert_eq!(flipped.annotations.len(), kept.annotations.len());
        // Explanation still mentions the negation it saw
        assert!(kept.explanations.contains(&"Negation flips “like” → +1".to_string()));
    }

    #[test]
    fn test_emoji_scores_without_context() {
        let result = score_with_lexicon("not 😍", &defaults());
        assert_eq!(result.annotations[1].contribution, 3);
        assert_eq!(result.annotations[1].polarity, Polarity::Positive);
        assert!(result.explanations.contains(&"Emoji 😍 contributes +3".to_string()));
        assert_eq!(result.label, Label::Positive);
    }

    #[test]
    fn test_zero_valence_emoji_is_neutral() {
        let result = score_with_lexicon("😐", &defaults());
        assert_eq!(result.annotations.len(), 1);
        assert_eq!(result.annotations[0].contribution, 0);
        assert!(result.explanations.is_empty());
    }

    #[test]
    fn test_unsupported_characters_never_annotated() {
        let result = score_with_lexicon("🚀 @@ good ###", &defaults());
        let tokens: Vec<&str> = result.annotations.iter().map(|a| a.token.as_str()).collect();
        assert_eq!(tokens, ["good"]);
    }

    #[test]
    fn test_only_unsupported_characters_yield_zero() {
        let result = score_with_lexicon("🚀🚀", &defaults());
        assert_eq!(result.score, 0);
        assert_eq!(result.label, Label::Neutral);
        assert!(result.annotations.is_empty());
    }

    #[test]
    fn test_valence_table_graded() {
        let result = score_with_valence_table("The movie was awesome", &defaults());
        assert_eq!(result.score, 4);
        assert_eq!(result.label, Label::Positive);
        assert_eq!(result.explanations, vec!["“awesome” → +4".to_string()]);
    }

    #[test]
    fn test_valence_table_negation_and_boost() {
        let result = score_with_valence_table("not so terrible!", &defaults());
        // -(-4) + 1 + 1
        assert_eq!(result.annotations[2].contribution, 6);
        assert_eq!(result.explanations[0], "Exclamation adds 1");
        assert_eq!(
            result.explanations.last().unwrap(),
            "Negation flips +1 boost “terrible!” → +6"
        );
    }

    #[test]
    fn test_valence_table_ignores_emoji() {
        let result = score_with_valence_table("😍 😍", &defaults());
        assert!(result.annotations.is_empty());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_valence_zero_entry_still_takes_modifiers() {
        let result = score_with_valence_table("very neutral", &defaults());
        assert_eq!(result.annotations[1].contribution, 1);
        assert_eq!(result.annotations[1].polarity, Polarity::Positive);
    }

    #[test]
    fn test_strategies_share_modifier_notes() {
        let lexicon = score_with_lexicon("so sad", &defaults());
        let valence = score_with_valence_table("so sad", &defaults());
        assert_eq!(lexicon.explanations[0], valence.explanations[0]);
        assert_eq!(lexicon.annotations[1].contribution, 0);
        assert_eq!(valence.annotations[1].contribution, -1);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let options = ScoringOptions {
            intensifier_boost_max: 1,
            exclamation_power: 3,
            flip_on_negation: true,
        };
        let text = "Really really not bad!!! 🎉 but slow???";
        assert_eq!(score_with_lexicon(text, &options), score_with_lexicon(text, &options));
        assert_eq!(
            score_with_valence_table(text, &options),
            score_with_valence_table(text, &options)
        );
    }

    #[test]
    fn test_huge_exclamation_power_saturates() {
        let options = ScoringOptions {
            exclamation_power: 100_000,
            ..defaults()
        };
        let text = "good! ".repeat(50_000);
        let result = score_with_lexicon(&text, &options);
        // 1 + min(100_000, 50_000) per word, 50_000 words
        assert_eq!(result.annotations[0].contribution, 50_001);
        assert_eq!(result.score, i32::MAX);
        assert_eq!(result.label, Label::Positive);
    }

    #[test]
    fn test_byte_order_mark_only_is_empty() {
        assert_eq!(score_with_lexicon("\u{FEFF}", &defaults()), ScoreResult::empty());
        assert_eq!(
            score_with_valence_table(" \u{FEFF}\n", &defaults()),
            ScoreResult::empty()
        );
        assert_eq!(score_with_lexicon("\u{FEFF}good", &defaults()).score, 1);
    }

    #[test]
    fn test_annotation_order_matches_tokens() {
        let text = "Wow, what a boring, ugly day 😢";
        let result = score_with_lexicon(text, &defaults());
        let tokens: Vec<String> = crate::tokenizer::tokenize(text)
            .into_iter()
            .map(|t| t.text)
            .collect();
        let annotated: Vec<String> = result.annotations.iter().map(|a| a.token.clone()).collect();
        assert_eq!(tokens, annotated);
        assert_sum_invariant(&result);
    }
}
