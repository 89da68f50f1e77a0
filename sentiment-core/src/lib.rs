//! # sentiment-core: Explainable Lexicon-Based Sentiment Scoring
//!
//! A small teaching engine that scores short texts with a hand-built lexicon
//! and a handful of rules, and explains every point it gives. No statistics,
//! no training: every number can be traced back to a word, an emoji or a
//! punctuation mark.
//!
//! ## How a text is scored
//!
//! 1.  **Input**: raw text (`&str`; absent input counts as empty).
//! 2.  **Tokenization** ([`tokenizer`]): lower-case words and supported emoji.
//! 3.  **Punctuation emphasis** ([`context`]): `!` adds excitement, `???` removes certainty.
//! 4.  **Scoring** ([`scorer`]): each sentiment word gets a base value from the strategy's
//!     table ([`lexicon`]), adjusted by the two tokens before it (negation, intensifiers).
//! 5.  **Output**: [`ScoreResult`] with score, label, icon, per-token annotations and
//!     human-readable explanations.
//!
//! ## Example
//!
//! ```rust
//! use sentiment_core::{score_with_lexicon, score_with_valence_table, Label, ScoringOptions};
//!
//! let options = ScoringOptions::default();
//!
//! let result = score_with_lexicon("This is not good.", &options);
//! assert_eq!(result.score, -1);
//! assert_eq!(result.label, Label::Neutral);
//!
//! let graded = score_with_valence_table("This is not good.", &options);
//! assert_eq!(graded.score, -2);
//! assert_eq!(graded.label, Label::Negative);
//! ```
//!
//! ## Modules
//!
//! - [`pipeline`]: strategy selection, side-by-side comparison and step-by-step events.
//! - [`achievements`]: badges and their best-effort persistence.
//! - [`lessons`]: exercises, quiz and the narration sentence.
//! - [`samples`]: demo sentences.

pub mod achievements;
pub mod context;
pub mod lessons;
pub mod lexicon;
pub mod options;
pub mod pipeline;
pub mod samples;
pub mod scorer;
pub mod tokenizer;

pub use options::{ScoringOptions, ScoringOptionsPatch};
pub use pipeline::{score_optional, AnalysisEvent, Comparison, ScoringStrategy, SentimentPipeline};
pub use scorer::{
    score_with_lexicon, score_with_valence_table, Label, Polarity, ScoreResult, TokenAnnotation,
};
pub use tokenizer::{Token, TokenizerMode};
