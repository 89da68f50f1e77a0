//! # Analysis Pipeline: Strategy Selection with Observable Events
//!
//! The pipeline picks a scoring strategy and, for the interactive playground,
//! replays the result as a sequence of events sent over an `mpsc` channel.
//! The web server forwards them through a WebSocket so the page can reveal
//! the explanation one token at a time.
//!
//! The events are derived from the pure [`ScoreResult`]: streaming never
//! changes what is scored.

use std::sync::mpsc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::PunctuationEmphasis;
use crate::options::ScoringOptions;
use crate::scorer::{score_with_lexicon, score_with_valence_table, ScoreResult, TokenAnnotation};
use crate::tokenizer::{is_blank, tokenize_with_mode, Token, TokenizerMode};

/// Which lexicon weighting to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// **Lexicon**: curated positive/negative lists, emoji scored. Easiest to explain.
    #[default]
    Lexicon,
    /// **Valence table**: graded intensities from -4 to +4, emoji stripped.
    ValenceTable,
}

impl ScoringStrategy {
    /// Emoji-aware for the lexicon, plain for the valence table.
    pub fn tokenizer_mode(&self) -> TokenizerMode {
        match self {
            ScoringStrategy::Lexicon => TokenizerMode::EmojiAware,
            ScoringStrategy::ValenceTable => TokenizerMode::Plain,
        }
    }

    /// Runs the strategy's scorer.
    pub fn score(&self, text: &str, options: &ScoringOptions) -> ScoreResult {
        match self {
            ScoringStrategy::Lexicon => score_with_lexicon(text, options),
            ScoringStrategy::ValenceTable => score_with_valence_table(text, options),
        }
    }
}

/// Scores text that may be absent; absence behaves like empty input.
pub fn score_optional(
    text: Option<&str>,
    strategy: ScoringStrategy,
    options: &ScoringOptions,
) -> ScoreResult {
    strategy.score(text.unwrap_or_default(), options)
}

/// Both strategies run on the same text and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Binary word lists plus emoji.
    pub lexicon: ScoreResult,
    /// Graded valences, emoji stripped.
    pub valence_table: ScoreResult,
}

impl Comparison {
    pub fn run(text: &str, options: &ScoringOptions) -> Self {
        Self {
            lexicon: score_with_lexicon(text, options),
            valence_table: score_with_valence_table(text, options),
        }
    }

    /// Whether both strategies reached the same label.
    pub fn agrees(&self) -> bool {
        self.lexicon.label == self.valence_table.label
    }
}

/// Events emitted while an analysis is replayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AnalysisEvent {
    /// **Step 1**: tokens produced for the selected strategy.
    TokenizationDone {
        strategy: ScoringStrategy,
        tokens: Vec<Token>,
        /// Number of tokens (0 for blank input).
        total: usize,
    },
    /// **Step 2**: punctuation counted on the raw text.
    EmphasisMeasured { emphasis: PunctuationEmphasis },
    /// **Step 3** (one per token): the token's contribution.
    TokenScored {
        token_index: usize,
        annotation: TokenAnnotation,
        /// Sum of the contributions so far.
        running_score: i32,
    },
    /// **Done**: the final result, identical to the synchronous call.
    Done {
        result: ScoreResult,
        processing_us: u64,
    },
}

/// Strategy-aware front door for callers that want events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentPipeline {
    pub strategy: ScoringStrategy,
}

impl SentimentPipeline {
    pub fn new(strategy: ScoringStrategy) -> Self {
        Self { strategy }
    }

    /// Synchronous analysis.
    pub fn analyze(&self, text: &str, options: &ScoringOptions) -> ScoreResult {
        self.strategy.score(text, options)
    }

    /// Sends the analysis as a stream of [`AnalysisEvent`]s.
    ///
    /// # Event order
    /// 1. `TokenizationDone`
    /// 2. `EmphasisMeasured`
    /// 3. `TokenScored` for each token, in input order
    /// 4. `Done`
    ///
    /// A dropped receiver is not an error; the remaining events are discarded.
    pub fn analyze_streaming(
        &self,
        text: &str,
        options: &ScoringOptions,
        tx: mpsc::Sender<AnalysisEvent>,
    ) {
        let start = Instant::now();
        let result = self.analyze(text, options);

        let tokens = if is_blank(text) {
            vec![]
        } else {
            tokenize_with_mode(text, self.strategy.tokenizer_mode())
        };
        let total = tokens.len();
        let _ = tx.send(AnalysisEvent::TokenizationDone {
            strategy: self.strategy,
            tokens,
            total,
        });

        let _ = tx.send(AnalysisEvent::EmphasisMeasured {
            emphasis: PunctuationEmphasis::measure(text, options),
        });

        let mut running_score: i32 = 0;
        for (token_index, annotation) in result.annotations.iter().enumerate() {
            running_score = running_score.saturating_add(annotation.contribution);
            let _ = tx.send(AnalysisEvent::TokenScored {
                token_index,
                annotation: annotation.clone(),
                running_score,
            });
        }

        let processing_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        debug!(
            strategy = ?self.strategy,
            tokens = total,
            score = result.score,
            processing_us,
            "analysis streamed"
        );
        let _ = tx.send(AnalysisEvent::Done {
            result,
            processing_us,
        });
    }
}
