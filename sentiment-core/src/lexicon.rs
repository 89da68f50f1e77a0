//! # Lexicons: Polarity Lists, Valence Table and Emoji
//!
//! The three static tables the scorer reads from. They are built once, on
//! first use, and are never modified afterwards, so they can be shared
//! between threads with no locking.
//!
//! | Table            | Content                                         | Used by                  |
//! |------------------|-------------------------------------------------|--------------------------|
//! | [`LexiconTable`] | positive / negative / intensifier / negation     | both strategies (window) |
//! | [`ValenceTable`] | word → integer in `-4..=4`                       | valence strategy         |
//! | [`EmojiTable`]   | emoji → integer in `-3..=3`                      | lexicon strategy         |

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const POSITIVE_WORDS: &[&str] = &[
    "love", "like", "great", "awesome", "amazing", "good", "happy", "fun", "nice", "cool",
    "fantastic", "excellent", "yay", "wow", "delight", "enjoy", "smile", "wonderful",
    "brilliant", "sweet", "best",
];

const NEGATIVE_WORDS: &[&str] = &[
    "hate", "dislike", "bad", "terrible", "awful", "angry", "sad", "boring", "slow", "worse",
    "worst", "annoying", "ugly", "mad", "yuck", "gross", "horrible", "poor",
];

const INTENSIFIERS: &[&str] = &["very", "so", "really", "super", "extremely", "totally"];

/// The tokenizer strips apostrophes, so the contracted forms only match
/// when a caller tokenizes on its own.
const NEGATIONS: &[&str] = &[
    "not", "never", "no", "hardly", "barely", "isn't", "aren't", "don't", "doesn't", "can't",
    "won't", "didn't",
];

/// AFINN-style subset, graded from -4 (very negative) to +4 (very positive).
const VALENCES: &[(&str, i32)] = &[
    ("love", 3), ("loved", 3), ("loves", 3), ("like", 2), ("likes", 2), ("awesome", 4),
    ("amazing", 4), ("great", 3), ("good", 2), ("happy", 3), ("fun", 2), ("nice", 2),
    ("cool", 2), ("fantastic", 4), ("excellent", 4), ("yay", 3), ("wow", 2), ("enjoy", 2),
    ("enjoyed", 2), ("wonderful", 4), ("brilliant", 3), ("sweet", 2), ("best", 4),
    ("bad", -2), ("worse", -3), ("worst", -4), ("terrible", -4), ("awful", -4), ("angry", -3),
    ("sad", -2), ("boring", -2), ("slow", -1), ("annoying", -2), ("ugly", -3), ("mad", -2),
    ("yuck", -3), ("gross", -3), ("horrible", -4), ("poor", -2), ("hate", -3), ("hated", -3),
    ("dislike", -2), ("problem", -2), ("problems", -2),
    ("okay", 1), ("fine", 1), ("neutral", 0),
];

const EMOJI_VALENCES: &[(&str, i32)] = &[
    ("😀", 2), ("😄", 2), ("😊", 2), ("🙂", 1), ("😍", 3), ("😎", 2), ("🎉", 2), ("👍", 2),
    ("😐", 0), ("😶", 0),
    ("🙁", -1), ("😞", -2), ("😡", -3), ("😢", -2), ("👎", -2),
];

static LEXICON: LazyLock<LexiconTable> = LazyLock::new(LexiconTable::builtin);
static VALENCE: LazyLock<ValenceTable> = LazyLock::new(ValenceTable::builtin);
static EMOJI: LazyLock<EmojiTable> = LazyLock::new(EmojiTable::builtin);

/// Case-folded word sets of the curated lexicon.
#[derive(Debug, Clone)]
pub struct LexiconTable {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    intensifiers: HashSet<&'static str>,
    negations: HashSet<&'static str>,
}

impl LexiconTable {
    fn builtin() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    /// Shared instance, built on first access.
    pub fn global() -> &'static LexiconTable {
        &LEXICON
    }

    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(word)
    }

    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(word)
    }

    /// Words that strengthen the feeling word after them.
    pub fn is_intensifier(&self, word: &str) -> bool {
        self.intensifiers.contains(word)
    }

    /// Words that flip the feeling word after them.
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    /// Binary polarity: +1 positive, -1 negative, `None` for everything else.
    pub fn polarity(&self, word: &str) -> Option<i32> {
        if self.is_positive(word) {
            Some(1)
        } else if self.is_negative(word) {
            Some(-1)
        } else {
            None
        }
    }
}

/// Graded word intensities.
#[derive(Debug, Clone)]
pub struct ValenceTable {
    entries: HashMap<&'static str, i32>,
}

impl ValenceTable {
    fn builtin() -> Self {
        Self {
            entries: VALENCES.iter().copied().collect(),
        }
    }

    pub fn global() -> &'static ValenceTable {
        &VALENCE
    }

    /// Present entries are returned even when their valence is zero.
    pub fn valence(&self, word: &str) -> Option<i32> {
        self.entries.get(word).copied()
    }
}

/// Emoji glyph valences, looked up only by the lexicon strategy.
#[derive(Debug, Clone)]
pub struct EmojiTable {
    entries: HashMap<&'static str, i32>,
}

impl EmojiTable {
    fn builtin() -> Self {
        Self {
            entries: EMOJI_VALENCES.iter().copied().collect(),
        }
    }

    pub fn global() -> &'static EmojiTable {
        &EMOJI
    }

    /// `None` for glyphs outside the table, including unsupported emoji.
    pub fn valence(&self, glyph: &str) -> Option<i32> {
        self.entries.get(glyph).copied()
    }
}
