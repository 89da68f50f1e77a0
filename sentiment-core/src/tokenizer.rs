//! # Tokenizer
//!
//! Splits raw text into lower-cased words and emoji glyphs.
//!
//! ## Algorithm
//!
//! 1. Lower-case the whole text (Unicode aware).
//! 2. Replace every character that is not a letter (`\p{L}`), a digit (`\p{N}`),
//!    whitespace, `!`, `?` or a supported emoji with a single space.
//! 3. Split on runs of whitespace and drop empty fragments.
//!
//! `!` and `?` survive step 2, so they can stay glued to a word (`"good!"`).
//! Table lookups go through [`lexical_key`], which trims them off.
//!
//! ## Modes
//!
//! - **EmojiAware**: keeps the supported emoji (lexicon strategy).
//! - **Plain**: strips every emoji (valence strategy).
//!
//! ```rust
//! use sentiment_core::tokenizer::{tokenize_with_mode, TokenizerMode};
//!
//! let tokens = tokenize_with_mode("So FUN 😀!!", TokenizerMode::EmojiAware);
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["so", "fun", "😀!!"]);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Supported emoji: the emoticons block plus thumbs up/down and the party popper.
const SUPPORTED_EMOJI_CLASS: &str = r"\x{1F600}-\x{1F64F}\x{1F44D}\x{1F44E}\x{1F389}";

static UNSUPPORTED_EMOJI_AWARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"[^\p{{L}}\p{{N}}\s!?{SUPPORTED_EMOJI_CLASS}]"))
        .expect("emoji-aware character class is valid")
});

static UNSUPPORTED_PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{L}\p{N}\s!?]").expect("plain character class is valid")
});

static SUPPORTED_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[{SUPPORTED_EMOJI_CLASS}]")).expect("emoji class is valid")
});

/// One token of the input, in original order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Case-folded text, `!`/`?` included when they were attached.
    pub text: String,
    /// Position in the token sequence (0, 1, 2...).
    pub index: usize,
}

impl Token {
    /// Key used for every table lookup.
    pub fn key(&self) -> &str {
        lexical_key(&self.text)
    }
}

/// Which emoji survive tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerMode {
    /// Keeps the supported emoji glyphs as tokens.
    #[default]
    EmojiAware,
    /// Letters, digits, `!` and `?` only.
    Plain,
}

/// Tokenizes with emoji preserved.
pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_with_mode(text, TokenizerMode::EmojiAware)
}

/// Tokenizes with an explicit [`TokenizerMode`]; re-tokenizing the joined
/// output yields the same tokens.
pub fn tokenize_with_mode(text: &str, mode: TokenizerMode) -> Vec<Token> {
    let lowered = text.to_lowercase();
    let unsupported = match mode {
        TokenizerMode::EmojiAware => &*UNSUPPORTED_EMOJI_AWARE,
        TokenizerMode::Plain => &*UNSUPPORTED_PLAIN,
    };
    let cleaned = unsupported.replace_all(&lowered, " ");

    cleaned
        .split_whitespace()
        .enumerate()
        .map(|(index, fragment)| Token {
            text: fragment.to_string(),
            index,
        })
        .collect()
}

/// Strips leading and trailing `!`/`?` so that `"good!"` looks up as `"good"`.
pub fn lexical_key(token: &str) -> &str {
    token.trim_matches(|c| c == '!' || c == '?')
}

/// Whether the text is empty or made only of whitespace and byte-order marks.
///
/// `str::trim` keeps U+FEFF, so it is checked separately.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{FEFF}')
}

/// Whether the raw text contains at least one emoji the tokenizer keeps.
pub fn contains_supported_emoji(text: &str) -> bool {
    SUPPORTED_EMOJI.is_match(text)
}
