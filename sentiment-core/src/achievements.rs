//! # Achievements (Badges)
//!
//! Small rewards unlocked while playing with the scorer. The list is
//! append-only, deduplicated by `id`, and stored as JSON under a single key
//! ([`STORAGE_KEY`]) of whatever key-value store the host provides.
//!
//! Persistence is best effort:
//! - missing or corrupt data loads as an empty list;
//! - a failed write is logged and ignored, the in-memory book stays
//!   authoritative for the rest of the session.
//!
//! Nothing here is ever called from the scoring path.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::options::ScoringOptions;
use crate::tokenizer::contains_supported_emoji;

/// Key under which the badge list is stored.
pub const STORAGE_KEY: &str = "sentiment_badges";

/// One earned badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable kebab-case key, used for deduplication.
    pub id: String,
    pub display_name: String,
    /// Emoji shown on the badge card.
    pub icon: String,
}

/// Named events that unlock a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    /// First analysis of the session (or ever, once persisted).
    FirstAnalysis,
    /// Input contained a supported emoji.
    EmojiExplorer,
    /// A tuning knob was touched, or an analysis ran with non-default options.
    TuningTinkerer,
    /// Exercise 2 solved (a negated sentence judged Negative).
    NegationNinja,
    /// Quiz answered 3/3.
    QuizWhiz,
}

impl Trigger {
    /// Kebab-case id, identical to the serde form.
    pub fn id(&self) -> &'static str {
        match self {
            Trigger::FirstAnalysis => "first-analysis",
            Trigger::EmojiExplorer => "emoji-explorer",
            Trigger::TuningTinkerer => "tuning-tinkerer",
            Trigger::NegationNinja => "negation-ninja",
            Trigger::QuizWhiz => "quiz-whiz",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Trigger::FirstAnalysis => "First Analyzer",
            Trigger::EmojiExplorer => "Emoji Explorer",
            Trigger::TuningTinkerer => "Tuning Tinkerer",
            Trigger::NegationNinja => "Negation Ninja",
            Trigger::QuizWhiz => "Quiz Whiz",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Trigger::FirstAnalysis => "🕵️",
            Trigger::EmojiExplorer => "🎭",
            Trigger::TuningTinkerer => "🛠️",
            Trigger::NegationNinja => "🥷",
            Trigger::QuizWhiz => "🏅",
        }
    }

    /// The badge this trigger unlocks.
    pub fn achievement(&self) -> Achievement {
        Achievement {
            id: self.id().to_string(),
            display_name: self.display_name().to_string(),
            icon: self.icon().to_string(),
        }
    }
}

/// Triggers fired by one playground analysis.
pub fn triggers_for_analysis(text: &str, options: &ScoringOptions) -> Vec<Trigger> {
    let mut triggers = vec![Trigger::FirstAnalysis];
    if contains_supported_emoji(text) {
        triggers.push(Trigger::EmojiExplorer);
    }
    if options.is_tuned() {
        triggers.push(Trigger::TuningTinkerer);
    }
    triggers
}

/// Failure of an [`AchievementStore`] operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The stored content is not the expected JSON.
    #[error("stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Minimal key-value repository (the shape of browser `localStorage`).
pub trait AchievementStore: Send {
    /// Value under `key`, `None` when it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Replaces the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store, for tests and for running without a badges file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AchievementStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk mapping keys to string values.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// original, so a crash mid-write leaves the previous content intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File the store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl AchievementStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking new writes
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StoreError::Json(e)) => {
                warn!(path = %self.path.display(), error = %e, "overwriting corrupt store");
                HashMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// The in-memory, append-only badge list backed by a store.
pub struct AchievementBook {
    store: Box<dyn AchievementStore>,
    earned: Vec<Achievement>,
}

impl AchievementBook {
    /// Loads the stored list, degrading to empty on any problem.
    pub fn load(store: impl AchievementStore + 'static) -> Self {
        let earned = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Achievement>>(&raw) {
                Ok(list) => dedup_by_id(list),
                Err(e) => {
                    warn!(error = %e, "corrupt achievement list, starting empty");
                    vec![]
                }
            },
            Ok(None) => vec![],
            Err(e) => {
                warn!(error = %e, "could not read achievements, starting empty");
                vec![]
            }
        };
        debug!(count = earned.len(), "achievements loaded");

        Self {
            store: Box::new(store),
            earned,
        }
    }

    /// Earned badges, oldest first.
    pub fn earned(&self) -> &[Achievement] {
        &self.earned
    }

    pub fn has(&self, id: &str) -> bool {
        self.earned.iter().any(|a| a.id == id)
    }

    /// Awards the badge of `trigger`; returns it only when it is new.
    pub fn award(&mut self, trigger: Trigger) -> Option<Achievement> {
        let achievement = trigger.achievement();
        self.record(achievement.clone()).then_some(achievement)
    }

    /// Appends `achievement` unless its id is already present.
    pub fn record(&mut self, achievement: Achievement) -> bool {
        if self.has(&achievement.id) {
            return false;
        }
        info!(id = %achievement.id, "achievement unlocked");
        self.earned.push(achievement);
        self.persist();
        true
    }

    /// Awards every trigger and returns the newly earned badges.
    pub fn award_all(&mut self, triggers: &[Trigger]) -> Vec<Achievement> {
        triggers.iter().filter_map(|t| self.award(*t)).collect()
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.earned)
            .map_err(StoreError::from)
            .and_then(|raw| self.store.set(STORAGE_KEY, &raw));
        if let Err(e) = result {
            warn!(error = %e, "could not persist achievements");
        }
    }
}

fn dedup_by_id(list: Vec<Achievement>) -> Vec<Achievement> {
    let mut unique: Vec<Achievement> = Vec::with_capacity(list.len());
    for achievement in list {
        if !unique.iter().any(|a| a.id == achievement.id) {
            unique.push(achievement);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads fine, every write fails.
    struct ReadOnlyStore;

    impl AchievementStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_award_is_deduplicated() {
        let mut book = AchievementBook::load(MemoryStore::new());
        assert!(book.award(Trigger::FirstAnalysis).is_some());
        assert!(book.award(Trigger::FirstAnalysis).is_none());
        assert_eq!(book.earned().len(), 1);
        assert_eq!(book.earned()[0].display_name, "First Analyzer");
    }

    #[test]
    fn test_award_all_keeps_order() {
        let mut book = AchievementBook::load(MemoryStore::new());
        let new = book.award_all(&[Trigger::EmojiExplorer, Trigger::QuizWhiz, Trigger::EmojiExplorer]);
        let ids: Vec<&str> = new.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["emoji-explorer", "quiz-whiz"]);
    }

    #[test]
    fn test_corrupt_storage_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();
        let book = AchievementBook::load(store);
        assert!(book.earned().is_empty());
    }

    #[test]
    fn test_stored_duplicates_are_collapsed() {
        let mut store = MemoryStore::new();
        let badge = Trigger::QuizWhiz.achievement();
        store
            .set(STORAGE_KEY, &serde_json::to_string(&vec![badge.clone(), badge]).unwrap())
            .unwrap();
        assert_eq!(AchievementBook::load(store).earned().len(), 1);
    }

    #[test]
    fn test_write_failure_keeps_memory_list() {
        let mut book = AchievementBook::load(ReadOnlyStore);
        assert!(book.award(Trigger::NegationNinja).is_some());
        assert!(book.award(Trigger::QuizWhiz).is_some());
        assert!(book.has("negation-ninja"));
        assert_eq!(book.earned().len(), 2);
    }

    #[test]
    fn test_json_file_store_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("badges.json");

        let mut book = AchievementBook::load(JsonFileStore::new(&path));
        book.award(Trigger::FirstAnalysis);
        book.award(Trigger::TuningTinkerer);

        let reloaded = AchievementBook::load(JsonFileStore::new(&path));
        assert_eq!(reloaded.earned(), book.earned());
    }

    #[test]
    fn test_json_file_store_missing_and_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("badges.json");
        let store = JsonFileStore::new(&path);
        assert!(store.get(STORAGE_KEY).unwrap().is_none());

        fs::write(&path, "garbage").unwrap();
        assert!(matches!(store.get(STORAGE_KEY), Err(StoreError::Json(_))));
        let mut book = AchievementBook::load(JsonFileStore::new(&path));
        assert!(book.earned().is_empty());

        // The next award rewrites the file
        book.award(Trigger::QuizWhiz);
        let reloaded = AchievementBook::load(JsonFileStore::new(&path));
        assert!(reloaded.has("quiz-whiz"));
    }

    #[test]
    fn test_triggers_for_analysis() {
        let defaults = ScoringOptions::default();
        assert_eq!(triggers_for_analysis("hello", &defaults), vec![Trigger::FirstAnalysis]);

        let tuned = ScoringOptions {
            exclamation_power: 3,
            ..defaults
        };
        assert_eq!(
            triggers_for_analysis("yay 🎉", &tuned),
            vec![Trigger::FirstAnalysis, Trigger::EmojiExplorer, Trigger::TuningTinkerer]
        );
    }

    #[test]
    fn test_trigger_ids_match_serde() {
        let all = [
            Trigger::FirstAnalysis,
            Trigger::EmojiExplorer,
            Trigger::TuningTinkerer,
            Trigger::NegationNinja,
            Trigger::QuizWhiz,
        ];
        for trigger in all {
            let json = serde_json::to_string(&trigger).unwrap();
            assert_eq!(json, format!("\"{}\"", trigger.id()));
            assert_eq!(trigger.achievement().id, trigger.id());
        }
        assert_eq!(
            serde_json::to_string(&Trigger::NegationNinja).unwrap(),
            "\"negation-ninja\""
        );
    }
}
