//! # Lessons: Exercises, Quiz and Narration
//!
//! The guided part of the playground. Each exercise drops the learner's word
//! into a fixed sentence and checks what the lexicon strategy makes of it,
//! using the same tuning options as the playground.

use serde::{Deserialize, Serialize};

use crate::achievements::Trigger;
use crate::options::ScoringOptions;
use crate::scorer::{score_with_lexicon, Label, ScoreResult};

/// The three fill-in-the-blank exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    /// "This pizza is ___!" should come out Positive.
    PositivePizza,
    /// "I am ___ about the delay." should come out Negative.
    NegatedDelay,
    /// "The weather is ___ today." just reports the result.
    WeatherReport,
}

impl Exercise {
    /// Exercises are numbered from 1 on the page.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Exercise::PositivePizza),
            2 => Some(Exercise::NegatedDelay),
            3 => Some(Exercise::WeatherReport),
            _ => None,
        }
    }

    /// The fixed sentence with `word` in the blank, inserted verbatim.
    pub fn sentence(&self, word: &str) -> String {
        match self {
            Exercise::PositivePizza => format!("This pizza is {word}!"),
            Exercise::NegatedDelay => format!("I am {word} about the delay."),
            Exercise::WeatherReport => format!("The weather is {word} today."),
        }
    }

    /// Expected label, if the exercise has one.
    pub fn target(&self) -> Option<Label> {
        match self {
            Exercise::PositivePizza => Some(Label::Positive),
            Exercise::NegatedDelay => Some(Label::Negative),
            Exercise::WeatherReport => None,
        }
    }

    /// Scores the filled-in sentence and compares it with [`Exercise::target`].
    pub fn check(&self, word: &str, options: &ScoringOptions) -> ExerciseOutcome {
        let sentence = self.sentence(word);
        let result = score_with_lexicon(&sentence, options);
        let correct = self.target().map_or(true, |label| label == result.label);

        let feedback = match (self, correct) {
            (Exercise::PositivePizza, true) => "Correct! Positive vibe! 😄".to_string(),
            (Exercise::PositivePizza, false) => "Try again. Aim for Positive.".to_string(),
            (Exercise::NegatedDelay, true) => "Nice! Negation flipped it. 🙃".to_string(),
            (Exercise::NegatedDelay, false) => "Not quite. Make it Negative.".to_string(),
            (Exercise::WeatherReport, _) => format!(
                "Result: {} (score {}). Notice how “not” flips the feeling!",
                result.label, result.score
            ),
        };

        let unlocked = match self {
            Exercise::NegatedDelay if correct => Some(Trigger::NegationNinja),
            _ => None,
        };

        ExerciseOutcome {
            sentence,
            correct,
            feedback,
            unlocked,
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseOutcome {
    /// The sentence with the learner's word filled in.
    pub sentence: String,
    /// Target label reached; always true for exercises without a target.
    pub correct: bool,
    /// Message shown under the exercise.
    pub feedback: String,
    /// Badge earned by this attempt, if any.
    pub unlocked: Option<Trigger>,
    pub result: ScoreResult,
}

/// Answers to the three multiple-choice questions; unanswered is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswers {
    #[serde(default)]
    pub q1: Option<String>,
    #[serde(default)]
    pub q2: Option<String>,
    #[serde(default)]
    pub q3: Option<String>,
}

/// Correct choices: the most positive word, what negation does, what an intensifier does.
const QUIZ_KEY: [&str; 3] = ["awesome", "flip", "stronger"];
const QUIZ_FACES: [&str; 4] = ["😿", "😺", "😸", "😻"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutcome {
    /// Questions answered with the expected choice.
    pub correct: usize,
    pub total: usize,
    /// Cat face, from 😿 (0 correct) to 😻 (all correct).
    pub face: String,
    /// `"You scored 2/3 😸. Keep practicing!"`
    pub message: String,
    /// Perfect score: the page fires the confetti.
    pub celebrate: bool,
    /// [`Trigger::QuizWhiz`] on a perfect score.
    pub unlocked: Option<Trigger>,
}

impl QuizAnswers {
    /// Counts exact matches against the answer key.
    pub fn grade(&self) -> QuizOutcome {
        let given = [&self.q1, &self.q2, &self.q3];
        let correct = given
            .iter()
            .zip(QUIZ_KEY)
            .filter(|(answer, key)| answer.as_deref() == Some(*key))
            .count();
        let total = QUIZ_KEY.len();
        let perfect = correct == total;
        let cheer = if perfect { "Excellent!" } else { "Keep practicing!" };

        QuizOutcome {
            correct,
            total,
            face: QUIZ_FACES[correct].to_string(),
            message: format!("You scored {correct}/{total} {}. {cheer}", QUIZ_FACES[correct]),
            celebrate: perfect,
            unlocked: perfect.then_some(Trigger::QuizWhiz),
        }
    }
}

/// Sentence read aloud by the "speak result" button, for the result on screen.
pub fn narration_summary(label: Label, score: i32) -> String {
    format!("I think this message is {label}, with score {score}.")
}
