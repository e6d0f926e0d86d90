//! Domain models: difficulty tiers, questions with marking points, grades and grading outcomes.

use serde::{Deserialize, Serialize};

/// Difficulty tier of a question. Fixes the question's base XP.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  #[serde(alias = "Easy", alias = "EASY")]
  Easy,
  #[serde(alias = "Medium", alias = "MEDIUM")]
  Medium,
  #[serde(alias = "Hard", alias = "HARD")]
  Hard,
}

impl Difficulty {
  /// Maximum XP a fully correct answer earns at this tier.
  pub const fn base_xp(self) -> u32 {
    match self {
      Difficulty::Easy => 1,
      Difficulty::Medium => 5,
      Difficulty::Hard => 8,
    }
  }

  /// Lenient parse for query strings ("hard", "Hard", " HARD ").
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "easy" => Some(Difficulty::Easy),
      "medium" => Some(Difficulty::Medium),
      "hard" => Some(Difficulty::Hard),
      _ => None,
    }
  }
}

/// One awardable mark: interchangeable phrasings, any of which earns the point.
pub type MarkingGroup = Vec<String>;

/// A question from the bank. Read-only once the bank is built.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Question {
  pub id: u32,
  pub topic: String,
  pub difficulty: Difficulty,
  pub question: String,
  /// Model answer, shown on reveal. Not used for grading.
  pub answer: String,
  pub marking_points: Vec<MarkingGroup>,
  pub base_xp: u32,
}

impl Question {
  /// Build a question; `base_xp` always comes from the difficulty lookup.
  pub fn new(
    id: u32,
    topic: impl Into<String>,
    difficulty: Difficulty,
    question: impl Into<String>,
    answer: impl Into<String>,
    marking_points: Vec<MarkingGroup>,
  ) -> Self {
    Self {
      id,
      topic: topic.into(),
      difficulty,
      question: question.into(),
      answer: answer.into(),
      marking_points,
      base_xp: difficulty.base_xp(),
    }
  }
}

/// Discrete classification of an answer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
  Correct,
  Partial,
  Incorrect,
}

impl Grade {
  pub const CORRECT_THRESHOLD: f64 = 0.75;
  pub const PARTIAL_THRESHOLD: f64 = 0.4;

  /// Thresholds are checked top-down; first match wins.
  pub fn from_ratio(ratio: f64) -> Self {
    if ratio >= Self::CORRECT_THRESHOLD {
      Grade::Correct
    } else if ratio >= Self::PARTIAL_THRESHOLD {
      Grade::Partial
    } else {
      Grade::Incorrect
    }
  }

  pub const fn xp_multiplier(self) -> f64 {
    match self {
      Grade::Correct => 1.0,
      Grade::Partial => 0.5,
      Grade::Incorrect => 0.0,
    }
  }

  /// Scaled XP, rounded half away from zero (base 1 at partial gives 1).
  pub fn earned_xp(self, base_xp: u32) -> u32 {
    (f64::from(base_xp) * self.xp_multiplier()).round() as u32
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Grade::Correct => "correct",
      Grade::Partial => "partial",
      Grade::Incorrect => "incorrect",
    }
  }
}

impl std::fmt::Display for Grade {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Result of grading one answer. Built once, never mutated.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GradingOutcome {
  pub grade: Grade,
  pub score_ratio: f64,
  pub earned_xp: u32,
  pub matched_points: usize,
  pub total_points: usize,
  /// One flag per marking-point group, in question order.
  pub group_hits: Vec<bool>,
}
