//! Loading the question bank (questions + synonyms) from TOML.
//!
//! See `BankConfig` and `QuestionCfg` for expected schema.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Difficulty, Question};
use crate::error::BankError;
use crate::synonyms::SynonymTable;
use crate::util::normalize;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct BankConfig {
  #[serde(default)]
  pub synonyms: HashMap<String, Vec<String>>,
  #[serde(default)]
  pub questions: Vec<QuestionCfg>,
}

/// Question entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  pub id: u32,
  pub topic: String,
  pub difficulty: Difficulty,
  pub question: String,
  #[serde(default)] pub answer: String,
  pub marking_points: Vec<Vec<String>>,
  /// Optional; when present it must agree with the difficulty lookup.
  #[serde(default)] pub base_xp: Option<u32>,
}

impl QuestionCfg {
  /// Check the entry and turn it into a `Question`.
  pub fn validate(&self) -> Result<Question, BankError> {
    if self.marking_points.is_empty() {
      return Err(BankError::EmptyMarkingPoints(self.id));
    }
    for (index, group) in self.marking_points.iter().enumerate() {
      if group.is_empty() {
        return Err(BankError::EmptyGroup { id: self.id, index });
      }
      if group.iter().any(|k| normalize(k).is_empty()) {
        return Err(BankError::BlankKeyword { id: self.id, index });
      }
    }
    let expected = self.difficulty.base_xp();
    if let Some(declared) = self.base_xp {
      if declared != expected {
        return Err(BankError::BaseXpMismatch { id: self.id, difficulty: self.difficulty, declared, expected });
      }
    }
    Ok(Question::new(
      self.id,
      self.topic.clone(),
      self.difficulty,
      self.question.clone(),
      self.answer.clone(),
      self.marking_points.clone(),
    ))
  }
}

impl BankConfig {
  pub fn synonym_table(&self) -> SynonymTable {
    self.synonyms.iter().map(|(k, v)| (k.as_str(), v.clone())).collect()
  }

  /// Valid questions only; invalid entries are logged and skipped.
  pub fn valid_questions(&self) -> Vec<Question> {
    self
      .questions
      .iter()
      .filter_map(|qc| match qc.validate() {
        Ok(q) => Some(q),
        Err(e) => {
          error!(target: "grading", id = qc.id, error = %e, "Skipping bank item");
          None
        }
      })
      .collect()
  }
}

pub fn parse_bank_config(s: &str) -> Result<BankConfig, BankError> {
  Ok(toml::from_str::<BankConfig>(s)?)
}

pub fn load_bank_config(path: &str) -> Result<BankConfig, BankError> {
  let s = std::fs::read_to_string(path).map_err(|source| BankError::Io { path: path.to_string(), source })?;
  parse_bank_config(&s)
}

/// Attempt to load `BankConfig` from QUESTION_BANK_PATH. On any parsing/IO error, returns None.
pub fn load_bank_config_from_env() -> Option<BankConfig> {
  let path = std::env::var("QUESTION_BANK_PATH").ok()?;
  match load_bank_config(&path) {
    Ok(cfg) => {
      info!(target: "markpoint_backend", %path, questions = cfg.questions.len(), synonyms = cfg.synonyms.len(), "Loaded question bank (TOML)");
      Some(cfg)
    }
    Err(e) => {
      error!(target: "markpoint_backend", %path, error = %e, "Failed to load question bank; using built-in questions");
      None
    }
  }
}
