//! Free-text answer grading against marking-point groups.
//!
//! Flow:
//! 1) the answer is normalized (lowercase, no punctuation, single spaces)
//! 2) each marking-point group is satisfied if any of its keywords, or a synonym
//!    of one, matches any answer token exactly or within a length-scaled edit distance
//! 3) satisfied groups / total groups gives the ratio, which fixes the grade and the XP
//!
//! Pure and synchronous: no I/O, no shared mutable state. The synonym table is
//! injected, so one `Grader` can be shared across tasks.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Grade, GradingOutcome, Question};
use crate::similarity::{edit_distance, tolerance_for};
use crate::synonyms::SynonymTable;
use crate::util::normalize;

#[derive(Clone, Debug, Default)]
pub struct Grader {
  synonyms: Arc<SynonymTable>,
}

impl Grader {
  pub fn new(synonyms: Arc<SynonymTable>) -> Self {
    Self { synonyms }
  }

  pub fn synonyms(&self) -> &SynonymTable {
    &self.synonyms
  }

  /// Does the (already normalized) answer express `keyword` or one of its synonyms?
  pub fn contains_concept(&self, normalized_text: &str, keyword: &str) -> bool {
    let targets: Vec<String> = std::iter::once(keyword)
      .chain(self.synonyms.alternatives(keyword).iter().map(String::as_str))
      .map(normalize)
      .filter(|t| !t.is_empty())
      .collect();

    normalized_text.split_whitespace().any(|token| {
      targets
        .iter()
        .any(|target| token == target.as_str() || edit_distance(token, target) <= tolerance_for(target))
    })
  }

  /// Which groups of `question` does the normalized answer satisfy? One flag per group.
  pub fn group_hits(&self, normalized_text: &str, question: &Question) -> Vec<bool> {
    question
      .marking_points
      .iter()
      .map(|group| group.iter().any(|k| self.contains_concept(normalized_text, k)))
      .collect()
  }

  /// Grade a raw answer. Never panics; an empty marking scheme grades as incorrect.
  pub fn grade_answer(&self, user_answer: &str, question: &Question) -> GradingOutcome {
    let text = normalize(user_answer);
    let group_hits = self.group_hits(&text, question);

    let total_points = group_hits.len();
    let matched_points = group_hits.iter().filter(|hit| **hit).count();
    let score_ratio = if total_points == 0 {
      0.0
    } else {
      matched_points as f64 / total_points as f64
    };

    let grade = Grade::from_ratio(score_ratio);
    let earned_xp = grade.earned_xp(question.base_xp);

    debug!(
      target: "grading",
      question_id = question.id,
      matched_points,
      total_points,
      score_ratio,
      %grade,
      earned_xp,
      "Answer graded"
    );

    GradingOutcome { grade, score_ratio, earned_xp, matched_points, total_points, group_hits }
  }
}
