//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Grading a submitted answer against its question
//!   - Hints: a masked keyword from the first marking point a draft still misses
//!   - Revealing the model answer

use tracing::{debug, info, instrument};

use crate::domain::{GradingOutcome, Question};
use crate::error::LookupError;
use crate::state::AppState;
use crate::util::{normalize, trunc_for_log};

fn question<'a>(state: &'a AppState, question_id: u32) -> Result<&'a Question, LookupError> {
  state.get_question(question_id).ok_or(LookupError::UnknownQuestion(question_id))
}

#[instrument(level = "info", skip(state, answer), fields(%question_id, answer_len = answer.len()))]
pub fn evaluate_answer(state: &AppState, question_id: u32, answer: &str) -> Result<(GradingOutcome, String), LookupError> {
  let q = question(state, question_id)?;
  debug!(target: "grading", id = q.id, answer = %trunc_for_log(answer, 120), "Grading answer");
  let outcome = state.grader.grade_answer(answer, q);
  let explanation = explain(&outcome);
  info!(target: "grading", id = q.id, grade = %outcome.grade, earned_xp = outcome.earned_xp, "Answer evaluated");
  Ok((outcome, explanation))
}

#[instrument(level = "info", skip(state, current), fields(%question_id))]
pub fn get_hint_text(state: &AppState, question_id: u32, current: Option<&str>) -> Result<String, LookupError> {
  let q = question(state, question_id)?;
  let text = normalize(current.unwrap_or_default());
  let hits = state.grader.group_hits(&text, q);

  let missing = q
    .marking_points
    .iter()
    .zip(hits.iter())
    .position(|(group, hit)| !*hit && !group.is_empty());

  Ok(match missing {
    Some(index) => {
      let keyword = &q.marking_points[index][0];
      format!(
        "Think about point {} of {}: {}",
        index + 1,
        q.marking_points.len(),
        mask_keyword(keyword)
      )
    }
    None if q.marking_points.is_empty() => "No marking points for this question.".into(),
    None => "Your answer already covers every marking point.".into(),
  })
}

#[instrument(level = "info", skip(state), fields(%question_id))]
pub fn reveal_answer(state: &AppState, question_id: u32) -> Result<String, LookupError> {
  Ok(question(state, question_id)?.answer.clone())
}

/// Human-readable summary of an outcome.
pub fn explain(outcome: &GradingOutcome) -> String {
  format!(
    "Matched {} of {} marking points ({:.0}%): {}, +{} XP.",
    outcome.matched_points,
    outcome.total_points,
    outcome.score_ratio * 100.0,
    outcome.grade,
    outcome.earned_xp
  )
}

/// First char of each word kept, the rest blanked: "active site" -> "a_____ s___".
fn mask_keyword(keyword: &str) -> String {
  keyword
    .split_whitespace()
    .map(|word| {
      let mut chars = word.chars();
      match chars.next() {
        Some(first) => std::iter::once(first).chain(chars.map(|_| '_')).collect::<String>(),
        None => String::new(),
      }
    })
    .collect::<Vec<_>>()
    .join(" ")
}
