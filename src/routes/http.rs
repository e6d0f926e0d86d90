//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::LookupError;
use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuestionQuery>,
) -> Result<Json<QuestionOut>, LookupError> {
  let filter = to_filter(q.difficulty.as_deref(), q.topic.as_deref())?;
  let question = state.choose_question(&filter).await.ok_or(LookupError::NoMatchingQuestion)?;
  info!(target: "grading", id = question.id, "HTTP question served");
  Ok(Json(to_out(&question)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_questions(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuestionQuery>,
) -> Result<Json<Vec<QuestionOut>>, LookupError> {
  let filter = to_filter(q.difficulty.as_deref(), q.topic.as_deref())?;
  let list: Vec<QuestionOut> = state.list_questions(&filter).into_iter().map(to_out).collect();
  Ok(Json(list))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(TopicsOut { topics: state.topics() })
}

#[instrument(level = "info", skip(state, body), fields(%body.question_id, answer_len = body.answer.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, LookupError> {
  let (outcome, explanation) = evaluate_answer(&state, body.question_id, &body.answer)?;
  info!(target: "grading", id = body.question_id, grade = %outcome.grade, "HTTP submit_answer evaluated");
  Ok(Json(AnswerOut::new(outcome, explanation)))
}

#[instrument(level = "info", skip(state, q), fields(%q.question_id))]
pub async fn http_get_hint(
  State(state): State<Arc<AppState>>,
  Query(q): Query<HintQuery>,
) -> Result<Json<HintOut>, LookupError> {
  let text = get_hint_text(&state, q.question_id, q.current.as_deref())?;
  info!(target: "grading", id = q.question_id, "HTTP hint served");
  Ok(Json(HintOut { text }))
}

#[instrument(level = "info", skip(state), fields(%q.question_id))]
pub async fn http_get_reveal(
  State(state): State<Arc<AppState>>,
  Query(q): Query<RevealQuery>,
) -> Result<Json<RevealOut>, LookupError> {
  let answer = reveal_answer(&state, q.question_id)?;
  Ok(Json(RevealOut { answer }))
}
