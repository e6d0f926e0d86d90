//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::protocol::{to_filter, to_out, AnswerOut, ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "markpoint_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "markpoint_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = reply_json(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "markpoint_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "markpoint_backend", "WebSocket disconnected");
}

/// Parse, dispatch, serialize response.
async fn reply_json(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "markpoint_backend", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  let error = |e: crate::error::LookupError| ServerWsMessage::Error { message: e.to_string() };

  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::NewQuestion { difficulty, topic } => {
      let filter = match to_filter(difficulty.as_deref(), topic.as_deref()) {
        Ok(f) => f,
        Err(e) => return error(e),
      };
      match state.choose_question(&filter).await {
        Some(q) => {
          info!(target: "grading", id = q.id, "WS new_question served");
          ServerWsMessage::Question { question: to_out(&q) }
        }
        None => error(crate::error::LookupError::NoMatchingQuestion),
      }
    }

    ClientWsMessage::SubmitAnswer { question_id, answer } => {
      match evaluate_answer(state, question_id, &answer) {
        Ok((outcome, explanation)) => {
          info!(target: "grading", id = question_id, grade = %outcome.grade, "WS submit_answer evaluated");
          ServerWsMessage::AnswerResult(AnswerOut::new(outcome, explanation))
        }
        Err(e) => error(e),
      }
    }

    ClientWsMessage::Hint { question_id, current } => {
      match get_hint_text(state, question_id, current.as_deref()) {
        Ok(text) => ServerWsMessage::Hint { text },
        Err(e) => error(e),
      }
    }

    ClientWsMessage::Reveal { question_id } => match reveal_answer(state, question_id) {
      Ok(answer) => ServerWsMessage::Reveal { answer },
      Err(e) => error(e),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::seeds::seed_questions;
  use crate::synonyms::builtin_synonyms;

  fn state() -> AppState {
    AppState::from_parts(seed_questions(), builtin_synonyms())
  }

  async fn roundtrip(txt: &str) -> serde_json::Value {
    serde_json::from_str(&reply_json(txt, &state()).await).unwrap()
  }

  #[tokio::test]
  async fn ping_pong() {
    assert_eq!(roundtrip(r#"{"type":"ping"}"#).await["type"], "pong");
  }

  #[tokio::test]
  async fn invalid_json_is_an_error_message() {
    let v = roundtrip("not json").await;
    assert_eq!(v["type"], "error");
    assert!(v["message"].as_str().unwrap().starts_with("Invalid JSON"));
  }

  #[tokio::test]
  async fn submit_answer_grades() {
    let v = roundtrip(r#"{"type":"submit_answer","questionId":1,"answer":"it helps absorb light of different wavelength ranges for photosynthesis"}"#).await;
    assert_eq!(v["type"], "answer_result");
    assert_eq!(v["grade"], "correct");
    assert_eq!(v["earnedXp"], 5);
    assert_eq!(v["matchedPoints"], 4);
  }

  #[tokio::test]
  async fn unknown_question_is_an_error_message() {
    let v = roundtrip(r#"{"type":"reveal","questionId":999}"#).await;
    assert_eq!(v["type"], "error");
    assert_eq!(v["message"], "unknown question id: 999");
  }

  #[tokio::test]
  async fn new_question_respects_filter() {
    let v = roundtrip(r#"{"type":"new_question","topic":"genetics"}"#).await;
    assert_eq!(v["type"], "question");
    assert_eq!(v["question"]["id"], 8);
    assert_eq!(v["question"]["baseXp"], 1);
  }

  #[tokio::test]
  async fn bad_difficulty_is_an_error_message() {
    let v = roundtrip(r#"{"type":"new_question","difficulty":"expert"}"#).await;
    assert_eq!(v["type"], "error");
  }
}
