//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Difficulty, Grade, GradingOutcome, Question};
use crate::error::LookupError;
use crate::state::QuestionFilter;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewQuestion {
        #[serde(default)]
        difficulty: Option<String>,
        #[serde(default)]
        topic: Option<String>,
    },
    SubmitAnswer {
        #[serde(rename = "questionId")]
        question_id: u32,
        answer: String,
    },
    Hint {
        #[serde(rename = "questionId")]
        question_id: u32,
        #[serde(default)]
        current: Option<String>,
    },
    Reveal {
        #[serde(rename = "questionId")]
        question_id: u32,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Question {
        question: QuestionOut,
    },
    AnswerResult(AnswerOut),
    Hint {
        text: String,
    },
    Reveal {
        answer: String,
    },
    Error {
        message: String,
    },
}

/// DTO used by both WS and HTTP for question delivery. Marking points stay server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
    pub id: u32,
    pub topic: String,
    pub difficulty: Difficulty,
    pub question: String,
    pub base_xp: u32,
    pub total_points: usize,
}

/// Convert a full `Question` (internal) to the public DTO.
pub fn to_out(q: &Question) -> QuestionOut {
    QuestionOut {
        id: q.id,
        topic: q.topic.clone(),
        difficulty: q.difficulty,
        question: q.question.clone(),
        base_xp: q.base_xp,
        total_points: q.marking_points.len(),
    }
}

/// Parse the raw difficulty/topic pair shared by HTTP queries and WS messages.
pub fn to_filter(difficulty: Option<&str>, topic: Option<&str>) -> Result<QuestionFilter, LookupError> {
    let difficulty = match difficulty.map(str::trim).filter(|s| !s.is_empty()) {
        Some(d) => Some(Difficulty::parse(d).ok_or_else(|| LookupError::UnknownDifficulty(d.to_string()))?),
        None => None,
    };
    let topic = topic
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Ok(QuestionFilter { difficulty, topic })
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub difficulty: Option<String>,
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "questionId")]
    pub question_id: u32,
    pub answer: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
    pub grade: Grade,
    pub score_ratio: f64,
    pub earned_xp: u32,
    pub matched_points: usize,
    pub total_points: usize,
    pub group_hits: Vec<bool>,
    pub explanation: String,
}

impl AnswerOut {
    pub fn new(outcome: GradingOutcome, explanation: String) -> Self {
        Self {
            grade: outcome.grade,
            score_ratio: outcome.score_ratio,
            earned_xp: outcome.earned_xp,
            matched_points: outcome.matched_points,
            total_points: outcome.total_points,
            group_hits: outcome.group_hits,
            explanation,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HintQuery {
    #[serde(rename = "questionId")]
    pub question_id: u32,
    pub current: Option<String>,
}
#[derive(Serialize)]
pub struct HintOut {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RevealQuery {
    #[serde(rename = "questionId")]
    pub question_id: u32,
}
#[derive(Serialize)]
pub struct RevealOut {
    pub answer: String,
}

#[derive(Serialize)]
pub struct TopicsOut {
    pub topics: Vec<String>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_parse() {
        let m: ClientWsMessage =
            serde_json::from_str(r#"{"type":"submit_answer","questionId":1,"answer":"light"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::SubmitAnswer { question_id: 1, .. }));

        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"new_question"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::NewQuestion { difficulty: None, topic: None }));
    }

    #[test]
    fn answer_result_is_flat() {
        let msg = ServerWsMessage::AnswerResult(AnswerOut {
            grade: Grade::Partial,
            score_ratio: 0.5,
            earned_xp: 4,
            matched_points: 2,
            total_points: 4,
            group_hits: vec![true, true, false, false],
            explanation: String::new(),
        });
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "answer_result");
        assert_eq!(v["grade"], "partial");
        assert_eq!(v["earnedXp"], 4);
        assert_eq!(v["scoreRatio"], 0.5);
    }

    #[test]
    fn filter_parsing() {
        let f = to_filter(Some("Hard"), Some("  Ecology ")).unwrap();
        assert_eq!(f.difficulty, Some(Difficulty::Hard));
        assert_eq!(f.topic.as_deref(), Some("Ecology"));

        let f = to_filter(Some(""), None).unwrap();
        assert_eq!(f, QuestionFilter::default());

        assert_eq!(to_filter(Some("expert"), None), Err(LookupError::UnknownDifficulty("expert".into())));
    }
}
