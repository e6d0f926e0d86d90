//! Error types for bank loading and question lookup.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::domain::Difficulty;

/// Problems found while reading or validating a question bank.
#[derive(Error, Debug)]
pub enum BankError {
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse question bank: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("question {0} has no marking points")]
    EmptyMarkingPoints(u32),
    #[error("question {id} has an empty marking-point group at index {index}")]
    EmptyGroup { id: u32, index: usize },
    #[error("question {id} has a blank keyword in group {index}")]
    BlankKeyword { id: u32, index: usize },
    #[error("question {id} declares base_xp {declared} but {difficulty:?} is worth {expected}")]
    BaseXpMismatch {
        id: u32,
        difficulty: Difficulty,
        declared: u32,
        expected: u32,
    },
}

/// Request-level failures returned by the API.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LookupError {
    #[error("unknown question id: {0}")]
    UnknownQuestion(u32),
    #[error("no question matches the requested filter")]
    NoMatchingQuestion,
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::UnknownQuestion(_) | LookupError::NoMatchingQuestion => StatusCode::NOT_FOUND,
            LookupError::UnknownDifficulty(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
