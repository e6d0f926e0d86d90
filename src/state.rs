//! Application state: the read-only question index, the grader, and selection logic.
//!
//! This module owns:
//!   - the question bank indexed by id (built-ins overlaid with the TOML bank)
//!   - the grader with its synonym table
//!   - the last question served per filter, to avoid immediate repeats
//!
//! Only the last-served memory is mutable; everything else is fixed at startup.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};
use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::config::load_bank_config_from_env;
use crate::domain::{Difficulty, Question};
use crate::grading::Grader;
use crate::seeds::seed_questions;
use crate::synonyms::{builtin_synonyms, SynonymTable};

/// Optional narrowing of the bank by difficulty and/or topic (topic is case-insensitive).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub difficulty: Option<Difficulty>,
    pub topic: Option<String>,
}

impl QuestionFilter {
    pub fn matches(&self, q: &Question) -> bool {
        let diff_ok = self.difficulty.map_or(true, |d| q.difficulty == d);
        let topic_ok = self
            .topic
            .as_deref()
            .map_or(true, |t| q.topic.eq_ignore_ascii_case(t.trim()));
        diff_ok && topic_ok
    }

    fn key(&self) -> String {
        format!(
            "{}|{}",
            self.difficulty.map_or("any", |d| match d {
                Difficulty::Easy => "easy",
                Difficulty::Medium => "medium",
                Difficulty::Hard => "hard",
            }),
            self.topic.as_deref().unwrap_or("any").trim().to_lowercase()
        )
    }
}

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<BTreeMap<u32, Question>>,
    pub grader: Grader,
    pub last_by_filter: Arc<RwLock<HashMap<String, u32>>>,
}

impl AppState {
    /// Build state from env: built-in bank, overlaid with QUESTION_BANK_PATH if set.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let mut questions = seed_questions();
        let mut synonyms = builtin_synonyms();

        if let Some(cfg) = load_bank_config_from_env() {
            synonyms.merge(cfg.synonym_table());
            questions.extend(cfg.valid_questions());
        }

        let state = Self::from_parts(questions, synonyms);

        // Inventory summary by difficulty.
        let mut count_by_diff: BTreeMap<Difficulty, usize> = BTreeMap::new();
        for q in state.questions.values() {
            *count_by_diff.entry(q.difficulty).or_default() += 1;
        }
        for (difficulty, count) in count_by_diff {
            info!(target: "grading", ?difficulty, count, "Startup question inventory");
        }
        if state.grader.synonyms().is_empty() {
            warn!(target: "grading", "Synonym table is empty; only exact and fuzzy keyword matches apply");
        } else {
            info!(target: "grading", synonyms = state.grader.synonyms().len(), "Synonym table ready");
        }

        state
    }

    /// Build state from explicit parts. Later questions replace earlier ones with the same id.
    pub fn from_parts(questions: Vec<Question>, synonyms: SynonymTable) -> Self {
        let mut by_id = BTreeMap::new();
        for q in questions {
            if let Some(old) = by_id.insert(q.id, q) {
                warn!(target: "grading", id = old.id, "Question id defined twice; keeping the later definition");
            }
        }
        Self {
            questions: Arc::new(by_id),
            grader: Grader::new(Arc::new(synonyms)),
            last_by_filter: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Read-only access to a question by id.
    pub fn get_question(&self, id: u32) -> Option<&Question> {
        self.questions.get(&id)
    }

    /// Questions matching `filter`, in id order.
    pub fn list_questions(&self, filter: &QuestionFilter) -> Vec<&Question> {
        self.questions.values().filter(|q| filter.matches(q)).collect()
    }

    /// Distinct topics, sorted.
    pub fn topics(&self) -> Vec<String> {
        self.questions
            .values()
            .map(|q| q.topic.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Selection policy:
    /// pick a random matching question, skipping the one served last for the
    /// same filter when there is any other choice.
    #[instrument(level = "info", skip(self))]
    pub async fn choose_question(&self, filter: &QuestionFilter) -> Option<Question> {
        let candidates = self.list_questions(filter);
        if candidates.is_empty() {
            warn!(target: "grading", ?filter, "No question matches filter");
            return None;
        }

        let key = filter.key();
        let last = { self.last_by_filter.read().await.get(&key).copied() };
        let fresh: Vec<&Question> = match last {
            Some(last_id) if candidates.len() > 1 => {
                candidates.iter().copied().filter(|q| q.id != last_id).collect()
            }
            _ => candidates.clone(),
        };

        let chosen = {
            let mut rng = rand::thread_rng();
            fresh.choose(&mut rng).copied()
        }?
        .clone();

        self.last_by_filter.write().await.insert(key, chosen.id);
        info!(target: "grading", chosen = chosen.id, candidates = candidates.len(), "Question selected");
        Some(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::from_parts(seed_questions(), builtin_synonyms())
    }

    #[test]
    fn filter_by_difficulty_and_topic() {
        let st = state();
        let hard = st.list_questions(&QuestionFilter { difficulty: Some(Difficulty::Hard), topic: None });
        assert!(!hard.is_empty());
        assert!(hard.iter().all(|q| q.difficulty == Difficulty::Hard));

        let photo = st.list_questions(&QuestionFilter { difficulty: None, topic: Some("photosynthesis".into()) });
        assert_eq!(photo.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn later_definitions_replace_earlier_ids() {
        let mut qs = seed_questions();
        qs.push(Question::new(1, "Override", Difficulty::Easy, "q", "a", vec![vec!["x".into()]]));
        let st = AppState::from_parts(qs, SynonymTable::new());
        assert_eq!(st.get_question(1).map(|q| q.topic.as_str()), Some("Override"));
    }

    #[test]
    fn topics_are_sorted_and_distinct() {
        let topics = state().topics();
        let mut sorted = topics.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(topics, sorted);
        assert!(topics.contains(&"Photosynthesis".to_string()));
    }

    #[tokio::test]
    async fn choose_avoids_immediate_repeat() {
        let st = state();
        let filter = QuestionFilter { difficulty: None, topic: Some("Photosynthesis".into()) };
        let mut prev = st.choose_question(&filter).await.unwrap().id;
        for _ in 0..20 {
            let next = st.choose_question(&filter).await.unwrap().id;
            assert_ne!(next, prev);
            prev = next;
        }
    }

    #[tokio::test]
    async fn choose_single_candidate_repeats() {
        let st = state();
        let filter = QuestionFilter { difficulty: None, topic: Some("Genetics".into()) };
        assert_eq!(st.choose_question(&filter).await.unwrap().id, 8);
        assert_eq!(st.choose_question(&filter).await.unwrap().id, 8);
    }

    #[tokio::test]
    async fn choose_with_no_match_is_none() {
        let st = state();
        let filter = QuestionFilter { difficulty: None, topic: Some("Astronomy".into()) };
        assert!(st.choose_question(&filter).await.is_none());
    }
}
