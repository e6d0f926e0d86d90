//! Built-in biology question bank. Keeps the app useful without any external config.

use crate::domain::{Difficulty, MarkingGroup, Question};

fn points(groups: &[&[&str]]) -> Vec<MarkingGroup> {
  groups
    .iter()
    .map(|g| g.iter().map(|k| (*k).to_string()).collect())
    .collect()
}

/// Minimal set of built-in questions.
pub fn seed_questions() -> Vec<Question> {
  vec![
    Question::new(
      1,
      "Photosynthesis",
      Difficulty::Medium,
      "Why do thylakoid membranes contain many types of pigments?",
      "Different pigments absorb light of different wavelengths, so a wider range of the spectrum can be used for photosynthesis.",
      points(&[&["absorb", "absorption"], &["light"], &["wavelengths", "range"], &["photosynthesis"]]),
    ),
    Question::new(
      2,
      "Photosynthesis",
      Difficulty::Easy,
      "Name the gas released as a by-product of photosynthesis.",
      "Oxygen.",
      points(&[&["oxygen"]]),
    ),
    Question::new(
      3,
      "Photosynthesis",
      Difficulty::Hard,
      "Explain the role of water in the light-dependent reaction.",
      "Water is split by photolysis, providing electrons to replace those lost by chlorophyll, protons for reducing NADP, and releasing oxygen.",
      points(&[&["photolysis", "split", "splitting"], &["electrons"], &["protons", "hydrogen"], &["oxygen"]]),
    ),
    Question::new(
      4,
      "Enzymes",
      Difficulty::Medium,
      "Why does enzyme activity fall at very high temperatures?",
      "The enzyme denatures: bonds holding its tertiary structure break, the active site changes shape and the substrate no longer fits.",
      points(&[&["denature"], &["active site", "shape"], &["substrate"], &["bonds", "tertiary"]]),
    ),
    Question::new(
      5,
      "Cells",
      Difficulty::Easy,
      "Which organelle is the site of aerobic respiration?",
      "The mitochondrion.",
      points(&[&["mitochondria"]]),
    ),
    Question::new(
      6,
      "Transport",
      Difficulty::Medium,
      "Define diffusion.",
      "The net movement of particles from a region of higher concentration to a region of lower concentration, down a concentration gradient.",
      points(&[&["movement", "moves"], &["particles", "molecules"], &["concentration"], &["gradient"]]),
    ),
    Question::new(
      7,
      "Ecology",
      Difficulty::Hard,
      "Explain why food chains rarely have more than five trophic levels.",
      "At each trophic level energy is lost as heat through respiration and in waste, so too little energy remains to support further levels.",
      points(&[&["energy"], &["lost"], &["respiration"], &["levels", "level"]]),
    ),
    Question::new(
      8,
      "Genetics",
      Difficulty::Easy,
      "Which molecule carries genetic information in most organisms?",
      "DNA.",
      points(&[&["dna", "deoxyribonucleic"]]),
    ),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn ids_are_unique() {
    let qs = seed_questions();
    let ids: HashSet<u32> = qs.iter().map(|q| q.id).collect();
    assert_eq!(ids.len(), qs.len());
  }

  #[test]
  fn every_question_is_gradable() {
    for q in seed_questions() {
      assert!(!q.marking_points.is_empty(), "question {} has no marking points", q.id);
      assert!(q.marking_points.iter().all(|g| !g.is_empty()), "question {} has an empty group", q.id);
      assert_eq!(q.base_xp, q.difficulty.base_xp());
    }
  }
}
