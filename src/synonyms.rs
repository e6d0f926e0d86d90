//! Synonym table: canonical keyword -> alternative surface forms.
//!
//! Shared by every question. Built once at startup, then only read.

use std::collections::HashMap;

use crate::util::normalize;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SynonymTable {
  entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register (or replace) the alternatives for `keyword`. Keys are stored normalized.
  pub fn insert<I, S>(&mut self, keyword: &str, alternatives: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .entries
      .insert(normalize(keyword), alternatives.into_iter().map(Into::into).collect());
  }

  /// Alternatives for `keyword`; empty when the keyword has none.
  pub fn alternatives(&self, keyword: &str) -> &[String] {
    self
      .entries
      .get(&normalize(keyword))
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }

  /// Overlay `other` on top of `self`; entries of `other` win on conflicting keys.
  pub fn merge(&mut self, other: SynonymTable) {
    self.entries.extend(other.entries);
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, Vec<V>)> for SynonymTable {
  fn from_iter<T: IntoIterator<Item = (K, Vec<V>)>>(iter: T) -> Self {
    let mut table = SynonymTable::new();
    for (k, vs) in iter {
      table.insert(k.as_ref(), vs);
    }
    table
  }
}

/// Built-in biology paraphrases.
///
/// Alternatives are at least five chars long: shorter forms such as "o2" sit within
/// one edit of everyday words ("of", "or", "on") and would credit empty answers.
pub fn builtin_synonyms() -> SynonymTable {
  SynonymTable::from_iter([
    ("energy", vec!["biomass", "chemical energy"]),
    ("absorb", vec!["absorbs", "absorbed", "capture"]),
    ("light", vec!["sunlight", "photons"]),
    ("wavelengths", vec!["spectrum", "colours", "colors"]),
    ("glucose", vec!["sugar", "carbohydrate"]),
    ("enzyme", vec!["enzymes", "catalyst"]),
    ("active site", vec!["binding site"]),
    ("denature", vec!["denatured", "denatures", "denaturation"]),
    ("diffusion", vec!["diffuse", "diffuses"]),
    ("mitochondria", vec!["mitochondrion"]),
    ("respiration", vec!["respire", "respiring"]),
    ("producer", vec!["producers", "autotroph"]),
    ("lost", vec!["wasted", "escapes"]),
  ])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lookup_is_normalized() {
    let table = builtin_synonyms();
    assert_eq!(table.alternatives("Energy"), ["biomass", "chemical energy"]);
    assert_eq!(table.alternatives("energy!"), ["biomass", "chemical energy"]);
  }

  #[test]
  fn unknown_keyword_has_no_alternatives() {
    assert!(builtin_synonyms().alternatives("ribosome").is_empty());
  }

  #[test]
  fn builtin_alternatives_are_not_short_forms() {
    let table = builtin_synonyms();
    for (keyword, alternatives) in &table.entries {
      for alt in alternatives {
        assert!(normalize(alt).chars().count() >= 5, "{keyword}: alternative {alt:?} is too short");
      }
    }
  }

  #[test]
  fn merge_replaces_conflicting_entries() {
    let mut base = builtin_synonyms();
    let before = base.len();
    base.merge(SynonymTable::from_iter([
      ("energy", vec!["joules"]),
      ("ribosome", vec!["ribosomes"]),
    ]));
    assert_eq!(base.alternatives("energy"), ["joules"]);
    assert_eq!(base.alternatives("ribosome"), ["ribosomes"]);
    assert_eq!(base.len(), before + 1);
  }
}
