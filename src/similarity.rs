//! Levenshtein edit distance, used as a typo-tolerance heuristic between an
//! answer token and a keyword.
//!
//! Inputs are single human-typed words, so the plain O(n·m) table is fine.

/// Minimum number of single-char insertions, deletions or substitutions
/// turning `a` into `b`. Works on chars, not bytes.
pub fn edit_distance(a: &str, b: &str) -> usize {
  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();

  // table[i][j] = distance between b[..i] and a[..j]
  let mut table = vec![vec![0usize; a.len() + 1]; b.len() + 1];
  for (i, row) in table.iter_mut().enumerate() {
    row[0] = i;
  }
  for j in 0..=a.len() {
    table[0][j] = j;
  }

  for i in 1..=b.len() {
    for j in 1..=a.len() {
      table[i][j] = if b[i - 1] == a[j - 1] {
        table[i - 1][j - 1]
      } else {
        let substitute = table[i - 1][j - 1];
        let insert = table[i][j - 1];
        let delete = table[i - 1][j];
        1 + substitute.min(insert).min(delete)
      };
    }
  }

  table[b.len()][a.len()]
}

/// Allowed edit distance for a keyword: keywords longer than 6 chars get 2,
/// shorter ones only 1.
pub fn tolerance_for(target: &str) -> usize {
  if target.chars().count() > 6 { 2 } else { 1 }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_string_cases() {
    assert_eq!(edit_distance("", ""), 0);
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("abcd", ""), 4);
  }

  #[test]
  fn identical_words() {
    assert_eq!(edit_distance("photosynthesis", "photosynthesis"), 0);
  }

  #[test]
  fn classic_examples() {
    assert_eq!(edit_distance("kitten", "sitting"), 3);
    assert_eq!(edit_distance("flaw", "lawn"), 2);
    assert_eq!(edit_distance("photosynthessis", "photosynthesis"), 1);
    assert_eq!(edit_distance("atp", "adp"), 1);
    assert_eq!(edit_distance("atp", "xyz"), 3);
  }

  #[test]
  fn symmetric() {
    for (a, b) in [("chlorophyll", "clorofil"), ("mitosis", "meiosis"), ("", "dna"), ("gene", "genome")] {
      assert_eq!(edit_distance(a, b), edit_distance(b, a), "{a} vs {b}");
    }
  }

  #[test]
  fn counts_chars_not_bytes() {
    assert_eq!(edit_distance("café", "cafe"), 1);
  }

  #[test]
  fn tolerance_scales_with_length() {
    assert_eq!(tolerance_for("atp"), 1);
    assert_eq!(tolerance_for("enzyme"), 1);
    assert_eq!(tolerance_for("glucose"), 2);
    assert_eq!(tolerance_for("photosynthesis"), 2);
  }
}
