//! Small text helpers used across modules: answer normalization and log truncation.

/// Normalize free text for keyword matching.
///
/// - lowercases everything
/// - drops every char that is neither a word char (alphanumeric or `_`) nor whitespace,
///   so "light-dependent" becomes "lightdependent"
/// - collapses whitespace runs to one space and trims the ends
///
/// Alphanumeric is Unicode-aware: accented letters survive as-is (no folding),
/// so "café" and "cafe" stay one edit apart.
pub fn normalize(text: &str) -> String {
  text
    .to_lowercase()
    .chars()
    .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
    .collect::<String>()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with whole student essays. Cuts on a char boundary.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}
