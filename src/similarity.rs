//! Free-text answer comparison.
//!
//! Both sides are lower-cased and every run of non-alphanumeric characters
//! becomes a single space. Equal strings score 1; a substring covering at
//! least [`CONTAINMENT_RATIO`] of the longer side also scores 1 (so
//! "panigale v4" matches "Panigale V4S"); everything else falls back to
//! normalized Levenshtein similarity.

use strsim::levenshtein;

/// Minimum shorter/longer length ratio for the containment shortcut.
pub const CONTAINMENT_RATIO: f64 = 0.6;

/// Lower-case, collapse non-alphanumeric runs to one space, trim.
pub fn normalize(value: &str) -> String {
  value
    .to_lowercase()
    .split(|c: char| !c.is_ascii_alphanumeric())
    .filter(|w| !w.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

/// `1 - distance / max_len` on already-normalized input, 0 when either is empty.
fn edit_similarity(a: &str, b: &str) -> f64 {
  let max_len = a.chars().count().max(b.chars().count());
  if max_len == 0 {
    return 0.0;
  }
  1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Similarity in `[0, 1]` between the expected value and the player's answer.
pub fn similarity(expected: &str, actual: &str) -> f64 {
  let a = normalize(expected);
  let b = normalize(actual);
  if a.is_empty() || b.is_empty() {
    return 0.0;
  }
  if a == b {
    return 1.0;
  }
  if a.contains(&b) || b.contains(&a) {
    let (short, long) = if a.len() < b.len() { (a.len(), b.len()) } else { (b.len(), a.len()) };
    if short as f64 / long as f64 >= CONTAINMENT_RATIO {
      return 1.0;
    }
  }
  edit_similarity(&a, &b)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_collapses_punctuation() {
    assert_eq!(normalize("  Harley-Davidson   Fat/Boy! "), "harley davidson fat boy");
    assert_eq!(normalize("--"), "");
  }

  #[test]
  fn identical_and_empty() {
    assert_eq!(similarity("Yamaha", "Yamaha"), 1.0);
    assert_eq!(similarity("Yamaha", "yamaha!"), 1.0);
    assert_eq!(similarity("Yamaha", ""), 0.0);
    assert_eq!(similarity("", "Yamaha"), 0.0);
    assert_eq!(similarity("!!", "??"), 0.0);
  }

  #[test]
  fn containment_shortcut_boundary() {
    // 4/6 >= 0.6
    assert_eq!(similarity("Ducati", "Duca"), 1.0);
    // 3/6 < 0.6: edit distance 3 over 6
    assert!((similarity("Yamaha", "Yam") - 0.5).abs() < 1e-12);
    // 11/12 after normalization
    assert_eq!(similarity("Panigale V4S", "panigale v4"), 1.0);
  }

  #[test]
  fn edit_distance_fallback() {
    // kawasaki vs kawazaki: one substitution over 8
    assert!((similarity("Kawasaki", "Kawazaki") - 0.875).abs() < 1e-12);
    assert_eq!(similarity("abc", "xyz"), 0.0);
  }

  #[test]
  fn symmetric() {
    let pairs = [
      ("Triumph", "Trident"),
      ("Street Triple", "triple"),
      ("V-Twin", "V twin 90"),
      ("BMW", "Bimota"),
    ];
    for (a, b) in pairs {
      assert_eq!(similarity(a, b), similarity(b, a), "{a} / {b}");
    }
  }
}
