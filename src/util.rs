//! Small utility helpers used across modules.

/// Lower-case ASCII slug: alphanumeric runs joined by `-`.
/// Used for stable catalog keys ("Moto Guzzi V7" -> "moto-guzzi-v7").
pub fn slug(s: &str) -> String {
  s.to_lowercase()
    .split(|c: char| !c.is_ascii_alphanumeric())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join("-")
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with long free-text answers.
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

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slug_collapses_separators() {
    assert_eq!(slug("Moto Guzzi  V7 / III"), "moto-guzzi-v7-iii");
    assert_eq!(slug("  "), "");
  }

  #[test]
  fn trunc_respects_char_boundaries() {
    assert_eq!(trunc_for_log("abc", 10), "abc");
    let t = trunc_for_log("éééé", 3);
    assert!(t.starts_with('é'));
    assert!(t.ends_with("(8 bytes total)"));
  }
}
