//! Graded comparison for integer-like fields (cylinder count, model year).

/// Parse the leading base-10 integer of `s`, ignoring leading whitespace
/// and trailing garbage ("4 cyl" -> 4). `None` when no digit leads.
fn leading_int(s: &str) -> Option<i64> {
  let t = s.trim_start();
  let (sign, digits) = match t.as_bytes().first() {
    Some(b'-') => (-1, &t[1..]),
    Some(b'+') => (1, &t[1..]),
    _ => (1, t),
  };
  let end = digits
    .char_indices()
    .find(|(_, c)| !c.is_ascii_digit())
    .map(|(i, _)| i)
    .unwrap_or(digits.len());
  if end == 0 {
    return None;
  }
  digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Accuracy in `{0, 0.6, 0.8, 1}` by absolute difference: 0 -> 1, 1 -> 0.8,
/// 2 -> 0.6, more -> 0. Unparseable input on either side scores 0.
pub fn compare_numbers(expected: &str, actual: &str) -> f64 {
  let (Some(exp), Some(act)) = (leading_int(expected), leading_int(actual)) else {
    return 0.0;
  };
  match exp.abs_diff(act) {
    0 => 1.0,
    1 => 0.8,
    2 => 0.6,
    _ => 0.0,
  }
}
