//! Answer normalization and comparison.
//!
//! `is_correct` is a pure function of the instance's declared modality,
//! its auxiliary data, and the candidate string; it has no side effects
//! and no rendering dependency. Malformed candidate input (a numeric
//! field that does not parse, a broken roman numeral) is simply
//! incorrect: it is the player's answer, not an engine error.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::domain::{Modality, ProblemData, ProblemInstance};
use crate::roman::from_roman;

/// Casefold + NFD diacritic strip + whitespace collapse. With
/// `fold_hyphens`, hyphens count as spaces ("quatre-vingt-un" matches
/// "quatre vingt un").
pub fn normalize_alpha(s: &str, fold_hyphens: bool) -> String {
  let stripped: String = s.nfd().filter(|c| !is_combining_mark(*c)).collect();
  let mut lower = stripped.to_lowercase();
  if fold_hyphens {
    lower = lower.replace('-', " ");
  }
  lower.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Casefold only. Short tokens ("VRAI", "<", "un") keep their
/// diacritics: for homophone buttons "a" and "à" must stay distinct.
pub fn normalize_choice(s: &str) -> String {
  s.trim().to_lowercase()
}

/// Locale-tolerant numeric parse: decimal comma or dot.
pub fn parse_number(s: &str) -> Option<f64> {
  let t = s.trim().replace(',', ".");
  if t.is_empty() {
    return None;
  }
  t.parse::<f64>().ok()
}

/// Sum of the values at the player's selected indices of a
/// multi-select grid. Out-of-range indices are ignored; duplicate
/// indices count once.
pub fn selection_sum(data: &ProblemData, indices: &[usize]) -> i64 {
  let ProblemData::Square { numbers, .. } = data else {
    return 0;
  };
  let mut seen = vec![false; numbers.len()];
  let mut sum = 0;
  for &i in indices {
    if let Some(&n) = numbers.get(i) {
      if !seen[i] {
        seen[i] = true;
        sum += n;
      }
    }
  }
  sum
}

// Clock answers carry a leading zero ("0915"); compare digits only,
// left-padded to the canonical width, so "915" is also accepted.
fn padded_digits_equal(target: &str, candidate: &str) -> bool {
  let digits: String = candidate.chars().filter(|c| c.is_ascii_digit()).collect();
  if digits.is_empty() || digits.len() > target.len() {
    return false;
  }
  let padded = format!("{:0>width$}", digits, width = target.len());
  padded == target
}

/// Correctness verdict for a candidate answer against an instance.
pub fn is_correct(instance: &ProblemInstance, candidate: &str) -> bool {
  match instance.modality {
    Modality::Numeric | Modality::Selection => {
      if matches!(instance.data, ProblemData::Clock { .. }) {
        return padded_digits_equal(&instance.answer, candidate);
      }
      match (parse_number(&instance.answer), parse_number(candidate)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
      }
    }
    Modality::Alpha => {
      normalize_alpha(&instance.answer, instance.fold_hyphens)
        == normalize_alpha(candidate, instance.fold_hyphens)
    }
    Modality::Boolean | Modality::Choice => {
      normalize_choice(&instance.answer) == normalize_choice(candidate)
    }
    Modality::Roman => match (from_roman(&instance.answer), from_roman(candidate)) {
      (Ok(a), Ok(b)) => a == b,
      _ => false,
    },
  }
}
