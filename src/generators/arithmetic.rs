//! Arithmetic, place-value, dictation, comparison and roman-numeral
//! generators. Plain-text questions, numeric or choice modalities.

use crate::domain::{DivisionStep, ExerciseParams, LanguageLibrary, Modality, ProblemData, Span, TableSpec};
use crate::generators::{AnswerValue, RawInstance};
use crate::roman::to_roman;
use crate::util::{chance, pick, rand_int};
use crate::words::number_to_words;

/// `a + b = ?`. The total is drawn first, then split.
pub fn add_simple(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let total = rand_int(p.min.unwrap_or(2).max(2), p.max_sum.unwrap_or(10).max(2));
  let a = rand_int(1, total - 1);
  Ok(RawInstance {
    question: Some(format!("{} + {} = ?", a, total - a)),
    answer: AnswerValue::Int(total),
    ..Default::default()
  })
}

/// `a + ? = total` fill-in-the-blank.
pub fn add_hole(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let total = rand_int(p.min.unwrap_or(2).max(2), p.max.unwrap_or(20).max(2));
  let a = rand_int(1, total - 1);
  Ok(RawInstance {
    question: Some(format!("{a} + ? = {total}")),
    answer: AnswerValue::Int(total - a),
    ..Default::default()
  })
}

/// `a - b = ?` with b ≤ a, so the result is never negative.
pub fn sub_simple(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let a = rand_int(p.min.unwrap_or(1).max(0), p.max.unwrap_or(10).max(1));
  let b = rand_int(0, a);
  Ok(RawInstance {
    question: Some(format!("{a} - {b} = ?")),
    answer: AnswerValue::Int(a - b),
    ..Default::default()
  })
}

/// One multiplication fact from a fixed table, or from tables 2..=9
/// with the "mix" keyword.
pub fn mult(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let table = match &p.table {
    Some(TableSpec::Number(n)) => *n,
    Some(TableSpec::Keyword(k)) if k == "mix" => rand_int(2, 9),
    Some(TableSpec::Keyword(k)) => return Err(format!("Table inconnue : {k}")),
    None => rand_int(2, 9),
  };
  let b = rand_int(0, 10);
  Ok(RawInstance {
    question: Some(format!("{table} × {b} = ?")),
    answer: AnswerValue::Int(table * b),
    ..Default::default()
  })
}

/// Complement to a round target (`current + ? = target`).
pub fn complement(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let target = p.target.unwrap_or(100).max(2);
  let current = rand_int(1, target - 1);
  Ok(RawInstance {
    question: Some(format!("{current} + ? = {target}")),
    answer: AnswerValue::Int(target - current),
    ..Default::default()
  })
}

const FRACTIONAL_POSITIONS: &[&str] = &["dixièmes", "centièmes"];
const INTEGER_POSITIONS: &[&str] = &["unités", "dizaines"];

/// Place-value extraction over a two-decimal value. The digits are
/// drawn directly, so the answer is the digit at the named position and
/// never a substring of a formatted float. The trap variant mixes in
/// integer-side positions.
pub fn decimal_place(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let whole = rand_int(10, 99);
  let tenths = rand_int(0, 9);
  let hundredths = rand_int(0, 9);
  let display = format!("{whole},{tenths}{hundredths}");

  let mut positions: Vec<&str> = FRACTIONAL_POSITIONS.to_vec();
  if p.trap.unwrap_or(false) {
    positions.extend_from_slice(INTEGER_POSITIONS);
  }
  let position = *pick(&positions).ok_or("Aucune position configurée")?;
  let digit = match position {
    "dixièmes" => tenths,
    "centièmes" => hundredths,
    "unités" => whole % 10,
    _ => whole / 10,
  };

  Ok(RawInstance {
    question: Some(format!("Dans {display}, quel est le chiffre des {position} ?")),
    answer: AnswerValue::Int(digit),
    ..Default::default()
  })
}

/// Number dictation: the prompt is the French word form, the answer the
/// digit string.
pub fn number_dictation(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let n = rand_int(p.min.unwrap_or(1000).max(0), p.max.unwrap_or(1_000_000));
  Ok(RawInstance {
    question: Some(format!("Écris en chiffres : « {} »", number_to_words(n as u64))),
    answer: AnswerValue::Int(n),
    ..Default::default()
  })
}

/// Reverse dictation: digits shown, word form expected. Alpha modality
/// with hyphen folding, so "quatre vingt un" is accepted.
pub fn letters_dictation(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let n = rand_int(p.min.unwrap_or(0).max(0), p.max.unwrap_or(9999));
  Ok(RawInstance {
    question: Some(format!("Écris en lettres : {n}")),
    answer: AnswerValue::Text(number_to_words(n as u64)),
    modality: Modality::Alpha,
    fold_hyphens: true,
    ..Default::default()
  })
}

/// Mental calculation. Division draws the answer first and multiplies
/// it back into the dividend; advanced multiplication biases toward
/// squares one time in five.
pub fn mental_calc(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let operator = p.operator.as_deref().unwrap_or("x");
  if operator == "/" {
    let operands = p.operands.as_deref().unwrap_or_default();
    let divisor = *pick(operands).ok_or("calc-mental : liste de diviseurs vide")?;
    if divisor == 0 {
      return Err("calc-mental : division par zéro".into());
    }
    let answer = rand_int(5, 200);
    let dividend = answer * divisor;
    return Ok(RawInstance {
      question: Some(format!("{dividend} : {divisor} = ?")),
      answer: AnswerValue::Int(answer),
      ..Default::default()
    });
  }

  let (lo, hi) = match &p.range {
    Some(Span::Bounds([lo, hi])) => (*lo, *hi),
    Some(Span::Max(m)) => (2, *m),
    None => (11, 15),
  };
  let a = rand_int(lo, hi);
  let b = if chance(0.2) { a } else { rand_int(2, 10) };
  Ok(RawInstance {
    question: Some(format!("{a} × {b} = ?")),
    answer: AnswerValue::Int(a * b),
    ..Default::default()
  })
}

/// Step decomposition of the standard long-division layout: walk the
/// dividend's digits left to right, accumulating a partial value, and
/// emit a step for every nonzero quotient digit, plus the terminal
/// digit even when its quotient digit is zero, so the final remainder
/// is always shown.
pub fn long_division_steps(dividend: u64, divisor: u64) -> Vec<DivisionStep> {
  if divisor == 0 {
    return Vec::new();
  }
  let digits: Vec<char> = dividend.to_string().chars().collect();
  let mut steps = Vec::new();
  let mut part = String::new();

  for (i, &d) in digits.iter().enumerate() {
    part.push(d);
    let value: u64 = part.parse().unwrap_or(0);
    let q = value / divisor;
    if q > 0 || i == digits.len() - 1 {
      let subtracted = q * divisor;
      let remainder = value - subtracted;
      steps.push(DivisionStep {
        subtracted,
        remainder,
        next_digit: digits.get(i + 1).map(|c| c.to_string()).unwrap_or_default(),
        end_index: i,
        part_width: part.chars().count(),
      });
      part = if remainder == 0 { String::new() } else { remainder.to_string() };
    }
  }
  steps
}

/// Posed division: divisor, quotient and remainder are drawn first and
/// the dividend derived, so quotient and remainder are well defined by
/// construction. The expected answer is the quotient.
pub fn division_posee(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let divisor = match p.operands.as_deref() {
    Some(list) if !list.is_empty() => pick(list).copied().unwrap_or(2),
    _ => rand_int(2, 9),
  };
  if divisor < 2 {
    return Err(format!("division : diviseur invalide {divisor}"));
  }
  let quotient = rand_int(p.min.unwrap_or(10).max(1), p.max.unwrap_or(99));
  let remainder = rand_int(0, divisor - 1);
  let dividend = (divisor * quotient + remainder) as u64;

  Ok(RawInstance {
    question: Some(format!("Pose la division : {dividend} ÷ {divisor}")),
    answer: AnswerValue::Int(quotient),
    data: Some(ProblemData::Division {
      dividend,
      divisor: divisor as u64,
      steps: long_division_steps(dividend, divisor as u64),
    }),
    ..Default::default()
  })
}

const COMPARISON_CHOICES: [&str; 3] = ["<", "=", ">"];

fn symbol_for(a: i64, b: i64) -> &'static str {
  if a > b {
    ">"
  } else if a < b {
    "<"
  } else {
    "="
  }
}

/// Integer comparison with a fixed equal-pair bias, so the player
/// cannot assume the two sides always differ.
pub fn compare_integers(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let max = match &p.range {
    Some(Span::Max(m)) => *m,
    Some(Span::Bounds([_, hi])) => *hi,
    None => 100,
  };
  let n1 = rand_int(0, max);
  let n2 = if chance(0.2) { n1 } else { rand_int(0, max) };
  Ok(RawInstance {
    question: Some(format!("{n1} ... {n2}")),
    answer: AnswerValue::Text(symbol_for(n1, n2).into()),
    modality: Modality::Choice,
    choices: Some(COMPARISON_CHOICES.iter().map(|s| s.to_string()).collect()),
    data: Some(ProblemData::Comparison { left: n1.to_string(), right: n2.to_string() }),
    ..Default::default()
  })
}

// Value held in integer hundredths; shown with 1 or 2 decimals.
fn fmt_hundredths(value: i64, decimals: usize) -> String {
  let whole = value / 100;
  match decimals {
    1 => format!("{whole},{}", (value % 100) / 10),
    _ => format!("{whole},{:02}", value % 100),
  }
}

/// Decimal comparison built around the classic classroom traps: a
/// trailing-zero pair that is actually equal, one-tenth neighbors, and
/// mixed-precision pairs where digit count misleads. All arithmetic is
/// integer hundredths; no floats are chained.
pub fn compare_decimals(_p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let base = rand_int(0, 99);
  let (v1, v2, d1, d2) = match rand_int(0, 9) {
    0..=2 => {
      // "4,5" vs "4,50": equal despite the extra digit.
      let v = base * 100 + rand_int(1, 9) * 10;
      let (short, long) = (fmt_hundredths(v, 1), fmt_hundredths(v, 2));
      if chance(0.5) { (v, v, short, long) } else { (v, v, long, short) }
    }
    3..=5 => {
      // Neighbors one decimal step apart.
      let tenths = rand_int(2, 8);
      let v1 = base * 100 + tenths * 10;
      let v2 = v1 + if chance(0.5) { 10 } else { -10 };
      (v1, v2, fmt_hundredths(v1, 1), fmt_hundredths(v2, 1))
    }
    _ => {
      // Differing precision: one vs two visible decimals.
      let v1 = base * 100 + rand_int(1, 9) * 10;
      let v2 = base * 100 + rand_int(1, 99);
      (v1, v2, fmt_hundredths(v1, 1), fmt_hundredths(v2, 2))
    }
  };

  Ok(RawInstance {
    question: Some(format!("{d1} ... {d2}")),
    answer: AnswerValue::Text(symbol_for(v1, v2).into()),
    modality: Modality::Choice,
    choices: Some(COMPARISON_CHOICES.iter().map(|s| s.to_string()).collect()),
    data: Some(ProblemData::Comparison { left: d1, right: d2 }),
    ..Default::default()
  })
}

/// Roman numeral exercises, both directions at random: write the roman
/// form of an arabic number, or decode a roman numeral.
pub fn roman_numerals(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let lo = p.min.unwrap_or(1).clamp(1, 3999);
  let hi = p.max.unwrap_or(100).clamp(lo, 3999);
  let n = rand_int(lo, hi);
  let encoded = to_roman(n as u32).map_err(|e| format!("romain : {e}"))?;

  if chance(0.5) {
    Ok(RawInstance {
      question: Some(format!("Écris en chiffres romains : {n}")),
      answer: AnswerValue::Text(encoded),
      modality: Modality::Roman,
      ..Default::default()
    })
  } else {
    Ok(RawInstance {
      question: Some(format!("Quel nombre s'écrit {encoded} ?")),
      answer: AnswerValue::Int(n),
      ..Default::default()
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ExerciseParams;

  fn params() -> ExerciseParams {
    ExerciseParams::default()
  }

  fn answer_i64(raw: &RawInstance) -> i64 {
    match &raw.answer {
      AnswerValue::Int(n) => *n,
      AnswerValue::Text(t) => panic!("expected numeric answer, got {t:?}"),
    }
  }

  #[test]
  fn add_simple_round_trips_its_operands() {
    for _ in 0..200 {
      let raw = add_simple(&params(), None).unwrap();
      let q = raw.question.clone().unwrap();
      let (lhs, _) = q.split_once(" = ").unwrap();
      let (a, b) = lhs.split_once(" + ").unwrap();
      let sum: i64 = a.trim().parse::<i64>().unwrap() + b.trim().parse::<i64>().unwrap();
      assert_eq!(sum, answer_i64(&raw));
    }
  }

  #[test]
  fn mult_respects_a_fixed_table() {
    let p = ExerciseParams { table: Some(TableSpec::Number(7)), ..params() };
    for _ in 0..100 {
      let raw = mult(&p, None).unwrap();
      let q = raw.question.clone().unwrap();
      let (lhs, _) = q.split_once(" = ").unwrap();
      let (a, b) = lhs.split_once(" × ").unwrap();
      let a: i64 = a.trim().parse().unwrap();
      let b: i64 = b.trim().parse().unwrap();
      assert_eq!(a, 7);
      assert!((0..=10).contains(&b));
      assert_eq!(answer_i64(&raw), 7 * b);
    }
  }

  #[test]
  fn mental_division_is_built_from_its_answer() {
    let p = ExerciseParams {
      operator: Some("/".into()),
      operands: Some(vec![10, 100, 1000]),
      ..params()
    };
    for _ in 0..100 {
      let raw = mental_calc(&p, None).unwrap();
      let q = raw.question.clone().unwrap();
      let (lhs, _) = q.split_once(" = ").unwrap();
      let (dividend, divisor) = lhs.split_once(" : ").unwrap();
      let dividend: i64 = dividend.trim().parse().unwrap();
      let divisor: i64 = divisor.trim().parse().unwrap();
      assert_eq!(dividend % divisor, 0);
      assert_eq!(dividend / divisor, answer_i64(&raw));
    }
  }

  #[test]
  fn mental_calc_rejects_empty_divisor_pool() {
    let p = ExerciseParams { operator: Some("/".into()), ..params() };
    assert!(mental_calc(&p, None).is_err());
  }

  #[test]
  fn division_invariants_hold() {
    for _ in 0..500 {
      let raw = division_posee(&params(), None).unwrap();
      let quotient = answer_i64(&raw) as u64;
      let Some(ProblemData::Division { dividend, divisor, steps }) = raw.data else {
        panic!("expected division data");
      };
      let remainder = dividend - divisor * quotient;
      assert!(remainder < divisor);
      assert_eq!(divisor * quotient + remainder, dividend);

      // The terminal step shows the final remainder.
      let last = steps.last().expect("at least one step");
      assert_eq!(last.remainder, dividend % divisor);
      assert!(last.next_digit.is_empty());
    }
  }

  #[test]
  fn long_division_steps_match_hand_worked_example() {
    // 125 ÷ 5 = 25: "12 -> -10 rem 2, bring 5; 25 -> -25 rem 0".
    let steps = long_division_steps(125, 5);
    assert_eq!(steps.len(), 2);
    assert_eq!((steps[0].subtracted, steps[0].remainder), (10, 2));
    assert_eq!(steps[0].next_digit, "5");
    assert_eq!((steps[1].subtracted, steps[1].remainder), (25, 0));
    assert_eq!(steps[1].next_digit, "");
  }

  #[test]
  fn long_division_emits_terminal_zero_quotient_step() {
    // 102 ÷ 5: terminal digit yields quotient digit 0, remainder 2.
    let steps = long_division_steps(102, 5);
    let last = steps.last().unwrap();
    assert_eq!(last.remainder, 2);
    assert_eq!(last.next_digit, "");
  }

  #[test]
  fn decimal_place_answer_is_a_single_digit() {
    let p = ExerciseParams { trap: Some(true), ..params() };
    for _ in 0..200 {
      let raw = decimal_place(&p, None).unwrap();
      let d = answer_i64(&raw);
      assert!((0..=9).contains(&d));
    }
  }

  #[test]
  fn comparison_answer_is_an_offered_choice() {
    for _ in 0..100 {
      let raw = compare_integers(&params(), None).unwrap();
      let AnswerValue::Text(sym) = raw.answer else { panic!() };
      assert!(raw.choices.unwrap().contains(&sym));
    }
  }

  #[test]
  fn decimal_comparison_trailing_zero_pair_is_equal() {
    let mut saw_equal = false;
    for _ in 0..300 {
      let raw = compare_decimals(&params(), None).unwrap();
      let q = raw.question.unwrap();
      let AnswerValue::Text(sym) = raw.answer else { panic!() };
      let (d1, d2) = q.split_once(" ... ").unwrap();
      if sym == "=" {
        saw_equal = true;
        let v1: f64 = d1.replace(',', ".").parse().unwrap();
        let v2: f64 = d2.replace(',', ".").parse().unwrap();
        assert_eq!(v1, v2);
      }
    }
    assert!(saw_equal, "equal trap variant never generated in 300 draws");
  }

  #[test]
  fn letters_dictation_uses_word_form() {
    let p = ExerciseParams { min: Some(81), max: Some(81), ..params() };
    let raw = letters_dictation(&p, None).unwrap();
    let AnswerValue::Text(words) = raw.answer else { panic!() };
    assert_eq!(words, "quatre-vingt-un");
    assert!(raw.fold_hyphens);
    assert_eq!(raw.modality, Modality::Alpha);
  }

  #[test]
  fn roman_range_is_clamped() {
    let p = ExerciseParams { min: Some(-5), max: Some(999_999), ..params() };
    for _ in 0..100 {
      let raw = roman_numerals(&p, None).unwrap();
      match raw.answer {
        AnswerValue::Int(n) => assert!((1..=3999).contains(&n)),
        AnswerValue::Text(s) => assert!(!s.is_empty()),
      }
    }
  }
}
