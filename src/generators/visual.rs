//! Generators whose instances carry a structured payload for the
//! rendering layer: grids, boards, clocks, conversion tables.
//!
//! Anything positional (board hit angles) is fixed at generation time;
//! the renderer must never re-draw randomness.

use std::f64::consts::PI;

use crate::domain::{BoardSkin, ExerciseParams, Hit, LanguageLibrary, Modality, ProblemData};
use crate::generators::{AnswerValue, RawInstance};
use crate::util::{pick, rand_int, shuffled};

/// Magic-square selection: three numbers summing exactly to the target
/// are constructed first, then distinct noise fills the grid, then the
/// whole grid is shuffled. Graded against the player's selection sum.
pub fn magic_square(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let target = rand_int(
    p.target_min.unwrap_or(10).max(8),
    p.target_max.unwrap_or(30).max(8),
  );
  let size = p.grid_size.unwrap_or(9).max(4);

  // Guaranteed solution.
  let lo = (target / 10).max(1);
  let hi = (target * 4 / 10).max(lo);
  let mut n1 = rand_int(lo, hi);
  let mut n2 = rand_int(lo, hi);
  let mut n3 = target - n1 - n2;
  if n3 <= 0 {
    n1 = target / 3;
    n2 = target / 3;
    n3 = target - n1 - n2;
  }
  let mut numbers = vec![n1, n2, n3];

  // Distinct noise, bounded retries so a tiny target range cannot
  // spin forever; after that duplicates are acceptable.
  let mut attempts = 0;
  while numbers.len() < size && attempts < 200 {
    attempts += 1;
    let noise = rand_int(2, (target - 2).max(2));
    if !numbers.contains(&noise) {
      numbers.push(noise);
    }
  }
  while numbers.len() < size {
    numbers.push(rand_int(2, (target - 2).max(2)));
  }

  Ok(RawInstance {
    question: Some(format!("Sélectionne des nombres dont la somme fait {target}")),
    answer: AnswerValue::Int(target),
    modality: Modality::Selection,
    data: Some(ProblemData::Square { target, numbers: shuffled(&numbers) }),
    ..Default::default()
  })
}

/// Timed multiple-choice addition: the correct sum plus two near-miss
/// decoys, shuffled. The duration is a hint for the caller's timer;
/// the engine never runs one.
pub fn bird_math(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let lo = p.min.unwrap_or(1);
  let hi = p.max.unwrap_or(10).max(lo);
  let a = rand_int(lo, hi);
  let b = rand_int(lo, hi);
  let total = a + b;
  let choices: Vec<String> = shuffled(&[total, total + 1, total - 1])
    .into_iter()
    .map(|n| n.to_string())
    .collect();

  Ok(RawInstance {
    question: Some("Réponds avant que l'oiseau s'envole !".into()),
    answer: AnswerValue::Int(total),
    modality: Modality::Choice,
    data: Some(ProblemData::Bird { prompt: format!("{a} + {b}") }),
    choices: Some(choices),
    duration_seconds: Some(p.speed.unwrap_or(8)),
    ..Default::default()
  })
}

/// Target board / money table: each hit gets a zone value and an
/// evenly-spaced angle with a small jitter, fixed here once.
pub fn target_board(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let zones = p.zones.as_deref().unwrap_or_default();
  if zones.is_empty() {
    return Err("cibles : aucune zone configurée".into());
  }
  let arrows = p.arrows.unwrap_or(3).max(1);

  let mut hits = Vec::with_capacity(arrows);
  for i in 0..arrows {
    let value = pick(zones).copied().unwrap_or(zones[0]);
    let degrees = i as f64 * (360.0 / arrows as f64) + rand_int(0, 19) as f64;
    hits.push(Hit { value, angle_radians: degrees * PI / 180.0 });
  }
  let total: i64 = hits.iter().map(|h| h.value).sum();

  let skin = if p.skin.as_deref() == Some("money") { BoardSkin::Money } else { BoardSkin::Target };
  let question = match skin {
    BoardSkin::Money => "Combien d'argent y a-t-il en tout ?".to_string(),
    BoardSkin::Target => "Compte les points marqués !".to_string(),
  };

  Ok(RawInstance {
    question: Some(question),
    answer: AnswerValue::Int(total),
    data: Some(ProblemData::Board { skin, zones: zones.to_vec(), hits }),
    ..Default::default()
  })
}

const CLOCK_MINUTES: [i64; 12] = [0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55];

/// Clock reading. The answer is the zero-padded HHMM string, stored
/// as text so the leading zero survives.
pub fn clock(_p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let hours = rand_int(0, 23) as u8;
  let minutes = pick(&CLOCK_MINUTES).copied().unwrap_or(0) as u8;
  let is_day = (8..20).contains(&hours);

  Ok(RawInstance {
    question: Some("Quelle heure est-il ?".into()),
    answer: AnswerValue::Text(format!("{hours:02}{minutes:02}")),
    data: Some(ProblemData::Clock {
      hours,
      minutes,
      period_icon: if is_day { "☀️" } else { "🌙" }.into(),
      period_text: if is_day { "Après-midi / Jour" } else { "Matin / Nuit" }.into(),
    }),
    ..Default::default()
  })
}

/// Fraction shading: denominator ≥ 2, numerator strictly inside.
pub fn fraction(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let max_denom = p.max_denom.unwrap_or(8).max(3) as i64;
  let d = rand_int(2, max_denom - 1);
  let n = rand_int(1, d - 1);

  Ok(RawInstance {
    question: Some("Combien de parts sont coloriées ?".into()),
    answer: AnswerValue::Int(n),
    data: Some(ProblemData::Fraction { numerator: n as u32, denominator: d as u32 }),
    ..Default::default()
  })
}

/// Counting with tens bars and unit cubes.
pub fn counting(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let target = rand_int(p.min.unwrap_or(1).max(0), p.max.unwrap_or(20));
  Ok(RawInstance {
    question: Some("Combien de cubes comptes-tu ?".into()),
    answer: AnswerValue::Int(target),
    data: Some(ProblemData::Counting {
      tens: (target / 10) as u32,
      units: (target % 10) as u32,
    }),
    ..Default::default()
  })
}

// Metric ladders, largest unit first: one column step = one power of
// ten.
const LENGTH_UNITS: &[&str] = &["km", "hm", "dam", "m", "dm", "cm", "mm"];
const MASS_UNITS: &[&str] = &["kg", "hg", "dag", "g", "dg", "cg", "mg"];
const CAPACITY_UNITS: &[&str] = &["kL", "hL", "daL", "L", "dL", "cL", "mL"];
const TIME_UNITS: &[&str] = &["h", "min", "s"];

// Exact base-10 shift of an integer mantissa, rendered with a decimal
// comma. No floats anywhere, so no accumulated rounding.
fn shift_decimal(mantissa: i64, shift: i32) -> String {
  if shift >= 0 {
    let mut s = mantissa.to_string();
    s.extend(std::iter::repeat('0').take(shift as usize));
    s
  } else {
    let digits = mantissa.to_string();
    let k = (-shift) as usize;
    let (whole, frac) = if digits.len() > k {
      let split = digits.len() - k;
      (digits[..split].to_string(), digits[split..].to_string())
    } else {
      ("0".to_string(), format!("{digits:0>k$}"))
    };
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
      whole
    } else {
      format!("{whole},{frac}")
    }
  }
}

/// Unit conversion over the metric ladders or clock time. Two units a
/// bounded number of steps apart; the value is an integer mantissa so
/// the converted result is always clean.
pub fn unit_conversion(p: &ExerciseParams, _lib: Option<&LanguageLibrary>) -> Result<RawInstance, String> {
  let family = match p.family.as_deref().unwrap_or("mix") {
    "mix" => *pick(&["longueur", "masse", "capacite", "temps"]).unwrap_or(&"longueur"),
    other => other,
  };

  if family == "temps" {
    let max_steps = p.max_steps.unwrap_or(1).clamp(1, 2) as usize;
    let i1 = rand_int(0, (TIME_UNITS.len() - 1) as i64) as usize;
    let mut i2 = i1;
    let mut attempts = 0;
    while (i2 == i1 || i1.abs_diff(i2) > max_steps) && attempts < 50 {
      attempts += 1;
      i2 = rand_int(0, (TIME_UNITS.len() - 1) as i64) as usize;
    }
    if i2 == i1 || i1.abs_diff(i2) > max_steps {
      i2 = if i1 == 0 { 1 } else { i1 - 1 };
    }
    let factor = 60_i64.pow(i1.abs_diff(i2) as u32);
    let small = rand_int(1, 12);
    // The integer side is drawn; the scaled side is derived from it.
    let (value, answer) = if i2 > i1 { (small, small * factor) } else { (small * factor, small) };

    return Ok(RawInstance {
      question: Some(format!(
        "Convertis : {value} {} = ? {}",
        TIME_UNITS[i1], TIME_UNITS[i2]
      )),
      answer: AnswerValue::Int(answer),
      data: Some(ProblemData::Conversion {
        value: value.to_string(),
        from_unit: TIME_UNITS[i1].into(),
        to_unit: TIME_UNITS[i2].into(),
        family: family.into(),
      }),
      ..Default::default()
    });
  }

  let units: &[&str] = match family {
    "masse" => MASS_UNITS,
    "capacite" => CAPACITY_UNITS,
    "longueur" => LENGTH_UNITS,
    other => return Err(format!("conversion : famille inconnue '{other}'")),
  };

  let max_steps = p.max_steps.unwrap_or(3).clamp(1, 6) as usize;
  let i1 = rand_int(0, (units.len() - 1) as i64) as usize;
  let mut i2 = i1;
  let mut attempts = 0;
  while (i2 == i1 || i1.abs_diff(i2) > max_steps) && attempts < 50 {
    attempts += 1;
    i2 = rand_int(0, (units.len() - 1) as i64) as usize;
  }
  if i2 == i1 || i1.abs_diff(i2) > max_steps {
    i2 = if i1 == 0 { 1 } else { i1 - 1 };
  }

  let mantissa = rand_int(1, 999);
  let answer = shift_decimal(mantissa, i2 as i32 - i1 as i32);

  Ok(RawInstance {
    question: Some(format!("Convertis : {mantissa} {} = ? {}", units[i1], units[i2])),
    answer: AnswerValue::Text(answer),
    data: Some(ProblemData::Conversion {
      value: mantissa.to_string(),
      from_unit: units[i1].into(),
      to_unit: units[i2].into(),
      family: family.into(),
    }),
    ..Default::default()
  })
}
