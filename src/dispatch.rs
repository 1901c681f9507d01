//! Exercise dispatch and instance standardization.
//!
//! Flow:
//! 1) Legacy engine aliases fold to canonical identifiers (idempotent).
//! 2) The engine id plus the sub-type inside the params resolve to one
//!    `ExerciseKind`.
//! 3) A static registry maps the kind to its generator; adding an
//!    exercise family is a registry entry, not a new match arm in the
//!    pipeline.
//! 4) The raw output is standardized into the fixed instance shape.
//!
//! `generate` never panics: any generator error becomes a fallback
//! instance carrying the diagnostic as its question.

use tracing::error;
use uuid::Uuid;

use crate::domain::{ExerciseParams, LanguageLibrary, Modality, ProblemData, ProblemInstance};
use crate::generators::{arithmetic, language, visual, AnswerValue, RawInstance};
use crate::seeds::fallback_instance;
use crate::util::shuffled;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseKind {
  AddSimple,
  AddHole,
  SubSimple,
  Mult,
  Complement,
  DecimalPlace,
  NumberDictation,
  LettersDictation,
  MentalCalc,
  DivisionPosee,
  RomanNumerals,
  MagicSquare,
  BirdMath,
  TargetBoard,
  Clock,
  Fraction,
  Counting,
  UnitConversion,
  Compare,
  CompareDecimals,
  Homophones,
  GenderArticle,
  Conjugation,
  Spelling,
  Reading,
  Unknown,
}

// Legacy identifiers still present in old exercise banks.
const ENGINE_ALIASES: &[(&str, &str)] = &[
  ("compare", "choice-engine"),
  ("choice", "choice-engine"),
  ("taoki", "reading"),
  ("lecture", "reading"),
];

/// Fold a legacy engine id to its canonical form. Canonical ids map to
/// themselves, so folding twice is a no-op.
pub fn canonical_engine(engine: &str) -> &str {
  ENGINE_ALIASES
    .iter()
    .find(|(alias, _)| *alias == engine)
    .map(|(_, canonical)| *canonical)
    .unwrap_or(engine)
}

// Sub-type keys of the generic families. Also accepted directly as
// engine ids, so `generate("mult", ...)` works without the
// "math-input" wrapper.
fn sub_kind(key: &str) -> Option<ExerciseKind> {
  use ExerciseKind::*;
  Some(match key {
    "add-simple" => AddSimple,
    "add-trou" => AddHole,
    "sub-simple" => SubSimple,
    "mult" => Mult,
    "complement" => Complement,
    "decimal-place" => DecimalPlace,
    "dictée-nombres" | "dictee-nombres" => NumberDictation,
    "dictée-lettres" | "dictee-lettres" => LettersDictation,
    "calc-mental" => MentalCalc,
    "division-posee" => DivisionPosee,
    "roman" | "romain" => RomanNumerals,
    "carre-somme" => MagicSquare,
    "oiseau-math" => BirdMath,
    "cibles" => TargetBoard,
    "clock" => Clock,
    "fraction-view" => Fraction,
    "conversion" => UnitConversion,
    "spelling" => Spelling,
    "homophone-duel" => Homophones,
    "genre-article" | "un-une" => GenderArticle,
    "compare-decimals" => CompareDecimals,
    _ => return None,
  })
}

/// Resolve an engine id (plus the sub-type inside the params) to one
/// exercise kind.
pub fn resolve(engine: &str, params: &ExerciseParams) -> ExerciseKind {
  use ExerciseKind::*;
  let sub = params.sub_type.as_deref().unwrap_or("");
  match canonical_engine(engine) {
    "math-input" => sub_kind(sub).unwrap_or(Unknown),
    "choice-engine" => sub_kind(sub).unwrap_or(Compare),
    "oiseau" => BirdMath,
    "conjugation" => Conjugation,
    "clock" => Clock,
    "counting" => Counting,
    "reading" => Reading,
    other => sub_kind(other).unwrap_or(Unknown),
  }
}

type GeneratorFn = fn(&ExerciseParams, Option<&LanguageLibrary>) -> Result<RawInstance, String>;

struct EngineDef {
  kind: ExerciseKind,
  run: GeneratorFn,
}

static REGISTRY: &[EngineDef] = &[
  EngineDef { kind: ExerciseKind::AddSimple, run: arithmetic::add_simple },
  EngineDef { kind: ExerciseKind::AddHole, run: arithmetic::add_hole },
  EngineDef { kind: ExerciseKind::SubSimple, run: arithmetic::sub_simple },
  EngineDef { kind: ExerciseKind::Mult, run: arithmetic::mult },
  EngineDef { kind: ExerciseKind::Complement, run: arithmetic::complement },
  EngineDef { kind: ExerciseKind::DecimalPlace, run: arithmetic::decimal_place },
  EngineDef { kind: ExerciseKind::NumberDictation, run: arithmetic::number_dictation },
  EngineDef { kind: ExerciseKind::LettersDictation, run: arithmetic::letters_dictation },
  EngineDef { kind: ExerciseKind::MentalCalc, run: arithmetic::mental_calc },
  EngineDef { kind: ExerciseKind::DivisionPosee, run: arithmetic::division_posee },
  EngineDef { kind: ExerciseKind::RomanNumerals, run: arithmetic::roman_numerals },
  EngineDef { kind: ExerciseKind::Compare, run: arithmetic::compare_integers },
  EngineDef { kind: ExerciseKind::CompareDecimals, run: arithmetic::compare_decimals },
  EngineDef { kind: ExerciseKind::MagicSquare, run: visual::magic_square },
  EngineDef { kind: ExerciseKind::BirdMath, run: visual::bird_math },
  EngineDef { kind: ExerciseKind::TargetBoard, run: visual::target_board },
  EngineDef { kind: ExerciseKind::Clock, run: visual::clock },
  EngineDef { kind: ExerciseKind::Fraction, run: visual::fraction },
  EngineDef { kind: ExerciseKind::Counting, run: visual::counting },
  EngineDef { kind: ExerciseKind::UnitConversion, run: visual::unit_conversion },
  EngineDef { kind: ExerciseKind::Conjugation, run: language::conjugation },
  EngineDef { kind: ExerciseKind::Spelling, run: language::spelling },
  EngineDef { kind: ExerciseKind::Homophones, run: language::homophones },
  EngineDef { kind: ExerciseKind::GenderArticle, run: language::gender_article },
  EngineDef { kind: ExerciseKind::Reading, run: language::reading },
];

fn generator_for(kind: ExerciseKind) -> Option<GeneratorFn> {
  REGISTRY.iter().find(|def| def.kind == kind).map(|def| def.run)
}

/// Coerce a raw generator result into the fixed instance shape:
/// canonical string answer, defaults for absent fields, `is_visual`
/// derived from data presence, and, for choice modalities, a
/// deduplicated button list that contains the answer exactly once.
pub fn standardize(raw: RawInstance) -> ProblemInstance {
  let answer = match raw.answer {
    AnswerValue::Int(n) => n.to_string(),
    AnswerValue::Text(t) => t.trim().to_string(),
  };
  let data = raw.data.unwrap_or(ProblemData::None);
  let is_visual = !matches!(data, ProblemData::None);

  let choices = match raw.modality {
    Modality::Choice | Modality::Boolean => {
      let offered = raw
        .choices
        .unwrap_or_else(|| vec!["VRAI".to_string(), "FAUX".to_string()]);
      let mut seen: Vec<String> = Vec::new();
      let mut kept: Vec<String> = Vec::new();
      for c in offered {
        let key = crate::answer::normalize_choice(&c);
        if !seen.contains(&key) {
          seen.push(key);
          kept.push(c);
        }
      }
      let answer_key = crate::answer::normalize_choice(&answer);
      if !seen.contains(&answer_key) {
        kept.push(answer.clone());
        kept = shuffled(&kept);
      }
      kept
    }
    _ => Vec::new(),
  };

  ProblemInstance {
    id: Uuid::new_v4().to_string(),
    question: raw.question.unwrap_or_default(),
    answer,
    modality: raw.modality,
    is_visual,
    data,
    choices,
    duration_seconds: raw.duration_seconds,
    fold_hyphens: raw.fold_hyphens,
  }
}

/// Single entry point of the engine. Never throws past this boundary;
/// the worst case is a fallback instance with a diagnostic question.
pub fn generate(
  engine: &str,
  params: &ExerciseParams,
  lib: Option<&LanguageLibrary>,
) -> ProblemInstance {
  let kind = resolve(engine, params);
  let outcome = match generator_for(kind) {
    Some(run) => run(params, lib),
    None => Err(format!("Moteur inconnu : {engine}")),
  };
  match outcome {
    Ok(raw) => standardize(raw),
    Err(message) => {
      error!(target: "exercise", engine, kind = ?kind, %message, "Generator failed; serving fallback instance");
      fallback_instance(&message)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::answer::is_correct;
  use crate::domain::TableSpec;
  use crate::seeds::seed_library;

  #[test]
  fn alias_folding_is_idempotent() {
    for &(alias, _) in ENGINE_ALIASES {
      let once = canonical_engine(alias);
      assert_eq!(canonical_engine(once), once);
    }
    assert_eq!(canonical_engine("math-input"), "math-input");
    assert_eq!(canonical_engine("compare"), "choice-engine");
  }

  #[test]
  fn aliases_and_shorthands_resolve_to_the_same_kind() {
    let none = ExerciseParams::default();
    assert_eq!(resolve("oiseau", &none), ExerciseKind::BirdMath);
    assert_eq!(resolve("taoki", &none), ExerciseKind::Reading);
    assert_eq!(resolve("lecture", &none), ExerciseKind::Reading);
    assert_eq!(resolve("compare", &none), ExerciseKind::Compare);
    assert_eq!(resolve("mult", &none), ExerciseKind::Mult);

    let sub = ExerciseParams { sub_type: Some("oiseau-math".into()), ..Default::default() };
    assert_eq!(resolve("math-input", &sub), ExerciseKind::BirdMath);
    let duel = ExerciseParams { sub_type: Some("homophone-duel".into()), ..Default::default() };
    assert_eq!(resolve("choice-engine", &duel), ExerciseKind::Homophones);
  }

  #[test]
  fn unknown_engine_yields_the_fallback_shape() {
    let inst = generate("telepathie", &ExerciseParams::default(), None);
    assert_eq!(inst.answer, "0");
    assert_eq!(inst.modality, Modality::Numeric);
    assert!(!inst.is_visual);
    assert!(inst.question.contains("Moteur inconnu"));
  }

  #[test]
  fn missing_library_degrades_to_a_fallback_not_a_crash() {
    let inst = generate("conjugation", &ExerciseParams::default(), None);
    assert_eq!(inst.answer, "0");
    assert!(!inst.question.is_empty());
  }

  #[test]
  fn spec_example_mult_table_seven() {
    let params = ExerciseParams { table: Some(TableSpec::Number(7)), ..Default::default() };
    for _ in 0..50 {
      let inst = generate("mult", &params, None);
      let (lhs, _) = inst.question.split_once(" = ").unwrap();
      let (a, b) = lhs.split_once(" × ").unwrap();
      assert_eq!(a, "7");
      let b: i64 = b.trim().parse().unwrap();
      assert!((0..=10).contains(&b));
      assert_eq!(inst.answer, (7 * b).to_string());
      assert!(is_correct(&inst, &(7 * b).to_string()));
      assert!(!is_correct(&inst, &(7 * b + 1).to_string()));
    }
  }

  // Every family: generating then answering with the stored answer
  // must be judged correct (reflexivity under normalization).
  #[test]
  fn is_correct_is_reflexive_across_all_families() {
    let lib = seed_library();
    let engines: &[(&str, ExerciseParams)] = &[
      ("add-simple", ExerciseParams::default()),
      ("add-trou", ExerciseParams::default()),
      ("sub-simple", ExerciseParams::default()),
      ("mult", ExerciseParams::default()),
      ("complement", ExerciseParams::default()),
      ("decimal-place", ExerciseParams { trap: Some(true), ..Default::default() }),
      ("dictee-nombres", ExerciseParams::default()),
      ("dictee-lettres", ExerciseParams::default()),
      ("calc-mental", ExerciseParams::default()),
      ("division-posee", ExerciseParams::default()),
      ("roman", ExerciseParams::default()),
      ("carre-somme", ExerciseParams::default()),
      ("oiseau", ExerciseParams::default()),
      (
        "cibles",
        ExerciseParams { zones: Some(vec![1, 2, 5]), arrows: Some(3), ..Default::default() },
      ),
      ("clock", ExerciseParams::default()),
      ("fraction-view", ExerciseParams::default()),
      ("counting", ExerciseParams::default()),
      ("conversion", ExerciseParams::default()),
      ("compare", ExerciseParams::default()),
      ("compare-decimals", ExerciseParams::default()),
      ("conjugation", ExerciseParams::default()),
      (
        "conjugation",
        ExerciseParams {
          category: Some("present_1".into()),
          tenses: Some(vec!["passé composé".into(), "futur".into(), "imparfait".into()]),
          ..Default::default()
        },
      ),
      ("spelling", ExerciseParams::default()),
      ("homophone-duel", ExerciseParams { category: Some("mix_all".into()), ..Default::default() }),
      ("genre-article", ExerciseParams { sub_type: Some("genre-article".into()), ..Default::default() }),
      ("un-une", ExerciseParams { sub_type: Some("un-une".into()), ..Default::default() }),
      ("reading", ExerciseParams::default()),
    ];

    for (engine, params) in engines {
      for _ in 0..50 {
        let inst = generate(engine, params, Some(&lib));
        assert!(
          is_correct(&inst, &inst.answer),
          "not reflexive for {engine}: answer={:?} question={:?}",
          inst.answer,
          inst.question
        );
      }
    }
  }

  #[test]
  fn choice_instances_offer_the_answer_exactly_once() {
    let lib = seed_library();
    for engine in ["compare", "compare-decimals", "oiseau", "homophone-duel", "reading"] {
      for _ in 0..100 {
        let inst = generate(engine, &ExerciseParams::default(), Some(&lib));
        let matching = inst
          .choices
          .iter()
          .filter(|c| crate::answer::normalize_choice(c) == crate::answer::normalize_choice(&inst.answer))
          .count();
        assert_eq!(matching, 1, "{engine}: choices={:?} answer={}", inst.choices, inst.answer);
      }
    }
  }

  #[test]
  fn standardize_injects_a_missing_answer_choice() {
    let raw = RawInstance {
      answer: AnswerValue::Text("l'".into()),
      modality: Modality::Choice,
      choices: Some(vec!["le".into(), "la".into(), "le".into()]),
      ..Default::default()
    };
    let inst = standardize(raw);
    assert_eq!(inst.choices.len(), 3);
    assert!(inst.choices.contains(&"l'".to_string()));
  }

  #[test]
  fn instances_serialize_to_plain_json() {
    let lib = seed_library();
    for engine in ["carre-somme", "clock", "division-posee", "cibles", "conjugation"] {
      let params = ExerciseParams {
        zones: Some(vec![1, 2, 5]),
        ..Default::default()
      };
      let inst = generate(engine, &params, Some(&lib));
      let json = serde_json::to_string(&inst).expect("serializable");
      let back: ProblemInstance = serde_json::from_str(&json).expect("round-trip");
      assert_eq!(back.answer, inst.answer);
    }
  }
}
