//! Domain models: the standardized problem instance, its payloads,
//! generator parameters, and the language-resource library.

use serde::{Deserialize, Serialize};

/// Input method a problem expects. Determines which comparator rule and
/// which input affordance the player uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
  /// Digits (optionally a decimal comma) compared by value, except
  /// clock instances which compare zero-padded digit strings.
  Numeric,
  /// Free text; case and diacritics folded before comparison.
  Alpha,
  /// Two-button confirmation (VRAI / FAUX).
  Boolean,
  /// One tap among a small list of choices.
  Choice,
  /// Multi-select over a number grid; graded on the selection sum.
  Selection,
  /// Roman numeral text, compared by decoded value.
  Roman,
}

impl Default for Modality {
  fn default() -> Self { Modality::Numeric }
}

/// One marker placed on a target board or money table. The angle is
/// fixed at generation time so repeated renders never move the hit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hit {
  pub value: i64,
  pub angle_radians: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardSkin {
  Target,
  Money,
}

/// One line of a long-division layout: what is subtracted, what
/// remains, and the digit brought down next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionStep {
  pub subtracted: u64,
  pub remainder: u64,
  /// Empty when this is the terminal step.
  pub next_digit: String,
  /// Index of the dividend digit this step ends on (for alignment).
  pub end_index: usize,
  /// Width of the partial value being divided (for alignment).
  pub part_width: usize,
}

/// Structured auxiliary payload of a visual problem. The serde tag is
/// the visual-kind discriminator consumed by the rendering layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProblemData {
  None,
  Clock {
    hours: u8,
    minutes: u8,
    period_icon: String,
    period_text: String,
  },
  Fraction {
    numerator: u32,
    denominator: u32,
  },
  /// Magic-square grid. The selection state is owned by the
  /// interaction layer, not stored here.
  Square {
    target: i64,
    numbers: Vec<i64>,
  },
  Board {
    skin: BoardSkin,
    zones: Vec<i64>,
    hits: Vec<Hit>,
  },
  /// Timed flying-prompt problem; the arithmetic prompt shown in the
  /// bubble. Choices and duration live on the instance.
  Bird {
    prompt: String,
  },
  Spelling {
    word: String,
    image_url: String,
    icon: String,
  },
  Conjugation {
    pronoun: String,
    infinitive: String,
    tense: String,
    compound: bool,
    icon: String,
  },
  Reading {
    text: String,
    syllables: Vec<String>,
    silent: Vec<usize>,
  },
  Counting {
    tens: u32,
    units: u32,
  },
  Division {
    dividend: u64,
    divisor: u64,
    steps: Vec<DivisionStep>,
  },
  Conversion {
    value: String,
    from_unit: String,
    to_unit: String,
    family: String,
  },
  /// The two displayed operands of a comparison, as the learner sees
  /// them ("4,5" vs "4,50" keeps its trailing zero).
  Comparison {
    left: String,
    right: String,
  },
}

/// Standardized output of the generation engine for one question.
/// Immutable once produced; serializable to a plain JSON record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProblemInstance {
  pub id: String,
  pub question: String,
  /// Canonical target answer, always a string (a clock answer keeps
  /// its leading zero: "0915").
  pub answer: String,
  pub modality: Modality,
  pub is_visual: bool,
  pub data: ProblemData,
  /// Offered buttons for choice/boolean modalities; empty otherwise.
  pub choices: Vec<String>,
  /// Seconds before auto-fail for timed problems. The caller owns the
  /// timer; the engine only supplies the hint.
  pub duration_seconds: Option<u32>,
  /// Alpha comparison also folds hyphens to spaces (number-word
  /// dictation accepts "quatre vingt un").
  pub fold_hyphens: bool,
}

/// A multiplication table selector: a fixed table or the "mix" keyword.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableSpec {
  Number(i64),
  Keyword(String),
}

/// A range given either as a single max or as explicit bounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Span {
  Max(i64),
  Bounds([i64; 2]),
}

/// Caller-supplied generation parameters. Read-only; every generator
/// applies its own explicit defaults for absent fields.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExerciseParams {
  /// Sub-type discriminator inside generic families ("add-simple",
  /// "carre-somme", "homophone-duel", ...).
  #[serde(default, rename = "type")]
  pub sub_type: Option<String>,
  #[serde(default)]
  pub min: Option<i64>,
  #[serde(default)]
  pub max: Option<i64>,
  #[serde(default)]
  pub max_sum: Option<i64>,
  #[serde(default)]
  pub target: Option<i64>,
  #[serde(default)]
  pub table: Option<TableSpec>,
  #[serde(default)]
  pub operator: Option<String>,
  #[serde(default)]
  pub operands: Option<Vec<i64>>,
  #[serde(default)]
  pub range: Option<Span>,
  #[serde(default)]
  pub target_min: Option<i64>,
  #[serde(default)]
  pub target_max: Option<i64>,
  #[serde(default)]
  pub grid_size: Option<usize>,
  #[serde(default)]
  pub zones: Option<Vec<i64>>,
  #[serde(default)]
  pub arrows: Option<usize>,
  /// Seconds on screen for the bird family.
  #[serde(default)]
  pub speed: Option<u32>,
  #[serde(default)]
  pub max_denom: Option<u32>,
  /// Include integer-side positions in place-value questions.
  #[serde(default)]
  pub trap: Option<bool>,
  /// Unit family for conversions: longueur, masse, capacite, temps.
  #[serde(default)]
  pub family: Option<String>,
  #[serde(default)]
  pub max_steps: Option<u32>,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub tenses: Option<Vec<String>>,
  #[serde(default)]
  pub choices: Option<Vec<String>>,
  #[serde(default)]
  pub skin: Option<String>,
}

// ---- Language-resource library -------------------------------------

/// One verb of a conjugation category. Regular verbs carry a stem and
/// six endings; irregular verbs carry the six full forms. Compound
/// categories add the auxiliary and past participle.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VerbEntry {
  pub infinitive: String,
  #[serde(default)]
  pub icon: String,
  #[serde(default)]
  pub base: Option<String>,
  #[serde(default)]
  pub endings: Option<[String; 6]>,
  #[serde(default)]
  pub full: Option<[String; 6]>,
  #[serde(default)]
  pub aux: Option<String>,
  #[serde(default)]
  pub pp: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpellingEntry {
  pub word: String,
  #[serde(default)]
  pub image_url: String,
  #[serde(default)]
  pub icon: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HomophoneItem {
  /// Sentence with a "..." or "___" blank.
  pub sentence: String,
  pub answer: String,
  #[serde(default)]
  pub choices: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HomophoneCategory {
  /// Offered buttons for every sentence of this category. When absent
  /// the category key is split on '_' as a compatibility fallback.
  #[serde(default)]
  pub choices: Option<Vec<String>>,
  #[serde(default)]
  pub items: Vec<HomophoneItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
  Masculine,
  Feminine,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenderEntry {
  pub word: String,
  pub gender: Gender,
  /// Mute h ("homme") elides; aspirated h ("hibou") does not.
  #[serde(default)]
  pub h_mute: bool,
  #[serde(default)]
  pub icon: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReadingItem {
  pub text: String,
  pub syllables: Vec<String>,
  #[serde(default)]
  pub silent: Vec<usize>,
}

/// External read-only resource table for the language generators.
/// Optional everywhere: a missing category degrades to a fallback
/// instance, never a crash.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LanguageLibrary {
  #[serde(default)]
  pub conjugation: std::collections::HashMap<String, Vec<VerbEntry>>,
  #[serde(default)]
  pub spelling: std::collections::HashMap<String, Vec<SpellingEntry>>,
  #[serde(default)]
  pub homophones: std::collections::HashMap<String, HomophoneCategory>,
  #[serde(default)]
  pub genders: std::collections::HashMap<String, Vec<GenderEntry>>,
  #[serde(default)]
  pub reading: std::collections::HashMap<String, Vec<ReadingItem>>,
}
