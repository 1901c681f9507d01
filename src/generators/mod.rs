//! Generator set: one pure function per exercise family.
//!
//! Every generator takes the caller's read-only parameters (and, for
//! language families, the resource library) and returns a raw instance
//! or an error string. Errors never cross the dispatch boundary as
//! panics: the dispatcher turns them into a fallback instance carrying
//! the diagnostic.
//!
//! The construction rule throughout is answer-first: pick the answer
//! (or the triple that determines it), then derive whatever the player
//! sees, so every displayed problem is solvable by construction.

use crate::domain::{Modality, ProblemData};

pub mod arithmetic;
pub mod language;
pub mod visual;

/// Generator-side answer: integers are the common case and are
/// stringified by the standardization layer.
#[derive(Clone, Debug)]
pub enum AnswerValue {
  Int(i64),
  Text(String),
}

/// Unstandardized generator output. Absent fields get safe defaults in
/// `dispatch::standardize`.
#[derive(Clone, Debug)]
pub struct RawInstance {
  pub question: Option<String>,
  pub answer: AnswerValue,
  pub modality: Modality,
  pub data: Option<ProblemData>,
  pub choices: Option<Vec<String>>,
  pub duration_seconds: Option<u32>,
  pub fold_hyphens: bool,
}

impl Default for RawInstance {
  fn default() -> Self {
    Self {
      question: None,
      answer: AnswerValue::Int(0),
      modality: Modality::Numeric,
      data: None,
      choices: None,
      duration_seconds: None,
      fold_hyphens: false,
    }
  }
}
