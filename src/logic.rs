//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Serving a freshly generated problem (store + DTO conversion)
//!   - Grading a candidate answer against its stored instance

use tracing::{info, instrument, warn};

use crate::answer::{is_correct, selection_sum};
use crate::domain::{ExerciseParams, Modality};
use crate::protocol::{to_out, ProblemOut};
use crate::state::AppState;

#[instrument(level = "info", skip(state, params), fields(%engine))]
pub async fn serve_problem(state: &AppState, engine: &str, params: &ExerciseParams) -> ProblemOut {
  let instance = state.create_problem(engine, params).await;
  info!(
    target: "exercise",
    %engine,
    id = %instance.id,
    modality = ?instance.modality,
    visual = instance.is_visual,
    "Problem served"
  );
  to_out(&instance)
}

/// Grade a candidate against the stored instance. For multi-select
/// problems the interaction layer sends its index set and the
/// comparison runs on the selection sum, never on the set itself.
/// Returns (correct, expected, message).
#[instrument(level = "info", skip(state, answer, selected_indices), fields(%problem_id))]
pub async fn evaluate_answer(
  state: &AppState,
  problem_id: &str,
  answer: Option<&str>,
  selected_indices: Option<&[usize]>,
) -> (bool, String, String) {
  let Some(instance) = state.take_problem(problem_id).await else {
    warn!(target: "exercise", %problem_id, "Grading requested for unknown problem");
    return (false, String::new(), format!("Unknown problemId: {problem_id}"));
  };

  let candidate = match (instance.modality, selected_indices) {
    (Modality::Selection, Some(indices)) => selection_sum(&instance.data, indices).to_string(),
    _ => answer.unwrap_or("").to_string(),
  };

  let correct = is_correct(&instance, &candidate);
  info!(
    target: "exercise",
    id = %instance.id,
    %correct,
    answer_len = candidate.len(),
    "Answer evaluated"
  );
  (correct, instance.answer, String::new())
}
