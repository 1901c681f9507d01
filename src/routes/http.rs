//! HTTP endpoint handlers. These are thin wrappers that forward to core
//! logic. Each handler is instrumented and logs parameters and basic
//! result info.

use std::sync::Arc;
use axum::{extract::State, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body), fields(%body.engine))]
pub async fn http_post_problem(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ProblemIn>,
) -> impl IntoResponse {
  let problem = serve_problem(&state, &body.engine, &body.params).await;
  info!(target: "exercise", engine = %body.engine, id = %problem.id, "HTTP problem served");
  Json(problem)
}

#[instrument(level = "info", skip(state, body), fields(%body.problem_id))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> impl IntoResponse {
  let (correct, expected, message) = evaluate_answer(
    &state,
    &body.problem_id,
    body.answer.as_deref(),
    body.selected_indices.as_deref(),
  )
  .await;
  info!(target: "exercise", id = %body.problem_id, %correct, "HTTP submit_answer evaluated");
  Json(AnswerOut { correct, expected, message })
}
