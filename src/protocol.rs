//! Public protocol structs for WebSocket and HTTP endpoints (serde
//! ready). Keep this small and stable to evolve backend and frontend
//! independently.

use serde::{Deserialize, Serialize};

use crate::domain::{ExerciseParams, Modality, ProblemData, ProblemInstance};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewProblem {
        engine: String,
        #[serde(default)]
        params: ExerciseParams,
    },
    SubmitAnswer {
        #[serde(rename = "problemId")]
        problem_id: String,
        #[serde(default)]
        answer: Option<String>,
        #[serde(default, rename = "selectedIndices")]
        selected_indices: Option<Vec<usize>>,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Problem {
        problem: ProblemOut,
    },
    AnswerResult {
        correct: bool,
        expected: String,
        message: String,
    },
    Error {
        message: String,
    },
}

/// DTO used by both WS and HTTP for problem delivery. The canonical
/// answer never leaves the server before grading.
#[derive(Debug, Serialize)]
pub struct ProblemOut {
    pub id: String,
    pub question: String,
    pub modality: Modality,
    pub is_visual: bool,
    pub data: ProblemData,
    pub choices: Vec<String>,
    pub duration_seconds: Option<u32>,
}

/// Convert a full `ProblemInstance` (internal) to the public DTO.
pub fn to_out(instance: &ProblemInstance) -> ProblemOut {
    ProblemOut {
        id: instance.id.clone(),
        question: instance.question.clone(),
        modality: instance.modality,
        is_visual: instance.is_visual,
        data: instance.data.clone(),
        choices: instance.choices.clone(),
        duration_seconds: instance.duration_seconds,
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct ProblemIn {
    pub engine: String,
    #[serde(default)]
    pub params: ExerciseParams,
}

#[derive(Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "problemId")]
    pub problem_id: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, rename = "selectedIndices")]
    pub selected_indices: Option<Vec<usize>>,
}

#[derive(Serialize)]
pub struct AnswerOut {
    pub correct: bool,
    pub expected: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
