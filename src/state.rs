//! Application state: served-instance store, merged language library,
//! and the selection policy.
//!
//! This module owns:
//!   - the pending-instance store (by id), consulted at grading time
//!   - the merged language library (TOML overlay over built-in seeds)
//!   - a per-engine anti-repeat memory (one regeneration attempt)

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::config::{load_library_config_from_env, merge_library};
use crate::dispatch::generate;
use crate::domain::{ExerciseParams, LanguageLibrary, ProblemInstance};
use crate::seeds::seed_library;

#[derive(Clone)]
pub struct AppState {
    pub by_id: Arc<RwLock<HashMap<String, ProblemInstance>>>,
    pub last_question: Arc<RwLock<HashMap<String, String>>>,
    pub library: Arc<LanguageLibrary>,
}

impl AppState {
    /// Build state from env: seed library, optional TOML overlay,
    /// empty stores.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let overlay = load_library_config_from_env()
            .map(|cfg| cfg.library)
            .unwrap_or_default();
        let library = merge_library(seed_library(), overlay);

        info!(
            target: "exercise",
            conjugation = library.conjugation.len(),
            spelling = library.spelling.len(),
            homophones = library.homophones.len(),
            genders = library.genders.len(),
            reading = library.reading.len(),
            "Startup library inventory (categories)"
        );

        Self {
            by_id: Arc::new(RwLock::new(HashMap::new())),
            last_question: Arc::new(RwLock::new(HashMap::new())),
            library: Arc::new(library),
        }
    }

    // Visual instructions repeat verbatim, so the anti-repeat key is
    // question + answer.
    fn signature(instance: &ProblemInstance) -> String {
        format!("{}#{}", instance.question, instance.answer)
    }

    /// Generate a fresh instance and remember it for grading. When the
    /// draw repeats the previous question of the same engine, one
    /// regeneration is attempted before serving it anyway.
    #[instrument(level = "info", skip(self, params), fields(%engine))]
    pub async fn create_problem(&self, engine: &str, params: &ExerciseParams) -> ProblemInstance {
        let mut instance = generate(engine, params, Some(self.library.as_ref()));

        let last = { self.last_question.read().await.get(engine).cloned() };
        if last.as_deref() == Some(Self::signature(&instance).as_str()) {
            let retry = generate(engine, params, Some(self.library.as_ref()));
            if Self::signature(&retry) != Self::signature(&instance) {
                instance = retry;
            } else {
                warn!(target: "exercise", %engine, "Repeated question served (retry drew the same)");
            }
        }

        self.last_question
            .write()
            .await
            .insert(engine.to_string(), Self::signature(&instance));
        self.by_id
            .write()
            .await
            .insert(instance.id.clone(), instance.clone());
        instance
    }

    /// Remove and return a pending instance. Each served instance is
    /// graded at most once; taking it keeps the store bounded.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn take_problem(&self, id: &str) -> Option<ProblemInstance> {
        self.by_id.write().await.remove(id)
    }
}
