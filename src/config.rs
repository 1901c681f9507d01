//! Loading the language-library overlay from TOML.
//!
//! The built-in seed library already makes every generator usable; a
//! config file can replace or add whole categories (word pools, verb
//! paradigms, homophone banks) per school class.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::LanguageLibrary;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LibraryConfig {
  #[serde(default)]
  pub library: LanguageLibrary,
}

/// Attempt to load `LibraryConfig` from DEVOIR_CONFIG_PATH. On any
/// IO/parsing error, returns None; the seeds alone keep the app
/// functional.
pub fn load_library_config_from_env() -> Option<LibraryConfig> {
  let path = std::env::var("DEVOIR_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<LibraryConfig>(&s) {
      Ok(cfg) => {
        info!(target: "devoir_backend", %path, "Loaded library config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "devoir_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "devoir_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// Overlay wins per category key; untouched seed categories remain.
pub fn merge_library(base: LanguageLibrary, overlay: LanguageLibrary) -> LanguageLibrary {
  let mut merged = base;
  merged.conjugation.extend(overlay.conjugation);
  merged.spelling.extend(overlay.spelling);
  merged.homophones.extend(overlay.homophones);
  merged.genders.extend(overlay.genders);
  merged.reading.extend(overlay.reading);
  merged
}
