// logtriage/src/config.rs

use crate::error::{TriageError, TriageResult};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Settings for a language model backend.
///
/// The pipeline never applies these itself; they are handed to whichever
/// `LanguageModel` implementation the integrator plugs in.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
  /// Sampling randomness.
  pub temperature: f32,
  /// Output length cap.
  pub max_tokens: u32,
  /// Per-call deadline.
  pub timeout: Duration,
  /// Backend-level retry budget.
  pub max_retries: u32,
}

impl Default for ModelSettings {
  fn default() -> Self {
    Self {
      temperature: 0.1,
      max_tokens: 2048,
      timeout: Duration::from_secs(30),
      max_retries: 2,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriageConfig {
  /// Directory log paths are resolved against.
  pub log_root: PathBuf,
  /// How many snippets the investigator asks the search backend for.
  pub search_max_results: usize,
  /// Hard cap on the search query length, in characters.
  pub query_char_limit: usize,
  pub model: ModelSettings,
}

impl Default for TriageConfig {
  fn default() -> Self {
    Self {
      log_root: PathBuf::from("."),
      search_max_results: 3,
      query_char_limit: 400,
      model: ModelSettings::default(),
    }
  }
}

impl TriageConfig {
  /// Loads `.env` if present, then reads `TRIAGE_*` variables from the environment.
  pub fn from_env() -> TriageResult<Self> {
    dotenvy::dotenv().ok(); // Load .env file if present
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Builds a config from `lookup`. Unset keys keep their default.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TriageResult<Self> {
    let defaults = Self::default();

    let log_root = lookup("TRIAGE_LOG_ROOT").map(PathBuf::from).unwrap_or(defaults.log_root);
    let search_max_results = parse_var(&lookup, "TRIAGE_SEARCH_MAX_RESULTS", defaults.search_max_results)?;
    let query_char_limit = parse_var(&lookup, "TRIAGE_QUERY_CHAR_LIMIT", defaults.query_char_limit)?;

    let model = ModelSettings {
      temperature: parse_var(&lookup, "TRIAGE_MODEL_TEMPERATURE", defaults.model.temperature)?,
      max_tokens: parse_var(&lookup, "TRIAGE_MODEL_MAX_TOKENS", defaults.model.max_tokens)?,
      timeout: Duration::from_secs(parse_var(
        &lookup,
        "TRIAGE_MODEL_TIMEOUT_SECS",
        defaults.model.timeout.as_secs(),
      )?),
      max_retries: parse_var(&lookup, "TRIAGE_MODEL_MAX_RETRIES", defaults.model.max_retries)?,
    };

    let config = Self {
      log_root,
      search_max_results,
      query_char_limit,
      model,
    };
    config.validate()?;

    tracing::debug!(config = ?config, "Triage configuration loaded.");
    Ok(config)
  }

  pub fn validate(&self) -> TriageResult<()> {
    if self.search_max_results == 0 {
      return Err(invalid("TRIAGE_SEARCH_MAX_RESULTS", "must be at least 1"));
    }
    if self.query_char_limit == 0 {
      return Err(invalid("TRIAGE_QUERY_CHAR_LIMIT", "must be at least 1"));
    }
    if !(0.0..=2.0).contains(&self.model.temperature) {
      return Err(invalid("TRIAGE_MODEL_TEMPERATURE", "must be between 0.0 and 2.0"));
    }
    Ok(())
  }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> TriageResult<T>
where
  T: FromStr,
  T::Err: Display,
{
  match lookup(key) {
    None => Ok(default),
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| invalid(key, &format!("invalid value '{}': {}", raw, e))),
  }
}

fn invalid(key: &str, message: &str) -> TriageError {
  TriageError::Configuration {
    key: key.to_string(),
    message: message.to_string(),
  }
}
