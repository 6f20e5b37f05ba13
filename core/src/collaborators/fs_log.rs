// logtriage/src/collaborators/fs_log.rs
use crate::collaborators::LogSource;
use crate::config::TriageConfig;
use crate::error::{TriageError, TriageResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// A [`LogSource`] reading files below a fixed root directory.
///
/// Relative paths are resolved against the root. Anything that does not
/// canonicalize to a location inside the root (missing files, `..` escapes,
/// absolute paths elsewhere, symlinks pointing out) is reported as
/// `TriageError::LogNotFound`.
#[derive(Debug, Clone)]
pub struct RootedLogSource {
  root: PathBuf,
}

impl RootedLogSource {
  /// Fails with `TriageError::Configuration` if `root` is not an existing directory.
  pub fn new(root: impl AsRef<Path>) -> TriageResult<Self> {
    let root = root.as_ref();
    let canonical = std::fs::canonicalize(root).map_err(|e| TriageError::Configuration {
      key: "log_root".to_string(),
      message: format!("cannot resolve '{}': {}", root.display(), e),
    })?;
    if !canonical.is_dir() {
      return Err(TriageError::Configuration {
        key: "log_root".to_string(),
        message: format!("'{}' is not a directory", canonical.display()),
      });
    }
    Ok(Self { root: canonical })
  }

  pub fn from_config(config: &TriageConfig) -> TriageResult<Self> {
    Self::new(&config.log_root)
  }

  pub fn root(&self) -> &Path {
    &self.root
  }
}

#[async_trait]
impl LogSource for RootedLogSource {
  #[instrument(name = "RootedLogSource::read", skip(self), fields(root = %self.root.display()))]
  async fn read(&self, path: &str) -> TriageResult<String> {
    let not_found = || TriageError::LogNotFound { path: path.to_string() };
    if path.is_empty() {
      return Err(not_found());
    }

    let resolved = match tokio::fs::canonicalize(self.root.join(path)).await {
      Ok(resolved) => resolved,
      Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
      Err(e) => {
        return Err(TriageError::LogRead {
          path: path.to_string(),
          source: e.into(),
        })
      }
    };

    if !resolved.starts_with(&self.root) {
      warn!(resolved = %resolved.display(), "Log path escapes the permitted root.");
      return Err(not_found());
    }

    let text = tokio::fs::read_to_string(&resolved)
      .await
      .map_err(|e| TriageError::LogRead {
        path: path.to_string(),
        source: e.into(),
      })?;
    debug!(bytes = text.len(), "Log file read.");
    Ok(text)
  }
}
