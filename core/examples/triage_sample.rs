// logtriage/examples/triage_sample.rs

use async_trait::async_trait;
use logtriage::{
  Collaborators, KnowledgeSearch, LanguageModel, Orchestrator, RootedLogSource, TriageConfig, TriageError,
  TriageResult,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// 1. Offline stand-ins for the search and model backends.
//    Real deployments plug in HTTP clients implementing the same traits.
struct CannedSearch;

#[async_trait]
impl KnowledgeSearch for CannedSearch {
  async fn search(&self, query: &str, max_results: usize) -> TriageResult<Vec<String>> {
    info!(%query, "CannedSearch queried");
    let hits = [
      "logrotate(8): rotate, compress and remove old log files",
      "Filesystem Hierarchy Standard: /var/log holds variable log data",
      "journald.conf: SystemMaxUse limits persistent journal size",
    ];
    Ok(hits.iter().take(max_results).map(|s| s.to_string()).collect())
  }
}

struct CannedModel;

#[async_trait]
impl LanguageModel for CannedModel {
  async fn generate(&self, _system_instruction: &str, task_prompt: &str) -> TriageResult<String> {
    let reply = if task_prompt.contains("INVESTIGATION SUMMARY") {
      "# Remediation plan\n\n1. `sudo logrotate -f /etc/logrotate.conf`\n\n## Verification\n`df -h /var`\n\n## Prevention\nAlert at 80% usage."
    } else if task_prompt.contains("SEARCH RESULTS") {
      "Old logs under /var/log are not rotated; logrotate is the documented fix."
    } else {
      "Root cause: /var is full, writes fail with ENOSPC."
    };
    Ok(reply.to_string())
  }
}

#[tokio::main]
async fn main() -> Result<(), TriageError> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  info!("--- Incident Triage Sample ---");

  // 2. Put a sample log somewhere the rooted log source may read it.
  let log_root = std::env::temp_dir().join("logtriage-sample");
  std::fs::create_dir_all(&log_root).map_err(|e| TriageError::Configuration {
    key: "log_root".to_string(),
    message: e.to_string(),
  })?;
  std::fs::write(
    log_root.join("sample1.log"),
    "2024-05-01T12:00:00Z ERROR: disk full on /var\n2024-05-01T12:00:01Z ERROR: write failed: No space left on device\n",
  )
  .map_err(|e| TriageError::Configuration {
    key: "log_root".to_string(),
    message: e.to_string(),
  })?;

  // 3. Configuration from the environment, with the log root pinned to the sample.
  let config = TriageConfig {
    log_root,
    ..TriageConfig::from_env()?
  };

  // 4. Wire collaborators and run.
  let collaborators = Collaborators::new(
    Arc::new(RootedLogSource::from_config(&config)?),
    Arc::new(CannedSearch),
    Arc::new(CannedModel),
  );
  let orchestrator = Orchestrator::new(collaborators, config);

  match orchestrator.run("sample1.log").await {
    Ok(state) => {
      for message in state.messages() {
        info!(%message, "trace");
      }
      println!("\n--- FINAL SOLUTION ---\n{}", state.into_remediation_plan()?);
      Ok(())
    }
    Err(e) => {
      error!(error = %e, "Triage failed.");
      Err(e)
    }
  }
}
