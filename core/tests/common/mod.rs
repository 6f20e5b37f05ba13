// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use logtriage::{
  Collaborators, KnowledgeSearch, LanguageModel, LogSource, Orchestrator, TriageConfig, TriageError, TriageResult,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc, Mutex,
};
use tracing::Level;

// --- Shared call trace across all mocks, to assert cross-collaborator ordering ---
pub type CallTrace = Arc<Mutex<Vec<String>>>;

pub fn new_trace() -> CallTrace {
  Arc::new(Mutex::new(Vec::new()))
}

// --- Mock LogSource ---
pub struct MockLogSource {
  files: HashMap<String, String>,
  fail_with_io: bool,
  pub calls: AtomicUsize,
  trace: CallTrace,
}

impl MockLogSource {
  pub fn with_file(path: &str, contents: &str, trace: CallTrace) -> Self {
    let mut files = HashMap::new();
    files.insert(path.to_string(), contents.to_string());
    Self {
      files,
      fail_with_io: false,
      calls: AtomicUsize::new(0),
      trace,
    }
  }

  pub fn empty(trace: CallTrace) -> Self {
    Self {
      files: HashMap::new(),
      fail_with_io: false,
      calls: AtomicUsize::new(0),
      trace,
    }
  }

  pub fn failing_io(trace: CallTrace) -> Self {
    Self {
      fail_with_io: true,
      ..Self::empty(trace)
    }
  }

  pub fn add_file(mut self, path: &str, contents: &str) -> Self {
    self.files.insert(path.to_string(), contents.to_string());
    self
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl LogSource for MockLogSource {
  async fn read(&self, path: &str) -> TriageResult<String> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.trace.lock().unwrap().push(format!("log.read:{}", path));
    if self.fail_with_io {
      return Err(TriageError::LogRead {
        path: path.to_string(),
        source: anyhow::anyhow!("simulated I/O failure"),
      });
    }
    self
      .files
      .get(path)
      .cloned()
      .ok_or_else(|| TriageError::LogNotFound { path: path.to_string() })
  }
}

// --- Mock KnowledgeSearch ---
pub struct MockSearch {
  results: Option<Vec<String>>, // None => unavailable
  pub calls: AtomicUsize,
  pub queries: Mutex<Vec<(String, usize)>>,
  trace: CallTrace,
}

impl MockSearch {
  pub fn returning(results: &[&str], trace: CallTrace) -> Self {
    Self {
      results: Some(results.iter().map(|s| s.to_string()).collect()),
      calls: AtomicUsize::new(0),
      queries: Mutex::new(Vec::new()),
      trace,
    }
  }

  pub fn unavailable(trace: CallTrace) -> Self {
    Self {
      results: None,
      calls: AtomicUsize::new(0),
      queries: Mutex::new(Vec::new()),
      trace,
    }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  pub fn last_query(&self) -> Option<(String, usize)> {
    self.queries.lock().unwrap().last().cloned()
  }
}

#[async_trait]
impl KnowledgeSearch for MockSearch {
  async fn search(&self, query: &str, max_results: usize) -> TriageResult<Vec<String>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.trace.lock().unwrap().push("search".to_string());
    self.queries.lock().unwrap().push((query.to_string(), max_results));
    match &self.results {
      Some(results) => Ok(results.iter().take(max_results).cloned().collect()),
      None => Err(TriageError::SearchUnavailable {
        source: anyhow::anyhow!("search quota exhausted"),
      }),
    }
  }
}

// --- Mock LanguageModel: answers from a queue, one entry per call ---
pub struct MockModel {
  responses: Mutex<VecDeque<Result<String, String>>>,
  pub calls: AtomicUsize,
  pub prompts: Mutex<Vec<(String, String)>>,
  trace: CallTrace,
}

impl MockModel {
  pub fn scripted(responses: Vec<Result<&str, &str>>, trace: CallTrace) -> Self {
    Self {
      responses: Mutex::new(
        responses
          .into_iter()
          .map(|r| r.map(str::to_string).map_err(str::to_string))
          .collect(),
      ),
      calls: AtomicUsize::new(0),
      prompts: Mutex::new(Vec::new()),
      trace,
    }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  pub fn prompt(&self, idx: usize) -> (String, String) {
    self.prompts.lock().unwrap()[idx].clone()
  }
}

#[async_trait]
impl LanguageModel for MockModel {
  async fn generate(&self, system_instruction: &str, task_prompt: &str) -> TriageResult<String> {
    let call_idx = self.calls.fetch_add(1, Ordering::SeqCst);
    self.trace.lock().unwrap().push(format!("model.generate#{}", call_idx + 1));
    self
      .prompts
      .lock()
      .unwrap()
      .push((system_instruction.to_string(), task_prompt.to_string()));
    match self.responses.lock().unwrap().pop_front() {
      Some(Ok(text)) => Ok(text),
      Some(Err(msg)) => Err(TriageError::ModelInvocation {
        source: anyhow::anyhow!(msg),
      }),
      None => Err(TriageError::ModelInvocation {
        source: anyhow::anyhow!("no scripted response left"),
      }),
    }
  }
}

// --- The sample1.log scenario ---
pub const SAMPLE_LOG_PATH: &str = "sample1.log";
pub const SAMPLE_LOG: &str = "ERROR: disk full on /var";
pub const SAMPLE_ANALYSIS: &str = "Analysis: disk space exhausted";
pub const SAMPLE_SNIPPET: &str = "doc: clean /var/log";
pub const SAMPLE_INVESTIGATION: &str = "Investigation: rotate logs";
pub const SAMPLE_PLAN: &str = "Plan: run logrotate";

pub struct Harness {
  pub logs: Arc<MockLogSource>,
  pub search: Arc<MockSearch>,
  pub model: Arc<MockModel>,
  pub trace: CallTrace,
}

impl Harness {
  pub fn new(logs: MockLogSource, search: MockSearch, model: MockModel, trace: CallTrace) -> Self {
    Self {
      logs: Arc::new(logs),
      search: Arc::new(search),
      model: Arc::new(model),
      trace,
    }
  }

  /// All three collaborators succeed with the sample1.log answers.
  pub fn sample() -> Self {
    let trace = new_trace();
    Self::new(
      MockLogSource::with_file(SAMPLE_LOG_PATH, SAMPLE_LOG, trace.clone()),
      MockSearch::returning(&[SAMPLE_SNIPPET], trace.clone()),
      MockModel::scripted(
        vec![Ok(SAMPLE_ANALYSIS), Ok(SAMPLE_INVESTIGATION), Ok(SAMPLE_PLAN)],
        trace.clone(),
      ),
      trace,
    )
  }

  pub fn collaborators(&self) -> Collaborators {
    Collaborators::new(self.logs.clone(), self.search.clone(), self.model.clone())
  }

  pub fn orchestrator(&self) -> Orchestrator {
    Orchestrator::new(self.collaborators(), TriageConfig::default())
  }

  pub fn trace(&self) -> Vec<String> {
    self.trace.lock().unwrap().clone()
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
