// logtriage/src/stages/prompts.rs

//! Prompt templates and the search query builder used by the stages.

/// System instruction shared by every model call.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert DevOps engineer. Always provide detailed technical analysis, \
   step-by-step solutions, and production-ready recommendations.";

/// Prefix of the knowledge search query built from the log analysis.
pub const SEARCH_QUERY_PREFIX: &str = "Solutions for DevOps issue: ";

/// Builds the knowledge search query for `log_analysis`, cut to the first
/// `char_limit` characters.
///
/// The cut is a plain prefix cut on `char`s; it does not look for word
/// boundaries and may split the analysis mid-word.
pub fn search_query(log_analysis: &str, char_limit: usize) -> String {
  format!("{}{}", SEARCH_QUERY_PREFIX, log_analysis)
    .chars()
    .take(char_limit)
    .collect()
}

pub fn log_analysis_prompt(logs: &str) -> String {
  let mut prompt = String::new();
  prompt.push_str("**Role:** Senior DevOps Troubleshooter with 10 years of experience.\n");
  prompt.push_str(
    "**Task:** Analyze the production logs provided below to identify critical issues and the root cause of the failure.\n\n",
  );
  prompt.push_str("**Instructions:**\n");
  prompt.push_str("1. Review the logs thoroughly.\n");
  prompt.push_str("2. Extract specific error messages and failure patterns.\n");
  prompt.push_str("3. Summarize the primary issue clearly.\n\n");
  prompt.push_str("**Logs:**\n");
  prompt.push_str(logs);
  prompt.push('\n');
  prompt
}

pub fn investigation_prompt(log_analysis: &str, search_results: &[String]) -> String {
  let mut prompt = String::new();
  prompt.push_str("**Role:** DevOps Troubleshooting Specialist\n");
  prompt.push_str(
    "**Task:** Synthesize log evidence with technical research to identify the most viable solution.\n\n",
  );
  prompt.push_str("**Context:**\n");
  prompt.push_str(&format!("1. LOG ANALYSIS:\n{}\n\n", log_analysis));
  prompt.push_str("2. SEARCH RESULTS:\n");
  prompt.push_str(&format_search_results(search_results));
  prompt.push('\n');
  prompt.push_str("**Instructions:**\n");
  prompt.push_str("- Compare the error patterns in the logs with the search results provided.\n");
  prompt.push_str("- Filter out search results that do not match this environment.\n");
  prompt.push_str("- Summarize the most reliable remediation steps, citing official documentation where possible.\n");
  prompt.push_str("- Identify common pitfalls associated with these solutions.\n");
  prompt.push_str("- Produce an investigation report that a remediation plan can be built from.\n");
  prompt
}

pub fn remediation_prompt(investigation_results: &str, log_analysis: &str) -> String {
  let mut prompt = String::new();
  prompt.push_str("**Role:** Senior DevOps Solutions Architect\n");
  prompt.push_str("**Task:** Generate a production-ready remediation plan based on the investigation findings.\n\n");
  prompt.push_str("**Context:**\n");
  prompt.push_str(&format!("1. INVESTIGATION SUMMARY:\n{}\n\n", investigation_results));
  prompt.push_str(&format!("2. ROOT CAUSE CONTEXT:\n{}\n\n", log_analysis));
  prompt.push_str("**Instructions:**\n");
  prompt.push_str("- Create a step-by-step remediation plan.\n");
  prompt.push_str("- Provide exact shell commands, YAML configurations, or CLI snippets where applicable.\n");
  prompt.push_str("- Include a \"Verification\" section to confirm the fix works.\n");
  prompt.push_str("- Add a \"Prevention\" section with monitoring or configuration practices to avoid recurrence.\n");
  prompt.push_str("- Cite official documentation links as references.\n\n");
  prompt.push_str("Output format: Markdown headers, code blocks for commands, professional technical tone.\n");
  prompt
}

fn format_search_results(results: &[String]) -> String {
  if results.is_empty() {
    return "(no search results)\n".to_string();
  }
  results
    .iter()
    .enumerate()
    .map(|(idx, snippet)| format!("[{}] {}\n", idx + 1, snippet))
    .collect()
}
