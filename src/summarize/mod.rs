mod anthropic;

pub use anthropic::{AnthropicSummarizer, DEFAULT_MODEL};

use anyhow::Result;
use serde_json::Value;

use crate::domain::email::EmailMessage;

/// Returned in place of a summary when the provider answered with something
/// other than a text block.
pub const NO_SUMMARY_FALLBACK: &str = "No summary available.";

const SUMMARY_INSTRUCTION: &str =
    "Summarize this thread in one concise sentence no more than 10 words:";

/// Seam between the HTTP handler and the LLM call, so the handler is
/// testable without a network.
pub trait ThreadSummarizer: Send + Sync {
    fn summarize(&self, emails: &[EmailMessage]) -> Result<String>;
}

/// Render the thread as labeled blocks, newest first as given, separated by
/// a visible divider.
pub fn format_thread(emails: &[EmailMessage]) -> String {
    emails
        .iter()
        .enumerate()
        .map(|(index, email)| {
            format!(
                "Email {}:\nFrom: {}\nSubject: {}\nBody: {}\nSent At: {}\n",
                index + 1,
                email.from,
                email.subject,
                email.body,
                email.sent_at
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

pub fn build_prompt(emails: &[EmailMessage]) -> String {
    format!("{}\n\n{}", SUMMARY_INSTRUCTION, format_thread(emails))
}

/// First content block of a messages-API response, and only if it is text.
/// Later blocks are ignored on purpose.
pub fn first_text_block(json: &Value) -> Option<String> {
    let first = json.get("content").and_then(Value::as_array)?.first()?;
    if first.get("type").and_then(Value::as_str) != Some("text") {
        return None;
    }
    first
        .get("text")
        .and_then(Value::as_str)
        .map(|t| t.to_string())
}
