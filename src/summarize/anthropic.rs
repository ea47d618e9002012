use std::env;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use reqwest::blocking::Client;
use serde_json::Value;

use super::{NO_SUMMARY_FALLBACK, ThreadSummarizer, build_prompt, first_text_block};
use crate::domain::email::EmailMessage;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const MAX_OUTPUT_TOKENS: u32 = 1024;
const REQUEST_TIMEOUT_SECS: u64 = 45;

/// Single-turn messages call against the Anthropic API. One outbound
/// request per summarize call, no retry.
pub struct AnthropicSummarizer {
    api_key: String,
    model: String,
    http: Client,
}

impl AnthropicSummarizer {
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = env_api_key()
            .ok_or_else(|| anyhow!("no API key: set ANTHROPIC_API_KEY (or CLAUDE_API_KEY)"))?;
        Ok(Self {
            api_key,
            model: model.into(),
            http: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
        })
    }
}

fn env_api_key() -> Option<String> {
    for var in ["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"] {
        if let Ok(v) = env::var(var)
            && !v.trim().is_empty()
        {
            return Some(v.trim().to_string());
        }
    }
    None
}

impl ThreadSummarizer for AnthropicSummarizer {
    fn summarize(&self, emails: &[EmailMessage]) -> Result<String> {
        let payload = serde_json::json!({
            "model": self.model,
            "max_tokens": MAX_OUTPUT_TOKENS,
            "messages": [
                {"role": "user", "content": build_prompt(emails)}
            ]
        });

        let response = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&payload)
            .send()?;
        if !response.status().is_success() {
            bail!("anthropic call failed with status {}", response.status());
        }

        let json: Value = response.json()?;
        Ok(first_text_block(&json).unwrap_or_else(|| NO_SUMMARY_FALLBACK.to_string()))
    }
}
