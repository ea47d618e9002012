use serde::{Deserialize, Serialize};

use crate::domain::email::EmailMessage;

/// Body of `POST /api/summarize`. `emails` stays an `Option` so a missing or
/// JSON-null field parses and can be rejected by the validation path instead
/// of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub emails: Option<Vec<EmailMessage>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
