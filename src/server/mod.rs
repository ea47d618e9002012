use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow};
use tiny_http::{Header, Method, Response, Server};

use crate::api::{SummarizeRequest, error_json};
use crate::error::SummarizeError;
use crate::summarize::ThreadSummarizer;

pub const SUMMARIZE_ROUTE: &str = "/api/summarize";

/// Serve the summarization endpoint until Ctrl-C.
pub fn run_server(addr: &str, summarizer: &dyn ThreadSummarizer) -> Result<()> {
    let server = Server::http(addr).map_err(|e| anyhow!(e))?;
    log::info!("summarization endpoint listening on {addr}");

    let running = Arc::new(AtomicBool::new(true));
    let r2 = running.clone();
    ctrlc::set_handler(move || {
        r2.store(false, Ordering::SeqCst);
    })?;

    while running.load(Ordering::SeqCst) {
        let Ok(maybe_request) = server.recv_timeout(Duration::from_millis(500)) else {
            continue;
        };
        let Some(mut request) = maybe_request else {
            continue;
        };

        let mut body = String::new();
        let (status, payload) = match request.as_reader().read_to_string(&mut body) {
            Ok(_) => route(request.method(), request.url(), &body, summarizer),
            Err(e) => {
                log::warn!("failed to read request body: {e}");
                (500, error_json("Failed to summarize thread."))
            }
        };

        log::info!("{} {} -> {}", request.method(), request.url(), status);
        respond(request, status, payload);
    }

    log::info!("shutting down");
    Ok(())
}

pub fn route(
    method: &Method,
    url: &str,
    body: &str,
    summarizer: &dyn ThreadSummarizer,
) -> (u16, String) {
    if url != SUMMARIZE_ROUTE {
        return (404, error_json("Not found."));
    }
    if method != &Method::Post {
        return (405, error_json("POST required."));
    }
    handle_summarize(body, summarizer)
}

/// Status and JSON payload for one summarize request.
pub fn handle_summarize(body: &str, summarizer: &dyn ThreadSummarizer) -> (u16, String) {
    match summarize_request(body, summarizer) {
        Ok(summary) => (200, serde_json::json!({ "summary": summary }).to_string()),
        Err(e) => {
            if let SummarizeError::Provider(cause) = &e {
                log::error!("summarization failed: {cause:#}");
            }
            (e.status_code(), error_json(&e.to_string()))
        }
    }
}

fn summarize_request(
    body: &str,
    summarizer: &dyn ThreadSummarizer,
) -> Result<String, SummarizeError> {
    // A body that is not JSON at all lands in the catch-all 500 path, same
    // as a provider failure; only a present-but-empty list is a 400.
    let request: SummarizeRequest =
        serde_json::from_str(body).map_err(|e| SummarizeError::Provider(e.into()))?;

    let emails = match request.emails {
        Some(emails) if !emails.is_empty() => emails,
        _ => return Err(SummarizeError::Validation),
    };

    summarizer
        .summarize(&emails)
        .map_err(SummarizeError::Provider)
}

fn respond(request: tiny_http::Request, status: u16, body: String) {
    let mut response = Response::from_string(body).with_status_code(status);
    if let Ok(content_type) =
        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
    {
        response = response.with_header(content_type);
    }
    if let Err(e) = request.respond(response) {
        log::warn!("failed to send response: {e}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::anyhow;

    use super::*;
    use crate::api::{ErrorBody, SummarizeResponse};
    use crate::domain::email::EmailMessage;

    struct FixedSummarizer {
        reply: String,
        calls: AtomicUsize,
    }

    impl FixedSummarizer {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ThreadSummarizer for FixedSummarizer {
        fn summarize(&self, _emails: &[EmailMessage]) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    struct FailingSummarizer;

    impl ThreadSummarizer for FailingSummarizer {
        fn summarize(&self, _emails: &[EmailMessage]) -> anyhow::Result<String> {
            Err(anyhow!("provider exploded"))
        }
    }

    const MEETING_BODY: &str = r#"{"emails":[{"from":"a@x.com","subject":"Hi","body":"Let's meet","sentAt":"2024-01-01T00:00:00Z"}]}"#;

    #[test]
    fn non_empty_emails_return_the_provider_summary() {
        let summarizer = FixedSummarizer::new("Meeting request.");
        let (status, payload) = handle_summarize(MEETING_BODY, &summarizer);

        assert_eq!(status, 200);
        let parsed: SummarizeResponse = serde_json::from_str(&payload).expect("summary body");
        assert_eq!(parsed.summary, "Meeting request.");
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_emails_are_rejected_without_calling_the_provider() {
        let summarizer = FixedSummarizer::new("never used");
        let (status, payload) = handle_summarize(r#"{"emails":[]}"#, &summarizer);

        assert_eq!(status, 400);
        let parsed: ErrorBody = serde_json::from_str(&payload).expect("error body");
        assert_eq!(parsed.error, "No thread content provided.");
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_or_null_emails_are_rejected_as_well() {
        let summarizer = FixedSummarizer::new("never used");
        for body in ["{}", r#"{"emails":null}"#] {
            let (status, payload) = handle_summarize(body, &summarizer);
            assert_eq!(status, 400, "body {body:?}");
            let parsed: ErrorBody = serde_json::from_str(&payload).expect("error body");
            assert_eq!(parsed.error, "No thread content provided.");
        }
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn malformed_body_is_a_server_error() {
        let summarizer = FixedSummarizer::new("never used");
        let (status, payload) = handle_summarize("not json", &summarizer);

        assert_eq!(status, 500);
        let parsed: ErrorBody = serde_json::from_str(&payload).expect("error body");
        assert_eq!(parsed.error, "Failed to summarize thread.");
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn provider_failure_is_a_server_error_with_the_fixed_message() {
        let (status, payload) = handle_summarize(MEETING_BODY, &FailingSummarizer);

        assert_eq!(status, 500);
        let parsed: ErrorBody = serde_json::from_str(&payload).expect("error body");
        assert_eq!(parsed.error, "Failed to summarize thread.");
    }

    #[test]
    fn unknown_route_and_wrong_method_are_rejected() {
        let summarizer = FixedSummarizer::new("never used");

        let (status, _) = route(&Method::Post, "/nope", MEETING_BODY, &summarizer);
        assert_eq!(status, 404);

        let (status, _) = route(&Method::Get, SUMMARIZE_ROUTE, "", &summarizer);
        assert_eq!(status, 405);

        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    }
}
