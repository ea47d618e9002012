use serde::{Deserialize, Serialize};

pub type ThreadId = u32;

/// One message inside a thread, exactly as the summarize endpoint expects it
/// on the wire (camelCase keys, `sentAt` as an ISO-8601 string).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub from: String,
    pub subject: String,
    pub body: String,
    pub sent_at: String,
}

/// A thread as handed to the TUI: already materialized, read-only.
/// `emails` is ordered most-recent-first, so `emails[0]` names the row sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: ThreadId,
    pub subject: String,
    pub last_activity: String,
    #[serde(default)]
    pub emails: Vec<EmailMessage>,
}

impl Thread {
    pub fn latest_sender(&self) -> &str {
        self.emails
            .first()
            .map(|e| e.from.as_str())
            .unwrap_or("(unknown)")
    }

    /// Date part of the ISO-8601 last-activity timestamp, for the row's
    /// right-hand column.
    pub fn last_activity_date(&self) -> &str {
        self.last_activity.get(..10).unwrap_or(&self.last_activity)
    }
}
