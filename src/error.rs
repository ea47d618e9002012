use thiserror::Error;

/// Failure modes of the summarize endpoint. The display strings are the
/// exact payloads callers see; internal causes are logged server-side only.
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// Empty or missing email list; reported as 400.
    #[error("No thread content provided.")]
    Validation,

    /// Request construction, network, or provider failure; reported as 500.
    #[error("Failed to summarize thread.")]
    Provider(anyhow::Error),
}

impl SummarizeError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Provider(_) => 500,
        }
    }
}
