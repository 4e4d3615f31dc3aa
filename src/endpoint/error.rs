//! Submission-specific error types.

/// Errors that can occur while submitting the contact form.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Transport failure or unreadable response body
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Non-success reply whose body is not JSON
    #[error("Endpoint reply is not valid JSON: {0}")]
    InvalidReply(#[from] serde_json::Error),

    /// Endpoint answered with a non-success status
    #[error("Endpoint rejected submission (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The form carries no action URL
    #[error("Form has no action URL")]
    MissingAction,
}
