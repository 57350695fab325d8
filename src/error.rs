//! Error taxonomy for the task-intake pipeline
//!
//! Every failure the pipeline can report lands in [`IntakeError`]. Gateway
//! failures travel unmodified through the allocator, the duplicate guard and
//! the pipeline; callers decide what to show a user with
//! [`IntakeError::user_message`].
//!
//! An already existing task is not an error, see
//! [`crate::intake::IntakeOutcome::AlreadyExists`].

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Maximum length of a message surfaced to a chat channel
const MAX_USER_MESSAGE_LEN: usize = 500;

/// Main error type for task intake operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("task service not initialized, no project has been resolved")]
    NotInitialized,

    #[error("task service project not found: {name}")]
    ProjectNotFound { name: String },

    #[error("unauthorized task service access")]
    Unauthorized,

    #[error("error on task service call (status {status}): {body}")]
    RequestFailed { status: u16, body: String },

    #[error("transport error reaching task service: {message}")]
    TransportError { message: String },

    #[error("invalid response from task service: {message}")]
    InvalidResponse { message: String },

    #[error("could not retrieve title for {url}")]
    TitleUnavailable { url: String, reason: String },
}

impl IntakeError {
    /// Create a transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::TransportError {
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a title extraction error
    pub fn title_unavailable<U: Into<String>, R: Into<String>>(url: U, reason: R) -> Self {
        Self::TitleUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether the remote service rejected our credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Human-readable text for the channel that triggered the intake
    pub fn user_message(&self) -> String {
        sanitize_error_message(&self.to_string())
    }
}

static SECRET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(password|token|key|secret)[=:]\s*\S+")
        .expect("secret pattern is a valid regex")
});

static BEARER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)bearer\s+\S+").expect("bearer pattern is a valid regex")
});

/// Redact credentials and bound the length of a message shown to users
fn sanitize_error_message(message: &str) -> String {
    let redacted = SECRET_PATTERN.replace_all(message, "${1}=***");
    let mut sanitized = BEARER_PATTERN
        .replace_all(&redacted, "Bearer ***")
        .to_string();

    if sanitized.len() > MAX_USER_MESSAGE_LEN {
        let truncate_suffix = "...[truncated]";
        let mut cut = MAX_USER_MESSAGE_LEN - truncate_suffix.len();
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str(truncate_suffix);
    }

    sanitized
}

/// Result type for intake operations
pub type IntakeResult<T> = Result<T, IntakeError>;
