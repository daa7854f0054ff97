//! Error taxonomy for the auth core and its user-facing notices.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is caught where the failing operation runs and turned into a
//! dismissable [`Notice`]; nothing escapes to the host UI as a panic and no
//! error triggers an automatic retry.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::time::Duration;

/// How long a notice stays on screen before it dismisses itself.
pub const NOTICE_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Failures surfaced by the OTP flow, its gateway, and the voice adapter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The request could not complete (transport or connectivity failure).
    #[error("network error: {0}")]
    Network(String),
    /// A response arrived with `success: false`.
    #[error("{0}")]
    ServerRejected(String),
    /// Client-side input failed a precondition.
    #[error("{0}")]
    Validation(String),
    /// Voice recognition is unavailable in this environment.
    #[error("{0}")]
    UnsupportedCapability(String),
    #[error("resend available in {remaining}s")]
    CooldownActive { remaining: u32 },
    #[error("a request is already in progress")]
    InFlight,
    #[error("request timed out")]
    Timeout,
    #[error("request cancelled")]
    Cancelled,
    #[error("storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Server rejection, falling back to `generic` when the server sent no message.
    #[must_use]
    pub fn rejected(message: Option<String>, generic: &str) -> Self {
        let message = message
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| generic.to_owned());
        Self::ServerRejected(message)
    }

    /// Whether the user should be told about this error.
    ///
    /// Cancellation only happens on teardown, when nobody is left to read it.
    #[must_use]
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Convert into the notice shown to the user.
    #[must_use]
    pub fn notice(&self) -> Notice {
        let kind = match self {
            Self::Validation(_) | Self::CooldownActive { .. } => NoticeKind::Warning,
            _ => NoticeKind::Error,
        };
        let message = match self {
            Self::Network(_) => "Could not reach the server. Check your connection and try again.".to_owned(),
            Self::Timeout => "The server took too long to respond. Please try again.".to_owned(),
            other => other.to_string(),
        };
        Notice { kind, message }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A dismissable message shown above the active form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    /// CSS modifier for the notice banner.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Info => "notice notice--info",
            NoticeKind::Warning => "notice notice--warning",
            NoticeKind::Error => "notice notice--error",
        }
    }
}

impl From<&AuthError> for Notice {
    fn from(err: &AuthError) -> Self {
        err.notice()
    }
}
