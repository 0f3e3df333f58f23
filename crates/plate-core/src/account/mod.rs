//! Account service seam.
//!
//! The profile controller only knows `AccountService`. The production
//! implementation talks to an Appwrite-compatible REST API (`appwrite.rs`)
//! and keeps its session credential in a `SessionStore` (`session_store.rs`).

pub mod appwrite;
pub mod session_store;

use std::fmt;

pub use appwrite::{AppwriteAccount, AppwriteConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
pub use session_store::{SessionStore, StoredSession};

use crate::profile::UserProfile;

/// Identity/session operations consumed by the profile screen.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Fetches the user of the current session.
    async fn get_current_user(&self) -> AccountResult<UserProfile>;

    /// Ends the current session on the server.
    async fn terminate_current_session(&self) -> AccountResult<()>;
}

/// Categories of account errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountErrorKind {
    /// No session credential is available locally.
    NoSession,
    /// The service rejected the credential (401/403).
    Unauthorized,
    /// Any other non-success HTTP status.
    HttpStatus,
    /// Connection-level failure.
    Transport,
    /// Request timed out.
    Timeout,
    /// Response did not have the expected shape.
    Parse,
}

impl fmt::Display for AccountErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountErrorKind::NoSession => write!(f, "no_session"),
            AccountErrorKind::Unauthorized => write!(f, "unauthorized"),
            AccountErrorKind::HttpStatus => write!(f, "http_status"),
            AccountErrorKind::Transport => write!(f, "transport"),
            AccountErrorKind::Timeout => write!(f, "timeout"),
            AccountErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from the account service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountError {
    pub kind: AccountErrorKind,
    /// One-line summary suitable for logs.
    pub message: String,
}

impl AccountError {
    pub fn new(kind: AccountErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn no_session() -> Self {
        Self::new(AccountErrorKind::NoSession, "No session")
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(AccountErrorKind::Parse, message)
    }

    /// Builds an error from a non-success response.
    ///
    /// Uses the service's `{"message": ...}` body when there is one.
    pub fn http_status(status: u16, body: &str) -> Self {
        let kind = if status == 401 || status == 403 {
            AccountErrorKind::Unauthorized
        } else {
            AccountErrorKind::HttpStatus
        };

        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| json.get("message")?.as_str().map(str::to_string))
            .filter(|msg| !msg.is_empty());

        let message = match detail {
            Some(msg) => format!("HTTP {status}: {msg}"),
            None => format!("HTTP {status}"),
        };
        Self::new(kind, message)
    }
}

impl From<reqwest::Error> for AccountError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            AccountErrorKind::Timeout
        } else if err.is_decode() {
            AccountErrorKind::Parse
        } else {
            AccountErrorKind::Transport
        };
        Self::new(kind, err.to_string())
    }
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AccountError {}

/// Result type for account operations.
pub type AccountResult<T> = std::result::Result<T, AccountError>;
