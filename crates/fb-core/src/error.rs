//! Typed error definitions for the `fubon` CLI.
//!
//! [`FbError`] separates conditions where the tool itself could not do its
//! job (exit 1) from business errors the brokerage reported back (exit 0).
//! Every variant renders to the exact message placed in the envelope's
//! `error` field.

use thiserror::Error;

/// Domain-specific errors for the `fubon` CLI.
#[derive(Debug, Error)]
pub enum FbError {
    /// No credential record on disk.
    #[error(
        "Not logged in. Run: fubon login --id <ID> --password <PW> --cert-path <PATH> [--cert-password <PW>]"
    )]
    NotAuthenticated,

    /// The SDK refused the stored credentials.
    #[error("Login failed: {0}")]
    LoginRejected(String),

    /// A required option is missing or out of range.
    #[error("{0}")]
    Validation(String),

    /// A referenced order or entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The SDK call itself failed. Reported, but the tool ran correctly.
    #[error("{0}")]
    Sdk(String),

    /// Settings file problem.
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Chat-completion API failure or missing API key.
    #[error("{0}")]
    Ai(String),
}

impl FbError {
    /// Build a login rejection from the SDK's optional message.
    pub fn login_rejected(message: Option<&str>) -> Self {
        match message {
            Some(m) if !m.is_empty() => Self::LoginRejected(m.to_string()),
            _ => Self::LoginRejected("Unknown login error".to_string()),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Sdk(_) => 0,
            _ => 1,
        }
    }
}

/// Convenience alias used across the workspace.
pub type FbResult<T> = Result<T, FbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdk_failures_exit_zero() {
        assert_eq!(FbError::Sdk("rejected by exchange".into()).exit_code(), 0);
        assert_eq!(FbError::NotAuthenticated.exit_code(), 1);
        assert_eq!(FbError::Validation("x".into()).exit_code(), 1);
        assert_eq!(FbError::NotFound("x".into()).exit_code(), 1);
    }

    #[test]
    fn login_rejection_messages() {
        assert_eq!(FbError::login_rejected(Some("bad cert")).to_string(), "Login failed: bad cert");
        assert_eq!(FbError::login_rejected(None).to_string(), "Login failed: Unknown login error");
        assert_eq!(FbError::login_rejected(Some("")).to_string(), "Login failed: Unknown login error");
    }

    #[test]
    fn not_authenticated_carries_hint() {
        let msg = FbError::NotAuthenticated.to_string();
        assert!(msg.starts_with("Not logged in"));
        assert!(msg.contains("fubon login"));
    }
}
