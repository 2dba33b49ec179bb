//! Login results and account handles.

use fb_core::{SdkValue, normalize};
use serde::{Deserialize, Serialize};

/// An account handle returned by login.
///
/// Opaque to the CLI; it is passed back unchanged on every account-bound
/// call and normalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account(pub SdkValue);

impl Account {
    pub fn to_json(&self) -> serde_json::Value {
        normalize(&self.0)
    }
}

/// Outcome of an SDK login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResult {
    pub is_success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<Account>,
}

impl LoginResult {
    pub fn accepted(accounts: Vec<Account>) -> Self {
        Self { is_success: true, message: None, data: accounts }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self { is_success: false, message: Some(message.into()), data: Vec::new() }
    }
}
