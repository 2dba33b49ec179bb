//! Gateway request and response bodies.

use fb_core::SdkValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::account::Account;

#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub personal_id: &'a str,
    pub password: &'a str,
    pub cert_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_password: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginReply {
    pub is_success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<Account>,
    #[serde(default)]
    pub session: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InvokeBody<'a> {
    pub session: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<&'a Account>,
    pub method: String,
    pub params: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InvokeReply {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<SdkValue>,
    #[serde(default)]
    pub error: Option<String>,
}

/// First frame on a push stream.
#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum Subscription<'a> {
    Subscribe { session: &'a str, channel: &'a str, symbol: &'a str },
    Callbacks { session: &'a str, account: &'a Account },
}

#[derive(Debug, Serialize)]
pub(crate) struct LogoutBody<'a> {
    pub session: &'a str,
}
