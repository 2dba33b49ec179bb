//! Recording in-memory SDK for command scenarios.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use fb_core::config::Settings;
use fb_core::error::{FbError, FbResult};
use fb_core::session::{Credentials, SessionStore};
use fb_core::types::StreamChannel;
use fb_core::SdkValue;
use fb_sdk::{Account, BrokerSdk, EventStream, LoginResult, SdkRequest};
use serde_json::{Value, json};

#[derive(Default)]
pub struct MockSdk {
    pub login_result: Option<LoginResult>,
    pub replies: HashMap<String, SdkValue>,
    pub failures: HashMap<String, String>,
    pub logins: Vec<Credentials>,
    pub calls: Mutex<Vec<(String, Value)>>,
    pub disconnected: bool,
}

impl MockSdk {
    /// Accepts any login and returns `n` accounts.
    pub fn with_accounts(n: usize) -> Self {
        let accounts = (0..n)
            .map(|i| Account(SdkValue::from(json!({"name": "Wang", "account": format!("00{i}")}))))
            .collect();
        Self { login_result: Some(LoginResult::accepted(accounts)), ..Default::default() }
    }

    pub fn reply(mut self, method: &str, value: Value) -> Self {
        self.replies.insert(method.to_string(), serde_json::from_value(value).unwrap());
        self
    }

    pub fn fail(mut self, method: &str, message: &str) -> Self {
        self.failures.insert(method.to_string(), message.to_string());
        self
    }

    /// Methods invoked so far, in order.
    pub fn methods(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }

    /// Params of the last call to `method`.
    pub fn params(&self, method: &str) -> Option<Value> {
        self.calls.lock().unwrap().iter().rev().find(|(m, _)| m == method).map(|(_, p)| p.clone())
    }
}

#[async_trait]
impl BrokerSdk for MockSdk {
    async fn login(&mut self, credentials: &Credentials) -> FbResult<LoginResult> {
        self.logins.push(credentials.clone());
        Ok(self.login_result.clone().unwrap_or_else(|| LoginResult::rejected("no login configured")))
    }

    async fn invoke(&self, _account: Option<&Account>, request: SdkRequest) -> FbResult<SdkValue> {
        let (method, params) = request.into_wire()?;
        self.calls.lock().unwrap().push((method.clone(), params));
        if let Some(message) = self.failures.get(&method) {
            return Err(FbError::Sdk(message.clone()));
        }
        Ok(self.replies.get(&method).cloned().unwrap_or(SdkValue::Null))
    }

    async fn subscribe_market(&self, _channel: StreamChannel, _symbol: &str) -> FbResult<EventStream> {
        let (_tx, stream) = EventStream::channel();
        Ok(stream)
    }

    async fn listen_account(&self, _account: &Account) -> FbResult<EventStream> {
        let (_tx, stream) = EventStream::channel();
        Ok(stream)
    }

    async fn disconnect(&mut self) -> FbResult<()> {
        self.disconnected = true;
        Ok(())
    }
}

/// Session store and settings inside a temp directory.
pub struct Home {
    pub dir: tempfile::TempDir,
}

impl Home {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn sessions(&self) -> SessionStore {
        SessionStore::new(self.dir.path().join(".fubon-cli-session.json"))
    }

    pub fn settings(&self) -> Settings {
        Settings::load(self.dir.path().join(".fubon-cli-config.json"))
    }

    /// Home with a saved credential record.
    pub fn logged_in() -> Self {
        let home = Self::new();
        home.sessions().save(&Credentials::new("A123456789", "pw", "/certs/a.pfx", None)).unwrap();
        home
    }
}

/// An order record as the SDK reports it.
pub fn order(no: &str) -> Value {
    json!({
        "$type": "OrderResult",
        "$fields": {"order_no": no, "stock_no": "2330", "price": 580.0, "quantity": 1000}
    })
}
