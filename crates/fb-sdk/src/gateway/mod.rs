//! [`BrokerSdk`] over HTTP + WebSocket to the SDK host process.
//!
//! # Endpoints
//!
//! | Operation   | Method | Path      | Body                                    |
//! |-------------|--------|-----------|-----------------------------------------|
//! | Login       | POST   | `/login`  | credentials                             |
//! | Invoke      | POST   | `/invoke` | `{session, account?, method, params}`   |
//! | Logout      | POST   | `/logout` | `{session}`                             |
//! | Push stream | WS     | `/stream` | first frame `{op, session, ..}`         |
//!
//! Transport failures and `{ok: false}` replies become [`FbError::Sdk`].

pub mod config;
mod stream;
mod wire;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use fb_core::error::{FbError, FbResult};
use fb_core::logging::mask_identity;
use fb_core::session::Credentials;
use fb_core::types::StreamChannel;
use fb_core::SdkValue;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub use config::GatewayConfig;

use crate::account::{Account, LoginResult};
use crate::event::EventStream;
use crate::request::SdkRequest;
use crate::BrokerSdk;
use wire::{InvokeBody, InvokeReply, LoginBody, LoginReply, LogoutBody, Subscription};

/// Gateway-backed SDK client.
pub struct GatewaySdk {
    config: GatewayConfig,
    http: reqwest::Client,
    /// Session token issued by a successful login.
    session: Option<String>,
}

impl GatewaySdk {
    pub fn new(config: GatewayConfig) -> FbResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FbError::Sdk(format!("http client: {e}")))?;
        Ok(Self { config, http, session: None })
    }

    fn session(&self) -> FbResult<&str> {
        self.session
            .as_deref()
            .ok_or_else(|| FbError::Sdk("SDK session not established; login first".to_string()))
    }

    async fn post_login(&self, credentials: &Credentials) -> Result<LoginReply> {
        let body = LoginBody {
            personal_id: &credentials.personal_id,
            password: &credentials.password,
            cert_path: &credentials.cert_path,
            cert_password: credentials.cert_password(),
        };
        let reply = self
            .http
            .post(self.config.endpoint("login"))
            .json(&body)
            .send()
            .await
            .context("login request failed")?
            .error_for_status()
            .context("login HTTP error")?
            .json()
            .await
            .context("login reply decode failed")?;
        Ok(reply)
    }

    /// Outer error: transport. Inner error: the SDK's own failure message.
    async fn post_invoke(
        &self,
        session: &str,
        account: Option<&Account>,
        request: &SdkRequest,
    ) -> Result<Result<SdkValue, String>> {
        let (method, params) = request.into_wire()?;
        let request_id = Uuid::new_v4().to_string();
        debug!("[gateway] invoke {method} id={request_id}");

        let body = InvokeBody { session, account, method: method.clone(), params };
        let reply: InvokeReply = self
            .http
            .post(self.config.endpoint("invoke"))
            .header("x-request-id", &request_id)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("{method} request failed"))?
            .error_for_status()
            .with_context(|| format!("{method} HTTP error"))?
            .json()
            .await
            .with_context(|| format!("{method} reply decode failed"))?;

        if !reply.ok {
            return Ok(Err(reply.error.unwrap_or_else(|| format!("{method} failed"))));
        }
        Ok(Ok(reply.result.unwrap_or(SdkValue::Null)))
    }

    async fn open_stream(&self, subscription: &Subscription<'_>) -> FbResult<EventStream> {
        let url = self.config.stream_url().map_err(sdk_error)?;
        let frame = serde_json::to_string(subscription)?;
        stream::open(url, frame).await.map_err(sdk_error)
    }
}

/// Collapse a transport error chain into the envelope message.
fn sdk_error(e: anyhow::Error) -> FbError {
    FbError::Sdk(format!("{e:#}"))
}

#[async_trait]
impl BrokerSdk for GatewaySdk {
    async fn login(&mut self, credentials: &Credentials) -> FbResult<LoginResult> {
        info!("[gateway] login as {}", mask_identity(&credentials.personal_id));
        let reply = self.post_login(credentials).await.map_err(sdk_error)?;
        if reply.is_success {
            self.session = reply.session;
            info!("[gateway] login ok, {} account(s)", reply.data.len());
        } else {
            warn!("[gateway] login rejected");
        }
        Ok(LoginResult { is_success: reply.is_success, message: reply.message, data: reply.data })
    }

    async fn invoke(&self, account: Option<&Account>, request: SdkRequest) -> FbResult<SdkValue> {
        let session = self.session()?;
        match self.post_invoke(session, account, &request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => {
                debug!("[gateway] {} rejected: {message}", request.method());
                Err(FbError::Sdk(message))
            }
            Err(e) => {
                warn!("[gateway] {} failed: {e:#}", request.method());
                Err(sdk_error(e))
            }
        }
    }

    async fn subscribe_market(&self, channel: StreamChannel, symbol: &str) -> FbResult<EventStream> {
        let session = self.session()?;
        self.open_stream(&Subscription::Subscribe { session, channel: channel.sdk_name(), symbol }).await
    }

    async fn listen_account(&self, account: &Account) -> FbResult<EventStream> {
        let session = self.session()?;
        self.open_stream(&Subscription::Callbacks { session, account }).await
    }

    async fn disconnect(&mut self) -> FbResult<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let sent = self
            .http
            .post(self.config.endpoint("logout"))
            .json(&LogoutBody { session: &session })
            .send()
            .await
            .and_then(|r| r.error_for_status());
        if let Err(e) = sent {
            warn!("[gateway] logout failed: {e}");
        }
        info!("[gateway] disconnected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::StockRequest;

    #[tokio::test]
    async fn invoke_without_login_is_sdk_error() {
        let sdk = GatewaySdk::new(GatewayConfig::default()).unwrap();
        let err = sdk.invoke(None, StockRequest::GetOrderResults.into()).await.unwrap_err();
        assert!(matches!(err, FbError::Sdk(_)));
        assert_eq!(err.exit_code(), 0);
    }

    #[tokio::test]
    async fn disconnect_without_session_is_noop() {
        let mut sdk = GatewaySdk::new(GatewayConfig::default()).unwrap();
        sdk.disconnect().await.unwrap();
    }

    #[test]
    fn sdk_error_keeps_context_chain() {
        let e = anyhow::anyhow!("connection refused").context("login request failed");
        assert_eq!(sdk_error(e).to_string(), "login request failed: connection refused");
    }
}
