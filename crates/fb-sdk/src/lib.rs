//! # fb-sdk
//!
//! The seam between the `fubon` CLI and the brokerage SDK.
//!
//! The SDK is consumed through the [`BrokerSdk`] trait. Every operation the
//! CLI performs is one variant of the closed [`SdkRequest`] catalog, so a
//! transport only needs `login`, a generic `invoke`, and the two push
//! streams. [`GatewaySdk`] is the production transport; tests substitute an
//! in-process implementation.
//!
//! ## Lifecycle
//!
//! 1. [`login`](BrokerSdk::login) with the cached credentials (every process).
//! 2. One [`invoke`](BrokerSdk::invoke), or one push stream.
//! 3. [`disconnect`](BrokerSdk::disconnect).

pub mod account;
pub mod event;
pub mod gateway;
pub mod request;

use async_trait::async_trait;
use fb_core::error::FbResult;
use fb_core::session::Credentials;
use fb_core::types::StreamChannel;
use fb_core::SdkValue;

pub use account::{Account, LoginResult};
pub use event::{EventStream, SdkEvent};
pub use gateway::{GatewayConfig, GatewaySdk};
pub use request::SdkRequest;

/// Trait implemented by every brokerage SDK transport.
///
/// Errors raised by the SDK itself surface as
/// [`FbError::Sdk`](fb_core::FbError::Sdk).
#[async_trait]
pub trait BrokerSdk: Send + Sync {
    /// Authenticate. A rejected login is `Ok` with `is_success == false`.
    async fn login(&mut self, credentials: &Credentials) -> FbResult<LoginResult>;

    /// Run one SDK operation, bound to `account` when the operation needs one.
    async fn invoke(&self, account: Option<&Account>, request: SdkRequest) -> FbResult<SdkValue>;

    /// Stream realtime market data for one symbol.
    async fn subscribe_market(&self, channel: StreamChannel, symbol: &str) -> FbResult<EventStream>;

    /// Stream order, fill and system callbacks for an account.
    async fn listen_account(&self, account: &Account) -> FbResult<EventStream>;

    /// Release the SDK connection and any open streams.
    async fn disconnect(&mut self) -> FbResult<()>;
}
