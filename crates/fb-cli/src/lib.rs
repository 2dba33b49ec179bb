//! # fb-cli
//!
//! The `fubon` command-line tool, providing:
//!
//! - **Command tree** (`cli`) — clap derive definitions for every group
//! - **Dispatcher** (`dispatch`) — credential reload, login, account selection
//! - **Commands** (`commands`) — one handler module per group
//! - **Assistant** (`assistant`) — chat-completion client and command extraction
//! - **Welcome** (`welcome`) — text shown when no command is given

pub mod assistant;
pub mod cli;
pub mod commands;
pub mod dispatch;
pub mod welcome;

use fb_core::config::Settings;
use fb_core::error::FbResult;
use fb_core::session::SessionStore;
use fb_sdk::{GatewayConfig, GatewaySdk};
use tracing::debug;

use crate::cli::Command;
use crate::commands::Output;
use crate::dispatch::Dispatcher;

/// Run one command against the gateway-backed SDK.
pub async fn execute(command: Command) -> FbResult<Output> {
    let mut settings = Settings::load_default()?;
    let sessions = SessionStore::default_location()?;
    let gateway_url = settings.gateway_url();
    debug!("[fubon] gateway {gateway_url}");
    let sdk = GatewaySdk::new(GatewayConfig::with_url(gateway_url))?;

    let mut dispatcher = Dispatcher::new(sdk, sessions);
    let result = commands::run(command, &mut dispatcher, &mut settings).await;
    dispatcher.close().await;
    result
}
