//! Command handlers for `fubon`.
//!
//! Each submodule handles one command group. Handlers return an [`Output`];
//! `main` wraps JSON outputs and errors in the response envelope.

pub mod account;
pub mod ai;
pub mod auth;
pub mod condition;
pub mod futopt;
pub mod market;
pub mod realtime;
pub mod settings;
pub mod stock;

use std::io::Write;

use fb_core::config::Settings;
use fb_core::error::FbResult;
use fb_core::Envelope;
use fb_sdk::BrokerSdk;
use serde_json::Value;

use crate::cli::Command;
use crate::dispatch::Dispatcher;

/// What a command leaves for `main` to print.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Success payload, printed inside the envelope.
    Json(Value),
    /// A complete document printed as-is on one line.
    Raw(Value),
    /// The command already wrote its own output.
    Done,
}

impl Output {
    pub fn emit(&self, out: &mut impl Write) -> std::io::Result<()> {
        match self {
            Self::Json(data) => Envelope::ok(data.clone()).emit(out),
            Self::Raw(doc) => {
                writeln!(out, "{doc}")?;
                out.flush()
            }
            Self::Done => Ok(()),
        }
    }
}

/// Route a parsed command to its handler.
pub async fn run<S: BrokerSdk>(
    command: Command,
    dispatcher: &mut Dispatcher<S>,
    settings: &mut Settings,
) -> FbResult<Output> {
    match command {
        Command::Login(args) => auth::run(args, dispatcher).await.map(Output::Json),
        Command::Stock { cmd } => stock::run(cmd, dispatcher).await.map(Output::Json),
        Command::Account { cmd } => account::run(cmd, dispatcher).await.map(Output::Json),
        Command::Market { cmd } => market::run(cmd, dispatcher).await.map(Output::Json),
        Command::Futopt { cmd } => futopt::run(cmd, dispatcher).await.map(Output::Json),
        Command::Condition { cmd } => condition::run(cmd, dispatcher).await.map(Output::Json),
        Command::Realtime { cmd } => {
            let stdout = std::io::stdout();
            realtime::run(cmd, dispatcher, &mut stdout.lock(), realtime::shutdown_signal()).await?;
            Ok(Output::Done)
        }
        Command::Ask(args) => ai::ask(args, settings).await,
        Command::Chat => ai::chat(settings).await.map(|()| Output::Done),
        Command::Config { cmd } => settings::run(cmd, settings).map(Output::Json),
    }
}
