//! `fubon realtime ...`: long-running streams, one JSON line per event.
//!
//! Runs until the stream closes or the process receives SIGINT / SIGTERM;
//! both end with exit status 0.

use std::future::Future;
use std::io::Write;

use fb_core::error::FbResult;
use fb_sdk::{BrokerSdk, EventStream};
use serde_json::json;
use tracing::{info, warn};

use crate::cli::RealtimeCmd;
use crate::dispatch::Dispatcher;

pub async fn run<S, W, F>(cmd: RealtimeCmd, d: &mut Dispatcher<S>, out: &mut W, shutdown: F) -> FbResult<()>
where
    S: BrokerSdk,
    W: Write,
    F: Future<Output = ()>,
{
    let mut stream = match cmd {
        RealtimeCmd::Subscribe { symbol, channel } => {
            d.authenticate().await?;
            let stream = d.sdk().subscribe_market(channel, &symbol).await?;
            info!("[realtime] subscribed {symbol} ({channel})");
            stream
        }
        RealtimeCmd::Callbacks { account } => {
            let acc = d.account(account.account_index).await?;
            let stream = d.sdk().listen_account(&acc).await?;
            let listening = json!({
                "event": "listening",
                "message": "Waiting for callbacks... Press Ctrl+C to stop.",
            });
            write_line(out, &listening.to_string())?;
            stream
        }
    };

    pump(&mut stream, out, shutdown).await?;
    stream.close();
    Ok(())
}

/// Copy events to `out` until the stream ends or `shutdown` resolves.
pub async fn pump<W, F>(stream: &mut EventStream, out: &mut W, shutdown: F) -> FbResult<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("[realtime] shutdown signal received");
                break;
            }
            event = stream.next() => match event {
                Some(event) => write_line(out, &event.to_line())?,
                None => {
                    info!("[realtime] stream closed");
                    break;
                }
            },
        }
    }
    Ok(())
}

fn write_line(out: &mut impl Write, line: &str) -> FbResult<()> {
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                warn!("[realtime] SIGTERM handler unavailable: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
