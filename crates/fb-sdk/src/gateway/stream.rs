//! Push stream over the gateway WebSocket.
//!
//! One connection per stream:
//! 1. Connect to `ws(s)://…/stream`.
//! 2. Send the subscription frame.
//! 3. Forward each text frame as an [`SdkEvent`] until the socket closes.
//!
//! No reconnect. A read error is delivered as [`SdkEvent::Error`] and ends
//! the stream.

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::event::{EventStream, SdkEvent, SdkEventSender};

/// Connect, subscribe, and start the reader task.
pub(crate) async fn open(url: url::Url, subscription: String) -> Result<EventStream> {
    info!("[gateway-ws] connecting to {url}");
    let (ws_stream, _) = tokio_tungstenite::connect_async(url.as_str())
        .await
        .context("stream connect failed")?;
    let (mut ws_write, mut ws_read) = ws_stream.split();

    ws_write
        .send(Message::Text(subscription.into()))
        .await
        .context("subscription send failed")?;
    debug!("[gateway-ws] subscribed");

    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move {
        loop {
            match ws_read.next().await {
                Some(Ok(Message::Text(text))) => {
                    if !forward(&tx, &text) {
                        break;
                    }
                }
                Some(Ok(Message::Ping(data))) => {
                    let _ = ws_write.send(Message::Pong(data)).await;
                }
                Some(Ok(Message::Close(_))) => {
                    info!("[gateway-ws] received close frame");
                    break;
                }
                Some(Err(e)) => {
                    warn!("[gateway-ws] read error: {e}");
                    let _ = tx.send(SdkEvent::Error { message: e.to_string() });
                    break;
                }
                None => {
                    debug!("[gateway-ws] stream ended");
                    break;
                }
                _ => {} // Binary, Pong, Frame
            }
        }
        let _ = ws_write.close().await;
    });

    Ok(EventStream::new(rx, task))
}

/// Decode one frame and pass it on. Returns `false` once the consumer is gone.
fn forward(tx: &SdkEventSender, text: &str) -> bool {
    let event = serde_json::from_str::<SdkEvent>(text).unwrap_or_else(|e| {
        warn!("[gateway-ws] undecodable frame ({e}): {text}");
        SdkEvent::Error { message: format!("undecodable frame: {e}") }
    });
    tx.send(event).is_ok()
}
