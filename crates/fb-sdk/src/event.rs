//! Push events delivered by the SDK's streaming channels.
//!
//! Market subscriptions produce [`SdkEvent::Message`]; account listeners
//! produce the order / fill / system callbacks. Each event renders to one
//! JSON line via [`SdkEvent::to_line`].

use fb_core::{SdkValue, normalize};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One inbound push event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SdkEvent {
    /// Market data message. Text payloads are already JSON documents.
    Message { data: SdkValue },

    /// New order report.
    Order { code: String, data: SdkValue },

    /// Order modification or cancellation report.
    OrderChanged { code: String, data: SdkValue },

    /// Fill report.
    Filled { code: String, data: SdkValue },

    /// Connection or session notice from the SDK.
    SystemEvent { code: String, data: SdkValue },

    /// Stream-level error.
    Error { message: String },
}

impl SdkEvent {
    /// Render as a single output line.
    pub fn to_line(&self) -> String {
        let callback = |name: &str, code: &str, data: &SdkValue| {
            json!({"event": name, "code": code, "data": normalize(data)}).to_string()
        };
        match self {
            Self::Message { data: SdkValue::Str(text) } => text.clone(),
            Self::Message { data } => normalize(data).to_string(),
            Self::Order { code, data } => callback("order", code, data),
            Self::OrderChanged { code, data } => callback("order_changed", code, data),
            Self::Filled { code, data } => callback("filled", code, data),
            Self::SystemEvent { code, data } => callback("system_event", code, data),
            Self::Error { message } => json!({"event": "error", "message": message}).to_string(),
        }
    }
}

/// Sender half of an event stream.
pub type SdkEventSender = mpsc::UnboundedSender<SdkEvent>;

/// Events from one push channel, in arrival order.
///
/// Ends when the channel closes. Dropping the stream stops the reader task.
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<SdkEvent>,
    task: Option<JoinHandle<()>>,
}

impl EventStream {
    /// A stream fed by a background reader task.
    pub fn new(rx: mpsc::UnboundedReceiver<SdkEvent>, task: JoinHandle<()>) -> Self {
        Self { rx, task: Some(task) }
    }

    /// A stream fed directly through `tx`.
    pub fn channel() -> (SdkEventSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx, task: None })
    }

    /// Next event, `None` once the channel has closed.
    pub async fn next(&mut self) -> Option<SdkEvent> {
        self.rx.recv().await
    }

    /// Stop the reader task.
    pub fn close(&mut self) {
        self.rx.close();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_frames_decode_and_render() {
        let ev: SdkEvent = serde_json::from_str(
            r#"{"event":"filled","code":"0","data":{"$repr":"FilledData { order_no: \"x1\", filled_qty: 1000 }"}}"#,
        )
        .unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&ev.to_line()).unwrap(),
            json!({"event": "filled", "code": "0", "data": {"order_no": "x1", "filled_qty": 1000}})
        );
    }

    #[test]
    fn text_messages_print_verbatim() {
        let ev: SdkEvent =
            serde_json::from_str(r#"{"event":"message","data":"{\"event\":\"data\",\"symbol\":\"2330\"}"}"#).unwrap();
        assert_eq!(ev.to_line(), r#"{"event":"data","symbol":"2330"}"#);
    }

    #[test]
    fn structured_messages_print_compact() {
        let ev: SdkEvent = serde_json::from_str(r#"{"event":"message","data":{"price":580}}"#).unwrap();
        assert_eq!(ev.to_line(), r#"{"price":580}"#);
    }

    #[test]
    fn error_line() {
        let ev = SdkEvent::Error { message: "socket closed".into() };
        assert_eq!(ev.to_line(), r#"{"event":"error","message":"socket closed"}"#);
    }

    #[tokio::test]
    async fn channel_stream_ends_when_sender_drops() {
        let (tx, mut stream) = EventStream::channel();
        tx.send(SdkEvent::Error { message: "x".into() }).unwrap();
        drop(tx);
        assert!(stream.next().await.is_some());
        assert!(stream.next().await.is_none());
    }
}
