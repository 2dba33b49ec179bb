//! # fb-core
//!
//! Core crate for the `fubon` brokerage command-line tool, providing:
//!
//! - **Values** (`value`) — the raw result shape returned by the brokerage SDK
//! - **Normalizer** (`normalize`) — SDK values to plain JSON trees
//! - **Repr parser** (`repr`) — `Name { field: value, .. }` debug text to JSON
//! - **Envelope** (`envelope`) — the `{success, data, error}` output document
//! - **Session store** (`session`) — the cached credential record on disk
//! - **Settings** (`config`) — the per-user key/value settings file
//! - **Error types** (`error`) — the `FbError` taxonomy via thiserror
//! - **Logging** (`logging`) — tracing-based logging to stderr
//! - **Types** (`types`) — SDK enum tables and order payloads

pub mod config;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod repr;
pub mod session;
pub mod types;
pub mod value;

pub use envelope::Envelope;
pub use error::{FbError, FbResult};
pub use normalize::normalize;
pub use repr::parse_repr;
pub use value::SdkValue;
