//! Gateway transport configuration.
//!
//! Only the base URL normally changes; it comes from the settings file
//! (`gateway_url`) or `FUBON_GATEWAY_URL`.

use serde::Deserialize;

/// Configuration for [`GatewaySdk`](super::GatewaySdk).
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// HTTP base URL of the SDK host process.
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { url: default_url(), timeout_secs: default_timeout_secs() }
    }
}

impl GatewayConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }

    /// `{url}/{path}` without doubled slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// WebSocket URL for the push stream (`http` → `ws`, `https` → `wss`).
    pub fn stream_url(&self) -> anyhow::Result<url::Url> {
        let mut url = url::Url::parse(&self.endpoint("stream"))?;
        let scheme = match url.scheme() {
            "https" | "wss" => "wss",
            _ => "ws",
        };
        url.set_scheme(scheme)
            .map_err(|_| anyhow::anyhow!("cannot derive stream URL from {}", self.url))?;
        Ok(url)
    }
}

fn default_url() -> String {
    fb_core::config::DEFAULT_GATEWAY_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
