//! Per-user settings file.
//!
//! A flat JSON object at `~/.fubon-cli-config.json`. Known keys:
//!
//! | Key              | Default                      | Env override                      |
//! |------------------|------------------------------|-----------------------------------|
//! | `openai_api_key` | none                         | `OPENAI_API_KEY`, `FUBON_AI_KEY`  |
//! | `ai_model`       | `gpt-4o-mini`                |                                   |
//! | `ai_base_url`    | `https://api.openai.com/v1`  |                                   |
//! | `gateway_url`    | `http://127.0.0.1:8765`      | `FUBON_GATEWAY_URL`               |
//!
//! Unknown keys are preserved when the file is rewritten.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{FbError, FbResult};
use crate::session::{home_file, write_private};

pub const CONFIG_FILE_NAME: &str = ".fubon-cli-config.json";

pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8765";

/// CLI spelling → stored key.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("openai-key", "openai_api_key"),
    ("ai-key", "openai_api_key"),
    ("ai-model", "ai_model"),
    ("model", "ai_model"),
    ("ai-base-url", "ai_base_url"),
    ("gateway-url", "gateway_url"),
    ("gateway", "gateway_url"),
];

/// Map a CLI key (alias or stored name) to the stored key.
pub fn resolve_key(name: &str) -> Option<&'static str> {
    KEY_ALIASES
        .iter()
        .find(|(alias, key)| *alias == name || *key == name)
        .map(|(_, key)| *key)
}

/// Aliases accepted by `config set`, for error messages.
pub fn valid_keys() -> Vec<&'static str> {
    KEY_ALIASES.iter().map(|(alias, _)| *alias).collect()
}

/// Display form of a setting; secrets keep their first 8 characters.
pub fn display_value(key: &str, value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if key.contains("key") && text.chars().count() > 8 {
        let head: String = text.chars().take(8).collect();
        format!("{head}...")
    } else {
        text
    }
}

/// In-memory copy of the settings file.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    path: PathBuf,
    values: Map<String, Value>,
}

impl Settings {
    /// Settings at `~/.fubon-cli-config.json`.
    pub fn load_default() -> FbResult<Self> {
        Ok(Self::load(home_file(CONFIG_FILE_NAME)?))
    }

    /// Read the settings file. A missing or unreadable file yields empty
    /// settings.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    warn!("ignoring unreadable settings file {}: {e}", path.display());
                    Map::new()
                }
            },
            Err(_) => Map::new(),
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// Set a key by CLI name and persist immediately.
    pub fn set(&mut self, name: &str, value: &str) -> FbResult<&'static str> {
        let key = resolve_key(name).ok_or_else(|| {
            FbError::Config(format!(
                "Unknown config key: {name}. Valid keys: {}",
                valid_keys().join(", ")
            ))
        })?;
        self.values.insert(key.to_string(), Value::String(value.to_string()));
        self.save()?;
        Ok(key)
    }

    pub fn save(&self) -> FbResult<()> {
        let body = serde_json::to_vec_pretty(&self.values)?;
        write_private(&self.path, &body)?;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // -----------------------------------------------------------------------
    // Resolved values
    // -----------------------------------------------------------------------

    /// Stored key, then `OPENAI_API_KEY`, then `FUBON_AI_KEY`.
    pub fn openai_api_key(&self) -> Option<String> {
        self.get_str("openai_api_key")
            .map(str::to_string)
            .or_else(|| env_nonempty("OPENAI_API_KEY"))
            .or_else(|| env_nonempty("FUBON_AI_KEY"))
    }

    pub fn ai_model(&self) -> String {
        self.get_str("ai_model").unwrap_or(DEFAULT_AI_MODEL).to_string()
    }

    pub fn ai_base_url(&self) -> String {
        self.get_str("ai_base_url").unwrap_or(DEFAULT_AI_BASE_URL).trim_end_matches('/').to_string()
    }

    /// `FUBON_GATEWAY_URL` wins over the stored value.
    pub fn gateway_url(&self) -> String {
        env_nonempty("FUBON_GATEWAY_URL")
            .or_else(|| self.get_str("gateway_url").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string())
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve() {
        assert_eq!(resolve_key("openai-key"), Some("openai_api_key"));
        assert_eq!(resolve_key("ai-key"), Some("openai_api_key"));
        assert_eq!(resolve_key("model"), Some("ai_model"));
        assert_eq!(resolve_key("ai_model"), Some("ai_model"));
        assert_eq!(resolve_key("gateway"), Some("gateway_url"));
        assert_eq!(resolve_key("colour"), None);
    }

    #[test]
    fn secrets_are_masked() {
        assert_eq!(display_value("openai_api_key", &Value::from("sk-abcdefghijkl")), "sk-abcde...");
        assert_eq!(display_value("openai_api_key", &Value::from("short")), "short");
        assert_eq!(display_value("ai_model", &Value::from("gpt-4o-mini-long-name")), "gpt-4o-mini-long-name");
    }

    #[test]
    fn set_persists_and_preserves_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let mut settings = Settings::load(&path);
        assert_eq!(settings.set("model", "gpt-4o").unwrap(), "ai_model");

        let reloaded = Settings::load(&path);
        assert_eq!(reloaded.ai_model(), "gpt-4o");
        assert_eq!(reloaded.get_str("theme"), Some("dark"));
        let keys: Vec<&String> = reloaded.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["theme", "ai_model"]);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::load(dir.path().join(CONFIG_FILE_NAME));
        let err = settings.set("colour", "red").unwrap_err();
        assert!(err.to_string().contains("Valid keys"));
    }

    #[test]
    fn defaults_apply_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("absent.json"));
        assert!(settings.is_empty());
        assert_eq!(settings.ai_model(), DEFAULT_AI_MODEL);
        assert_eq!(settings.ai_base_url(), DEFAULT_AI_BASE_URL);
    }

    #[test]
    fn garbage_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not json").unwrap();
        assert!(Settings::load(&path).is_empty());
    }
}
