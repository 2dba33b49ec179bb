//! `fubon config ...`: the local settings file.

use fb_core::config::{Settings, display_value, resolve_key};
use fb_core::error::FbResult;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::cli::ConfigCmd;

pub fn run(cmd: ConfigCmd, settings: &mut Settings) -> FbResult<Value> {
    match cmd {
        ConfigCmd::Set { key, value } => {
            let stored = settings.set(&key, &value)?;
            info!("[config] {stored} updated in {}", settings.path().display());
            Ok(json!({"key": stored, "value": display_value(stored, &Value::String(value))}))
        }
        ConfigCmd::Get { key } => {
            let stored = resolve_key(&key).unwrap_or(key.as_str());
            let value = settings.get(stored).map(|v| Value::String(display_value(stored, v)));
            Ok(json!({"key": stored, "value": value}))
        }
        ConfigCmd::Show => {
            let shown: Map<String, Value> = settings
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(display_value(k, v))))
                .collect();
            Ok(Value::Object(shown))
        }
    }
}
