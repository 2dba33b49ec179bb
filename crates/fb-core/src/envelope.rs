//! The response envelope printed by every command.
//!
//! ```json
//! { "success": true, "data": { .. } }
//! { "success": false, "error": "Not logged in. .." }
//! ```
//!
//! `error` is present iff `success` is false; `data` is omitted when null.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::error::FbError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok(data: Value) -> Self {
        let data = if data.is_null() { None } else { Some(data) };
        Self { success: true, data, error: None }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }

    /// Two-space indented JSON, non-ASCII text left unescaped.
    pub fn render(&self) -> String {
        // Only string keys and JSON values; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Write the rendered document followed by a newline.
    pub fn emit(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "{}", self.render())?;
        out.flush()
    }
}

impl From<&FbError> for Envelope {
    fn from(e: &FbError) -> Self {
        Self::fail(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_error() {
        let env = Envelope::ok(json!({"a": 1}));
        assert_eq!(serde_json::to_value(&env).unwrap(), json!({"success": true, "data": {"a": 1}}));
    }

    #[test]
    fn null_data_is_omitted() {
        let env = Envelope::ok(Value::Null);
        assert_eq!(serde_json::to_value(&env).unwrap(), json!({"success": true}));
    }

    #[test]
    fn failure_has_error_only() {
        let env = Envelope::from(&FbError::NotAuthenticated);
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["success"], json!(false));
        assert!(v.get("data").is_none());
        assert!(v["error"].as_str().unwrap().contains("Not logged in"));
    }

    #[test]
    fn render_is_indented_and_keeps_unicode() {
        let text = Envelope::ok(json!({"name": "台積電"})).render();
        assert_eq!(text, "{\n  \"success\": true,\n  \"data\": {\n    \"name\": \"台積電\"\n  }\n}");
    }
}
