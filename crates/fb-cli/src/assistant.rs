//! Chat-completion client and helpers for the AI commands.
//!
//! The assistant only ever *suggests* `fubon` commands. Extraction pulls
//! them out of the answer text; running them is left to the caller after
//! the user confirms.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::CommandFactory;
use fb_core::config::Settings;
use fb_core::error::{FbError, FbResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::cli::Cli;

pub const MAX_TOKENS: u32 = 2048;
pub const TEMPERATURE: f64 = 0.3;

pub const MISSING_KEY: &str =
    "AI API key not set. Run: fubon config set openai-key <KEY> or set OPENAI_API_KEY";

/// Substrings that mark a command as placing or changing orders.
const TRADING_KEYWORDS: &[&str] = &[
    "stock buy",
    "stock sell",
    "stock modify",
    "stock cancel",
    "futopt buy",
    "futopt sell",
    "futopt modify",
    "futopt cancel",
    "condition cancel",
];

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".into(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".into(), content: content.into() }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// OpenAI-compatible `/chat/completions` client.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Client configured from the settings file and environment.
    pub fn from_settings(settings: &Settings) -> FbResult<Self> {
        let api_key = settings.openai_api_key().ok_or_else(|| FbError::Ai(MISSING_KEY.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| FbError::Ai(format!("http client: {e}")))?;
        Ok(Self { http, base_url: settings.ai_base_url(), api_key, model: settings.ai_model() })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, messages: &[ChatMessage]) -> Value {
        json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        })
    }

    /// Send the conversation and return the assistant's reply text.
    pub async fn complete(&self, messages: &[ChatMessage]) -> FbResult<String> {
        self.post(messages).await.map_err(|e| FbError::Ai(format!("AI request failed: {e:#}")))
    }

    async fn post(&self, messages: &[ChatMessage]) -> Result<String> {
        debug!("[ai] {} message(s) to {}", messages.len(), self.model);
        let reply: Value = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages))
            .send()
            .await
            .context("chat request failed")?
            .error_for_status()
            .context("chat HTTP error")?
            .json()
            .await
            .context("chat reply decode failed")?;
        reply_text(&reply)
    }
}

/// `choices[0].message.content` of a completion reply.
fn reply_text(reply: &Value) -> Result<String> {
    reply
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .context("reply has no choices[0].message.content")
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// System prompt: role, rules, and the live command reference.
pub fn system_prompt() -> String {
    format!(
        "You are a trading assistant for the `fubon` command-line tool, which wraps the \
Fubon Neo brokerage SDK for Taiwan stocks, futures and options.\n\n\
Rules:\n\
- Answer in Traditional Chinese unless the user writes in another language.\n\
- When an action is needed, give the exact `fubon` command in a ```bash code block, one command per line.\n\
- Every command prints JSON; explain which fields matter.\n\
- Orders need a login first: fubon login --id <ID> --password <PW> --cert-path <PATH>.\n\
- Never invent options that are not in the reference below.\n\
- Remind the user that order commands place real orders.\n\n\
Command reference:\n{}",
        command_reference()
    )
}

/// One line per leaf command: `fubon <group> <name> <ARGS> [options]  about`.
pub fn command_reference() -> String {
    let cli = Cli::command();
    let mut lines = Vec::new();
    for group in cli.get_subcommands() {
        let mut leaves: Vec<_> = group.get_subcommands().collect();
        if leaves.is_empty() || group.get_name() == "login" {
            leaves.insert(0, group);
        }
        for leaf in leaves {
            let path = if leaf.get_name() == group.get_name() {
                format!("fubon {}", group.get_name())
            } else {
                format!("fubon {} {}", group.get_name(), leaf.get_name())
            };
            lines.push(reference_line(&path, leaf));
        }
    }
    lines.join("\n")
}

fn reference_line(path: &str, cmd: &clap::Command) -> String {
    let mut line = path.to_string();
    for arg in cmd.get_positionals() {
        line.push_str(&format!(" <{}>", arg.get_id().as_str().to_uppercase()));
    }
    let options: Vec<String> = cmd
        .get_opts()
        .filter_map(|arg| arg.get_long())
        .filter(|long| !matches!(*long, "log-level" | "log-dir"))
        .map(|long| format!("--{long}"))
        .collect();
    if !options.is_empty() {
        line.push_str(&format!(" [{}]", options.join(" ")));
    }
    if let Some(about) = cmd.get_about() {
        line.push_str(&format!("  # {about}"));
    }
    line
}

// ---------------------------------------------------------------------------
// Suggested commands
// ---------------------------------------------------------------------------

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```(?:bash|sh|shell|cmd|powershell|zsh)?\n(.*?)```").expect("static fence pattern")
});

static INLINE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(fubon [^`\n]+)`").expect("static inline pattern"));

/// `fubon ...` commands in an answer, first-seen order, no duplicates.
///
/// Fenced shell blocks are scanned line by line (a leading `$ ` prompt is
/// dropped); inline code spans are taken whole.
pub fn extract_commands(text: &str) -> Vec<String> {
    let mut commands: Vec<String> = Vec::new();
    let mut push = |cmd: &str| {
        let cmd = cmd.trim();
        if cmd.starts_with("fubon ") && !commands.iter().any(|c| c == cmd) {
            commands.push(cmd.to_string());
        }
    };

    for block in FENCED_BLOCK.captures_iter(text) {
        for line in block[1].lines() {
            push(line.trim().trim_start_matches(['$', ' ']));
        }
    }
    for span in INLINE_SPAN.captures_iter(text) {
        push(&span[1]);
    }
    commands
}

/// Whether running `cmd` could place, change or cancel an order.
pub fn is_trading_command(cmd: &str) -> bool {
    let words = cmd.split_whitespace().collect::<Vec<_>>().join(" ");
    TRADING_KEYWORDS.iter().any(|k| words.contains(k))
}

/// Split a command line into words, honouring single and double quotes
/// and backslash escapes outside single quotes.
pub fn split_command_line(line: &str) -> FbResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') => quote = None,
            (Some('\''), c) => current.push(c),
            (Some('"'), '"') => quote = None,
            (_, '\\') => match chars.next() {
                Some(next) => {
                    current.push(next);
                    in_word = true;
                }
                None => return Err(FbError::Validation(format!("trailing backslash in: {line}"))),
            },
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quote.is_some() {
        return Err(FbError::Validation(format!("unbalanced quote in: {line}")));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANSWER: &str = "查詢庫存:\n\n```bash\n$ fubon account inventory\nfubon market quote 2330\n```\n\n\
也可以用 `fubon market quote 2330` 或 `fubon stock orders`。\n\n```\necho hi\nfubon stock buy 2330 1000 --price 580\n```\n";

    #[test]
    fn extracts_blocks_then_inline_without_duplicates() {
        assert_eq!(
            extract_commands(ANSWER),
            vec![
                "fubon account inventory",
                "fubon market quote 2330",
                "fubon stock buy 2330 1000 --price 580",
                "fubon stock orders",
            ]
        );
    }

    #[test]
    fn ignores_other_programs_and_languages() {
        let text = "```python\nfubon market quote 2330\n```\n```bash\nls -l\n```";
        assert!(extract_commands(text).is_empty());
        assert!(extract_commands("no commands here").is_empty());
    }

    #[test]
    fn trading_commands_detected() {
        assert!(is_trading_command("fubon stock buy 2330 1000 --price 580"));
        assert!(is_trading_command("fubon stock modify-price A1 581"));
        assert!(is_trading_command("fubon futopt  cancel X9"));
        assert!(is_trading_command("fubon condition cancel abc-123"));
        assert!(!is_trading_command("fubon stock orders"));
        assert!(!is_trading_command("fubon condition list"));
        assert!(!is_trading_command("fubon market quote 2330"));
    }

    #[test]
    fn split_honours_quotes() {
        let words = split_command_line(r#"fubon stock batch-place '[{"symbol":"2330"}]' --account-index 1"#).unwrap();
        assert_eq!(words, vec!["fubon", "stock", "batch-place", r#"[{"symbol":"2330"}]"#, "--account-index", "1"]);
        let words = split_command_line(r#"fubon ask "what is \"TSE\"?" -x"#).unwrap();
        assert_eq!(words, vec!["fubon", "ask", r#"what is "TSE"?"#, "-x"]);
        assert_eq!(split_command_line("  a   ''  b ").unwrap(), vec!["a", "", "b"]);
    }

    #[test]
    fn split_rejects_unbalanced_quote() {
        assert!(split_command_line("fubon ask 'oops").is_err());
    }

    #[test]
    fn reply_text_reads_first_choice() {
        let reply = json!({"choices": [{"message": {"role": "assistant", "content": "hi"}}]});
        assert_eq!(reply_text(&reply).unwrap(), "hi");
        assert!(reply_text(&json!({"choices": []})).is_err());
    }

    #[test]
    fn reference_lists_leaf_commands() {
        let reference = command_reference();
        assert!(reference.contains("fubon stock buy <SYMBOL> <QUANTITY>"));
        assert!(reference.contains("fubon market candles <SYMBOL>"));
        assert!(reference.contains("fubon login ["));
        assert!(reference.contains("fubon chat"));
        assert!(!reference.contains("--log-level"));
    }

    #[test]
    fn missing_key_message() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("cfg.json"));
        if settings.openai_api_key().is_none() {
            let err = ChatClient::from_settings(&settings).err().unwrap();
            assert_eq!(err.to_string(), MISSING_KEY);
            assert_eq!(err.exit_code(), 1);
        }
    }
}
