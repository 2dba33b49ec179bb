//! `fubon ask` and `fubon chat`.

use dialoguer::Input;
use fb_core::config::Settings;
use fb_core::error::{FbError, FbResult};
use serde_json::{Value, json};
use tracing::{info, warn};

use super::Output;
use crate::assistant::{self, ChatClient, ChatMessage};
use crate::cli::AskArgs;

const EXIT_WORDS: &[&str] = &["exit", "quit", "q", "bye"];

pub async fn ask(args: AskArgs, settings: &mut Settings) -> FbResult<Output> {
    let client = ChatClient::from_settings(settings)?;
    let messages = [ChatMessage::system(assistant::system_prompt()), ChatMessage::user(args.question.as_str())];

    if !args.json_output {
        eprintln!("thinking...");
    }
    let answer = client.complete(&messages).await?;
    let suggested = assistant::extract_commands(&answer);

    if args.json_output {
        return Ok(Output::Raw(json!({
            "success": true,
            "question": args.question,
            "answer": answer,
            "suggested_commands": suggested,
        })));
    }

    print_answer(&answer);
    if args.execute {
        offer_to_run(&suggested).await?;
    } else if !suggested.is_empty() {
        println!("\n(run with --execute to be offered these {} command(s))", suggested.len());
    }
    Ok(Output::Done)
}

pub async fn chat(settings: &mut Settings) -> FbResult<()> {
    let client = ChatClient::from_settings(settings)?;
    println!("fubon AI chat ({})", client.model());
    println!("Type a question. /run runs the last suggestions, /clear resets, exit leaves.\n");

    let system = ChatMessage::system(assistant::system_prompt());
    let mut history = vec![system.clone()];
    let mut last_suggested: Vec<String> = Vec::new();

    loop {
        let line = match Input::<String>::new().with_prompt("you").allow_empty(true).interact_text() {
            Ok(line) => line,
            Err(e) => {
                info!("[ai] input closed: {e}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&line.to_lowercase().as_str()) {
            break;
        }
        match line {
            "/clear" => {
                history = vec![system.clone()];
                last_suggested.clear();
                println!("history cleared");
                continue;
            }
            "/run" => {
                if last_suggested.is_empty() {
                    println!("no suggested commands yet");
                } else {
                    offer_to_run(&last_suggested).await?;
                }
                continue;
            }
            _ => {}
        }

        history.push(ChatMessage::user(line));
        match client.complete(&history).await {
            Ok(answer) => {
                print_answer(&answer);
                last_suggested = assistant::extract_commands(&answer);
                if !last_suggested.is_empty() {
                    println!("\n({} suggested command(s); type /run to execute)", last_suggested.len());
                }
                history.push(ChatMessage::assistant(answer));
            }
            Err(e) => {
                warn!("[ai] chat turn failed: {e}");
                println!("error: {e}");
                history.pop();
            }
        }
    }
    println!("bye");
    Ok(())
}

// ---------------------------------------------------------------------------
// Running suggestions
// ---------------------------------------------------------------------------

/// Ask about each command in turn and run the confirmed ones.
async fn offer_to_run(commands: &[String]) -> FbResult<()> {
    for cmd in commands {
        println!("\n  {cmd}");
        if !confirm(cmd)? {
            println!("skipped");
            continue;
        }
        let output = run_suggested(cmd).await?;
        println!("{output}");
    }
    Ok(())
}

/// Order-changing commands need a typed `yes`; others accept `y`.
fn confirm(cmd: &str) -> FbResult<bool> {
    let trading = assistant::is_trading_command(cmd);
    let prompt = if trading {
        "This places or changes a REAL order. Type 'yes' to run"
    } else {
        "Run this command? [y/N]"
    };
    let answer = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| FbError::Ai(format!("confirmation prompt failed: {e}")))?;
    Ok(accepts(trading, &answer))
}

fn accepts(trading: bool, answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    if trading { answer == "yes" } else { matches!(answer.as_str(), "y" | "yes") }
}

/// Re-run this executable with the command's arguments; JSON output is
/// pretty-printed.
async fn run_suggested(cmd: &str) -> FbResult<String> {
    let words = assistant::split_command_line(cmd)?;
    let exe = std::env::current_exe()?;
    info!("[ai] running: {cmd}");
    let output = tokio::process::Command::new(exe).args(words.iter().skip(1)).output().await?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let text = if stdout.trim().is_empty() { String::from_utf8_lossy(&output.stderr) } else { stdout };
    Ok(pretty(text.trim()))
}

fn pretty(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| text.to_string())
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

fn print_answer(answer: &str) {
    println!("\n{}\n", render_answer(answer));
}

/// Plain-terminal layout: code blocks indented between rules, headings
/// de-hashed.
fn render_answer(answer: &str) -> String {
    let rule = "-".repeat(40);
    let mut in_code = false;
    let mut out = Vec::new();
    for line in answer.lines() {
        if line.trim_start().starts_with("```") {
            in_code = !in_code;
            out.push(rule.clone());
        } else if in_code {
            out.push(format!("    {line}"));
        } else if let Some(heading) = line.strip_prefix('#') {
            out.push(heading.trim_start_matches('#').trim().to_string());
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}
