//! # fubon
//!
//! Command-line entry point. Parses the command, runs it, and prints the
//! result envelope on stdout.
//!
//! # Usage
//!
//! ```bash
//! fubon login --id A123456789 --password **** --cert-path ./cert.pfx
//! fubon stock orders --log-level info
//! ```

use std::process::ExitCode;

use clap::Parser;
use fb_cli::cli::Cli;
use fb_cli::welcome::welcome;
use fb_core::Envelope;
use fb_core::logging::init_logging;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1. Logging to stderr; stdout is reserved for JSON
    init_logging(&cli.log_level, cli.log_dir.as_deref(), "fubon");

    let Some(command) = cli.command else {
        println!("{}", welcome());
        return ExitCode::SUCCESS;
    };

    // 2. Run and print
    let result = fb_cli::execute(command).await;
    let mut stdout = std::io::stdout().lock();
    match result {
        Ok(output) => {
            if let Err(e) = output.emit(&mut stdout) {
                error!("failed to write output: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("command failed: {e}");
            if let Err(io) = Envelope::from(&e).emit(&mut stdout) {
                error!("failed to write output: {io}");
            }
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
