//! XYC CLI - batch xy plotting from CSV files.
//!
//! # Usage
//!
//! ```bash
//! # Plot to xy_graph.png
//! xyc rates.xyc
//!
//! # Plot to a chosen file with custom canvas settings
//! xyc rates.xyc rates.jpg --settings xyc.toml
//!
//! # Validate only
//! xyc rates.xyc --check
//!
//! # Inspect what would be drawn
//! xyc rates.xyc --dry-run
//! ```

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod output;

use cli::Cli;

const DEFAULT_LOG: &str = "warn,xyc=info";

fn init_tracing(cli: &Cli) {
    // Explicit verbosity flags beat RUST_LOG.
    let filter = match cli.log_directive() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG)),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

fn execute(cli: &Cli) -> Result<()> {
    if cli.check {
        commands::check::execute(cli)
    } else {
        commands::plot::execute(cli)
    }
}

/// Joins the error chain, skipping causes a parent message already ends with.
fn error_message(err: &anyhow::Error) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.ends_with(&cause) {
            message.push_str(": ");
            message.push_str(&cause);
        }
    }
    message
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("xyc: error: {}", error_message(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use xyc_core::error::{ParseError, XycError};

    #[test]
    fn test_error_message_skips_repeated_cause() {
        let err: anyhow::Error = XycError::Parse {
            source_name: "a.xyc".into(),
            error: ParseError::syntax(3, "extraneous ;"),
        }
        .into();
        assert_eq!(error_message(&err), "a.xyc: line 3: extraneous ;");
    }

    #[test]
    fn test_error_message_keeps_context_chain() {
        let err = std::fs::read_to_string("/definitely/not/here.toml")
            .context("cannot read settings file")
            .unwrap_err();
        let message = error_message(&err);
        assert!(message.starts_with("cannot read settings file: "));
    }
}
