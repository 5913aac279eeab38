//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use serde::Serialize;

use super::output::{Output, OutputFormat};
use crate::exec::{Runner, DEFAULT_SHELL};
use crate::parser;
use crate::storage::{self, Config};

#[derive(Parser)]
#[command(name = "doit")]
#[command(author, version, about = "A minimal makefile-style task runner")]
pub struct Cli {
    /// Rule file to interpret
    #[arg(default_value = "doit")]
    pub file: PathBuf,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Interpreter used to run rule commands
    #[arg(long)]
    pub shell: Option<PathBuf>,

    /// Print the commands that would run without running anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Continue with remaining rules after a rule fails
    #[arg(long, short = 'k')]
    pub keep_going: bool,
}

/// Per-rule result emitted in JSON mode
#[derive(Serialize)]
struct RuleReport<'a> {
    target: &'a str,
    command: &'a str,
    ran: bool,
    exit_status: Option<i32>,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let format = cli.format.unwrap_or(match config.default_format {
        storage::OutputFormat::Text => OutputFormat::Text,
        storage::OutputFormat::Json => OutputFormat::Json,
    });
    let output = Output::new(format, cli.verbose);

    let shell = cli
        .shell
        .or(config.shell)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SHELL));

    output.verbose(&format!("reading rules from {}", cli.file.display()));

    // Parse the whole file up front: a malformed file aborts the run
    // before any command executes.
    let mut rules = parser::read_rules(&cli.file)?;
    output.verbose(&format!("parsed {} rule(s)", rules.len()));
    for rule in &rules {
        output.verbose(&rule.to_string());
    }

    let runner = Runner::new(shell);
    let mut failed = 0usize;

    for rule in rules.iter_mut() {
        if !runner.needs_run(rule) {
            output.verbose(&format!("{}: up to date", rule.target()));
            output.data(&RuleReport {
                target: rule.target(),
                command: rule.command(),
                ran: false,
                exit_status: None,
            });
            continue;
        }

        output.line(rule.command());

        if cli.dry_run {
            output.data(&RuleReport {
                target: rule.target(),
                command: rule.command(),
                ran: false,
                exit_status: None,
            });
            continue;
        }

        match runner.run(rule) {
            Ok(code) => {
                output.data(&RuleReport {
                    target: rule.target(),
                    command: rule.command(),
                    ran: true,
                    exit_status: rule.exit_status(),
                });
                if code != 0 {
                    failed += 1;
                    output.error(&format!(
                        "rule '{}' exited with status {}",
                        rule.target(),
                        code
                    ));
                    if !cli.keep_going {
                        break;
                    }
                }
            }
            Err(e) => {
                failed += 1;
                output.error(&format!("rule '{}': {}", rule.target(), e));
                if !cli.keep_going {
                    break;
                }
            }
        }
    }

    if failed > 0 {
        bail!("{} rule(s) failed", failed);
    }

    Ok(())
}
