//! Container entrypoint: seed the public volume, then supervise the server.
//!
//! Invoked as `entrypoint <command> [args...]`. Startup is strictly
//! ordered: validate the command and layout, seed `/app/public` from
//! `/app/public-default` (once, non-destructively), then spawn the command
//! and forward SIGINT/SIGTERM to it until it exits. The entrypoint's exit
//! code is the child's own, or 1 for any startup failure or a
//! signal-killed child.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use entrypoint::core::command::split_command;
use entrypoint::core::layout::{SITE_ROOT, SiteLayout};
use entrypoint::exit_codes;
use entrypoint::io::seed::{SeedOutcome, seed_public_dir};
use entrypoint::io::supervise::{ChildOutcome, os_signals, signal_name, supervise};
use entrypoint::logging;

#[derive(Parser)]
#[command(
    name = "entrypoint",
    version,
    about = "Seed the public volume and supervise the site server command"
)]
struct Cli {
    /// Command (and its arguments) to run after volume seeding.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    command: Vec<String>,
}

#[tokio::main]
async fn main() {
    logging::init();
    match run().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(exit_codes::FAILURE);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let (cmd, args) = split_command(&cli.command)?;

    let layout = SiteLayout::new(SITE_ROOT);
    layout.ensure_confined()?;
    match seed_public_dir(&layout)? {
        SeedOutcome::Populated { files } => {
            info!(files, public_dir = %layout.public_dir.display(), "seeded public directory from defaults");
        }
        SeedOutcome::AlreadyPopulated => {
            debug!("public directory already populated");
        }
    }

    let signals = os_signals()?;
    let outcome = supervise(cmd, args, signals).await?;
    if let ChildOutcome::Signaled(signo) = outcome {
        eprintln!("process killed with signal {}", signal_name(signo));
    }
    Ok(outcome.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_command_with_arguments() {
        let cli = Cli::parse_from(["entrypoint", "node", "server.mjs", "--port", "3000"]);
        assert_eq!(cli.command, ["node", "server.mjs", "--port", "3000"]);
    }

    #[test]
    fn parse_requires_a_command() {
        assert!(Cli::try_parse_from(["entrypoint"]).is_err());
    }

    #[test]
    fn parse_keeps_hyphenated_arguments_for_the_child() {
        let cli = Cli::parse_from(["entrypoint", "sh", "-c", "exit 0"]);
        assert_eq!(cli.command, ["sh", "-c", "exit 0"]);
    }
}
