//! QuickScan CLI - generate and scan QR codes with optional password-protected content.
//!
//! This is the command-line shell around the `quickscan-core` library: it
//! collects input, invokes the payload codec and QR wrappers, and records
//! operations in the history log.

mod cli;
mod commands;
mod config;
mod constants;
mod helpers;

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use crate::cli::{Cli, Commands};
use crate::config::{default_history_path, load_config, QuickScanConfig};

fn main() {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Warning: {}", err);
            QuickScanConfig::default()
        }
    };

    let history_path = resolve_history_path(&cli, &config);

    let result = match &cli.command {
        Commands::Generate(args) => {
            commands::generate::handle_generate(&cli, args, &config, history_path.as_deref())
        }
        Commands::Scan(args) => commands::scan::handle_scan(&cli, args, history_path.as_deref()),
        Commands::History => commands::history::handle_history(history_path.as_deref()),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

/// Resolve the history log location: flag/env > config > XDG data dir.
///
/// Returns `None` when history is disabled or no location can be resolved;
/// history is best-effort and must never fail a command.
fn resolve_history_path(cli: &Cli, config: &QuickScanConfig) -> Option<PathBuf> {
    if cli.no_history {
        return None;
    }
    if let Some(path) = &cli.history {
        return Some(path.clone());
    }
    if let Some(path) = &config.history.path {
        return Some(PathBuf::from(path));
    }
    match default_history_path() {
        Ok(path) => Some(path),
        Err(err) => {
            eprintln!("Warning: history disabled: {}", err);
            None
        }
    }
}
