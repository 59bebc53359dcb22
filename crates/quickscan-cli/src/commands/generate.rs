//! Generate command handler.

use std::io::IsTerminal;
use std::path::Path;

use owo_colors::OwoColorize;

use quickscan_core::content::{normalize_url, ContentKind};
use quickscan_core::crypto::{encrypt, wrap_encrypted};
use quickscan_core::history::HistoryRecord;
use quickscan_core::qr::{self, QrOptions};
use quickscan_core::QuickScanError;

use crate::cli::{Cli, GenerateArgs};
use crate::commands::append_history;
use crate::config::QuickScanConfig;
use crate::constants::exit_codes;
use crate::helpers::{format_color, parse_color, prompt_encrypt_password};

const DEFAULT_SIZE: u32 = 300;
const DEFAULT_FOREGROUND: &str = "#000000";
const DEFAULT_BACKGROUND: &str = "#FFFFFF";

pub fn handle_generate(
    cli: &Cli,
    args: &GenerateArgs,
    config: &QuickScanConfig,
    history: Option<&Path>,
) -> anyhow::Result<()> {
    let mut content = args.content.trim().to_string();
    if content.is_empty() {
        eprintln!("Please provide content to encode");
        std::process::exit(exit_codes::INVALID_INPUT);
    }
    if args.url {
        content = normalize_url(&content);
    }
    let kind = ContentKind::classify(&content);

    // Encryption handling
    let mut text = content.clone();
    let mut encrypted = false;
    if args.encrypt {
        let interactive = std::io::stdin().is_terminal() && !args.no_input;
        let password = prompt_encrypt_password(interactive)?;
        let payload = match encrypt(&content, &password) {
            Ok(payload) => payload,
            Err(QuickScanError::InvalidInput(msg)) => {
                eprintln!("{}", msg);
                std::process::exit(exit_codes::INVALID_INPUT);
            }
            Err(err) => return Err(err.into()),
        };
        text = wrap_encrypted(&payload);
        encrypted = true;
        if !cli.quiet {
            eprintln!("{} Content encrypted", "✓".green());
        }
    }

    let foreground = resolve_color(args.fg.as_deref(), config.qr.foreground.as_deref(), DEFAULT_FOREGROUND);
    let background = resolve_color(args.bg.as_deref(), config.qr.background.as_deref(), DEFAULT_BACKGROUND);
    let opts = QrOptions {
        size: args.size.or(config.qr.size).unwrap_or(DEFAULT_SIZE),
        ec_level: args.ec_level.into(),
        foreground,
        background,
    };

    let image = qr::encode(&text, &opts)?;
    qr::save_png(&image, &args.out)?;

    append_history(
        history,
        &HistoryRecord::generated(
            kind,
            &content,
            encrypted,
            &format_color(foreground),
            &format_color(background),
            &args.out,
        ),
    );

    if !cli.quiet {
        eprintln!("{} QR code saved to {}", "✓".green(), args.out.display());
    }
    Ok(())
}

fn resolve_color(flag: Option<&str>, config: Option<&str>, default: &str) -> [u8; 3] {
    let value = flag.or(config).unwrap_or(default);
    match parse_color(value) {
        Ok(rgb) => rgb,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(exit_codes::INVALID_INPUT);
        }
    }
}
