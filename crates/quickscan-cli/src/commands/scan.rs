//! Scan command handler.

use std::io::IsTerminal;
use std::path::Path;

use owo_colors::OwoColorize;

use quickscan_core::content::ContentKind;
use quickscan_core::crypto::{decrypt, strip_encrypted};
use quickscan_core::history::HistoryRecord;
use quickscan_core::qr;
use quickscan_core::QuickScanError;

use crate::cli::{Cli, ScanArgs};
use crate::commands::append_history;
use crate::constants::exit_codes;
use crate::helpers::{env_password, prompt_scan_password, OutputFormat};

const MAX_PASSWORD_ATTEMPTS: u32 = 3;

pub fn handle_scan(cli: &Cli, args: &ScanArgs, history: Option<&Path>) -> anyhow::Result<()> {
    let image = match image::open(&args.image) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("Error reading image {}: {}", args.image.display(), err);
            std::process::exit(exit_codes::NOT_FOUND);
        }
    };

    let scanned = match qr::decode(&image)? {
        Some(text) => text,
        None => {
            eprintln!("No QR code found in {}", args.image.display());
            std::process::exit(exit_codes::NOT_FOUND);
        }
    };

    let (content, encrypted) = match strip_encrypted(&scanned) {
        Some(payload) => match decrypt_with_retry(payload, args.no_input, cli.quiet)? {
            // Not a valid encrypted payload after all; show the raw content
            None => (scanned.clone(), false),
            Some(plaintext) => (plaintext, true),
        },
        None => (scanned.clone(), false),
    };

    let kind = ContentKind::classify(&content);

    match args.format {
        OutputFormat::Text => {
            if encrypted && !cli.quiet {
                eprintln!("{} QR code decrypted", "✓".green());
            }
            println!("{}", content);
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "content": content,
                "content_type": kind.label(),
                "encrypted": encrypted,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    append_history(history, &HistoryRecord::scanned(kind, &content, encrypted));
    Ok(())
}

/// Decrypt an encrypted payload, prompting for the password.
///
/// Interactive sessions get up to [`MAX_PASSWORD_ATTEMPTS`] tries on a wrong
/// password; a password from the environment gets exactly one. Returns
/// `Ok(None)` when the payload is malformed, so the caller can fall back to
/// treating the scanned text as plain content.
fn decrypt_with_retry(payload: &str, no_input: bool, quiet: bool) -> anyhow::Result<Option<String>> {
    let interactive = std::io::stdin().is_terminal() && !no_input;
    let from_env = env_password().is_some();

    if !quiet {
        eprintln!("Scanned content is encrypted");
    }

    let mut attempts = 0;
    loop {
        let password = prompt_scan_password(interactive)?;
        match decrypt(payload, &password) {
            Ok(plaintext) => return Ok(Some(plaintext)),
            Err(QuickScanError::MalformedPayload(_)) => return Ok(None),
            Err(QuickScanError::InvalidInput(msg)) => {
                // Empty password; re-prompt without burning an attempt
                eprintln!("{}", msg);
                if !interactive || from_env {
                    std::process::exit(exit_codes::AUTH_FAILED);
                }
            }
            Err(QuickScanError::DecryptionFailed) => {
                eprintln!("{} Invalid password or corrupted data", "✗".red());
                attempts += 1;
                if !interactive || from_env || attempts >= MAX_PASSWORD_ATTEMPTS {
                    std::process::exit(exit_codes::AUTH_FAILED);
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}
