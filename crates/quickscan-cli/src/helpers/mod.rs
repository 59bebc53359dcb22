//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Password prompting (`input`)
//! - Color and output-format parsing (`parsing`)

mod input;
mod parsing;

// Re-export public API
pub use input::{env_password, prompt_encrypt_password, prompt_scan_password, PASSWORD_ENV};
pub use parsing::{format_color, parse_color, OutputFormat};
