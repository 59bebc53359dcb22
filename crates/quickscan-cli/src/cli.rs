//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use quickscan_core::qr::ErrorCorrection;
use quickscan_core::VERSION;

use crate::helpers::OutputFormat;

/// QuickScan - generate and scan QR codes with optional password protection
#[derive(Parser)]
#[command(name = "quickscan")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the history log file
    #[arg(long, global = true, env = "QUICKSCAN_HISTORY")]
    pub history: Option<PathBuf>,

    /// Disable history logging
    #[arg(long, global = true)]
    pub no_history: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a QR code image from text or a URL
    Generate(GenerateArgs),

    /// Scan a QR code from an image file
    Scan(ScanArgs),

    /// Show the history log
    History,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Content to encode
    #[arg(value_name = "CONTENT")]
    pub content: String,

    /// Treat content as a URL (http:// is added when no scheme is given)
    #[arg(long)]
    pub url: bool,

    /// Password-protect the content
    #[arg(long)]
    pub encrypt: bool,

    /// Output PNG path
    #[arg(short, long, default_value = "qr.png")]
    pub out: PathBuf,

    /// Minimum symbol size in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Module color (#RRGGBB)
    #[arg(long)]
    pub fg: Option<String>,

    /// Background color (#RRGGBB)
    #[arg(long)]
    pub bg: Option<String>,

    /// Error-correction level
    #[arg(long, value_enum, default_value_t = EcLevelArg::M)]
    pub ec_level: EcLevelArg,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Image file to scan
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// QR error-correction level argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EcLevelArg {
    L,
    M,
    Q,
    H,
}

impl From<EcLevelArg> for ErrorCorrection {
    fn from(level: EcLevelArg) -> Self {
        match level {
            EcLevelArg::L => ErrorCorrection::Low,
            EcLevelArg::M => ErrorCorrection::Medium,
            EcLevelArg::Q => ErrorCorrection::Quartile,
            EcLevelArg::H => ErrorCorrection::High,
        }
    }
}
