//! Color and output-format parsing.

use clap::ValueEnum;

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parse a `#RRGGBB` (or `RRGGBB`) hex color into RGB bytes.
pub fn parse_color(input: &str) -> anyhow::Result<[u8; 3]> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(anyhow::anyhow!(
            "Invalid color '{}': expected #RRGGBB",
            input
        ));
    }
    let r = u8::from_str_radix(&hex[0..2], 16)?;
    let g = u8::from_str_radix(&hex[2..4], 16)?;
    let b = u8::from_str_radix(&hex[4..6], 16)?;
    Ok([r, g, b])
}

/// Format RGB bytes back into `#RRGGBB`, as written to the history log.
pub fn format_color(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}
