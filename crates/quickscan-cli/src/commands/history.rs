//! History command handler.

use std::path::Path;

pub fn handle_history(history: Option<&Path>) -> anyhow::Result<()> {
    match history {
        Some(path) if path.exists() => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read history {}: {}", path.display(), e))?;
            print!("{}", contents);
        }
        Some(path) => {
            println!("No history recorded yet ({})", path.display());
        }
        None => {
            println!("History is disabled");
        }
    }
    Ok(())
}
