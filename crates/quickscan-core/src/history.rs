//! Append-only history log of generate and scan operations.
//!
//! The log is a plain text file with a fixed header and one formatted line
//! per operation. It is an explicitly constructed collaborator: the caller
//! creates a [`HistoryLog`] once at startup and passes it where needed.
//! Append failures are reported to the caller, who is expected to log them
//! locally and carry on; history is never allowed to fail an operation.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::content::ContentKind;
use crate::error::Result;

/// Default history file name.
pub const HISTORY_FILE_NAME: &str = "quickscan_history.txt";

/// Maximum content length recorded per entry; longer content is truncated.
const CONTENT_PREVIEW_MAX: usize = 50;

const HEADER: &str = "QUICKSCAN QR HISTORY\n\
                      ===================\n\
                      Format: [Action] Type: Content Type | Content | Foreground | Background | Saved File | Date\n\n";

/// Operation recorded in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Generated,
    Scanned,
    /// Scanned content that was encrypted and successfully decrypted.
    ScannedDecrypted,
}

impl HistoryAction {
    fn label(&self) -> &'static str {
        match self {
            HistoryAction::Generated => "Generated",
            HistoryAction::Scanned => "Scanned",
            HistoryAction::ScannedDecrypted => "Scanned (Decrypted)",
        }
    }
}

/// A single history record.
///
/// Color and file fields only apply to generated codes; scans leave them
/// unset.
#[derive(Debug, Clone)]
pub struct HistoryRecord {
    pub action: HistoryAction,
    pub content_kind: ContentKind,
    pub content: String,
    pub encrypted: bool,
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub saved_file: Option<PathBuf>,
}

impl HistoryRecord {
    /// Record for a generated QR code.
    pub fn generated(
        content_kind: ContentKind,
        content: &str,
        encrypted: bool,
        foreground: &str,
        background: &str,
        saved_file: &Path,
    ) -> Self {
        Self {
            action: HistoryAction::Generated,
            content_kind,
            content: content.to_string(),
            encrypted,
            foreground: Some(foreground.to_string()),
            background: Some(background.to_string()),
            saved_file: Some(saved_file.to_path_buf()),
        }
    }

    /// Record for a scanned QR code.
    pub fn scanned(content_kind: ContentKind, content: &str, encrypted: bool) -> Self {
        Self {
            action: if encrypted {
                HistoryAction::ScannedDecrypted
            } else {
                HistoryAction::Scanned
            },
            content_kind,
            content: content.to_string(),
            encrypted,
            foreground: None,
            background: None,
            saved_file: None,
        }
    }
}

/// Append-only history log backed by a text file.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// Open the history log at `path`, creating the file (with its header)
    /// and any missing parent directories on first use.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, HEADER)?;
        }
        Ok(Self { path })
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record to the log.
    pub fn append(&self, record: &HistoryRecord) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M");
        let encrypted_indicator = if record.encrypted { " (Encrypted)" } else { "" };

        let line = format!(
            "[{}]{} Type: {} | Content: {} | Foreground: {} | Background: {} | Saved File: {} | Date: {}\n",
            record.action.label(),
            encrypted_indicator,
            record.content_kind.label(),
            preview(&record.content),
            record.foreground.as_deref().unwrap_or("-"),
            record.background.as_deref().unwrap_or("-"),
            record
                .saved_file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "Not saved".to_string()),
            timestamp,
        );

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Truncate content for the log, keeping secrets and long payloads short.
fn preview(content: &str) -> String {
    if content.chars().count() > CONTENT_PREVIEW_MAX {
        let truncated: String = content.chars().take(CONTENT_PREVIEW_MAX - 3).collect();
        format!("{}...", truncated)
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_writes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE_NAME);

        let log = HistoryLog::create(&path).unwrap();
        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.starts_with("QUICKSCAN QR HISTORY"));
        assert!(contents.contains("Format: [Action]"));
    }

    #[test]
    fn test_create_preserves_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE_NAME);

        let log = HistoryLog::create(&path).unwrap();
        log.append(&HistoryRecord::scanned(ContentKind::Text, "first", false))
            .unwrap();

        // Re-opening must not rewrite the header over existing entries
        let log = HistoryLog::create(&path).unwrap();
        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("first"));
    }

    #[test]
    fn test_create_makes_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dirs").join(HISTORY_FILE_NAME);

        let log = HistoryLog::create(&path).unwrap();
        assert!(log.path().exists());
    }

    #[test]
    fn test_append_generated_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE_NAME);
        let log = HistoryLog::create(&path).unwrap();

        let record = HistoryRecord::generated(
            ContentKind::Url,
            "https://example.com",
            false,
            "#000000",
            "#FFFFFF",
            Path::new("/tmp/qr.png"),
        );
        log.append(&record).unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let line = contents.lines().last().unwrap();
        assert!(line.starts_with("[Generated] Type: URL"));
        assert!(line.contains("Content: https://example.com"));
        assert!(line.contains("Foreground: #000000"));
        assert!(line.contains("Background: #FFFFFF"));
        assert!(line.contains("Saved File: /tmp/qr.png"));
        assert!(line.contains("Date: "));
    }

    #[test]
    fn test_append_scanned_encrypted_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE_NAME);
        let log = HistoryLog::create(&path).unwrap();

        let record = HistoryRecord::scanned(ContentKind::Text, "secret note", true);
        log.append(&record).unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let line = contents.lines().last().unwrap();
        assert!(line.starts_with("[Scanned (Decrypted)] (Encrypted)"));
        assert!(line.contains("Foreground: -"));
        assert!(line.contains("Saved File: Not saved"));
    }

    #[test]
    fn test_long_content_truncated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE_NAME);
        let log = HistoryLog::create(&path).unwrap();

        let long = "x".repeat(120);
        log.append(&HistoryRecord::scanned(ContentKind::Text, &long, false))
            .unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let line = contents.lines().last().unwrap();
        assert!(line.contains(&format!("{}...", "x".repeat(47))));
        assert!(!line.contains(&"x".repeat(48)));
    }
}
