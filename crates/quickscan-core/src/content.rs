//! Content classification for QR text.
//!
//! QR content is classified for display and history purposes only; the
//! codec itself treats all content as opaque text.

/// Kind of content carried by a QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Url,
    Email,
    Number,
    Text,
}

impl ContentKind {
    /// Classify a piece of scanned or entered content.
    pub fn classify(content: &str) -> Self {
        if is_url(content) {
            ContentKind::Url
        } else if content.contains('@') && content.contains('.') {
            ContentKind::Email
        } else if !content.is_empty() && content.bytes().all(|b| b.is_ascii_digit()) {
            ContentKind::Number
        } else {
            ContentKind::Text
        }
    }

    /// Human-readable label, as written to the history log.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Url => "URL",
            ContentKind::Email => "Email",
            ContentKind::Number => "Number",
            ContentKind::Text => "Text",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Check whether content carries a recognized URL scheme.
pub fn is_url(content: &str) -> bool {
    content.starts_with("http://") || content.starts_with("https://") || content.starts_with("ftp://")
}

/// Prepend `http://` to content the user marked as a URL but entered
/// without a scheme.
pub fn normalize_url(input: &str) -> String {
    if is_url(input) {
        input.to_string()
    } else {
        format!("http://{}", input)
    }
}
