//! Error types for QuickScan core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for QuickScan operations.
pub type Result<T> = std::result::Result<T, QuickScanError>;

/// Core error type for QuickScan operations.
#[derive(Debug, Error)]
pub enum QuickScanError {
    /// Invalid user input (empty password, bad color, bad arguments)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Encrypted payload is structurally invalid (field count, base64, lengths)
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Wrong password or corrupted ciphertext. The two causes are never
    /// distinguished; a padding oracle needs exactly that distinction.
    #[error("Decryption failed: invalid password or corrupted data")]
    DecryptionFailed,

    /// The secure random source could not supply bytes
    #[error("Random source unavailable: {0}")]
    RandomSource(String),

    /// QR symbol encoding error (content too long for any version, etc.)
    #[error("QR encoding error: {0}")]
    QrEncode(String),

    /// Image reading or writing error
    #[error("Image error: {0}")]
    Image(String),

    /// History log error
    #[error("History error: {0}")]
    History(String),
}

impl From<std::io::Error> for QuickScanError {
    fn from(err: std::io::Error) -> Self {
        QuickScanError::History(err.to_string())
    }
}

impl From<image::ImageError> for QuickScanError {
    fn from(err: image::ImageError) -> Self {
        QuickScanError::Image(err.to_string())
    }
}

impl From<qrcode::types::QrError> for QuickScanError {
    fn from(err: qrcode::types::QrError) -> Self {
        QuickScanError::QrEncode(err.to_string())
    }
}
