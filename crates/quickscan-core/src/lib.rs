//! # QuickScan Core
//!
//! Core library for QuickScan - a tool for generating and scanning QR codes
//! with optional password-protected content.
//!
//! This crate provides the payload codec, QR symbol wrappers, and history
//! logging independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: Password-based payload encryption and key derivation
//! - **qr**: QR symbol encoding and decoding (thin wrapper over `qrcode`/`rqrr`)
//! - **content**: Content classification (URL, email, number, text)
//! - **history**: Append-only history log of generate/scan operations

pub mod content;
pub mod crypto;
pub mod error;
pub mod history;
pub mod qr;

pub use error::{QuickScanError, Result};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
