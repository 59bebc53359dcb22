//! Cryptographic operations for QuickScan.
//!
//! This module implements the password-protected payload codec used for
//! encrypted QR content:
//! - **PBKDF2-HMAC-SHA256**: password-based key derivation
//! - **AES-256-CBC + PKCS#7**: symmetric encryption of the payload
//!
//! ## Security Model
//!
//! - Fresh random salt and IV on every encryption, never reused
//! - Derived keys live only for the duration of one call and are
//!   zeroized from memory on drop
//! - No passwords, keys, or plaintext in any error or log output
//! - Wrong-password and corrupted-data failures are indistinguishable
//!   to the caller
//!
//! ## Threat Model
//!
//! We defend against:
//! - Reading an encrypted QR code without the password
//! - Offline brute-force attacks on the password (PBKDF2 stretching)
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Ciphertext tampering (CBC carries no authentication tag; a wrong
//!   or tampered payload fails closed but is not detected as such)

pub mod key;
pub mod payload;

pub use key::{derive_key, DerivedKey};
pub use payload::{decrypt, encrypt, strip_encrypted, wrap_encrypted, ENCRYPTED_PREFIX};
