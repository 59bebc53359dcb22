//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module derives AES keys from passwords using PBKDF2 with an
//! HMAC-SHA-256 PRF, stretching low-entropy passwords to make offline
//! brute-force attacks expensive.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{QuickScanError, Result};

/// PBKDF2 iteration count.
///
/// Tunable security/performance trade-off. Fixed at build time: the count
/// is not embedded in payloads, so encrypt and decrypt must always agree.
/// Changing it invalidates previously generated payloads.
const PBKDF2_ITERATIONS: u32 = 65_536;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
const KEY_LENGTH: usize = 32;

/// Minimum salt length in bytes.
const MIN_SALT_LENGTH: usize = 16;

/// A cryptographic key derived from a password.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped, reducing the window of exposure.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate cipher
    /// initialization.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a password using PBKDF2-HMAC-SHA256.
///
/// # Arguments
///
/// * `password` - The password to derive from
/// * `salt` - Random salt (must be unique per encryption)
///
/// # Security
///
/// - Same password + salt always produces the same key (deterministic)
/// - Different salt produces a different key (salt travels with the payload)
/// - 65536 iterations of HMAC-SHA-256 stretch the password
pub fn derive_key(password: &str, salt: &[u8]) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(QuickScanError::InvalidInput(
            "Password must not be empty".to_string(),
        ));
    }

    if salt.len() < MIN_SALT_LENGTH {
        return Err(QuickScanError::InvalidInput(format!(
            "Salt must be at least {} bytes",
            MIN_SALT_LENGTH
        )));
    }

    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key_bytes);

    Ok(DerivedKey::from_bytes(key_bytes))
}
