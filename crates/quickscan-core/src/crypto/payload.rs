//! Password-protected payload codec.
//!
//! Converts plaintext + password into a transport-safe ASCII token that can
//! be embedded as QR text content, and back. The wire format is
//!
//! ```text
//! base64(salt) ":" base64(iv) ":" base64(ciphertext)
//! ```
//!
//! with a fresh 16-byte salt and IV on every call. Keys are derived with
//! PBKDF2-HMAC-SHA256 (see [`crate::crypto::key`]) and the plaintext is
//! encrypted with AES-256-CBC and PKCS#7 padding.
//!
//! Encrypted QR content carries the [`ENCRYPTED_PREFIX`] marker in front of
//! the payload; plain content has no prefix.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::crypto::key::derive_key;
use crate::error::{QuickScanError, Result};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Marker prepended to encrypted QR text content.
pub const ENCRYPTED_PREFIX: &str = "ENCRYPTED:";

/// Salt length in bytes.
const SALT_LENGTH: usize = 16;

/// IV length in bytes (AES block size).
const IV_LENGTH: usize = 16;

/// Encrypt `plaintext` with a password into the colon-separated payload
/// format.
///
/// A fresh salt and IV are generated on every call, so encrypting the same
/// input twice yields different payloads.
///
/// # Errors
///
/// Returns `QuickScanError::InvalidInput` if the password is empty, or
/// `QuickScanError::RandomSource` if the secure random source cannot
/// supply bytes.
pub fn encrypt(plaintext: &str, password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(QuickScanError::InvalidInput(
            "Password must not be empty".to_string(),
        ));
    }

    let mut salt = [0u8; SALT_LENGTH];
    fill_random(&mut salt)?;

    let key = derive_key(password, &salt)?;

    let mut iv = [0u8; IV_LENGTH];
    fill_random(&mut iv)?;

    let cipher = Aes256CbcEnc::new(key.as_bytes().into(), &iv.into());
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    Ok(format!(
        "{}:{}:{}",
        STANDARD.encode(salt),
        STANDARD.encode(iv),
        STANDARD.encode(&ciphertext)
    ))
}

/// Decrypt a payload produced by [`encrypt`] using the same password.
///
/// # Errors
///
/// - `QuickScanError::InvalidInput` if the password is empty
/// - `QuickScanError::MalformedPayload` if the payload does not split into
///   exactly three fields, a field is not valid base64, or the decoded salt
///   or IV has the wrong length
/// - `QuickScanError::DecryptionFailed` for a wrong password or corrupted
///   ciphertext; the two causes are deliberately not distinguished
pub fn decrypt(payload: &str, password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(QuickScanError::InvalidInput(
            "Password must not be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = payload.split(':').collect();
    if parts.len() != 3 {
        return Err(QuickScanError::MalformedPayload(format!(
            "expected 3 fields, found {}",
            parts.len()
        )));
    }

    let salt = decode_field(parts[0], "salt")?;
    let iv = decode_field(parts[1], "iv")?;
    let ciphertext = decode_field(parts[2], "ciphertext")?;

    if salt.len() != SALT_LENGTH {
        return Err(QuickScanError::MalformedPayload(format!(
            "salt must be {} bytes, found {}",
            SALT_LENGTH,
            salt.len()
        )));
    }
    let iv: [u8; IV_LENGTH] = iv.as_slice().try_into().map_err(|_| {
        QuickScanError::MalformedPayload(format!(
            "iv must be {} bytes, found {}",
            IV_LENGTH,
            iv.len()
        ))
    })?;

    let key = derive_key(password, &salt)?;

    // Padding failures and invalid UTF-8 must surface identically;
    // telling them apart is a padding-oracle signal.
    let cipher = Aes256CbcDec::new(key.as_bytes().into(), &iv.into());
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| QuickScanError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| QuickScanError::DecryptionFailed)
}

/// Prepend the [`ENCRYPTED_PREFIX`] marker to a payload for embedding as
/// QR text content.
pub fn wrap_encrypted(payload: &str) -> String {
    format!("{}{}", ENCRYPTED_PREFIX, payload)
}

/// Strip the [`ENCRYPTED_PREFIX`] marker from scanned QR content.
///
/// Returns `Some(payload)` if the content carries the marker, `None` for
/// plain content.
pub fn strip_encrypted(content: &str) -> Option<&str> {
    content.strip_prefix(ENCRYPTED_PREFIX)
}

fn decode_field(field: &str, name: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(field)
        .map_err(|e| QuickScanError::MalformedPayload(format!("invalid base64 {}: {}", name, e)))
}

fn fill_random(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf).map_err(|e| QuickScanError::RandomSource(e.to_string()))
}
