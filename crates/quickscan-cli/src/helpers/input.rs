//! Password prompting for encrypt and decrypt flows.

use dialoguer::Password;

/// Environment variable consulted before prompting.
pub const PASSWORD_ENV: &str = "QUICKSCAN_PASSWORD";

/// Password from the environment, if set to a non-blank value.
pub fn env_password() -> Option<String> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Password for encrypting new content: env var first, then a confirmed
/// prompt. Rejects empty passwords.
pub fn prompt_encrypt_password(interactive: bool) -> anyhow::Result<String> {
    if let Some(value) = env_password() {
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No password provided and no TTY available. Set {}.",
            PASSWORD_ENV
        ));
    }
    loop {
        let password = Password::new()
            .with_prompt("Enter password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
        if password.is_empty() {
            eprintln!("Password must not be empty");
            continue;
        }
        return Ok(password);
    }
}

/// Password for decrypting scanned content: env var first, then a single
/// prompt (the caller owns the retry loop).
pub fn prompt_scan_password(interactive: bool) -> anyhow::Result<String> {
    if let Some(value) = env_password() {
        return Ok(value);
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "Scanned content is encrypted and no TTY is available. Set {}.",
            PASSWORD_ENV
        ));
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}
