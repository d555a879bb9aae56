//! Obtaining passphrases from the environment or the terminal.
//!
//! Every prompt can be bypassed with an environment variable so the binary
//! works in scripts and tests. Prompts and banners go to stderr.

use std::env;

use secrecy::SecretString;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::constants::{
    ENV_VAR_SEALDOC_ENTRY_PASSWORD, ENV_VAR_SEALDOC_NEW_PASSPHRASE, ENV_VAR_SEALDOC_PASSPHRASE,
};
use crate::errors::{AppError, AppResult};

/// Passphrase for an existing document.
///
/// Uses `SEALDOC_PASSPHRASE` when set, otherwise prompts once.
pub fn existing_passphrase() -> AppResult<SecretString> {
    if let Some(passphrase) = from_env(ENV_VAR_SEALDOC_PASSPHRASE)? {
        return Ok(passphrase);
    }

    debug!("Prompting for existing passphrase");
    let passphrase = prompt("Enter passphrase: ")?;
    check_passphrase(passphrase, None)
}

/// Passphrase for a new document or a re-key, confirmed when typed.
///
/// `env_var` names the variable that bypasses the prompt:
/// `SEALDOC_PASSPHRASE` for `init`/`import`, `SEALDOC_NEW_PASSPHRASE` for `rekey`.
pub fn new_passphrase(env_var: &str) -> AppResult<SecretString> {
    if let Some(passphrase) = from_env(env_var)? {
        return Ok(passphrase);
    }

    debug!("Prompting for new passphrase");
    eprintln!("Choose a strong passphrase to protect your entries.");
    let passphrase = prompt("Enter new passphrase: ")?;
    let confirmation = prompt("Confirm passphrase: ")?;
    check_passphrase(passphrase, Some(confirmation))
}

/// New passphrase for `rekey`.
pub fn rekey_passphrase() -> AppResult<SecretString> {
    new_passphrase(ENV_VAR_SEALDOC_NEW_PASSPHRASE)
}

/// Password stored in a new entry; empty input means none.
pub fn entry_password() -> AppResult<Option<Zeroizing<String>>> {
    let password = Zeroizing::new(match env::var(ENV_VAR_SEALDOC_ENTRY_PASSWORD) {
        Ok(value) => value,
        Err(_) => prompt("Entry password (leave empty for none): ")?,
    });
    if password.is_empty() {
        Ok(None)
    } else {
        Ok(Some(password))
    }
}

/// Validates a typed passphrase and its optional confirmation.
///
/// # Errors
///
/// Returns `AppError::Passphrase` if the two differ or the passphrase is empty.
pub fn check_passphrase(
    mut passphrase: String,
    confirmation: Option<String>,
) -> AppResult<SecretString> {
    if let Some(mut confirmation) = confirmation {
        let matches = passphrase == confirmation;
        confirmation.zeroize();
        if !matches {
            passphrase.zeroize();
            return Err(AppError::Passphrase("Passphrases do not match".to_string()));
        }
    }

    if passphrase.is_empty() {
        return Err(AppError::Passphrase("Passphrase cannot be empty".to_string()));
    }

    Ok(SecretString::from(passphrase))
}

fn from_env(name: &str) -> AppResult<Option<SecretString>> {
    match env::var(name) {
        Ok(value) => {
            debug!(variable = name, "Using passphrase from environment");
            check_passphrase(value, None).map(Some)
        }
        Err(_) => Ok(None),
    }
}

fn prompt(label: &str) -> AppResult<String> {
    rpassword::prompt_password(label)
        .map_err(|e| AppError::Passphrase(format!("Failed to read passphrase: {}", e)))
}
