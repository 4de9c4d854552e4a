//! Password checks for the first sign-in step.
//!
//! All password hashes use the Argon2id variant with a random salt, stored
//! as PHC strings so the parameters travel with the hash.

use std::collections::HashMap;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;

/// Decides whether an email/password pair is acceptable.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> bool;
}

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(false)` on mismatch and `Err` only for a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AllowListError {
    #[error("Allow-list entry '{0}' must have the form email=hash")]
    MalformedEntry(String),

    #[error("Allow-list hash for '{email}' is not a valid PHC string: {reason}")]
    InvalidHash { email: String, reason: String },
}

/// Fixed set of `(email, password hash)` pairs.
#[derive(Debug, Clone, Default)]
pub struct AllowListVerifier {
    entries: HashMap<String, String>,
}

impl AllowListVerifier {
    /// Build from `(email, PHC hash)` pairs, rejecting unparseable hashes.
    pub fn from_entries<I>(entries: I) -> Result<Self, AllowListError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = HashMap::new();
        for (email, hash) in entries {
            if let Err(e) = PasswordHash::new(&hash) {
                return Err(AllowListError::InvalidHash {
                    email,
                    reason: e.to_string(),
                });
            }
            map.insert(email, hash);
        }
        Ok(Self { entries: map })
    }

    /// Parse `email=hash;email=hash`. Blank entries are skipped.
    ///
    /// PHC strings contain `=` themselves, so each entry splits on the first
    /// `=` only.
    pub fn parse(spec: &str) -> Result<Self, AllowListError> {
        let pairs = spec
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .split_once('=')
                    .filter(|(email, hash)| !email.is_empty() && !hash.is_empty())
                    .map(|(email, hash)| (email.trim().to_string(), hash.trim().to_string()))
                    .ok_or_else(|| AllowListError::MalformedEntry(entry.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(pairs)
    }

    /// Emails with an entry, in no particular order.
    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CredentialVerifier for AllowListVerifier {
    async fn verify(&self, email: &str, password: &str) -> bool {
        let Some(hash) = self.entries.get(email).cloned() else {
            return false;
        };
        let password = password.to_string();
        let outcome =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await;
        match outcome {
            Ok(Ok(matched)) => matched,
            Ok(Err(e)) => {
                tracing::warn!(email, error = %e, "Stored password hash could not be read");
                false
            }
            Err(e) => {
                tracing::error!(email, error = %e, "Password verification task failed");
                false
            }
        }
    }
}
