//! Access Gate
//!
//! A shared passphrase compared against user input before the generator UI
//! opens. Equality unlocks, inequality surfaces a static message. This is
//! UI gating, not access control: no hashing, no rate limiting, no session.
//!
//! The passphrase is supplied through configuration (file or environment),
//! never embedded as a literal.

use secrecy::{ExposeSecret, SecretString};

use crate::types::{Result, VerseError};

/// Non-cryptographic shared-secret gate.
pub struct AccessGate {
    passphrase: Option<SecretString>,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AccessGate {
    pub fn new(passphrase: Option<String>) -> Self {
        Self {
            passphrase: passphrase.map(SecretString::from),
        }
    }

    /// True when no passphrase is configured and the gate stands open.
    pub fn is_open(&self) -> bool {
        self.passphrase.is_none()
    }

    /// Exact equality check, no trimming on either side.
    pub fn unlock(&self, input: &str) -> Result<()> {
        match &self.passphrase {
            None => Ok(()),
            Some(expected) if expected.expose_secret() == input => Ok(()),
            Some(_) => Err(VerseError::GateDenied),
        }
    }
}
