use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::error;

use crate::config::HashConfig;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("invalid argon2 parameters: {0}")]
    Params(String),
    #[error("argon2 hash_password error: {0}")]
    Hash(String),
    #[error("argon2 parse hash error: {0}")]
    Parse(String),
}

/// Salted Argon2id hasher with a configurable work factor.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    pub fn new(cfg: &HashConfig) -> Result<Self, HashError> {
        let params = Params::new(
            cfg.memory_kib.unwrap_or(Params::DEFAULT_M_COST),
            cfg.iterations.unwrap_or(Params::DEFAULT_T_COST),
            cfg.parallelism.unwrap_or(Params::DEFAULT_P_COST),
            None,
        )
        .map_err(|e| HashError::Params(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Returns a PHC string; every call draws a fresh salt.
    pub fn hash(&self, plain: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                HashError::Hash(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }

    #[allow(dead_code)] // no route compares credentials yet
    pub fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            HashError::Parse(e.to_string())
        })?;
        Ok(self
            .argon2
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
pub(crate) fn cheap_hasher() -> CredentialHasher {
    CredentialHasher::new(&HashConfig {
        memory_kib: Some(8),
        iterations: Some(1),
        parallelism: Some(1),
    })
    .expect("minimal argon2 params are valid")
}
