//! Salted password hashing with Argon2id.
//!
//! Hashing and verification are CPU bound and intentionally slow, so both run
//! on tokio's blocking pool and are awaited by the handlers.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;
use thiserror::Error;
use tokio::task;
use tracing::{instrument, trace};

/// Memory cost in KiB.
const MEMORY_COST_KIB: u32 = 19_456;
/// Number of passes over memory.
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),

    #[error("invalid hashing parameters: {0}")]
    Params(argon2::Error),

    #[error("hashing task did not complete: {0}")]
    Task(#[from] task::JoinError),
}

impl From<argon2::password_hash::Error> for PasswordError {
    fn from(e: argon2::password_hash::Error) -> Self {
        PasswordError::Hash(e)
    }
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
        .map_err(PasswordError::Params)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn hash_blocking(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash)?;
    // Parameters are read back from the PHC string, so older hashes keep verifying.
    Ok(hasher()?
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Hash `password` into a PHC string with a fresh random salt.
#[instrument(skip_all)]
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    trace!("Hashing password on blocking pool");
    task::spawn_blocking(move || hash_blocking(&password)).await?
}

/// Check `password` against a stored PHC string.
///
/// A mismatch is `Ok(false)`; only an unreadable hash or a failed task is an error.
#[instrument(skip_all)]
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    trace!("Verifying password on blocking pool");
    task::spawn_blocking(move || verify_blocking(&password, &hash)).await?
}
