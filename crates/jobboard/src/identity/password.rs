//! Password hashing. Bcrypt runs on the blocking pool so it never stalls the runtime.

use super::domain::PasswordHash;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Bcrypt only reads the first 72 bytes.
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Cost bounds accepted by bcrypt.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password must be between {min} and {max} characters")]
    Length { min: usize, max: usize },
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Salted bcrypt hashing with a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST),
        }
    }

    pub fn validate(password: &str) -> Result<(), PasswordError> {
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&password.len()) {
            return Err(PasswordError::Length {
                min: MIN_PASSWORD_LENGTH,
                max: MAX_PASSWORD_LENGTH,
            });
        }
        Ok(())
    }

    pub async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordError> {
        Self::validate(password)?;
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|err| PasswordError::Hashing(format!("task join error: {err}")))?
            .map(PasswordHash::from_digest)
            .map_err(|err| PasswordError::Hashing(err.to_string()))
    }

    pub async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordError> {
        let password = password.to_string();
        let digest = hash.as_str().to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest))
            .await
            .map_err(|err| PasswordError::Hashing(format!("task join error: {err}")))?
            .map_err(|err| PasswordError::Hashing(err.to_string()))
    }
}
