//! Password salting, hashing and verification.

use secrecy::{ExposeSecret, SecretString};

use super::AuthError;

/// bcrypt work factor for new hashes.
pub const HASH_COST: u32 = 10;

/// Appends the shared salt to passwords and hashes them with bcrypt.
///
/// The configured salt is one static string for every user; the per-hash
/// random salt comes from bcrypt itself. Hashing and verification run on the
/// blocking thread pool.
#[derive(Debug, Clone)]
pub struct CredentialCodec {
    salt: SecretString,
    cost: u32,
}

impl CredentialCodec {
    /// Create a codec using [`HASH_COST`].
    #[must_use]
    pub const fn new(salt: SecretString) -> Self {
        Self::with_cost(salt, HASH_COST)
    }

    /// Create a codec with an explicit bcrypt cost (4..=31).
    #[must_use]
    pub const fn with_cost(salt: SecretString, cost: u32) -> Self {
        Self { salt, cost }
    }

    /// Returns `password` with the shared salt appended.
    #[must_use]
    pub fn salted(&self, password: &str) -> SecretString {
        SecretString::from(format!("{password}{}", self.salt.expose_secret()))
    }

    /// Hash an already-salted password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if bcrypt fails or the blocking task panics.
    pub async fn hash(&self, salted: SecretString) -> Result<String, AuthError> {
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(salted.expose_secret(), cost))
            .await
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?
            .map_err(|e| AuthError::PasswordHash(e.to_string()))
    }

    /// Check an already-salted password against a stored hash.
    ///
    /// A stored hash bcrypt cannot parse never matches.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if the blocking task panics.
    pub async fn verify(&self, salted: SecretString, hash: &str) -> Result<bool, AuthError> {
        let hash = hash.to_owned();

        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(salted.expose_secret(), &hash))
            .await
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn codec() -> CredentialCodec {
        CredentialCodec::with_cost(SecretString::from("pepper"), 4)
    }

    #[test]
    fn test_salted_appends_salt() {
        assert_eq!(codec().salted("hunter2").expose_secret(), "hunter2pepper");
        assert_eq!(codec().salted("").expose_secret(), "pepper");
    }

    #[test]
    fn test_default_cost() {
        let codec = CredentialCodec::new(SecretString::from(""));
        assert_eq!(codec.cost, 10);
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let codec = codec();
        let hash = codec.hash(codec.salted("hunter2")).await.unwrap();

        assert!(hash.starts_with("$2"));
        assert!(codec.verify(codec.salted("hunter2"), &hash).await.unwrap());
        assert!(!codec.verify(codec.salted("hunter3"), &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salt_is_part_of_the_secret() {
        let hash = codec().hash(codec().salted("hunter2")).await.unwrap();
        let other = CredentialCodec::with_cost(SecretString::from("paprika"), 4);

        assert!(!other.verify(other.salted("hunter2"), &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_randomized() {
        let codec = codec();
        let first = codec.hash(codec.salted("same")).await.unwrap();
        let second = codec.hash(codec.salted("same")).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_unparseable_hash_never_matches() {
        let codec = codec();
        assert!(!codec.verify(codec.salted("x"), "not-a-bcrypt-hash").await.unwrap());
        assert!(!codec.verify(codec.salted("x"), "").await.unwrap());
    }
}
