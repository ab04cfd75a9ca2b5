use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
};

#[derive(thiserror::Error, Debug)]
pub enum HashingError {
    #[error("invalid hashing parameters: {0}")]
    Params(String),
    #[error("{0}")]
    Hash(String),
    #[error("hashing task aborted: {0}")]
    Task(String),
}

/// Salted Argon2id hashing with a configurable iteration count.
///
/// Output is a PHC string, so the salt and parameters travel with the hash
/// and `verify` needs nothing else.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("t_cost", &self.params.t_cost())
            .finish()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl PasswordHasher {
    /// `cost` is the Argon2 iteration count; `None` keeps the library default.
    pub fn new(cost: Option<u32>) -> Result<Self, HashingError> {
        let params = match cost {
            Some(t_cost) => Params::new(
                Params::DEFAULT_M_COST,
                t_cost,
                Params::DEFAULT_P_COST,
                None,
            )
            .map_err(|e| HashingError::Params(e.to_string()))?,
            None => Params::default(),
        };
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| HashingError::Hash(e.to_string()))
    }

    /// A stored value that is not a PHC hash never verifies.
    pub fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hashed) else {
            return false;
        };
        self.argon2()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }

    /// [`hash`](Self::hash) on the blocking pool.
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, HashingError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| HashingError::Task(e.to_string()))?
    }

    /// [`verify`](Self::verify) on the blocking pool.
    pub async fn verify_blocking(
        &self,
        plaintext: String,
        hashed: String,
    ) -> Result<bool, HashingError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hashed))
            .await
            .map_err(|e| HashingError::Task(e.to_string()))
    }
}
