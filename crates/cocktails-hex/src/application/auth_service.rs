use crate::application::password::PasswordHasher;
use crate::errors::AppError;
use cocktails_types::domain::user::{NewUser, UserView};
use cocktails_types::ports::{RepoError, UserRepository};
use std::sync::Arc;

/// Well-formed Argon2id hash (default parameters) that no password matches.
const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Registration and credential checks. Callers only ever get a [`UserView`].
pub struct AuthService<R: UserRepository> {
    repo: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    pub async fn register(&self, email: String, password: String) -> Result<UserView, AppError> {
        // Nothing is written unless hashing succeeded.
        let password_hash = self.hasher.hash_blocking(password).await?;
        let user = self
            .repo
            .insert_user(NewUser::new(email, password_hash))
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => AppError::Conflict("email already registered".into()),
                RepoError::Db(m) => AppError::Store(m),
            })?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user.into())
    }

    pub async fn login(&self, email: &str, password: String) -> Result<UserView, AppError> {
        let user = self
            .repo
            .find_user_by_email(email)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        // Unknown emails still pay for a verify so both 401s take as long.
        let stored_hash = user
            .as_ref()
            .map_or(UNKNOWN_USER_HASH, |u| u.password_hash.as_str())
            .to_string();
        let matches = self
            .hasher
            .verify_blocking(password, stored_hash)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        match user {
            Some(user) if matches => Ok(user.into()),
            Some(user) => {
                tracing::debug!(user_id = user.id, "password mismatch");
                Err(AppError::InvalidCredentials)
            }
            None => Err(AppError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cocktails_repo::memory::InMemoryRepo;

    fn service() -> (Arc<InMemoryRepo>, AuthService<InMemoryRepo>) {
        let repo = Arc::new(InMemoryRepo::new());
        (repo.clone(), AuthService::new(repo, PasswordHasher::default()))
    }

    #[tokio::test]
    async fn register_stores_hash_and_login_verifies() {
        let (repo, svc) = service();
        let view = svc.register("a@x.com".into(), "secret".into()).await.unwrap();
        assert_eq!(view.email, "a@x.com");

        let stored = repo.find_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "secret");
        assert!(PasswordHasher::default().verify("secret", &stored.password_hash));

        let logged_in = svc.login("a@x.com", "secret".into()).await.unwrap();
        assert_eq!(logged_in, view);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let (_, svc) = service();
        svc.register("a@x.com".into(), "secret".into()).await.unwrap();

        let wrong = svc.login("a@x.com", "wrong".into()).await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
        let unknown = svc.login("b@x.com", "secret".into()).await;
        assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn unknown_user_hash_parses_and_never_verifies() {
        assert!(argon2::PasswordHash::new(UNKNOWN_USER_HASH).is_ok());
        let hasher = PasswordHasher::default();
        assert!(!hasher.verify("", UNKNOWN_USER_HASH));
        assert!(!hasher.verify("secret", UNKNOWN_USER_HASH));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let (_, svc) = service();
        svc.register("a@x.com".into(), "one".into()).await.unwrap();
        let dup = svc.register("a@x.com".into(), "two".into()).await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));
    }
}
