use async_trait::async_trait;

use super::RepoError;
use crate::domain::user::{NewUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Fails with [`RepoError::Constraint`] when the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, RepoError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
