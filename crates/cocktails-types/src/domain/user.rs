use serde::{Deserialize, Serialize};

/// A persisted user row. `password_hash` is always hasher output.
///
/// Deliberately not `Serialize`: clients only ever see [`UserView`].
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl User {
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Client-facing projection of a user, without credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: i32,
    pub email: String,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
        }
    }
}

/// Insert payload. Only constructible from an already-hashed password.
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
        }
    }

    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_view_hide_the_hash() {
        let user = NewUser::new("a@x.com".into(), "$argon2id$v=19$secret".into()).into_user(1);
        let debug = format!("{user:?}");
        assert!(!debug.contains("argon2id"));

        let view = serde_json::to_value(user.view()).unwrap();
        assert_eq!(view, serde_json::json!({ "id": 1, "email": "a@x.com" }));
    }
}
