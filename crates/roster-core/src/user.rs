//! The user entity and the shapes used to create and change it.

use crate::UserId;

/// A stored user.
///
/// The password is only ever kept as a hash and is never exposed through
/// API responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Adapter-assigned identifier.
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Argon2 hash of the password, when one was supplied.
    pub password_hash: Option<String>,
}

impl User {
    /// Builds a stored user from a new user and an assigned id.
    #[must_use]
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
        }
    }

    /// Overwrites the fields present in `changes`. The id never changes.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            self.password_hash = Some(password_hash);
        }
    }
}

/// A user that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
}

impl NewUser {
    /// Creates a new user without a password.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: None,
        }
    }

    /// Attaches a password hash.
    #[must_use]
    pub fn with_password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    /// Returns true if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}
