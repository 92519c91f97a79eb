//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered user
///
/// The password hash is opaque to everything but the auth service and is
/// never serialized into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique display name chosen at registration
    pub username: String,

    /// Unique email address used for login
    pub email: String,

    /// bcrypt hash of the user's password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_creation() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "$2b$10$hash".to_string(),
        );

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.password_hash, "$2b$10$hash");
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "$2b$10$hash".to_string(),
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }
}
