//! user accounts and roles.
//!
//! every person who signs in - staff, students, parents - is a user.
//! students additionally have a [`crate::Student`] record; users are never
//! hard-deleted, only deactivated via the `active` flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// access role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// school administration staff.
    Admin,
    /// teaching staff.
    Teacher,
    /// enrolled student.
    Student,
    /// parent/guardian account.
    Parent,
}

impl Role {
    /// the role name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            "parent" => Ok(Role::Parent),
            other => Err(crate::Error::invalid("role", format!("unknown role '{}'", other))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// a classhub user account.
///
/// the password hash is deliberately excluded from serialization so it can
/// never leak through an api response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// unique identifier.
    pub id: UserId,

    /// username - unique across the school.
    pub username: String,

    /// email address - unique across the school.
    pub email: String,

    /// bcrypt hash of the password. never serialized.
    #[serde(skip)]
    pub password_hash: String,

    /// access role.
    pub role: Role,

    /// given name.
    pub first_name: String,

    /// family name.
    pub last_name: String,

    /// whether the account may sign in. deactivation instead of deletion.
    pub active: bool,

    /// when the user last signed in successfully.
    pub last_login: Option<DateTime<Utc>>,

    /// when the account was created.
    pub created_at: DateTime<Utc>,

    /// when the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// create a new active user with the given identity fields.
    pub fn new(id: UserId, username: String, email: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            password_hash: String::new(),
            role,
            first_name: String::new(),
            last_name: String::new(),
            active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Teacher, Role::Student, Role::Parent] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("principal".parse::<Role>().is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let mut user = User::new(
            UserId(1),
            "sarah.j".to_string(),
            "sarah.j@example.com".to_string(),
            Role::Teacher,
        );
        user.password_hash = "$2b$12$secret".to_string();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_role_wire_format_is_lowercase() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }
}
