use serde::{Deserialize, Serialize};

use super::nullable;
use crate::enums::Role;

/// An account as returned by `/login`, `/verify`, and `/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// First letter of the display name, upper-cased; `U` when the name is empty.
    #[must_use]
    pub fn avatar_initial(&self) -> char {
        self.name
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "name": null, "username": "kenji", "email": null, "role": null}"#,
        )
        .unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.avatar_initial(), 'U');
    }

    #[test]
    fn avatar_initial_uppercases() {
        let user: User =
            serde_json::from_str(r#"{"id": 1, "name": "ana", "username": "ana", "role": "admin"}"#)
                .unwrap();
        assert_eq!(user.avatar_initial(), 'A');
        assert!(user.is_admin());
    }
}
