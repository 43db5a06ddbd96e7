use serde::{Deserialize, Serialize};

use crate::entities::User;

/// Credentials held for the current client.
///
/// A session with only one of the two halves set is treated as logged-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    #[must_use]
    pub const fn new(token: String, user: User) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_logged_in() && self.user.as_ref().is_some_and(User::is_admin)
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Role;

    fn user(role: Role) -> User {
        User {
            id: 1,
            name: "Ana".into(),
            username: "ana".into(),
            email: "ana@example.com".into(),
            role,
        }
    }

    #[test]
    fn partial_session_is_logged_out() {
        let token_only = Session {
            token: Some("t".into()),
            user: None,
        };
        assert!(!token_only.is_logged_in());

        let user_only = Session {
            token: None,
            user: Some(user(Role::Admin)),
        };
        assert!(!user_only.is_logged_in());
        assert!(!user_only.is_admin());
    }

    #[test]
    fn admin_requires_admin_role() {
        assert!(Session::new("t".into(), user(Role::Admin)).is_admin());
        assert!(!Session::new("t".into(), user(Role::User)).is_admin());
    }

    #[test]
    fn clear_drops_both_halves() {
        let mut session = Session::new("t".into(), user(Role::User));
        session.clear();
        assert_eq!(session, Session::default());
    }
}
