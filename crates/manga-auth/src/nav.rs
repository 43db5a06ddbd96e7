//! Header state derived from the session.

use serde::Serialize;

use manga_core::messages::welcome;
use manga_core::{Page, Session};

/// What the shared page header shows for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavAffordances {
    pub auth_label: &'static str,
    /// `None` means the link acts as a logout button (`#`).
    pub auth_target: Option<Page>,
    pub show_admin_link: bool,
    pub welcome: Option<WelcomeBanner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WelcomeBanner {
    pub message: String,
    pub badge: &'static str,
}

impl NavAffordances {
    pub fn for_session(session: &Session) -> Self {
        match session.user.as_ref().filter(|_| session.is_logged_in()) {
            Some(user) => Self {
                auth_label: "Logout",
                auth_target: None,
                show_admin_link: session.is_admin(),
                welcome: Some(WelcomeBanner {
                    message: welcome(&user.name),
                    badge: user.role.badge(),
                }),
            },
            None => Self {
                auth_label: "Login",
                auth_target: Some(Page::Login),
                show_admin_link: false,
                welcome: None,
            },
        }
    }

    /// `href` of the auth link.
    pub fn auth_href(&self) -> String {
        self.auth_target.map_or_else(|| "#".to_string(), |page| page.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manga_core::{Role, User};

    fn session(role: Role) -> Session {
        Session::new(
            "t".into(),
            User {
                id: 1,
                name: "Kenji".into(),
                username: "kenji".into(),
                email: "k@example.com".into(),
                role,
            },
        )
    }

    #[test]
    fn logged_out_shows_login_link() {
        let nav = NavAffordances::for_session(&Session::default());
        assert_eq!(nav.auth_label, "Login");
        assert_eq!(nav.auth_href(), "login.html");
        assert!(!nav.show_admin_link);
        assert!(nav.welcome.is_none());
    }

    #[test]
    fn admin_sees_admin_link_and_badge() {
        let nav = NavAffordances::for_session(&session(Role::Admin));
        assert_eq!(nav.auth_label, "Logout");
        assert_eq!(nav.auth_href(), "#");
        assert!(nav.show_admin_link);
        let banner = nav.welcome.unwrap();
        assert_eq!(banner.message, "Bem-vindo, Kenji!");
        assert_eq!(banner.badge, "👑 Admin");
    }

    #[test]
    fn regular_user_has_no_admin_link() {
        let nav = NavAffordances::for_session(&session(Role::User));
        assert!(!nav.show_admin_link);
        assert_eq!(nav.welcome.unwrap().badge, "👤 Usuário");
    }
}
