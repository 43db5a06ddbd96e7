//! Closed sets used by the client.
//!
//! The backend stores manga status as a free display string, so [`StatusKind`]
//! only classifies; it never rewrites what the server sent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Account role as reported by the backend.
///
/// Unknown role strings land in [`Role::Other`] verbatim, so a stored user
/// is written back with the role the server gave. They are never admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    #[default]
    User,
    Other(String),
}

impl Role {
    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Other(raw) => raw,
        }
    }

    /// Label shown on user cards.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User | Self::Other(_) => "Usuário",
        }
    }

    /// Badge shown in the welcome banner.
    #[must_use]
    pub const fn badge(&self) -> &'static str {
        match self {
            Self::Admin => "👑 Admin",
            Self::User | Self::Other(_) => "👤 Usuário",
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "admin" => Self::Admin,
            "user" => Self::User,
            _ => Self::Other(raw),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(CoreError::InvalidValue {
                field: "role".into(),
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// StatusKind
// ---------------------------------------------------------------------------

/// Publication status classes known to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Ongoing,
    Completed,
    Paused,
}

impl StatusKind {
    /// Classify a stored status string, case-insensitively.
    ///
    /// Anything unrecognized is displayed as ongoing.
    #[must_use]
    pub fn classify(status: &str) -> Self {
        [Self::Completed, Self::Paused]
            .into_iter()
            .find(|kind| kind.matches(status))
            .unwrap_or(Self::Ongoing)
    }

    /// Case-insensitive equality against this kind's display string.
    #[must_use]
    pub fn matches(self, status: &str) -> bool {
        status.trim().to_lowercase() == self.display().to_lowercase()
    }

    /// Display string the backend uses for this status.
    #[must_use]
    pub const fn display(self) -> &'static str {
        match self {
            Self::Ongoing => "Em andamento",
            Self::Completed => "Finalizado",
            Self::Paused => "Pausado",
        }
    }

    /// CSS class the cards carry.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Ongoing => "status-ongoing",
            Self::Completed => "status-completed",
            Self::Paused => "status-paused",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}
