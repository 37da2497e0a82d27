//! Role registry
//!
//! The closed set of permission classes. Exactly one role is assigned per
//! user account; the role is looked up from the user's profile after
//! authentication, never embedded in the session token.

use serde::{Deserialize, Serialize};

/// User role within the coaching business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Business manager
    Manager,
    /// Coach working with clients
    Coach,
    /// Appointment setter
    Setter,
    /// Deal closer
    Closer,
    /// End customer ("élève")
    Eleve,
}

impl Role {
    /// All roles, in display order
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Manager,
        Role::Coach,
        Role::Setter,
        Role::Closer,
        Role::Eleve,
    ];

    /// Wire tag used in profiles and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Coach => "coach",
            Role::Setter => "setter",
            Role::Closer => "closer",
            Role::Eleve => "eleve",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrateur",
            Role::Manager => "Manager",
            Role::Coach => "Coach",
            Role::Setter => "Setter",
            Role::Closer => "Closer",
            Role::Eleve => "Élève",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "coach" => Ok(Role::Coach),
            "setter" => Ok(Role::Setter),
            "closer" => Ok(Role::Closer),
            "eleve" => Ok(Role::Eleve),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}
