use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// The three portal roles. Fixed for the lifetime of an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Recruiter,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Recruiter, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Recruiter => "recruiter",
            Role::Admin => "admin",
        }
    }

    /// Human label used by role pickers and the sidebar badge.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Recruiter => "Recruiter",
            Role::Admin => "Admin",
        }
    }

    /// Lenient parse: trims and ignores case, `None` for anything outside the closed set.
    pub fn parse(text: &str) -> Option<Role> {
        let t = text.trim();
        Role::ALL.into_iter().find(|r| r.as_str().eq_ignore_ascii_case(t))
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| AuthError::UnknownRole(s.trim().to_string()))
    }
}
