use serde::{Deserialize, Serialize};

use super::role::Role;

/// The authenticated user's stable attributes. Built in one step by an auth provider;
/// fields are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: String,
    display_name: String,
    email: String,
    role: Role,
}

impl Identity {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            display_name: display_name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn display_name(&self) -> &str { &self.display_name }
    pub fn email(&self) -> &str { &self.email }
    pub fn role(&self) -> Role { self.role }
}

/// Display name derived from an email address: everything before the first '@'.
/// Text without an '@' is returned whole.
pub fn display_name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
