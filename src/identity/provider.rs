use anyhow::Result;
use tracing::debug;

use super::principal::{display_name_from_email, Identity};
use super::role::Role;

// Plain structs; Debug is hand-written so passwords never reach a log line.
#[derive(Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Clone)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Turns submitted credentials or profile data into an identity.
/// The session store owns exactly one provider and never inspects credentials itself.
pub trait AuthProvider: Send + Sync {
    fn login(&self, req: &LoginRequest) -> Result<Identity>;
    fn signup(&self, req: &SignupRequest) -> Result<Identity>;
}

/// Accepts every submission. Login derives the display name from the email's local part,
/// signup uses the submitted name verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAuthProvider;

impl AuthProvider for MockAuthProvider {
    fn login(&self, req: &LoginRequest) -> Result<Identity> {
        debug!(target: "auth", "mock login accepted email={} role={}", req.email, req.role);
        Ok(Identity::new(display_name_from_email(&req.email), req.email.clone(), req.role))
    }

    fn signup(&self, req: &SignupRequest) -> Result<Identity> {
        debug!(target: "auth", "mock signup accepted email={} role={}", req.email, req.role);
        Ok(Identity::new(req.name.clone(), req.email.clone(), req.role))
    }
}
