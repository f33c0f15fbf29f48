//! Access gate for protected surfaces.
//!
//! A protected surface renders iff a session is present; any role may render any protected
//! surface. What happens on denial is decided by one [`DenialPolicy`]: the default renders
//! nothing, the alternative sends the user to the login surface and remembers where they were
//! going.

use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::identity::{Identity, Session};
use crate::navigation::LOGIN_PATH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DenialPolicy {
    RenderNothing,
    RedirectToLogin { login_path: String, preserve_return: bool },
}

impl Default for DenialPolicy {
    fn default() -> Self { DenialPolicy::RenderNothing }
}

impl DenialPolicy {
    pub fn redirect() -> Self {
        DenialPolicy::RedirectToLogin { login_path: LOGIN_PATH.to_string(), preserve_return: true }
    }
}

/// Outcome of gating one surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
    Rendered(T),
    Nothing,
    Redirect { to: String, return_to: Option<String> },
}

impl<T> Gated<T> {
    pub fn is_rendered(&self) -> bool { matches!(self, Gated::Rendered(_)) }

    pub fn rendered(self) -> Option<T> {
        match self {
            Gated::Rendered(t) => Some(t),
            _ => None,
        }
    }

    /// For callers that prefer an error over a silent outcome.
    pub fn into_result(self) -> AppResult<T> {
        match self {
            Gated::Rendered(t) => Ok(t),
            Gated::Nothing | Gated::Redirect { .. } => Err(AppError::not_authenticated("not_authenticated", "no active session")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    policy: DenialPolicy,
}

impl AccessGate {
    pub fn new(policy: DenialPolicy) -> Self { Self { policy } }

    pub fn policy(&self) -> &DenialPolicy { &self.policy }

    /// Render `surface` with the logged-in identity, or apply the denial policy.
    /// `requested` is the location being rendered; it is only used by the redirect policy.
    pub fn guard<T, F>(&self, session: &Session, requested: &str, surface: F) -> Gated<T>
    where
        F: FnOnce(&Identity) -> T,
    {
        match session.identity() {
            Some(identity) => Gated::Rendered(surface(identity)),
            None => self.deny(requested),
        }
    }

    pub fn allows(&self, session: &Session) -> bool { session.is_present() }

    fn deny<T>(&self, requested: &str) -> Gated<T> {
        debug!(target: "gate", "gate.deny path={} policy={:?}", requested, self.policy);
        match &self.policy {
            DenialPolicy::RenderNothing => Gated::Nothing,
            DenialPolicy::RedirectToLogin { login_path, preserve_return } => Gated::Redirect {
                to: login_path.clone(),
                return_to: preserve_return.then(|| requested.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{Role, SessionStore};

    #[test]
    fn renders_for_any_role() {
        let gate = AccessGate::default();
        let store = SessionStore::default();
        for role in Role::ALL {
            let s = store.authenticate("u@x.io", "", role).unwrap();
            // admin surface rendered for every role: no cross-check
            let out = gate.guard(&s, "/admin/users", |id| id.role());
            assert_eq!(out, Gated::Rendered(role));
        }
    }

    #[test]
    fn renders_nothing_without_session() {
        let gate = AccessGate::default();
        let out: Gated<()> = gate.guard(&Session::absent(), "/student/dashboard", |_| ());
        assert_eq!(out, Gated::Nothing);
        assert!(!gate.allows(&Session::absent()));
    }

    #[test]
    fn redirect_policy_preserves_path() {
        let gate = AccessGate::new(DenialPolicy::redirect());
        let out: Gated<()> = gate.guard(&Session::absent(), "/recruiter/jobs", |_| ());
        assert_eq!(out, Gated::Redirect { to: "/login".into(), return_to: Some("/recruiter/jobs".into()) });

        let gate = AccessGate::new(DenialPolicy::RedirectToLogin { login_path: "/signin".into(), preserve_return: false });
        let out: Gated<()> = gate.guard(&Session::absent(), "/recruiter/jobs", |_| ());
        assert_eq!(out, Gated::Redirect { to: "/signin".into(), return_to: None });
    }

    #[test]
    fn into_result_maps_denial() {
        let gate = AccessGate::default();
        let err = gate.guard(&Session::absent(), "/admin/dashboard", |_| 1).into_result().unwrap_err();
        assert_eq!(err.code_str(), "not_authenticated");
    }
}
