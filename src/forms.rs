//! Login and signup surfaces.
//!
//! These hold the form fields and do the validation that belongs to the surface (required
//! fields, confirm-password), then hand off to the session store. On success they say where to
//! go next and what to show.

use tracing::info;

use crate::error::{AppError, AppResult, AuthError, Notice};
use crate::identity::{Role, SessionStore};
use crate::navigation::dashboard_path;

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub notice: Notice,
    pub redirect: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleOption {
    pub role: Role,
    pub label: &'static str,
    pub description: Option<&'static str>,
}

pub static LOGIN_ROLES: [RoleOption; 3] = [
    RoleOption { role: Role::Student, label: "Student", description: None },
    RoleOption { role: Role::Recruiter, label: "Recruiter", description: None },
    RoleOption { role: Role::Admin, label: "Admin", description: None },
];

// Admin accounts are not self-service.
pub static SIGNUP_ROLES: [RoleOption; 2] = [
    RoleOption { role: Role::Student, label: "Student", description: Some("Looking for jobs and internships") },
    RoleOption { role: Role::Recruiter, label: "Recruiter", description: Some("Hiring for your company") },
];

fn required(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() { Err(AuthError::MissingField(field)) } else { Ok(()) }
}

#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm").field("email", &self.email).field("role", &self.role).finish_non_exhaustive()
    }
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self { email: email.into(), password: password.into(), role: Some(role) }
    }

    pub fn role_options() -> &'static [RoleOption] { &LOGIN_ROLES }

    /// Selected role; the picker starts on Student.
    pub fn role(&self) -> Role { self.role.unwrap_or(Role::Student) }

    pub fn submit(&self, store: &SessionStore) -> AppResult<Submission> {
        required(&self.email, "email")?;
        required(&self.password, "password")?;
        let role = self.role();
        // Any store failure is reported with the generic credentials notice
        store.authenticate(&self.email, &self.password, role).map_err(|e| match e {
            auth @ AppError::Auth { .. } => auth,
            other => AppError::auth(other.code_str().to_string(), other.message().to_string()),
        })?;
        info!(target: "auth", "login surface submitted role={}", role);
        Ok(Submission {
            notice: Notice::success("Welcome back!", "You have successfully logged in."),
            redirect: dashboard_path(role).to_string(),
        })
    }
}

#[derive(Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<Role>,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm").field("name", &self.name).field("email", &self.email).field("role", &self.role).finish_non_exhaustive()
    }
}

impl SignupForm {
    /// Empty form whose role picker starts from a `?role=` parameter. Only roles offered by
    /// the signup picker are honored; anything else falls back to Student.
    pub fn with_role_param(param: Option<&str>) -> Self {
        let role = param
            .and_then(Role::parse)
            .filter(|r| SIGNUP_ROLES.iter().any(|o| o.role == *r))
            .unwrap_or(Role::Student);
        Self { role: Some(role), ..Default::default() }
    }

    pub fn role_options() -> &'static [RoleOption] { &SIGNUP_ROLES }

    pub fn role(&self) -> Role { self.role.unwrap_or(Role::Student) }

    pub fn name_label(&self) -> &'static str {
        match self.role() {
            Role::Recruiter => "Company Name",
            _ => "Full Name",
        }
    }

    pub fn name_placeholder(&self) -> &'static str {
        match self.role() {
            Role::Recruiter => "Acme Inc.",
            _ => "John Doe",
        }
    }

    pub fn submit(&self, store: &SessionStore) -> AppResult<Submission> {
        required(&self.name, "name")?;
        required(&self.email, "email")?;
        required(&self.password, "password")?;
        // Checked before the store is touched
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch.into());
        }
        let role = self.role();
        store.register(&self.name, &self.email, &self.password, role)?;
        info!(target: "auth", "signup surface submitted role={}", role);
        Ok(Submission {
            notice: Notice::success("Account created!", "Welcome to JobPortal."),
            redirect: dashboard_path(role).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_defaults_to_student() {
        let store = SessionStore::default();
        let form = LoginForm { email: "kim@uni.edu".into(), password: "pw".into(), role: None };
        let out = form.submit(&store).unwrap();
        assert_eq!(out.redirect, "/student/dashboard");
        assert_eq!(out.notice.title, "Welcome back!");
        assert_eq!(store.current_session().role(), Some(Role::Student));
    }

    #[test]
    fn login_requires_fields() {
        let store = SessionStore::default();
        let err = LoginForm::new("", "pw", Role::Admin).submit(&store).unwrap_err();
        assert_eq!(err.code_str(), "missing_field");
        assert!(!store.current_session().is_present());
    }

    #[test]
    fn signup_mismatch_never_reaches_store() {
        let store = SessionStore::default();
        let form = SignupForm {
            name: "Ana".into(),
            email: "ana@uni.edu".into(),
            password: "a".into(),
            confirm_password: "b".into(),
            role: Some(Role::Student),
        };
        let err = form.submit(&store).unwrap_err();
        assert_eq!(err.notice().description, "Passwords do not match.");
        assert!(!store.current_session().is_present());
    }

    #[test]
    fn signup_role_param() {
        assert_eq!(SignupForm::with_role_param(Some("recruiter")).role(), Role::Recruiter);
        assert_eq!(SignupForm::with_role_param(Some("admin")).role(), Role::Student);
        assert_eq!(SignupForm::with_role_param(Some("pirate")).role(), Role::Student);
        assert_eq!(SignupForm::with_role_param(None).role(), Role::Student);
        assert_eq!(SignupForm::with_role_param(Some("recruiter")).name_label(), "Company Name");
        assert_eq!(SignupForm::with_role_param(None).name_label(), "Full Name");
    }

    #[test]
    fn signup_success_uses_name_verbatim() {
        let store = SessionStore::default();
        let mut form = SignupForm::with_role_param(Some("recruiter"));
        form.name = "  Acme Inc. ".into();
        form.email = "hr@acme.com".into();
        form.password = "pw".into();
        form.confirm_password = "pw".into();
        let out = form.submit(&store).unwrap();
        assert_eq!(out.redirect, "/recruiter/dashboard");
        assert_eq!(out.notice.title, "Account created!");
        let s = store.current_session();
        assert_eq!(s.identity().map(|i| i.display_name()), Some("  Acme Inc. "));
    }

    #[test]
    fn debug_hides_passwords() {
        let f = SignupForm { password: "topsecret".into(), confirm_password: "topsecret".into(), ..Default::default() };
        assert!(!format!("{:?}", f).contains("topsecret"));
        assert!(!format!("{:?}", LoginForm::new("a", "topsecret", Role::Admin)).contains("topsecret"));
    }
}
