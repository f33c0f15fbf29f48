//! Role navigation: the fixed sidebar sets per role, the role dashboards, and the public
//! top-bar links. Everything here is static data plus pure lookups.

use serde::Serialize;

use crate::identity::{Role, Session};

/// Icon names; the renderer decides what they look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    LayoutDashboard,
    Briefcase,
    FileText,
    User,
    Building,
    Users,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: Icon,
}

const fn entry(label: &'static str, path: &'static str, icon: Icon) -> NavigationEntry {
    NavigationEntry { label, path, icon }
}

pub type NavigationSet = &'static [NavigationEntry];

static STUDENT_NAV: [NavigationEntry; 5] = [
    entry("Dashboard", "/student/dashboard", Icon::LayoutDashboard),
    entry("Browse Jobs", "/student/jobs", Icon::Briefcase),
    entry("My Applications", "/student/applications", Icon::FileText),
    entry("Profile", "/student/profile", Icon::User),
    entry("Settings", "/student/settings", Icon::Settings),
];

static RECRUITER_NAV: [NavigationEntry; 5] = [
    entry("Dashboard", "/recruiter/dashboard", Icon::LayoutDashboard),
    entry("Job Postings", "/recruiter/jobs", Icon::Briefcase),
    entry("Applications", "/recruiter/applications", Icon::FileText),
    entry("Company Profile", "/recruiter/profile", Icon::Building),
    entry("Settings", "/recruiter/settings", Icon::Settings),
];

static ADMIN_NAV: [NavigationEntry; 5] = [
    entry("Dashboard", "/admin/dashboard", Icon::LayoutDashboard),
    entry("Users", "/admin/users", Icon::Users),
    entry("Jobs", "/admin/jobs", Icon::Briefcase),
    entry("Companies", "/admin/companies", Icon::Building),
    entry("Settings", "/admin/settings", Icon::Settings),
];

/// Sidebar entries for a role, dashboard first and settings last.
pub fn resolve(role: Role) -> NavigationSet {
    match role {
        Role::Student => &STUDENT_NAV,
        Role::Recruiter => &RECRUITER_NAV,
        Role::Admin => &ADMIN_NAV,
    }
}

/// Same as [`resolve`] for role text from outside the type system; unknown roles get an empty set.
pub fn resolve_str(role: &str) -> NavigationSet {
    Role::parse(role).map(resolve).unwrap_or(&[])
}

pub fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Student => "/student/dashboard",
        Role::Recruiter => "/recruiter/dashboard",
        Role::Admin => "/admin/dashboard",
    }
}

/// Where the account menu's "Dashboard" link points: the role dashboard, or `/` without a session.
pub fn home_path(session: &Session) -> &'static str {
    session.role().map(dashboard_path).unwrap_or("/")
}

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublicLink {
    pub label: &'static str,
    pub path: &'static str,
}

pub static PUBLIC_LINKS: [PublicLink; 3] = [
    PublicLink { label: "Browse Jobs", path: "/jobs" },
    PublicLink { label: "Companies", path: "/companies" },
    PublicLink { label: "About", path: "/about" },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccountAction {
    Link { label: &'static str, path: String },
    Logout,
}

impl AccountAction {
    fn link(label: &'static str, path: &str) -> Self { AccountAction::Link { label, path: path.to_string() } }
}

/// Right-hand side of the top bar: Dashboard + Logout with a session, Log in + Sign up without.
/// `login_path` is where the login surface is mounted (normally [`LOGIN_PATH`]).
pub fn account_actions(session: &Session, login_path: &str) -> Vec<AccountAction> {
    if session.is_present() {
        vec![AccountAction::link("Dashboard", home_path(session)), AccountAction::Logout]
    } else {
        vec![AccountAction::link("Log in", login_path), AccountAction::link("Sign up", SIGNUP_PATH)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::SessionStore;

    fn labels(set: NavigationSet) -> Vec<&'static str> { set.iter().map(|e| e.label).collect() }

    #[test]
    fn fixed_order_per_role() {
        assert_eq!(labels(resolve(Role::Student)), vec!["Dashboard", "Browse Jobs", "My Applications", "Profile", "Settings"]);
        assert_eq!(labels(resolve(Role::Recruiter)), vec!["Dashboard", "Job Postings", "Applications", "Company Profile", "Settings"]);
        assert_eq!(labels(resolve(Role::Admin)), vec!["Dashboard", "Users", "Jobs", "Companies", "Settings"]);
    }

    #[test]
    fn paths_stay_under_role_prefix() {
        for role in Role::ALL {
            let prefix = format!("/{}/", role.as_str());
            let set = resolve(role);
            assert_eq!(set.first().map(|e| e.path), Some(dashboard_path(role)));
            assert!(set.iter().all(|e| e.path.starts_with(&prefix)));
            assert_eq!(set.last().map(|e| e.icon), Some(Icon::Settings));
        }
    }

    #[test]
    fn unknown_role_text_is_empty() {
        assert!(resolve_str("guest").is_empty());
        assert!(resolve_str("").is_empty());
        assert_eq!(resolve_str("ADMIN").len(), 5);
    }

    #[test]
    fn account_actions_follow_session() {
        let store = SessionStore::default();
        let out = account_actions(&store.current_session(), LOGIN_PATH);
        assert_eq!(out[0], AccountAction::Link { label: "Log in", path: "/login".into() });
        assert_eq!(home_path(&store.current_session()), "/");

        let s = store.authenticate("x@y.z", "", Role::Admin).unwrap();
        let out = account_actions(&s, LOGIN_PATH);
        assert_eq!(out, vec![AccountAction::Link { label: "Dashboard", path: "/admin/dashboard".into() }, AccountAction::Logout]);
    }

    #[test]
    fn log_in_link_uses_mounted_login_path() {
        let store = SessionStore::default();
        let out = account_actions(&store.current_session(), "/signin");
        assert_eq!(out[0], AccountAction::Link { label: "Log in", path: "/signin".into() });
        assert_eq!(out[1], AccountAction::Link { label: "Sign up", path: "/signup".into() });
    }
}
