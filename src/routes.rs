//! Route table: classify a location string into the surface it names.
//! Protected surfaces are exactly the role-prefixed ones (`/student/...`, `/recruiter/...`,
//! `/admin/...`).

use serde::Serialize;

use crate::identity::Role;
use crate::navigation::LOGIN_PATH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicPage {
    Jobs,
    Companies,
    About,
    ForgotPassword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    Landing,
    Login,
    Signup { role_param: Option<String> },
    Public { page: PublicPage },
    Protected { role: Role, section: String },
    NotFound { path: String },
}

fn normalize(path: &str) -> &str { path.trim().trim_end_matches('/') }

impl Route {
    /// Classify with the default login location (`/login`).
    pub fn parse(location: &str) -> Route { Route::parse_with(location, LOGIN_PATH) }

    /// Classify a location; `login_path` is wherever the login surface is mounted.
    pub fn parse_with(location: &str, login_path: &str) -> Route {
        let (path, query) = match location.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (location, None),
        };
        let path = path.trim();
        let trimmed = normalize(path);
        if !trimmed.is_empty() && trimmed == normalize(login_path) {
            return Route::Login;
        }
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Landing,
            ["signup"] => Route::Signup { role_param: query.and_then(|q| query_param(q, "role")) },
            ["jobs"] => Route::Public { page: PublicPage::Jobs },
            ["companies"] => Route::Public { page: PublicPage::Companies },
            ["about"] => Route::Public { page: PublicPage::About },
            ["forgot-password"] => Route::Public { page: PublicPage::ForgotPassword },
            [prefix, rest @ ..] => match Role::ALL.into_iter().find(|r| r.as_str() == *prefix) {
                Some(role) if !rest.is_empty() => Route::Protected { role, section: rest.join("/") },
                _ => Route::NotFound { path: path.to_string() },
            },
        }
    }

    pub fn is_protected(&self) -> bool { matches!(self, Route::Protected { .. }) }

    /// The role whose navigation set contains this route. Informational only: the access
    /// gate does not compare it with the session's role.
    pub fn owner_role(&self) -> Option<Role> {
        match self {
            Route::Protected { role, .. } => Some(*role),
            _ => None,
        }
    }
}

/// First value of `key` in a raw query string (`a=1&b=2`). No percent-decoding.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
}
