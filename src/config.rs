//! Runtime configuration from `JOBPORTAL_*` environment variables.
//! Lookups go through a closure so tests never touch the process environment.

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::gate::DenialPolicy;

pub const ENV_GATE_POLICY: &str = "JOBPORTAL_GATE_POLICY";
pub const ENV_LOGIN_PATH: &str = "JOBPORTAL_LOGIN_PATH";
pub const ENV_LANDING_PATH: &str = "JOBPORTAL_LANDING_PATH";
pub const ENV_LOG: &str = "JOBPORTAL_LOG";
pub const ENV_HISTORY: &str = "JOBPORTAL_HISTORY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortalConfig {
    pub gate_policy: DenialPolicy,
    pub login_path: String,
    pub landing_path: String,
    /// Filter used when RUST_LOG is unset.
    pub log_filter: String,
    pub history_file: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            gate_policy: DenialPolicy::RenderNothing,
            login_path: "/login".into(),
            landing_path: "/".into(),
            log_filter: "info".into(),
            history_file: None,
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> AppResult<Self> { Self::from_lookup(|k| std::env::var(k).ok()) }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let d = PortalConfig::default();

        let login_path = get(ENV_LOGIN_PATH).unwrap_or(d.login_path);
        let landing_path = get(ENV_LANDING_PATH).unwrap_or(d.landing_path);
        for (var, p) in [(ENV_LOGIN_PATH, &login_path), (ENV_LANDING_PATH, &landing_path)] {
            if !p.starts_with('/') {
                return Err(AppError::config("invalid_config".to_string(), format!("{} must start with '/', got '{}'", var, p)));
            }
        }

        let gate_policy = match get(ENV_GATE_POLICY).map(|v| v.to_ascii_lowercase()).as_deref() {
            None | Some("blank") | Some("nothing") => DenialPolicy::RenderNothing,
            Some("redirect") => DenialPolicy::RedirectToLogin { login_path: login_path.clone(), preserve_return: true },
            Some(other) => {
                return Err(AppError::config(
                    "invalid_config".to_string(),
                    format!("{} must be 'blank' or 'redirect', got '{}'", ENV_GATE_POLICY, other),
                ))
            }
        };

        Ok(Self {
            gate_policy,
            login_path,
            landing_path,
            log_filter: get(ENV_LOG).unwrap_or(d.log_filter),
            history_file: get(ENV_HISTORY),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(pairs: &[(&str, &str)]) -> AppResult<PortalConfig> {
        let m: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        PortalConfig::from_lookup(|k| m.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(cfg(&[]).unwrap(), PortalConfig::default());
        // blank values count as unset
        assert_eq!(cfg(&[(ENV_GATE_POLICY, "  ")]).unwrap().gate_policy, DenialPolicy::RenderNothing);
    }

    #[test]
    fn redirect_policy_uses_login_path() {
        let c = cfg(&[(ENV_GATE_POLICY, "Redirect"), (ENV_LOGIN_PATH, "/signin")]).unwrap();
        assert_eq!(c.gate_policy, DenialPolicy::RedirectToLogin { login_path: "/signin".into(), preserve_return: true });
    }

    #[test]
    fn rejects_bad_values() {
        let err = cfg(&[(ENV_GATE_POLICY, "teleport")]).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        assert!(err.message().contains(ENV_GATE_POLICY));
        assert!(cfg(&[(ENV_LANDING_PATH, "home")]).is_err());
    }

    #[test]
    fn history_and_log() {
        let c = cfg(&[(ENV_HISTORY, "/tmp/h.txt"), (ENV_LOG, "debug")]).unwrap();
        assert_eq!(c.history_file.as_deref(), Some("/tmp/h.txt"));
        assert_eq!(c.log_filter, "debug");
    }
}
