//! Session lifecycle tests through the public API: store, resolver and gate read the same
//! session, and a substituted provider changes behavior without touching any consumer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};

use jobportal::error::AuthError;
use jobportal::gate::{AccessGate, Gated};
use jobportal::identity::{AuthProvider, Identity, LoginRequest, Role, SessionStore, SignupRequest};
use jobportal::navigation::resolve;

#[test]
fn recruiter_scenario() -> Result<()> {
    let store = SessionStore::default();
    let gate = AccessGate::default();

    let s = store.authenticate("priya@acme.com", "x", Role::Recruiter)?;
    let id = s.identity().ok_or_else(|| anyhow!("expected identity"))?;
    assert_eq!(id.display_name(), "priya");
    assert_eq!(id.role(), Role::Recruiter);

    let labels: Vec<&str> = resolve(Role::Recruiter).iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["Dashboard", "Job Postings", "Applications", "Company Profile", "Settings"]);

    assert!(gate.guard(&store.current_session(), "/recruiter/dashboard", |_| ()).is_rendered());

    store.terminate();
    assert!(!store.current_session().is_present());
    assert_eq!(gate.guard(&store.current_session(), "/recruiter/dashboard", |_| ()), Gated::Nothing);
    Ok(())
}

#[test]
fn authenticate_derives_name_register_keeps_it() -> Result<()> {
    let store = SessionStore::default();
    for role in Role::ALL {
        let s = store.authenticate("first.last@uni.edu", "pw", role)?;
        assert_eq!(s.role(), Some(role));
        assert_eq!(s.identity().map(|i| i.display_name()), Some("first.last"));

        let s = store.register("Dr. Jane Q. Public", "jane@uni.edu", "pw", role)?;
        assert_eq!(s.identity().map(|i| i.display_name()), Some("Dr. Jane Q. Public"));
        assert_eq!(store.current_session(), s);
    }
    Ok(())
}

#[test]
fn terminate_is_idempotent() {
    let store = SessionStore::default();
    store.terminate();
    assert!(!store.current_session().is_present());
    store.authenticate("a@b.c", "", Role::Admin).unwrap();
    store.terminate();
    store.terminate();
    assert!(!store.current_session().is_present());
}

#[test]
fn readers_never_see_partial_sessions_across_threads() {
    let store = Arc::new(SessionStore::default());
    let writer = {
        let store = store.clone();
        std::thread::spawn(move || {
            for n in 0..200 {
                let role = Role::ALL[n % 3];
                store.authenticate(&format!("user{}@x.io", n), "pw", role).unwrap();
                if n % 7 == 0 { store.terminate(); }
            }
        })
    };
    for _ in 0..2000 {
        let s = store.current_session();
        if let Some(id) = s.identity() {
            // name, email and role were set together
            assert!(id.email().starts_with(id.display_name()));
            let n: usize = id.display_name().trim_start_matches("user").parse().unwrap();
            assert_eq!(id.role(), Role::ALL[n % 3]);
        }
    }
    writer.join().unwrap();
}

/// Rejects everything; stands in for a real verifying backend.
struct RejectingProvider {
    calls: AtomicUsize,
}

impl AuthProvider for RejectingProvider {
    fn login(&self, _req: &LoginRequest) -> Result<Identity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AuthError::InvalidCredentials.into())
    }

    fn signup(&self, req: &SignupRequest) -> Result<Identity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AuthError::AlreadyExists(req.email.clone()).into())
    }
}

#[test]
fn substituted_provider_failures_leave_session_alone() {
    let store = SessionStore::new(Box::new(RejectingProvider { calls: AtomicUsize::new(0) }));
    let notified = Arc::new(AtomicUsize::new(0));
    let n = notified.clone();
    store.subscribe(move |_| { n.fetch_add(1, Ordering::SeqCst); });

    let err = store.authenticate("a@b.c", "wrong", Role::Student).unwrap_err();
    assert_eq!(err.code_str(), "invalid_credentials");
    assert_eq!(err.notice().description, "Invalid credentials. Please try again.");

    let err = store.register("A", "a@b.c", "pw", Role::Student).unwrap_err();
    assert_eq!(err.code_str(), "already_exists");

    assert!(!store.current_session().is_present());
    assert_eq!(notified.load(Ordering::SeqCst), 0);
}
