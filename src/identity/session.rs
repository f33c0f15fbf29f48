use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{ReentrantMutex, RwLock};
use tracing::{debug, info};

use crate::error::AppResult;

use super::principal::Identity;
use super::provider::{AuthProvider, LoginRequest, MockAuthProvider, SignupRequest};
use super::role::Role;

/// An established login: the identity plus bookkeeping for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub session_id: String,
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
}

/// Snapshot of "who is logged in": either absent or a complete identity.
/// Cloning is cheap; a clone never changes after it was handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session(Option<Arc<ActiveSession>>);

impl Session {
    pub fn absent() -> Self { Session(None) }

    pub fn is_present(&self) -> bool { self.0.is_some() }

    pub fn active(&self) -> Option<&ActiveSession> { self.0.as_deref() }

    pub fn identity(&self) -> Option<&Identity> { self.0.as_deref().map(|a| &a.identity) }

    pub fn role(&self) -> Option<Role> { self.identity().map(|i| i.role()) }

    fn established(identity: Identity) -> Self {
        Session(Some(Arc::new(ActiveSession {
            session_id: uuid::Uuid::new_v4().to_string(),
            identity,
            issued_at: Utc::now(),
        })))
    }
}

pub type SubscriberId = u64;

type Subscriber = Arc<dyn Fn(&Session) + Send + Sync>;

/// Holds the single current session and publishes every change to subscribers.
///
/// Mutations (`authenticate`, `register`, `terminate`) are serialized: the replacement and the
/// round of notifications for one call complete before the next call starts. Readers take a
/// snapshot under a read lock, so they see either the old or the new session, never a mix.
/// Subscribers run on the mutating thread before the call returns; they may read the store.
/// A subscriber may also mutate it: the nested change is published to everyone at once and
/// the interrupted round stops there, so nobody is left holding the superseded session.
pub struct SessionStore {
    provider: Box<dyn AuthProvider>,
    current: RwLock<Session>,
    // Bumped with every replacement; a notification round ends when it moves
    generation: AtomicU64,
    subscribers: RwLock<Vec<(SubscriberId, Subscriber)>>,
    next_subscriber: AtomicU64,
    mutation: ReentrantMutex<()>,
}

impl Default for SessionStore {
    fn default() -> Self { Self::new(Box::new(MockAuthProvider)) }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &*self.current.read())
            .field("subscribers", &self.subscribers.read().len())
            .finish()
    }
}

impl SessionStore {
    pub fn new(provider: Box<dyn AuthProvider>) -> Self {
        Self {
            provider,
            current: RwLock::new(Session::absent()),
            generation: AtomicU64::new(0),
            subscribers: RwLock::new(Vec::new()),
            next_subscriber: AtomicU64::new(1),
            mutation: ReentrantMutex::new(()),
        }
    }

    pub fn shared(provider: Box<dyn AuthProvider>) -> Arc<Self> { Arc::new(Self::new(provider)) }

    /// Log in. Display name comes from the provider (the mock uses the email's local part).
    /// On provider failure the current session is left untouched.
    pub fn authenticate(&self, email: &str, password: &str, role: Role) -> AppResult<Session> {
        let _guard = self.mutation.lock();
        let req = LoginRequest { email: email.to_string(), password: password.to_string(), role };
        let identity = self.provider.login(&req)?;
        Ok(self.replace(Session::established(identity), "login"))
    }

    /// Create an account and log in as it. Display name is `name` as given.
    pub fn register(&self, name: &str, email: &str, password: &str, role: Role) -> AppResult<Session> {
        let _guard = self.mutation.lock();
        let req = SignupRequest { name: name.to_string(), email: email.to_string(), password: password.to_string(), role };
        let identity = self.provider.signup(&req)?;
        Ok(self.replace(Session::established(identity), "signup"))
    }

    /// Log out. A no-op when nobody is logged in.
    pub fn terminate(&self) {
        let _guard = self.mutation.lock();
        if !self.current.read().is_present() {
            debug!(target: "session", "session.terminate no active session");
            return;
        }
        self.replace(Session::absent(), "logout");
    }

    pub fn current_session(&self) -> Session { self.current.read().clone() }

    pub fn subscribe<F>(&self, f: F) -> SubscriberId
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let id = self.next_subscriber.fetch_add(1, Ordering::Relaxed);
        self.subscribers.write().push((id, Arc::new(f)));
        debug!(target: "session", "session.subscribe id={}", id);
        id
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subs = self.subscribers.write();
        let before = subs.len();
        subs.retain(|(sid, _)| *sid != id);
        before != subs.len()
    }

    pub fn subscriber_count(&self) -> usize { self.subscribers.read().len() }

    fn replace(&self, next: Session, reason: &str) -> Session {
        let (previous, generation) = {
            let mut slot = self.current.write();
            let previous = std::mem::replace(&mut *slot, next.clone());
            (previous, self.generation.fetch_add(1, Ordering::AcqRel) + 1)
        };
        match (previous.active(), next.active()) {
            (_, Some(a)) => info!(
                target: "session",
                "session.{} user={} role={} sid={}",
                reason, a.identity.display_name(), a.identity.role(), a.session_id
            ),
            (Some(p), None) => info!(target: "session", "session.{} user={} sid={}", reason, p.identity.display_name(), p.session_id),
            (None, None) => {}
        }
        // Snapshot so subscribers can (un)subscribe while being notified
        let subs: Vec<Subscriber> = self.subscribers.read().iter().map(|(_, s)| s.clone()).collect();
        for s in subs {
            if self.generation.load(Ordering::Acquire) != generation {
                debug!(target: "session", "session.{} superseded during notification", reason);
                break;
            }
            s(&next);
        }
        next
    }
}
