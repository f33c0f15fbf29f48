//! The portal front end wired together: one session store shared by reference, the access
//! gate, the current location, the top bar and a dashboard shell that exists only while
//! someone is logged in.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::PortalConfig;
use crate::error::{AppResult, Notice};
use crate::forms::{LoginForm, SignupForm};
use crate::gate::{AccessGate, Gated};
use crate::identity::{Session, SessionStore, SubscriberId};
use crate::navigation::{account_actions, AccountAction, PublicLink, PUBLIC_LINKS};
use crate::routes::Route;
use crate::shell::{NavbarState, ShellEvent, ShellState, ShellView};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavbarView {
    pub links: &'static [PublicLink],
    pub account: Vec<AccountAction>,
    pub user_name: Option<String>,
    pub mobile_menu_open: bool,
}

impl NavbarView {
    fn build(session: &Session, state: NavbarState, login_path: &str) -> Self {
        NavbarView {
            links: &PUBLIC_LINKS,
            account: account_actions(session, login_path),
            user_name: session.identity().map(|i| i.display_name().to_string()),
            mobile_menu_open: state.mobile_menu_open,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Public { location: String, route: Route, navbar: NavbarView },
    Protected { location: String, route: Route, shell: ShellView },
    /// A protected location with no session under the render-nothing policy.
    Blank { location: String },
    Redirect { to: String, return_to: Option<String> },
    NotFound { location: String },
}

/// Outcome of a login or signup submitted through the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landed {
    pub notice: Notice,
    pub view: View,
}

pub struct Portal {
    store: Arc<SessionStore>,
    gate: AccessGate,
    landing_path: String,
    login_path: String,
    location: String,
    navbar: NavbarState,
    // Reset from `?role=` each time the signup surface is opened
    signup_form: SignupForm,
    // Written by the session subscription; None means the shell is unmounted
    shell: Arc<Mutex<Option<ShellState>>>,
    pending_return: Option<String>,
    subscription: SubscriberId,
}

impl Portal {
    pub fn new(store: Arc<SessionStore>, config: &PortalConfig) -> Self {
        let shell = Arc::new(Mutex::new(store.current_session().is_present().then(ShellState::default)));
        let sink = shell.clone();
        let subscription = store.subscribe(move |s| {
            let mut slot = sink.lock();
            match (s.is_present(), slot.is_some()) {
                (true, false) => {
                    *slot = Some(ShellState::default());
                    debug!(target: "shell", "shell.mount");
                }
                (false, true) => {
                    *slot = None;
                    debug!(target: "shell", "shell.unmount");
                }
                _ => {}
            }
        });
        Self {
            store,
            gate: AccessGate::new(config.gate_policy.clone()),
            landing_path: config.landing_path.clone(),
            login_path: config.login_path.clone(),
            location: config.landing_path.clone(),
            navbar: NavbarState::default(),
            signup_form: SignupForm::with_role_param(None),
            shell,
            pending_return: None,
            subscription,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> { &self.store }

    pub fn session(&self) -> Session { self.store.current_session() }

    pub fn location(&self) -> &str { &self.location }

    pub fn shell_state(&self) -> Option<ShellState> { *self.shell.lock() }

    pub fn pending_return(&self) -> Option<&str> { self.pending_return.as_deref() }

    /// The signup surface as last opened: empty fields, role picker preset from `?role=`.
    pub fn signup_form(&self) -> &SignupForm { &self.signup_form }

    fn route(&self, location: &str) -> Route { Route::parse_with(location, &self.login_path) }

    /// What the current location looks like right now. Does not change any state.
    pub fn render(&self) -> View { self.view_for(&self.location) }

    fn view_for(&self, location: &str) -> View {
        let route = self.route(location);
        let session = self.store.current_session();
        match route {
            Route::NotFound { .. } => View::NotFound { location: location.to_string() },
            Route::Protected { .. } => {
                let state = self.shell_state().unwrap_or_default();
                match self.gate.guard(&session, location, |id| ShellView::build(state, id, location)) {
                    Gated::Rendered(shell) => View::Protected { location: location.to_string(), route, shell },
                    Gated::Nothing => View::Blank { location: location.to_string() },
                    Gated::Redirect { to, return_to } => View::Redirect { to, return_to },
                }
            }
            _ => View::Public { location: location.to_string(), route, navbar: NavbarView::build(&session, self.navbar, &self.login_path) },
        }
    }

    /// Go to `location`. A redirect from the gate is followed once and the original
    /// location is kept for after login, until the user wanders off somewhere other than
    /// the login or signup surface.
    pub fn navigate(&mut self, location: &str) -> View {
        self.navbar.close();
        let view = self.view_for(location);
        if let View::Redirect { to, return_to } = &view {
            info!(target: "gate", "gate.redirect from={} to={}", location, to);
            if return_to.is_some() {
                self.pending_return = return_to.clone();
            }
            let to = to.clone();
            self.arrive(&to);
            return self.view_for(&to);
        }
        self.arrive(location);
        view
    }

    fn arrive(&mut self, location: &str) {
        match self.route(location) {
            Route::Login => {}
            Route::Signup { role_param } => self.signup_form = SignupForm::with_role_param(role_param.as_deref()),
            _ => {
                if let Some(dropped) = self.pending_return.take() {
                    debug!(target: "gate", "gate.return dropped={} now={}", dropped, location);
                }
            }
        }
        self.location = location.to_string();
    }

    /// Activate a sidebar link: closes the drawer, then navigates.
    pub fn follow_link(&mut self, location: &str) -> View {
        self.dispatch(ShellEvent::NavigateLink);
        self.navigate(location)
    }

    /// Feed a UI event to the mounted shell. Ignored (returns None) when no shell is mounted.
    pub fn dispatch(&mut self, event: ShellEvent) -> Option<ShellState> {
        let mut slot = self.shell.lock();
        let state = slot.as_mut()?;
        state.dispatch(event);
        Some(*state)
    }

    pub fn toggle_navbar_menu(&mut self) -> bool {
        self.navbar.toggle();
        self.navbar.mobile_menu_open
    }

    pub fn login(&mut self, form: &LoginForm) -> AppResult<Landed> {
        let sub = form.submit(&self.store)?;
        let target = self.pending_return.take().unwrap_or(sub.redirect);
        Ok(Landed { notice: sub.notice, view: self.navigate(&target) })
    }

    pub fn signup(&mut self, form: &SignupForm) -> AppResult<Landed> {
        let sub = form.submit(&self.store)?;
        let target = self.pending_return.take().unwrap_or(sub.redirect);
        Ok(Landed { notice: sub.notice, view: self.navigate(&target) })
    }

    /// Log out and return to the landing surface.
    pub fn logout(&mut self) -> View {
        self.store.terminate();
        self.pending_return = None;
        let landing = self.landing_path.clone();
        self.navigate(&landing)
    }
}

impl Drop for Portal {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

impl std::fmt::Debug for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portal")
            .field("location", &self.location)
            .field("gate", &self.gate)
            .field("shell", &self.shell_state())
            .field("pending_return", &self.pending_return)
            .finish()
    }
}
