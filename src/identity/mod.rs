//! Identity and session management for the portal.
//! Keep the public surface thin and split implementation across sub-modules.

mod principal;
mod provider;
mod role;
mod session;

pub use principal::{display_name_from_email, Identity};
pub use provider::{AuthProvider, LoginRequest, MockAuthProvider, SignupRequest};
pub use role::Role;
pub use session::{ActiveSession, Session, SessionStore, SubscriberId};
