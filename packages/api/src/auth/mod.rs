//! Passwordless email authentication and the tab's session.

mod gotrue;
#[cfg(test)]
mod memory;
mod service;
mod session;

pub use gotrue::{AuthBackend, SupabaseAuth, TokenGrant};
pub use service::AuthService;
pub use session::{fragment_error, AuthUser, SessionState, StoredSession, SESSION_KEY};
