use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::gotrue::{AuthBackend, TokenGrant};
use super::session::AuthUser;
use crate::error::RemoteError;

#[derive(Debug, Default)]
struct State {
    /// access token -> user
    users: HashMap<String, AuthUser>,
    /// access token -> the one a refresh of its session grants
    renewals: HashMap<String, String>,
    sent: Vec<(String, String)>,
    offline: bool,
}

/// In-memory AuthBackend for testing.
///
/// The refresh token of access token `t` is `r-t`. A refresh grants the same
/// access token again unless [`rotate`](MemoryAuth::rotate) retired it.
#[derive(Clone, Debug, Default)]
pub struct MemoryAuth {
    inner: Arc<Mutex<State>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, access_token: &str, id: &str, email: &str) {
        self.lock().users.insert(
            access_token.to_string(),
            AuthUser {
                id: id.to_string(),
                email: email.to_string(),
            },
        );
    }

    /// Retire `access_token`: it is refused from now on, and refreshing its
    /// session grants `renewed` (with refresh token `r-renewed`).
    pub fn rotate(&self, access_token: &str, renewed: &str) {
        let mut state = self.lock();
        if let Some(user) = state.users.remove(access_token) {
            state.users.insert(renewed.to_string(), user);
        }
        state
            .renewals
            .insert(access_token.to_string(), renewed.to_string());
    }

    /// Refuse `access_token` and every refresh of its session.
    pub fn revoke(&self, access_token: &str) {
        self.lock().users.remove(access_token);
    }

    /// Answer every call with a 503 while set.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// `(email, redirect_to)` of every link sent.
    pub fn sent_links(&self) -> Vec<(String, String)> {
        self.lock().sent.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn online(&self) -> Result<std::sync::MutexGuard<'_, State>, RemoteError> {
        let state = self.lock();
        if state.offline {
            return Err(RemoteError::Rejected {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(state)
    }
}

fn invalid(message: &str) -> RemoteError {
    RemoteError::Rejected {
        status: 401,
        message: message.to_string(),
    }
}

impl AuthBackend for MemoryAuth {
    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<(), RemoteError> {
        self.online()?
            .sent
            .push((email.to_string(), redirect_to.to_string()));
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, RemoteError> {
        self.online()?
            .users
            .get(access_token)
            .cloned()
            .ok_or_else(|| invalid("invalid JWT"))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, RemoteError> {
        let state = self.online()?;
        let previous = refresh_token
            .strip_prefix("r-")
            .ok_or_else(|| invalid("Invalid Refresh Token"))?;
        let access_token = state
            .renewals
            .get(previous)
            .map_or(previous, String::as_str);
        if !state.users.contains_key(access_token) {
            return Err(invalid("Invalid Refresh Token"));
        }
        Ok(TokenGrant {
            access_token: access_token.to_string(),
            refresh_token: format!("r-{access_token}"),
            expires_in: 3600,
            expires_at: None,
        })
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), RemoteError> {
        self.online()?;
        Ok(())
    }
}
