use std::future::Future;
use std::sync::Arc;

use store::{clock, KeyValueStore};
use tokio::sync::watch;

use super::gotrue::AuthBackend;
use super::session::{fragment_error, AuthUser, SessionState, StoredSession, SESSION_KEY};
use crate::error::{AuthError, RemoteError, Unauthorized};
use crate::supabase::TokenHandle;

/// Owns the session of this tab and publishes its changes.
///
/// Constructed once per app and shared; clones share the same state channel,
/// storage and token.
#[derive(Clone)]
pub struct AuthService<B, K> {
    backend: B,
    storage: K,
    token: TokenHandle,
    state: Arc<watch::Sender<SessionState>>,
}

impl<B: AuthBackend, K: KeyValueStore> AuthService<B, K> {
    /// `token` is the handle the data client reads its bearer token from.
    pub fn new(backend: B, storage: K, token: TokenHandle) -> Self {
        let (state, _) = watch::channel(SessionState::Resolving);
        Self {
            backend,
            storage,
            token,
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Work out who is signed in and publish it.
    ///
    /// A fragment carrying `access_token` (the login link landing) replaces the
    /// stored session. Expired tokens are refreshed. A session the backend
    /// rejects is removed; one that could not be checked is kept for the next
    /// attempt but counts as signed out.
    pub async fn resolve(&self, url_fragment: Option<&str>) -> SessionState {
        let now = now_secs();
        if let Some(fragment) = url_fragment {
            if let Some(error) = fragment_error(fragment) {
                tracing::warn!(%error, "login link was not accepted");
            }
            if let Some(session) = StoredSession::from_fragment(fragment, now) {
                tracing::info!("session from login link");
                self.store(&session);
            }
        }

        let user = match self.load() {
            Some(session) => self.verify(session, now).await,
            None => None,
        };
        match &user {
            Some(user) => tracing::info!(email = %user.email, "session resolved"),
            None => tracing::info!("no session"),
        }
        self.publish(SessionState::Resolved(user))
    }

    /// Ask the backend to email a sign-in link. Returns the trimmed address.
    pub async fn request_login_link(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<String, AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::EmptyEmail);
        }
        self.backend.send_magic_link(email, redirect_to).await?;
        tracing::info!(%email, "login link requested");
        Ok(email.to_string())
    }

    /// Revoke the session remotely when possible; locally it is always cleared.
    pub async fn sign_out(&self) {
        if let Some(session) = self.load() {
            if let Err(e) = self.backend.sign_out(&session.access_token).await {
                tracing::warn!(error = %e, "remote sign-out failed");
            }
        }
        self.clear();
        self.publish(SessionState::Resolved(None));
    }

    /// Run an admin call with a current access token.
    ///
    /// A stored session past its expiry is refreshed before the call. A call
    /// the backend answers with 401 is made once more after a refresh. When
    /// the refresh is refused the tab is signed out and the first error is
    /// returned.
    pub async fn authorized<T, E, F, Fut>(&self, mut call: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Unauthorized,
    {
        if self.load().is_some_and(|s| s.is_expired(now_secs())) {
            self.refresh_session().await;
        }
        match call().await {
            Err(e) if e.is_unauthorized() => {
                tracing::info!("access token refused, refreshing");
                if self.refresh_session().await {
                    call().await
                } else {
                    Err(e)
                }
            }
            result => result,
        }
    }

    /// Trade the stored refresh token for new tokens. Returns whether the data
    /// client now holds a fresh access token.
    ///
    /// A refused refresh signs the tab out. An unreachable backend leaves the
    /// session and the current token as they are.
    pub async fn refresh_session(&self) -> bool {
        let Some(session) = self.load() else {
            return false;
        };
        match self.renew(&session).await {
            Ok(renewed) => {
                self.token.set(Some(renewed.access_token));
                true
            }
            Err(error) if rejects_session(&error) => {
                tracing::info!(%error, "session refresh refused, signing out");
                self.clear();
                self.publish(SessionState::Resolved(None));
                false
            }
            Err(error) => {
                tracing::warn!(%error, "could not refresh session");
                false
            }
        }
    }

    async fn renew(&self, session: &StoredSession) -> Result<StoredSession, RemoteError> {
        let grant = self.backend.refresh(&session.refresh_token).await?;
        let renewed = grant.into_session(now_secs());
        self.store(&renewed);
        tracing::info!("session refreshed");
        Ok(renewed)
    }

    async fn verify(&self, mut session: StoredSession, now: i64) -> Option<AuthUser> {
        if session.is_expired(now) {
            match self.renew(&session).await {
                Ok(renewed) => session = renewed,
                Err(e) => return self.give_up(e),
            }
        }
        match self.backend.get_user(&session.access_token).await {
            Ok(user) => {
                self.token.set(Some(session.access_token));
                Some(user)
            }
            Err(e) => self.give_up(e),
        }
    }

    fn give_up(&self, error: RemoteError) -> Option<AuthUser> {
        if rejects_session(&error) {
            tracing::info!(%error, "stored session rejected");
            self.clear();
        } else {
            tracing::warn!(%error, "could not verify session");
            self.token.set(None);
        }
        None
    }

    fn publish(&self, state: SessionState) -> SessionState {
        self.state.send_replace(state.clone());
        state
    }

    fn load(&self) -> Option<StoredSession> {
        let text = self.storage.get_item(SESSION_KEY)?;
        match serde_json::from_str(&text) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed stored session");
                self.storage.remove_item(SESSION_KEY);
                None
            }
        }
    }

    fn store(&self, session: &StoredSession) {
        match serde_json::to_string(session) {
            Ok(text) => self.storage.set_item(SESSION_KEY, &text),
            Err(e) => tracing::warn!(error = %e, "could not encode session"),
        }
    }

    fn clear(&self) {
        self.storage.remove_item(SESSION_KEY);
        self.token.set(None);
    }
}

/// 4xx answers mean the tokens themselves are bad; anything else may be transient.
fn rejects_session(error: &RemoteError) -> bool {
    matches!(error, RemoteError::Rejected { status, .. } if (400..500).contains(status))
}

fn now_secs() -> i64 {
    clock::now_millis() / 1000
}
