//! # Passwordless email auth against GoTrue
//!
//! [`AuthBackend`] is the slice of the backend's auth API the app uses;
//! [`SupabaseAuth`] implements it at `{SUPABASE_URL}/auth/v1`.
//!
//! | Call | Endpoint |
//! |------|----------|
//! | [`send_magic_link`](AuthBackend::send_magic_link) | `POST /otp` with `create_user: true` |
//! | [`get_user`](AuthBackend::get_user) | `GET /user` |
//! | [`refresh`](AuthBackend::refresh) | `POST /token?grant_type=refresh_token` |
//! | [`sign_out`](AuthBackend::sign_out) | `POST /logout` |

use std::future::Future;

use serde::{Deserialize, Serialize};

use super::session::{AuthUser, StoredSession};
use crate::config::SupabaseConfig;
use crate::error::RemoteError;
use crate::supabase::send;

/// Token grant returned by a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl TokenGrant {
    pub fn into_session(self, now_secs: i64) -> StoredSession {
        StoredSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at.unwrap_or(now_secs + self.expires_in),
        }
    }
}

pub trait AuthBackend {
    /// Email a sign-in link that lands on `redirect_to`.
    fn send_magic_link(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> impl Future<Output = Result<(), RemoteError>>;

    fn get_user(&self, access_token: &str) -> impl Future<Output = Result<AuthUser, RemoteError>>;

    fn refresh(&self, refresh_token: &str)
        -> impl Future<Output = Result<TokenGrant, RemoteError>>;

    /// Revoke the session server-side.
    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<(), RemoteError>>;
}

#[derive(Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    create_user: bool,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// GoTrue client of the hosted backend.
#[derive(Clone, Debug)]
pub struct SupabaseAuth {
    http: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabaseAuth {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn post(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.config.auth_url(endpoint))
            .header("apikey", &self.config.anon_key)
    }
}

impl AuthBackend for SupabaseAuth {
    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<(), RemoteError> {
        let request = self
            .post("otp")
            .query(&[("redirect_to", redirect_to)])
            .json(&OtpRequest {
                email,
                create_user: true,
            });
        send(request).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, RemoteError> {
        let request = self
            .http
            .get(self.config.auth_url("user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token);
        Ok(send(request).await?.json().await?)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, RemoteError> {
        let request = self
            .post("token")
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshRequest { refresh_token });
        Ok(send(request).await?.json().await?)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), RemoteError> {
        send(self.post("logout").bearer_auth(access_token)).await?;
        Ok(())
    }
}
