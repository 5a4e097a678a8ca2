//! # PostgREST client for the hosted backend
//!
//! [`SupabaseClient`] implements [`RemoteData`] against
//! `{SUPABASE_URL}/rest/v1/{table}` with [`reqwest`], which uses `fetch` on WASM
//! and hyper on native targets.
//!
//! ## Request shape
//!
//! | Operation | HTTP | Query |
//! |-----------|------|-------|
//! | `select_one` | `GET` | `select=*`, filters, `limit=1` |
//! | `select_many` | `GET` | `select=*`, filters, `order=<col>.<asc\|desc>` |
//! | `insert` | `POST` + `Prefer: return=representation` | |
//! | `update` | `PATCH` + `Prefer: return=representation` | filters |
//! | `delete` | `DELETE` + `Prefer: return=representation` | filters |
//!
//! Filters become `column=eq.value`. `return=representation` makes writes echo
//! the affected rows, which is how `update`/`delete` count them.
//!
//! ## Authorisation
//!
//! Every request carries the project's `apikey`. The bearer token is the
//! signed-in user's access token when the shared [`TokenHandle`] holds one
//! (written by [`crate::AuthService`]), otherwise the anon key.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::SupabaseConfig;
use crate::error::RemoteError;
use crate::remote::{Filter, Order, RemoteData};

/// The access token shared between the auth service and the data client.
#[derive(Clone, Debug, Default)]
pub struct TokenHandle(Arc<RwLock<Option<String>>>);

impl TokenHandle {
    pub fn get(&self) -> Option<String> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, token: Option<String>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

/// Table client for the hosted backend.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: SupabaseConfig,
    token: TokenHandle,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig, token: TokenHandle) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token,
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let bearer = self
            .token
            .get()
            .unwrap_or_else(|| self.config.anon_key.clone());
        self.http
            .request(method, self.config.rest_url(table))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    fn write_request(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, table)
            .header("Prefer", "return=representation")
    }
}

impl RemoteData for SupabaseClient {
    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: &Filter,
    ) -> Result<Option<T>, RemoteError> {
        let mut query = select_query(filter, None);
        query.push(("limit".to_string(), "1".to_string()));
        let response = send(self.request(Method::GET, table).query(&query)).await?;
        let rows: Vec<T> = response.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn select_many<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<&Order>,
    ) -> Result<Vec<T>, RemoteError> {
        let query = select_query(filter, order);
        let response = send(self.request(Method::GET, table).query(&query)).await?;
        Ok(response.json().await?)
    }

    async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        record: &T,
    ) -> Result<R, RemoteError> {
        let request = self.write_request(Method::POST, table).json(record);
        let rows: Vec<R> = send(request).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RemoteError::decode(format!("insert into {table} returned no row")))
    }

    async fn update<T: Serialize>(
        &self,
        table: &str,
        filter: &Filter,
        partial: &T,
    ) -> Result<usize, RemoteError> {
        if filter.conditions().is_empty() {
            return Err(RemoteError::UnfilteredWrite("update"));
        }
        let request = self
            .write_request(Method::PATCH, table)
            .query(&filter_query(filter))
            .json(partial);
        let rows: Vec<serde_json::Value> = send(request).await?.json().await?;
        Ok(rows.len())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<usize, RemoteError> {
        if filter.conditions().is_empty() {
            return Err(RemoteError::UnfilteredWrite("delete"));
        }
        let request = self
            .write_request(Method::DELETE, table)
            .query(&filter_query(filter));
        let rows: Vec<serde_json::Value> = send(request).await?.json().await?;
        Ok(rows.len())
    }
}

/// `column=eq.value` pairs; reqwest percent-encodes them.
fn filter_query(filter: &Filter) -> Vec<(String, String)> {
    filter
        .conditions()
        .iter()
        .map(|(column, value)| (column.clone(), format!("eq.{value}")))
        .collect()
}

fn select_query(filter: &Filter, order: Option<&Order>) -> Vec<(String, String)> {
    let mut query = vec![("select".to_string(), "*".to_string())];
    query.extend(filter_query(filter));
    if let Some(order) = order {
        let direction = if order.ascending { "asc" } else { "desc" };
        query.push(("order".to_string(), format!("{}.{direction}", order.column)));
    }
    query
}

/// Send a request and turn non-success answers into [`RemoteError::Rejected`].
pub(crate) async fn send(request: RequestBuilder) -> Result<Response, RemoteError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Rejected {
        status: status.as_u16(),
        message: error_message(&body).unwrap_or_else(|| status.to_string()),
    })
}

/// Error bodies of PostgREST (`message`) and GoTrue (`msg`, `error_description`).
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error)
        .filter(|m| !m.is_empty())
}
