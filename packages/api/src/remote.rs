//! # Remote data service contract
//!
//! [`RemoteData`] is the table-style CRUD surface the rest of the app needs
//! from the hosted backend. [`crate::SupabaseClient`] implements it over
//! PostgREST, [`crate::MemoryRemote`] over in-memory JSON rows.
//!
//! Every call is a single request: no retry, no client-side timeout. A failure
//! comes back as a [`RemoteError`] to the caller, which decides what to show.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RemoteError;

pub const BUSINESS_TABLE: &str = "business";
pub const POSTS_TABLE: &str = "posts";

/// Conjunction of column equality tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    pub fn eq(column: &str, value: impl Into<String>) -> Self {
        Self::default().and_eq(column, value)
    }

    pub fn and_eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.conditions.push((column.to_string(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }
}

/// Sort order of a multi-row select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            ascending: false,
        }
    }

    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            ascending: true,
        }
    }
}

/// Async CRUD over named tables.
pub trait RemoteData {
    /// First matching row, if any.
    fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: &Filter,
    ) -> impl Future<Output = Result<Option<T>, RemoteError>>;

    fn select_many<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<&Order>,
    ) -> impl Future<Output = Result<Vec<T>, RemoteError>>;

    /// Insert one row and return it as stored (with backend-assigned columns).
    fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        record: &T,
    ) -> impl Future<Output = Result<R, RemoteError>>;

    /// Apply `partial` to every matching row; returns how many rows changed.
    fn update<T: Serialize>(
        &self,
        table: &str,
        filter: &Filter,
        partial: &T,
    ) -> impl Future<Output = Result<usize, RemoteError>>;

    /// Delete every matching row; returns how many rows went away.
    fn delete(
        &self,
        table: &str,
        filter: &Filter,
    ) -> impl Future<Output = Result<usize, RemoteError>>;
}
