use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RemoteError;
use crate::remote::{Filter, Order, RemoteData};

/// Kind of call recorded by [`MemoryRemote`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    SelectOne,
    SelectMany,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Default)]
struct Tables {
    rows: HashMap<String, Vec<Map<String, Value>>>,
    calls: Vec<(Op, String)>,
    rejected: HashSet<String>,
    next_id: u64,
    last_created: Option<DateTime<Utc>>,
}

/// In-memory RemoteData for testing and offline demos.
///
/// Inserts get an `id` and a strictly increasing `created_at` unless the record
/// already has them, the way the backend's column defaults would.
#[derive(Clone, Debug, Default)]
pub struct MemoryRemote {
    inner: Arc<Mutex<Tables>>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later write to `table` fail with [`RemoteError::Rejected`].
    pub fn reject_writes(&self, table: &str) {
        self.lock().rejected.insert(table.to_string());
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<(Op, String)> {
        self.lock().calls.clone()
    }

    pub fn count_calls(&self, op: Op, table: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|(o, t)| *o == op && t == table)
            .count()
    }

    /// Raw rows of a table, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock()
            .rows
            .get(table)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Tables {
    fn record(&mut self, op: Op, table: &str) {
        self.calls.push((op, table.to_string()));
    }

    fn check_writable(&self, table: &str) -> Result<(), RemoteError> {
        if self.rejected.contains(table) {
            return Err(RemoteError::Rejected {
                status: 400,
                message: format!("writes to {table} are rejected"),
            });
        }
        Ok(())
    }

    fn matching(&self, table: &str, filter: &Filter) -> Vec<Map<String, Value>> {
        self.rows
            .get(table)
            .map(|rows| rows.iter().filter(|r| matches(r, filter)).cloned().collect())
            .unwrap_or_default()
    }

    fn next_created_at(&mut self) -> String {
        let mut now = Utc::now();
        if let Some(last) = self.last_created {
            if now <= last {
                now = last + chrono::Duration::milliseconds(1);
            }
        }
        self.last_created = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

fn matches(row: &Map<String, Value>, filter: &Filter) -> bool {
    filter.conditions().iter().all(|(column, expected)| match row.get(column) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == *expected,
    })
}

fn sort_key(row: &Map<String, Value>, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, RemoteError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(RemoteError::decode(format!("expected an object, got {other}"))),
    }
}

fn from_object<T: DeserializeOwned>(row: Map<String, Value>) -> Result<T, RemoteError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

impl RemoteData for MemoryRemote {
    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: &Filter,
    ) -> Result<Option<T>, RemoteError> {
        let mut tables = self.lock();
        tables.record(Op::SelectOne, table);
        tables
            .matching(table, filter)
            .into_iter()
            .next()
            .map(from_object)
            .transpose()
    }

    async fn select_many<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<&Order>,
    ) -> Result<Vec<T>, RemoteError> {
        let mut tables = self.lock();
        tables.record(Op::SelectMany, table);
        let mut rows = tables.matching(table, filter);
        if let Some(order) = order {
            // Stable both ways: rows with equal keys keep insertion order.
            if order.ascending {
                rows.sort_by_key(|r| sort_key(r, &order.column));
            } else {
                rows.sort_by(|a, b| sort_key(b, &order.column).cmp(&sort_key(a, &order.column)));
            }
        }
        rows.into_iter().map(from_object).collect()
    }

    async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        record: &T,
    ) -> Result<R, RemoteError> {
        let mut tables = self.lock();
        tables.record(Op::Insert, table);
        tables.check_writable(table)?;

        let mut row = to_object(record)?;
        if !row.contains_key("id") {
            tables.next_id += 1;
            let id = format!("{table}-{}", tables.next_id);
            row.insert("id".to_string(), Value::String(id));
        }
        if !row.contains_key("created_at") {
            let created_at = tables.next_created_at();
            row.insert("created_at".to_string(), Value::String(created_at));
        }
        tables
            .rows
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        from_object(row)
    }

    async fn update<T: Serialize>(
        &self,
        table: &str,
        filter: &Filter,
        partial: &T,
    ) -> Result<usize, RemoteError> {
        let mut tables = self.lock();
        tables.record(Op::Update, table);
        tables.check_writable(table)?;
        if filter.conditions().is_empty() {
            return Err(RemoteError::UnfilteredWrite("update"));
        }

        let changes = to_object(partial)?;
        let mut count = 0;
        if let Some(rows) = tables.rows.get_mut(table) {
            for row in rows.iter_mut().filter(|r| matches(r, filter)) {
                for (key, value) in &changes {
                    row.insert(key.clone(), value.clone());
                }
                count += 1;
            }
        }
        Ok(count)
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<usize, RemoteError> {
        let mut tables = self.lock();
        tables.record(Op::Delete, table);
        tables.check_writable(table)?;
        if filter.conditions().is_empty() {
            return Err(RemoteError::UnfilteredWrite("delete"));
        }

        let Some(rows) = tables.rows.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|r| !matches(r, filter));
        Ok(before - rows.len())
    }
}
