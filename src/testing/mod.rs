use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::Identity;
use crate::config::AppConfig;
use crate::database::{DatabaseError, Record, Store};
use crate::state::AppState;

/// In-memory stand-in for the relational store, keyed by table then id.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, BTreeMap<i64, Record>>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail, to exercise 500 paths.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn seed(&self, table: &str, record: Record) {
        let id = record.get("id").and_then(Value::as_i64).expect("seeded rows need an integer id");
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .insert(id, record);
    }

    pub fn row(&self, table: &str, id: i64) -> Option<Record> {
        self.tables.lock().unwrap().get(table).and_then(|t| t.get(&id).cloned())
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("store unavailable".into()));
        }
        Ok(())
    }

    fn with_table<T>(&self, table: &str, f: impl FnOnce(&mut BTreeMap<i64, Record>) -> T) -> Result<T, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        Ok(f(tables.entry(table.to_string()).or_default()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn count(&self, table: &str) -> Result<i64, DatabaseError> {
        self.with_table(table, |t| t.len() as i64)
    }

    async fn select_page(&self, table: &str, offset: i64, limit: i64) -> Result<Vec<Record>, DatabaseError> {
        self.with_table(table, |t| {
            t.values().skip(offset as usize).take(limit as usize).cloned().collect()
        })
    }

    async fn select_all(&self, table: &str) -> Result<Vec<Record>, DatabaseError> {
        self.with_table(table, |t| t.values().cloned().collect())
    }

    async fn select_by_id(&self, table: &str, id: i64) -> Result<Option<Record>, DatabaseError> {
        self.with_table(table, |t| t.get(&id).cloned())
    }

    async fn select_by_column(&self, table: &str, column: &str, value: i64) -> Result<Vec<Record>, DatabaseError> {
        self.with_table(table, |t| {
            t.values()
                .filter(|r| r.get(column).and_then(Value::as_i64) == Some(value))
                .cloned()
                .collect()
        })
    }

    async fn insert(&self, table: &str, record: &Record) -> Result<i64, DatabaseError> {
        self.with_table(table, |t| {
            let id = record
                .get("id")
                .and_then(Value::as_i64)
                .unwrap_or_else(|| t.keys().next_back().map_or(1, |last| last + 1));
            let mut row = record.clone();
            row.insert("id".into(), id.into());
            t.insert(id, row);
            id
        })
    }

    async fn update(&self, table: &str, id: i64, record: &Record) -> Result<bool, DatabaseError> {
        self.with_table(table, |t| match t.get_mut(&id) {
            Some(row) => {
                for (k, v) in record {
                    row.insert(k.clone(), v.clone());
                }
                true
            }
            None => false,
        })
    }

    async fn delete(&self, table: &str, id: i64) -> Result<bool, DatabaseError> {
        self.with_table(table, |t| t.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.check()
    }
}

pub fn record(value: Value) -> Record {
    value.as_object().cloned().expect("record literal must be a JSON object")
}

/// Router wired to a fresh in-memory store with development defaults.
pub fn test_app() -> (Router, Arc<MemoryStore>, AppState) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(AppConfig::development(), store.clone());
    (crate::app(state.clone()), store, state)
}

pub fn bearer(state: &AppState, id: &str) -> String {
    let token = state.tokens.generate(&Identity::new(id)).expect("token");
    format!("Bearer {}", token)
}

/// Send one request through the router and decode the JSON body (Null when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
