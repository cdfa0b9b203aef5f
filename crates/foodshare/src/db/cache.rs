use foodshare_core::{ResultTable, Value};

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

/// Read-query results keyed by statement text and bound parameters.
#[derive(Debug)]
pub(super) struct QueryCache {
    enabled: bool,
    entries: Mutex<HashMap<Key, Arc<ResultTable>>>,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct Key {
    sql: String,
    params: Vec<Param>,
}

/// Hashable form of a [`Value`]; floats compare by bit pattern.
#[derive(Debug, PartialEq, Eq, Hash)]
enum Param {
    Null,
    Integer(i64),
    Real(u64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<&Value> for Param {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Param::Null,
            Value::Integer(v) => Param::Integer(*v),
            Value::Real(v) => Param::Real(v.to_bits()),
            Value::Text(v) => Param::Text(v.clone()),
            Value::Blob(v) => Param::Blob(v.clone()),
        }
    }
}

impl Key {
    fn new(sql: &str, params: &[Value]) -> Self {
        Self {
            sql: sql.to_string(),
            params: params.iter().map(Param::from).collect(),
        }
    }
}

impl QueryCache {
    pub(super) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Mutex::default(),
        }
    }

    pub(super) fn get(&self, sql: &str, params: &[Value]) -> Option<Arc<ResultTable>> {
        if !self.enabled {
            return None;
        }
        self.lock().get(&Key::new(sql, params)).cloned()
    }

    pub(super) fn insert(&self, sql: &str, params: &[Value], table: Arc<ResultTable>) {
        if self.enabled {
            self.lock().insert(Key::new(sql, params), table);
        }
    }

    pub(super) fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Key, Arc<ResultTable>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
