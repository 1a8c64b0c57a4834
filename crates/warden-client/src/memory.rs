//! In-process logical store.
//!
//! Behaves like the logical API for the operations Warden uses: writes merge
//! into whatever is stored, reads of unknown paths are absent, and deletes
//! remove a path together with everything below it. Every call is recorded
//! and single failures can be injected per method and path.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::{Logical, Secret};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Read,
    Write,
    Delete,
}

/// One recorded call against the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    /// Payload of a write.
    pub data: Option<Map<String, Value>>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<String, Map<String, Value>>,
    calls: Vec<Call>,
    failures: Vec<(Method, String)>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` at `path`, replacing what was there. Not recorded as a
    /// call.
    pub fn insert(&self, path: &str, data: Map<String, Value>) {
        self.lock().entries.insert(path.to_string(), data);
    }

    /// Stored data at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Map<String, Value>> {
        self.lock().entries.get(path).cloned()
    }

    /// Remove `path` and everything below it, as an out-of-band delete would.
    pub fn remove(&self, path: &str) {
        remove_tree(&mut self.lock().entries, path);
    }

    /// Make the next `method` call on `path` fail with a server error.
    pub fn fail_once(&self, method: Method, path: &str) {
        self.lock().failures.push((method, path.to_string()));
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a call and consume a matching injected failure, if any.
    fn begin(
        inner: &mut Inner,
        method: Method,
        path: &str,
        data: Option<&Map<String, Value>>,
    ) -> Result<(), ClientError> {
        inner.calls.push(Call {
            method,
            path: path.to_string(),
            data: data.cloned(),
        });
        let pos = inner
            .failures
            .iter()
            .position(|(m, p)| *m == method && p == path);
        match pos {
            Some(idx) => {
                inner.failures.remove(idx);
                Err(ClientError::Api {
                    status: 500,
                    errors: vec![format!("injected {method:?} failure at {path}")],
                })
            }
            None => Ok(()),
        }
    }
}

fn remove_tree(entries: &mut BTreeMap<String, Map<String, Value>>, path: &str) -> bool {
    let prefix = format!("{path}/");
    let before = entries.len();
    entries.retain(|key, _| key != path && !key.starts_with(&prefix));
    entries.len() != before
}

#[async_trait]
impl Logical for MemoryStore {
    async fn write(
        &self,
        path: &str,
        data: Map<String, Value>,
    ) -> Result<Option<Secret>, ClientError> {
        let mut inner = self.lock();
        Self::begin(&mut inner, Method::Write, path, Some(&data))?;
        inner.entries.entry(path.to_string()).or_default().extend(data);
        Ok(None)
    }

    async fn read(&self, path: &str) -> Result<Option<Secret>, ClientError> {
        let mut inner = self.lock();
        Self::begin(&mut inner, Method::Read, path, None)?;
        Ok(inner.entries.get(path).cloned().map(Secret::from_data))
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let mut inner = self.lock();
        Self::begin(&mut inner, Method::Delete, path, None)?;
        if remove_tree(&mut inner.entries, path) {
            Ok(())
        } else {
            Err(ClientError::Api {
                status: 404,
                errors: Vec::new(),
            })
        }
    }
}
