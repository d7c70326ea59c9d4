//! In-memory realtime store
//!
//! Mirrors the parts of realtime database behavior the repository relies
//! on: chronologically sortable push keys, server timestamp resolution and
//! `null` for empty paths. Used by tests and `guestbook serve --in-memory`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde_json::{Map, Value};

use super::{validate_path, RealtimeStore, ServerValue, StoreError};

/// Push key alphabet, in ASCII order so keys sort by creation time
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Generates 20-character push keys: 8 chars of timestamp, 12 random.
///
/// Keys generated in the same millisecond increment the random part, so
/// ordering holds even for bursts.
#[derive(Debug, Default)]
pub struct PushIdGenerator {
    last_time: i64,
    last_rand: [u8; 12],
}

impl PushIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now_ms: i64) -> String {
        // Never go backwards, even if the clock does
        let now_ms = now_ms.max(self.last_time);
        let duplicate = now_ms == self.last_time;
        self.last_time = now_ms;

        let mut time_chars = [0u8; 8];
        let mut t = now_ms;
        for slot in time_chars.iter_mut().rev() {
            *slot = PUSH_CHARS[(t % 64) as usize];
            t /= 64;
        }

        if duplicate {
            for digit in self.last_rand.iter_mut().rev() {
                if *digit == 63 {
                    *digit = 0;
                } else {
                    *digit += 1;
                    break;
                }
            }
        } else {
            let mut rng = rand::thread_rng();
            for digit in self.last_rand.iter_mut() {
                *digit = rng.gen_range(0..64);
            }
        }

        let mut id = String::with_capacity(20);
        id.extend(time_chars.iter().map(|&c| c as char));
        id.extend(self.last_rand.iter().map(|&d| PUSH_CHARS[d as usize] as char));
        id
    }
}

/// Realtime store held in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, BTreeMap<String, Value>>>,
    ids: Mutex<PushIdGenerator>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a raw value at `path/key`, bypassing placeholder resolution.
    ///
    /// Lets tests seed records a well-behaved writer would never produce.
    pub fn insert(&self, path: &str, key: &str, value: Value) -> Result<(), StoreError> {
        let path = validate_path(path)?;
        let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections
            .entry(path.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
        Ok(())
    }

    /// Raw child stored at `path/key`.
    pub fn child(&self, path: &str, key: &str) -> Option<Value> {
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections.get(path)?.get(key).cloned()
    }

    /// Number of children under `path`.
    pub fn len(&self, path: &str) -> usize {
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections.get(path).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, path: &str) -> bool {
        self.len(path) == 0
    }
}

/// Replace server value placeholders with their committed values.
fn resolve_server_values(value: Value, now_ms: i64) -> Value {
    if let Some(ServerValue::Timestamp) = ServerValue::from_value(&value) {
        return Value::from(now_ms);
    }

    match value {
        Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, resolve_server_values(v, now_ms)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| resolve_server_values(v, now_ms))
                .collect(),
        ),
        other => other,
    }
}

#[async_trait]
impl RealtimeStore for MemoryStore {
    async fn push(&self, path: &str, value: Value) -> Result<Option<String>, StoreError> {
        let path = validate_path(path)?;
        let now_ms = Utc::now().timestamp_millis();

        let key = self
            .ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .next_id(now_ms);
        let value = resolve_server_values(value, now_ms);

        let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        collections
            .entry(path.to_owned())
            .or_default()
            .insert(key.clone(), value);

        Ok(Some(key))
    }

    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let path = validate_path(path)?;
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());

        Ok(collections
            .get(path)
            .filter(|children| !children.is_empty())
            .map(|children| {
                Value::Object(
                    children
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                )
            }))
    }
}
