//! Engine facade over the key-value store.
//!
//! One handle owns the store behind a mutex; the concern-specific
//! operations live in submodules as `impl` blocks on [`Engine`]. Every
//! mutation is a strict load-mutate-store executed under the lock, so an
//! event that fires several reward paths (task completion granting base
//! XP plus achievement bonuses) commits as a single transaction and
//! cannot lose updates to an interleaved grant.

pub mod gamification;
pub mod prefs;
pub mod sessions;
pub mod tasks;

use crate::analytics::{self, ProductivityTrends, TaskAnalytics, WeekComparison};
use crate::error::{EngineError, Result};
use crate::insights::{self, Insight};
use crate::store::{KeyValue, MemoryStore};
use chrono::{DateTime, Local};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Mutex;
use tracing::warn;

pub struct Engine<S: KeyValue> {
    store: Mutex<S>,
}

impl Engine<MemoryStore> {
    /// Engine over a fresh in-memory store (for testing).
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: KeyValue> Engine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Execute a function with exclusive access to the store.
    pub(crate) fn with_store<T>(&self, f: impl FnOnce(&mut S) -> T) -> T {
        let mut store = self.store.lock().unwrap();
        f(&mut store)
    }

    /// Load the value under `key`, falling back to the default state on a
    /// missing key, a read failure, or a malformed payload. Read-side
    /// problems are never fatal.
    pub(crate) fn load_or_default<T: DeserializeOwned + Default>(
        store: &S,
        key: &'static str,
    ) -> T {
        match store.get(key) {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key, error = %e, "malformed persisted value, using defaults");
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(e) => {
                warn!(key, error = %e, "storage read failed, using defaults");
                T::default()
            }
        }
    }

    /// Serialize and write `value` under `key`.
    pub(crate) fn persist<T: Serialize>(
        store: &mut S,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| EngineError::store(key, e.into()))?;
        store.set(key, &bytes).map_err(|e| EngineError::store(key, e))
    }
}

// Read-time composition over the task collection and the ledgers. These
// are pure aggregations; nothing here mutates persisted state.
impl<S: KeyValue> Engine<S> {
    pub fn task_analytics(&self) -> TaskAnalytics {
        self.task_analytics_at(Local::now())
    }

    pub fn task_analytics_at(&self, now: DateTime<Local>) -> TaskAnalytics {
        analytics::task_analytics(&self.tasks(), now)
    }

    pub fn productivity_trends(&self) -> ProductivityTrends {
        self.productivity_trends_at(Local::now())
    }

    pub fn productivity_trends_at(&self, now: DateTime<Local>) -> ProductivityTrends {
        analytics::productivity_trends(&self.tasks(), now)
    }

    pub fn week_comparison(&self) -> WeekComparison {
        self.week_comparison_at(Local::now())
    }

    pub fn week_comparison_at(&self, now: DateTime<Local>) -> WeekComparison {
        analytics::week_comparison(&self.tasks(), now)
    }

    /// Composite 0-100 productivity score.
    pub fn productivity_score(&self) -> u32 {
        self.productivity_score_at(Local::now())
    }

    pub fn productivity_score_at(&self, now: DateTime<Local>) -> u32 {
        let tasks = self.tasks();
        let state = self.gamification();
        insights::productivity_score(
            &analytics::task_analytics(&tasks, now),
            &state,
            &analytics::productivity_trends(&tasks, now),
        )
    }

    /// Evaluate the full insight rule battery against current state.
    pub fn advanced_insights(&self) -> Vec<Insight> {
        self.advanced_insights_at(Local::now())
    }

    pub fn advanced_insights_at(&self, now: DateTime<Local>) -> Vec<Insight> {
        let tasks = self.tasks();
        insights::advanced_insights(
            &analytics::task_analytics(&tasks, now),
            &analytics::productivity_trends(&tasks, now),
            &self.gamification(),
            &self.best_time_of_day(),
            &self.sessions_by_weekday(),
        )
    }
}
