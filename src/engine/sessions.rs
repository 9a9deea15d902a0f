//! Focus-session (pomodoro) ledger and time-tracking queries.

use super::Engine;
use crate::clock;
use crate::error::Result;
use crate::store::{KeyValue, keys};
use crate::types::{
    BestTimeOfDay, DayPeriod, PomodoroStats, SessionRecord, TaskTimeInfo, WeekdaySessions,
};
use chrono::{DateTime, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Per-task estimated and spent minutes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskTime {
    #[serde(default)]
    pub estimated_minutes: i64,
    #[serde(default)]
    pub spent_minutes: i64,
}

/// Focus minutes accumulated for one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayFocus {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub minutes: i64,
}

/// The persisted time-tracking ledger: session history plus aggregates.
/// Finalized sessions are append-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeLedger {
    #[serde(default)]
    pub tasks: HashMap<String, TaskTime>,
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
    /// All-time focus minutes from task-attached sessions.
    #[serde(default)]
    pub total_focus_minutes: i64,
    #[serde(default)]
    pub today_focus: DayFocus,
}

impl TimeLedger {
    /// Roll the today-bucket forward when the calendar day has changed.
    fn roll_to(&mut self, today: NaiveDate) {
        if self.today_focus.date != Some(today) {
            self.today_focus = DayFocus {
                date: Some(today),
                minutes: 0,
            };
        }
    }

    fn completed(&self) -> impl Iterator<Item = &SessionRecord> {
        self.sessions.iter().filter(|s| s.completed)
    }
}

impl<S: KeyValue> Engine<S> {
    /// Create an unfinalized session. Nothing is persisted until the
    /// session completes or is cancelled.
    pub fn start_session(&self, task_id: Option<&str>, planned_minutes: u32) -> SessionRecord {
        self.start_session_at(task_id, planned_minutes, Local::now())
    }

    pub fn start_session_at(
        &self,
        task_id: Option<&str>,
        planned_minutes: u32,
        now: DateTime<Local>,
    ) -> SessionRecord {
        SessionRecord {
            id: Uuid::new_v4().to_string(),
            task_id: task_id.map(str::to_string),
            start_time: now,
            end_time: None,
            planned_minutes,
            actual_minutes: None,
            completed: false,
            cancelled: false,
        }
    }

    /// Finalize a session as completed and account its elapsed minutes.
    ///
    /// Focus time is attributed to the session's start date: a session
    /// that starts before midnight and completes after still counts for
    /// its start day, so it only lands in the today-bucket when that
    /// start day is still today.
    pub fn complete_session(&self, session: &SessionRecord) -> Result<SessionRecord> {
        self.complete_session_at(session, Local::now())
    }

    pub fn complete_session_at(
        &self,
        session: &SessionRecord,
        now: DateTime<Local>,
    ) -> Result<SessionRecord> {
        let today = clock::local_date(now);
        let actual_minutes =
            ((now - session.start_time).num_seconds() as f64 / 60.0).round() as i64;

        let mut finalized = session.clone();
        finalized.end_time = Some(now);
        finalized.actual_minutes = Some(actual_minutes);
        finalized.completed = true;
        finalized.cancelled = false;

        self.with_store(|store| {
            let mut ledger: TimeLedger = Self::load_or_default(store, keys::TIME_TRACKING);
            ledger.roll_to(today);
            ledger.sessions.push(finalized.clone());

            if let Some(task_id) = &finalized.task_id {
                ledger
                    .tasks
                    .entry(task_id.clone())
                    .or_default()
                    .spent_minutes += actual_minutes;
                ledger.total_focus_minutes += actual_minutes;
            }

            if clock::local_date(session.start_time) == today {
                ledger.today_focus.minutes += actual_minutes;
            }

            Self::persist(store, keys::TIME_TRACKING, &ledger)?;
            Ok(finalized)
        })
    }

    /// Finalize a session as cancelled. Contributes no time anywhere.
    pub fn cancel_session(&self, session: &SessionRecord) -> Result<SessionRecord> {
        self.cancel_session_at(session, Local::now())
    }

    pub fn cancel_session_at(
        &self,
        session: &SessionRecord,
        now: DateTime<Local>,
    ) -> Result<SessionRecord> {
        let mut finalized = session.clone();
        finalized.end_time = Some(now);
        finalized.completed = false;
        finalized.cancelled = true;

        self.with_store(|store| {
            let mut ledger: TimeLedger = Self::load_or_default(store, keys::TIME_TRACKING);
            ledger.sessions.push(finalized.clone());
            Self::persist(store, keys::TIME_TRACKING, &ledger)?;
            Ok(finalized)
        })
    }

    /// Set the estimated minutes for a task.
    pub fn set_task_estimate(&self, task_id: &str, minutes: i64) -> Result<()> {
        self.with_store(|store| {
            let mut ledger: TimeLedger = Self::load_or_default(store, keys::TIME_TRACKING);
            ledger
                .tasks
                .entry(task_id.to_string())
                .or_default()
                .estimated_minutes = minutes;
            Self::persist(store, keys::TIME_TRACKING, &ledger)
        })
    }

    /// Record manually tracked minutes against a task.
    pub fn add_time_spent(&self, task_id: &str, minutes: i64) -> Result<()> {
        self.with_store(|store| {
            let mut ledger: TimeLedger = Self::load_or_default(store, keys::TIME_TRACKING);
            ledger
                .tasks
                .entry(task_id.to_string())
                .or_default()
                .spent_minutes += minutes;
            ledger.total_focus_minutes += minutes;
            Self::persist(store, keys::TIME_TRACKING, &ledger)
        })
    }

    /// Aggregate pomodoro statistics.
    pub fn pomodoro_stats(&self) -> PomodoroStats {
        self.pomodoro_stats_at(Local::now())
    }

    pub fn pomodoro_stats_at(&self, now: DateTime<Local>) -> PomodoroStats {
        let today = clock::local_date(now);
        let ledger: TimeLedger =
            self.with_store(|store| Self::load_or_default(store, keys::TIME_TRACKING));

        let completed: Vec<&SessionRecord> = ledger.completed().collect();
        let today_sessions = completed
            .iter()
            .filter(|s| clock::local_date(s.start_time) == today)
            .count();
        let average_session_minutes = if completed.is_empty() {
            0
        } else {
            let sum: i64 = completed.iter().filter_map(|s| s.actual_minutes).sum();
            (sum as f64 / completed.len() as f64).round() as i64
        };
        let today_focus_minutes = if ledger.today_focus.date == Some(today) {
            ledger.today_focus.minutes
        } else {
            0
        };

        PomodoroStats {
            total_sessions: completed.len(),
            today_sessions,
            total_focus_minutes: ledger.total_focus_minutes,
            today_focus_minutes,
            average_session_minutes,
        }
    }

    /// Most recent completed sessions, newest first.
    pub fn session_history(&self, limit: usize) -> Vec<SessionRecord> {
        let ledger: TimeLedger =
            self.with_store(|store| Self::load_or_default(store, keys::TIME_TRACKING));
        let mut completed: Vec<SessionRecord> = ledger.completed().cloned().collect();
        completed.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        completed.truncate(limit);
        completed
    }

    /// Estimated-vs-spent breakdown for one task. The efficiency figure is
    /// the historical `estimated / spent * 100` ratio, so under-budget
    /// tasks score above 100.
    pub fn task_time_info(&self, task_id: &str) -> TaskTimeInfo {
        let ledger: TimeLedger =
            self.with_store(|store| Self::load_or_default(store, keys::TIME_TRACKING));
        let Some(entry) = ledger.tasks.get(task_id) else {
            return TaskTimeInfo::default();
        };

        let estimated = entry.estimated_minutes;
        let spent = entry.spent_minutes;
        TaskTimeInfo {
            estimated_minutes: estimated,
            spent_minutes: spent,
            remaining_minutes: (estimated - spent).max(0),
            overrun_minutes: (spent - estimated).max(0),
            efficiency: if spent > 0 {
                (estimated as f64 / spent as f64 * 100.0).round() as i64
            } else {
                100
            },
        }
    }

    /// The hour of day with the most completed sessions. Ties go to the
    /// hour encountered first in history order; the default (Morning, 9)
    /// is reported when no session has completed.
    pub fn best_time_of_day(&self) -> BestTimeOfDay {
        let ledger: TimeLedger =
            self.with_store(|store| Self::load_or_default(store, keys::TIME_TRACKING));

        let mut counts: HashMap<u32, usize> = HashMap::new();
        for session in ledger.completed() {
            *counts.entry(session.start_time.hour()).or_insert(0) += 1;
        }

        let mut best: Option<(u32, usize)> = None;
        for session in ledger.completed() {
            let hour = session.start_time.hour();
            let count = counts[&hour];
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((hour, count));
            }
        }

        match best {
            Some((hour, sessions)) => BestTimeOfDay {
                period: DayPeriod::from_hour(hour),
                hour,
                sessions,
            },
            None => BestTimeOfDay::default(),
        }
    }

    /// Completed-session counts for each weekday, Sunday first.
    pub fn sessions_by_weekday(&self) -> Vec<WeekdaySessions> {
        let ledger: TimeLedger =
            self.with_store(|store| Self::load_or_default(store, keys::TIME_TRACKING));

        let mut counts = [0usize; 7];
        for session in ledger.completed() {
            counts[clock::weekday_index(clock::local_date(session.start_time))] += 1;
        }

        clock::WEEKDAY_NAMES
            .iter()
            .copied()
            .zip(counts)
            .map(|(day, sessions)| WeekdaySessions { day, sessions })
            .collect()
    }

    /// Drop the time-tracking ledger.
    pub fn clear_time_tracking(&self) -> Result<()> {
        self.with_store(|store| {
            store
                .remove(keys::TIME_TRACKING)
                .map_err(|e| crate::error::EngineError::store(keys::TIME_TRACKING, e))
        })
    }
}
