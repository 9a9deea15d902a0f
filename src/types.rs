//! Core types for the gamification and analytics engine.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lifecycle state of a task. User-driven transitions follow the cycle
/// Pending -> InProgress -> Completed -> Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Next state in the manual toggle cycle.
    pub fn next(&self) -> TaskStatus {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

/// Task priority. Drives the XP awarded on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Task category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Work,
    Study,
    Health,
    Home,
    Personal,
    #[default]
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Study => "study",
            Category::Health => "health",
            Category::Home => "home",
            Category::Personal => "personal",
            Category::General => "general",
        }
    }

    /// All categories in catalog order.
    pub const ALL: [Category; 6] = [
        Category::Work,
        Category::Study,
        Category::Health,
        Category::Home,
        Category::Personal,
        Category::General,
    ];
}

/// A task record. The engine only reads these; creation and editing are
/// driven by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Local>,
    /// Set whenever the status changes. This is the sole timestamp used to
    /// attribute "when was this completed"; `None` means the task has never
    /// transitioned since creation and is excluded from completion-dated
    /// aggregations.
    #[serde(default)]
    pub updated_at: Option<DateTime<Local>>,
}

/// Fields for a new task; everything except the title is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
}

/// Partial update applied to an existing task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

/// Counters that feed achievement predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    /// Tasks completed since the last daily streak rollover.
    #[serde(default)]
    pub tasks_completed_today: u32,
    /// Days on which every task was completed.
    #[serde(default)]
    pub perfect_days: u32,
    /// Tasks completed before 08:00 local time.
    #[serde(default)]
    pub early_bird_tasks: u32,
    /// Tasks completed at or after 22:00 local time.
    #[serde(default)]
    pub night_owl_tasks: u32,
}

/// The gamification ledger: one instance per installation.
///
/// Invariants: `longest_streak >= current_streak`; `level` is always the
/// level-table lookup of `xp`; `unlocked_achievements` only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationState {
    #[serde(default)]
    pub xp: u64,
    /// Cached table lookup of `xp`; recomputed on every XP change.
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub total_completed: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    /// Calendar date of the last counted login. `None` until the first
    /// streak check ever runs.
    #[serde(default)]
    pub last_login_date: Option<NaiveDate>,
    #[serde(default)]
    pub unlocked_achievements: BTreeSet<String>,
    #[serde(default)]
    pub daily_stats: DailyStats,
}

fn default_level() -> u32 {
    1
}

impl Default for GamificationState {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            total_completed: 0,
            current_streak: 0,
            longest_streak: 0,
            last_login_date: None,
            unlocked_achievements: BTreeSet::new(),
            daily_stats: DailyStats::default(),
        }
    }
}

/// Outcome of a single XP grant.
#[derive(Debug, Clone, Serialize)]
pub struct XpAward {
    pub amount: u64,
    pub old_level: u32,
    pub new_level: u32,
    pub new_title: &'static str,
    pub leveled_up: bool,
    pub total_xp: u64,
}

/// Outcome of the daily streak check.
#[derive(Debug, Clone, Serialize)]
pub struct StreakUpdate {
    /// False when the check already ran today (idempotent no-op).
    pub updated: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// A focus (pomodoro) session. Finalized exactly once, then immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    /// `None` for break sessions not tied to a task.
    pub task_id: Option<String>,
    pub start_time: DateTime<Local>,
    #[serde(default)]
    pub end_time: Option<DateTime<Local>>,
    pub planned_minutes: u32,
    #[serde(default)]
    pub actual_minutes: Option<i64>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub cancelled: bool,
}

/// Aggregate pomodoro statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PomodoroStats {
    pub total_sessions: usize,
    pub today_sessions: usize,
    pub total_focus_minutes: i64,
    pub today_focus_minutes: i64,
    pub average_session_minutes: i64,
}

/// Estimated-vs-spent breakdown for one task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskTimeInfo {
    pub estimated_minutes: i64,
    pub spent_minutes: i64,
    pub remaining_minutes: i64,
    pub overrun_minutes: i64,
    /// `estimated / spent * 100`; 100 when nothing is estimated or spent.
    /// Values above 100 mean the task came in under budget.
    pub efficiency: i64,
}

impl Default for TaskTimeInfo {
    fn default() -> Self {
        Self {
            estimated_minutes: 0,
            spent_minutes: 0,
            remaining_minutes: 0,
            overrun_minutes: 0,
            efficiency: 100,
        }
    }
}

/// Part of the day a given start hour falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    /// 05:00-11:59
    Morning,
    /// 12:00-17:59
    Afternoon,
    /// 18:00-21:59
    Evening,
    /// Everything else
    Night,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> DayPeriod {
        match hour {
            5..=11 => DayPeriod::Morning,
            12..=17 => DayPeriod::Afternoon,
            18..=21 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
            DayPeriod::Evening => "Evening",
            DayPeriod::Night => "Night",
        }
    }
}

/// The hour of day with the most completed sessions.
#[derive(Debug, Clone, Serialize)]
pub struct BestTimeOfDay {
    pub period: DayPeriod,
    pub hour: u32,
    pub sessions: usize,
}

impl Default for BestTimeOfDay {
    fn default() -> Self {
        Self {
            period: DayPeriod::Morning,
            hour: 9,
            sessions: 0,
        }
    }
}

/// Completed-session count for one weekday.
#[derive(Debug, Clone, Serialize)]
pub struct WeekdaySessions {
    pub day: &'static str,
    pub sessions: usize,
}
