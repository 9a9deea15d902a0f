//! XP ledger, streak tracker, and achievement evaluator.

use super::Engine;
use crate::achievements::{ACHIEVEMENTS, AchievementDefinition, AchievementStatus};
use crate::clock;
use crate::error::Result;
use crate::levels::{self, LevelInfo, level_for_xp};
use crate::store::{KeyValue, keys};
use crate::types::{GamificationState, Priority, StreakUpdate, Task, XpAward};
use chrono::{DateTime, Duration, Local, Timelike};
use serde::Serialize;
use tracing::{debug, info};

/// XP awarded per completed task, by priority.
pub const XP_TASK_HIGH: u64 = 20;
pub const XP_TASK_MEDIUM: u64 = 15;
pub const XP_TASK_LOW: u64 = 10;
/// XP awarded once per calendar day on the first streak check.
pub const XP_DAILY_LOGIN: u64 = 5;
/// One-time streak milestone bonuses.
pub const XP_STREAK_BONUS_7: u64 = 100;
pub const XP_STREAK_BONUS_30: u64 = 500;
/// XP awarded when every task of the day was completed.
pub const XP_PERFECT_DAY: u64 = 50;

/// Hour boundaries for the early-bird / night-owl counters.
const EARLY_BIRD_BEFORE: u32 = 8;
const NIGHT_OWL_FROM: u32 = 22;

/// Everything a task completion earned.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCompletionReward {
    /// Base XP from the task itself, before achievement bonuses.
    pub xp_gained: u64,
    pub award: XpAward,
    pub new_achievements: Vec<&'static AchievementDefinition>,
}

/// Outcome of registering a perfect day.
#[derive(Debug, Clone, Serialize)]
pub struct PerfectDayReward {
    pub award: XpAward,
    pub new_achievements: Vec<&'static AchievementDefinition>,
}

/// Add XP to the ledger and keep the cached level in sync with the table.
fn grant_xp(state: &mut GamificationState, amount: u64, reason: &str) -> XpAward {
    let old_level = state.level;
    state.xp += amount;
    let reached = level_for_xp(state.xp);
    state.level = reached.level;

    let leveled_up = reached.level > old_level;
    if leveled_up {
        info!(amount, reason, level = reached.level, "level up");
    } else {
        debug!(amount, reason, total_xp = state.xp, "xp granted");
    }

    XpAward {
        amount,
        old_level,
        new_level: reached.level,
        new_title: reached.title,
        leveled_up,
        total_xp: state.xp,
    }
}

/// Scan the catalog in order and unlock every newly satisfied achievement,
/// granting its bonus XP. Already-unlocked ids are always skipped, so the
/// sweep is idempotent.
fn sweep_achievements(state: &mut GamificationState) -> Vec<&'static AchievementDefinition> {
    let mut newly_unlocked = Vec::new();
    for def in ACHIEVEMENTS.iter() {
        if state.unlocked_achievements.contains(def.id) {
            continue;
        }
        if def.requirement.met(state) {
            state.unlocked_achievements.insert(def.id.to_string());
            grant_xp(state, def.xp_bonus, def.title);
            info!(achievement = def.id, bonus = def.xp_bonus, "achievement unlocked");
            newly_unlocked.push(def);
        }
    }
    newly_unlocked
}

impl<S: KeyValue> Engine<S> {
    /// Current ledger snapshot (defaults on first access).
    pub fn gamification(&self) -> GamificationState {
        self.with_store(|store| Self::load_or_default(store, keys::GAMIFICATION))
    }

    /// Level progress for the current XP total.
    pub fn level_info(&self) -> LevelInfo {
        levels::level_info(self.gamification().xp)
    }

    /// Add `amount` XP and recompute the level.
    pub fn apply_xp(&self, amount: u64, reason: &str) -> Result<XpAward> {
        self.with_store(|store| {
            let mut state: GamificationState = Self::load_or_default(store, keys::GAMIFICATION);
            let award = grant_xp(&mut state, amount, reason);
            Self::persist(store, keys::GAMIFICATION, &state)?;
            Ok(award)
        })
    }

    /// Run the daily streak check against the current local date.
    pub fn update_daily_streak(&self) -> Result<StreakUpdate> {
        self.update_daily_streak_at(Local::now())
    }

    /// Streak state machine over `last_login_date` vs. today.
    ///
    /// Idempotent within a calendar day: the second call on the same day
    /// changes nothing and grants nothing.
    pub fn update_daily_streak_at(&self, now: DateTime<Local>) -> Result<StreakUpdate> {
        let today = clock::local_date(now);
        self.with_store(|store| {
            let mut state: GamificationState = Self::load_or_default(store, keys::GAMIFICATION);

            if state.last_login_date == Some(today) {
                return Ok(StreakUpdate {
                    updated: false,
                    current_streak: state.current_streak,
                    longest_streak: state.longest_streak,
                });
            }

            let yesterday = today - Duration::days(1);
            if state.last_login_date == Some(yesterday) {
                state.current_streak += 1;
                state.longest_streak = state.longest_streak.max(state.current_streak);
                if state.current_streak == 7 {
                    grant_xp(&mut state, XP_STREAK_BONUS_7, "7-day streak");
                } else if state.current_streak == 30 {
                    grant_xp(&mut state, XP_STREAK_BONUS_30, "30-day streak");
                }
            } else {
                // Gap of two or more days, or first-ever run.
                state.current_streak = 1;
                state.longest_streak = state.longest_streak.max(1);
            }

            state.last_login_date = Some(today);
            state.daily_stats.tasks_completed_today = 0;
            grant_xp(&mut state, XP_DAILY_LOGIN, "daily login");

            Self::persist(store, keys::GAMIFICATION, &state)?;
            Ok(StreakUpdate {
                updated: true,
                current_streak: state.current_streak,
                longest_streak: state.longest_streak,
            })
        })
    }

    /// Register a task completion: priority-based XP, time-of-day
    /// counters, cumulative totals, then an achievement sweep. All grants
    /// commit in one transaction.
    pub fn on_task_completed(&self, task: &Task) -> Result<TaskCompletionReward> {
        self.on_task_completed_at(task, Local::now())
    }

    pub fn on_task_completed_at(
        &self,
        task: &Task,
        now: DateTime<Local>,
    ) -> Result<TaskCompletionReward> {
        let hour = now.hour();
        self.with_store(|store| {
            let mut state: GamificationState = Self::load_or_default(store, keys::GAMIFICATION);

            let xp_gained = match task.priority {
                Priority::High => XP_TASK_HIGH,
                Priority::Medium => XP_TASK_MEDIUM,
                Priority::Low => XP_TASK_LOW,
            };

            if hour < EARLY_BIRD_BEFORE {
                state.daily_stats.early_bird_tasks += 1;
            } else if hour >= NIGHT_OWL_FROM {
                state.daily_stats.night_owl_tasks += 1;
            }

            state.total_completed += 1;
            state.daily_stats.tasks_completed_today += 1;

            let award = grant_xp(&mut state, xp_gained, &task.title);
            let new_achievements = sweep_achievements(&mut state);

            Self::persist(store, keys::GAMIFICATION, &state)?;
            Ok(TaskCompletionReward {
                xp_gained,
                award,
                new_achievements,
            })
        })
    }

    /// Unlock every achievement whose requirement is now satisfied.
    /// Returns only the newly unlocked definitions; safe to call
    /// redundantly.
    pub fn check_achievements(&self) -> Result<Vec<&'static AchievementDefinition>> {
        self.with_store(|store| {
            let mut state: GamificationState = Self::load_or_default(store, keys::GAMIFICATION);
            let newly_unlocked = sweep_achievements(&mut state);
            if !newly_unlocked.is_empty() {
                Self::persist(store, keys::GAMIFICATION, &state)?;
            }
            Ok(newly_unlocked)
        })
    }

    /// Register a day on which every task was completed.
    pub fn on_perfect_day(&self) -> Result<PerfectDayReward> {
        self.with_store(|store| {
            let mut state: GamificationState = Self::load_or_default(store, keys::GAMIFICATION);
            state.daily_stats.perfect_days += 1;
            let award = grant_xp(&mut state, XP_PERFECT_DAY, "perfect day");
            let new_achievements = sweep_achievements(&mut state);
            Self::persist(store, keys::GAMIFICATION, &state)?;
            Ok(PerfectDayReward {
                award,
                new_achievements,
            })
        })
    }

    /// Full catalog annotated with unlock state.
    pub fn all_achievements(&self) -> Vec<AchievementStatus> {
        let state = self.gamification();
        ACHIEVEMENTS
            .iter()
            .map(|def| AchievementStatus {
                definition: *def,
                unlocked: state.unlocked_achievements.contains(def.id),
            })
            .collect()
    }

    /// Drop the ledger and start fresh.
    pub fn reset_gamification(&self) -> Result<GamificationState> {
        self.with_store(|store| {
            store
                .remove(keys::GAMIFICATION)
                .map_err(|e| crate::error::EngineError::store(keys::GAMIFICATION, e))?;
            Ok(GamificationState::default())
        })
    }
}
