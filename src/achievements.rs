//! Static achievement catalog.
//!
//! Each achievement pairs a data record with a [`Requirement`], a tagged
//! predicate over the cumulative stats in [`GamificationState`]. All
//! requirements are monotone: once satisfied they stay satisfied as the
//! stats only ever increase, which is what makes "unlock once, never
//! revoke" correct.

use crate::types::GamificationState;
use serde::Serialize;

/// Threshold predicate evaluated against cumulative stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    TotalCompleted(u32),
    CurrentStreak(u32),
    CompletedToday(u32),
    PerfectDays(u32),
    EarlyBirdTasks(u32),
    NightOwlTasks(u32),
}

impl Requirement {
    pub fn met(&self, state: &GamificationState) -> bool {
        match *self {
            Requirement::TotalCompleted(n) => state.total_completed >= n,
            Requirement::CurrentStreak(n) => state.current_streak >= n,
            Requirement::CompletedToday(n) => state.daily_stats.tasks_completed_today >= n,
            Requirement::PerfectDays(n) => state.daily_stats.perfect_days >= n,
            Requirement::EarlyBirdTasks(n) => state.daily_stats.early_bird_tasks >= n,
            Requirement::NightOwlTasks(n) => state.daily_stats.night_owl_tasks >= n,
        }
    }
}

/// A one-time-unlockable achievement.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_bonus: u64,
    pub requirement: Requirement,
}

/// The full catalog, in the fixed order the evaluator scans it.
pub const ACHIEVEMENTS: [AchievementDefinition; 10] = [
    AchievementDefinition {
        id: "first_task",
        title: "First Step",
        description: "Complete your first task",
        icon: "🎯",
        xp_bonus: 50,
        requirement: Requirement::TotalCompleted(1),
    },
    AchievementDefinition {
        id: "task_10",
        title: "Hard Worker",
        description: "Complete 10 tasks",
        icon: "💪",
        xp_bonus: 100,
        requirement: Requirement::TotalCompleted(10),
    },
    AchievementDefinition {
        id: "task_50",
        title: "Dedicated",
        description: "Complete 50 tasks",
        icon: "🏆",
        xp_bonus: 250,
        requirement: Requirement::TotalCompleted(50),
    },
    AchievementDefinition {
        id: "task_100",
        title: "Centurion",
        description: "Complete 100 tasks",
        icon: "⚡",
        xp_bonus: 500,
        requirement: Requirement::TotalCompleted(100),
    },
    AchievementDefinition {
        id: "streak_7",
        title: "Consistent",
        description: "Keep a 7-day streak",
        icon: "🔥",
        xp_bonus: 150,
        requirement: Requirement::CurrentStreak(7),
    },
    AchievementDefinition {
        id: "streak_30",
        title: "Unstoppable",
        description: "Keep a 30-day streak",
        icon: "🚀",
        xp_bonus: 1000,
        requirement: Requirement::CurrentStreak(30),
    },
    AchievementDefinition {
        id: "speedster",
        title: "Speedster",
        description: "Complete 10 tasks in one day",
        icon: "⚡",
        xp_bonus: 200,
        requirement: Requirement::CompletedToday(10),
    },
    AchievementDefinition {
        id: "perfectionist",
        title: "Perfectionist",
        description: "Finish every task of the day 5 times",
        icon: "✨",
        xp_bonus: 300,
        requirement: Requirement::PerfectDays(5),
    },
    AchievementDefinition {
        id: "early_bird",
        title: "Early Bird",
        description: "Complete a task before 8am",
        icon: "🌅",
        xp_bonus: 100,
        requirement: Requirement::EarlyBirdTasks(1),
    },
    AchievementDefinition {
        id: "night_owl",
        title: "Night Owl",
        description: "Complete a task after 10pm",
        icon: "🦉",
        xp_bonus: 100,
        requirement: Requirement::NightOwlTasks(1),
    },
];

/// Look up a catalog entry by id.
pub fn achievement_by_id(id: &str) -> Option<&'static AchievementDefinition> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// A catalog entry annotated with its unlock state for display.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementStatus {
    #[serde(flatten)]
    pub definition: AchievementDefinition,
    pub unlocked: bool,
}
