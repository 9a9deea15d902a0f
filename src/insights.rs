//! Productivity score and the insight rule battery.
//!
//! Pure functions over the outputs of the analytics aggregator, the
//! gamification ledger, and the session queries.

use crate::analytics::{CompletionCounts, ProductivityTrends, TaskAnalytics, completion_rate};
use crate::types::{BestTimeOfDay, Category, GamificationState, WeekdaySessions};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
}

/// A rule-derived, human-readable observation.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub icon: &'static str,
    pub title: &'static str,
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, icon: &'static str, title: &'static str, message: String) -> Self {
        Self {
            kind,
            icon,
            title,
            message,
        }
    }
}

/// Composite 0-100 score: completion rate (up to 40), streak (up to 20),
/// 7-day consistency (up to 20), daily average (up to 20).
pub fn productivity_score(
    analytics: &TaskAnalytics,
    state: &GamificationState,
    trends: &ProductivityTrends,
) -> u32 {
    let mut score = (analytics.completion_rate as f64 * 0.4).round() as u32;
    score += (state.current_streak * 2).min(20);

    let days_with_activity = trends
        .last_7_days
        .iter()
        .filter(|d| d.completed > 0)
        .count();
    score += (days_with_activity as f64 / 7.0 * 20.0).round() as u32;
    score += (trends.avg_daily * 2).min(20);

    score.min(100)
}

/// Evaluate the fixed rule battery in order. Every rule is independent;
/// all matches are returned.
pub fn advanced_insights(
    analytics: &TaskAnalytics,
    trends: &ProductivityTrends,
    state: &GamificationState,
    best_time: &BestTimeOfDay,
    weekdays: &[WeekdaySessions],
) -> Vec<Insight> {
    let mut insights = Vec::new();

    // Completion rate, either end of the scale.
    if analytics.completion_rate >= 80 {
        insights.push(Insight::new(
            InsightKind::Success,
            "🎯",
            "Excellent Completion Rate",
            format!(
                "You are completing {}% of your tasks. Keep it up!",
                analytics.completion_rate
            ),
        ));
    } else if analytics.completion_rate < 50 {
        insights.push(Insight::new(
            InsightKind::Warning,
            "⚠️",
            "Low Completion Rate",
            format!(
                "Only {}% of your tasks are done. Focus on finishing what is pending.",
                analytics.completion_rate
            ),
        ));
    }

    // Best time of day, once there is enough signal.
    if best_time.sessions >= 3 {
        insights.push(Insight::new(
            InsightKind::Info,
            "⏰",
            "Your Best Time",
            format!(
                "You are most productive in the {} (around {}:00). Schedule important work then.",
                best_time.period.label(),
                best_time.hour
            ),
        ));
    }

    // Top category by volume. Ties keep the first category in catalog order.
    let top_category = analytics.by_category.iter().fold(
        None::<(&Category, &CompletionCounts)>,
        |best, (cat, counts)| match best {
            Some((_, best_counts)) if counts.total <= best_counts.total => best,
            _ => Some((cat, counts)),
        },
    );
    if let Some((category, counts)) = top_category {
        if counts.total >= 5 {
            insights.push(Insight::new(
                InsightKind::Info,
                "📊",
                "Favorite Category",
                format!(
                    "{} tasks in \"{}\" ({}% completed).",
                    counts.total,
                    category.as_str(),
                    completion_rate(counts.completed, counts.total)
                ),
            ));
        }
    }

    // High-priority backlog slipping.
    let high = analytics.by_priority.high;
    if high.total >= 5 {
        let high_rate = completion_rate(high.completed, high.total);
        if high_rate < 60 {
            insights.push(Insight::new(
                InsightKind::Warning,
                "🔴",
                "High-Priority Tasks Need Attention",
                format!(
                    "You have {} high-priority tasks but only completed {}%.",
                    high.total, high_rate
                ),
            ));
        }
    }

    // Short-term trend: last 3 days vs. the 3 days before that.
    if trends.last_7_days.len() == 7 {
        let avg = |days: &[crate::analytics::DayTrend]| {
            days.iter().map(|d| d.completed).sum::<usize>() as f64 / days.len() as f64
        };
        let recent = avg(&trends.last_7_days[4..]);
        let older = avg(&trends.last_7_days[..3]);
        if recent > older * 1.2 {
            insights.push(Insight::new(
                InsightKind::Success,
                "📈",
                "Trending Up",
                "You are completing noticeably more tasks these last few days!".to_string(),
            ));
        } else if recent < older * 0.8 {
            insights.push(Insight::new(
                InsightKind::Warning,
                "📉",
                "Trending Down",
                "Your output dropped over the last few days. Time to reshuffle priorities?"
                    .to_string(),
            ));
        }
    }

    // Streak health.
    if state.current_streak >= 7 {
        insights.push(Insight::new(
            InsightKind::Success,
            "🔥",
            "Impressive Streak",
            format!(
                "{} consecutive days. You are on the right track!",
                state.current_streak
            ),
        ));
    } else if state.current_streak == 0 && state.longest_streak >= 7 {
        insights.push(Insight::new(
            InsightKind::Warning,
            "💔",
            "Streak Lost",
            format!(
                "You lost your {}-day streak. Start a new one today!",
                state.longest_streak
            ),
        ));
    }

    // Best weekday by session count. Ties keep the earliest weekday.
    let best_day = weekdays
        .iter()
        .fold(None, |best: Option<&WeekdaySessions>, day| match best {
            Some(b) if day.sessions <= b.sessions => best,
            _ => Some(day),
        });
    if let Some(day) = best_day {
        if day.sessions >= 3 {
            insights.push(Insight::new(
                InsightKind::Info,
                "📅",
                "Your Best Day",
                format!(
                    "{} is your most productive day. Plan important tasks for it.",
                    day.day
                ),
            ));
        }
    }

    insights
}
