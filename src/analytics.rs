//! Read-only task aggregation: point-in-time statistics, historical
//! trends, and week-over-week comparison.
//!
//! Everything here is a pure function over the task collection and a
//! caller-supplied "now"; nothing touches the store.

use crate::clock;
use crate::types::{Category, Priority, Task, TaskStatus};
use chrono::{DateTime, Duration, Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Total and completed counts for one bucket.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CompletionCounts {
    pub total: usize,
    pub completed: usize,
}

/// Per-priority completion counts.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PriorityBreakdown {
    pub high: CompletionCounts,
    pub medium: CompletionCounts,
    pub low: CompletionCounts,
}

/// Point-in-time statistics over the whole task collection.
#[derive(Debug, Clone, Serialize)]
pub struct TaskAnalytics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub in_progress: usize,
    /// `round(completed / total * 100)`, 0 for an empty collection.
    pub completion_rate: u32,
    pub by_priority: PriorityBreakdown,
    /// Only categories that actually have tasks appear here.
    pub by_category: BTreeMap<Category, CompletionCounts>,
    pub created_today: usize,
    pub completed_today: usize,
    pub completed_this_week: usize,
    pub completed_this_month: usize,
}

/// One day of the 7-day trend series.
#[derive(Debug, Clone, Serialize)]
pub struct DayTrend {
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub completed: usize,
}

/// One week of the 4-week trend series.
#[derive(Debug, Clone, Serialize)]
pub struct WeekTrend {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub completed: usize,
}

/// Historical trend series, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct ProductivityTrends {
    pub last_7_days: Vec<DayTrend>,
    pub last_4_weeks: Vec<WeekTrend>,
    /// Mean completions per day over the 7-day series, rounded.
    pub avg_daily: u32,
    /// Mean completions per week over the 4-week series, rounded.
    pub avg_weekly: u32,
}

/// This week vs. the immediately preceding calendar week.
#[derive(Debug, Clone, Serialize)]
pub struct WeekComparison {
    pub this_week: usize,
    pub last_week: usize,
    /// Percent change; 0 when last week had no completions.
    pub change_percent: i32,
    pub improving: bool,
}

/// Calendar date a task was completed on, if it is completed and has
/// ever transitioned. Tasks without an `updated_at` never entered a
/// completion-dated bucket.
fn completion_date(task: &Task) -> Option<NaiveDate> {
    if task.status != TaskStatus::Completed {
        return None;
    }
    task.updated_at.map(clock::local_date)
}

fn completed_in(tasks: &[Task], from: NaiveDate, to: NaiveDate) -> usize {
    tasks
        .iter()
        .filter_map(completion_date)
        .filter(|d| (from..=to).contains(d))
        .count()
}

/// Compute point-in-time statistics for the collection.
pub fn task_analytics(tasks: &[Task], now: DateTime<Local>) -> TaskAnalytics {
    let today = clock::local_date(now);
    let week_start = clock::week_start(today);
    let month_start = clock::month_start(today);

    let total = tasks.len();
    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let pending = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Pending)
        .count();
    let in_progress = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::InProgress)
        .count();

    let mut by_priority = PriorityBreakdown::default();
    let mut by_category: BTreeMap<Category, CompletionCounts> = BTreeMap::new();
    for task in tasks {
        let bucket = match task.priority {
            Priority::High => &mut by_priority.high,
            Priority::Medium => &mut by_priority.medium,
            Priority::Low => &mut by_priority.low,
        };
        bucket.total += 1;
        let cat = by_category.entry(task.category).or_default();
        cat.total += 1;
        if task.status == TaskStatus::Completed {
            bucket.completed += 1;
            cat.completed += 1;
        }
    }

    let created_today = tasks
        .iter()
        .filter(|t| clock::local_date(t.created_at) == today)
        .count();

    TaskAnalytics {
        total,
        completed,
        pending,
        in_progress,
        completion_rate: completion_rate(completed, total),
        by_priority,
        by_category,
        created_today,
        completed_today: completed_in(tasks, today, today),
        completed_this_week: completed_in(tasks, week_start, today),
        completed_this_month: completed_in(tasks, month_start, today),
    }
}

/// `round(completed / total * 100)`, guarded for an empty total.
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

/// Compute the 7-day and 4-week trend series.
pub fn productivity_trends(tasks: &[Task], now: DateTime<Local>) -> ProductivityTrends {
    let today = clock::local_date(now);

    let last_7_days: Vec<DayTrend> = (0..7)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            DayTrend {
                date,
                day_name: clock::weekday_name(date),
                completed: completed_in(tasks, date, date),
            }
        })
        .collect();

    let this_week_start = clock::week_start(today);
    let last_4_weeks: Vec<WeekTrend> = (0..4)
        .rev()
        .map(|offset| {
            let week_start = this_week_start - Duration::weeks(offset);
            let week_end = week_start + Duration::days(6);
            WeekTrend {
                week_start,
                week_end,
                completed: completed_in(tasks, week_start, week_end),
            }
        })
        .collect();

    let daily_sum: usize = last_7_days.iter().map(|d| d.completed).sum();
    let weekly_sum: usize = last_4_weeks.iter().map(|w| w.completed).sum();

    ProductivityTrends {
        avg_daily: (daily_sum as f64 / 7.0).round() as u32,
        avg_weekly: (weekly_sum as f64 / 4.0).round() as u32,
        last_7_days,
        last_4_weeks,
    }
}

/// Compare this calendar week against the previous one.
pub fn week_comparison(tasks: &[Task], now: DateTime<Local>) -> WeekComparison {
    let today = clock::local_date(now);
    let this_week_start = clock::week_start(today);
    let last_week_start = this_week_start - Duration::weeks(1);
    let last_week_end = this_week_start - Duration::days(1);

    let this_week = completed_in(tasks, this_week_start, today);
    let last_week = completed_in(tasks, last_week_start, last_week_end);

    // Guard against division by zero: a week out of nowhere is reported
    // as 0% change, not infinity.
    let change_percent = if last_week > 0 {
        ((this_week as f64 - last_week as f64) / last_week as f64 * 100.0).round() as i32
    } else {
        0
    };

    WeekComparison {
        this_week,
        last_week,
        change_percent,
        improving: change_percent > 0,
    }
}
