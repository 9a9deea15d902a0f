//! Integration tests for task analytics, trends, the productivity score,
//! and the insight rule battery.

use chrono::{DateTime, Duration, Local, TimeZone};
use momentum::analytics::{
    productivity_trends, task_analytics, week_comparison,
};
use momentum::insights::{Insight, InsightKind, advanced_insights, productivity_score};
use momentum::types::{
    BestTimeOfDay, Category, DayPeriod, GamificationState, Priority, Task, TaskStatus,
    WeekdaySessions,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

// Wednesday; the Sunday-start week began on 2025-06-08.
fn wednesday_now() -> DateTime<Local> {
    at(2025, 6, 11, 12, 0)
}

fn task(id: &str, priority: Priority, category: Category) -> Task {
    Task {
        id: id.to_string(),
        title: format!("task {id}"),
        description: String::new(),
        status: TaskStatus::Pending,
        category,
        priority,
        created_at: at(2025, 6, 1, 9, 0),
        updated_at: None,
    }
}

fn completed(id: &str, priority: Priority, category: Category, when: DateTime<Local>) -> Task {
    Task {
        status: TaskStatus::Completed,
        updated_at: Some(when),
        ..task(id, priority, category)
    }
}

fn titles(insights: &[Insight]) -> Vec<&'static str> {
    insights.iter().map(|i| i.title).collect()
}

fn quiet_sessions() -> (BestTimeOfDay, Vec<WeekdaySessions>) {
    (BestTimeOfDay::default(), Vec::new())
}

mod analytics_tests {
    use super::*;

    #[test]
    fn counts_and_completion_rate() {
        let mut tasks: Vec<Task> = (0..7)
            .map(|i| {
                completed(
                    &format!("c{i}"),
                    Priority::Medium,
                    Category::Work,
                    at(2025, 6, 10, 10, 0),
                )
            })
            .collect();
        tasks.push(task("p1", Priority::Low, Category::Home));
        tasks.push(task("p2", Priority::Low, Category::Home));
        let mut in_progress = task("ip", Priority::High, Category::Study);
        in_progress.status = TaskStatus::InProgress;
        tasks.push(in_progress);

        let analytics = task_analytics(&tasks, wednesday_now());
        assert_eq!(analytics.total, 10);
        assert_eq!(analytics.completed, 7);
        assert_eq!(analytics.pending, 2);
        assert_eq!(analytics.in_progress, 1);
        assert_eq!(analytics.completion_rate, 70);

        assert_eq!(analytics.by_priority.medium.total, 7);
        assert_eq!(analytics.by_priority.medium.completed, 7);
        assert_eq!(analytics.by_priority.low.total, 2);
        assert_eq!(analytics.by_priority.low.completed, 0);
        assert_eq!(analytics.by_priority.high.total, 1);
    }

    #[test]
    fn empty_collection_reports_all_zeroes() {
        let analytics = task_analytics(&[], wednesday_now());
        assert_eq!(analytics.total, 0);
        assert_eq!(analytics.completion_rate, 0);
        assert!(analytics.by_category.is_empty());
    }

    #[test]
    fn category_buckets_only_contain_present_categories() {
        let tasks = vec![
            completed("a", Priority::Medium, Category::Work, at(2025, 6, 10, 10, 0)),
            task("b", Priority::Medium, Category::Work),
            task("c", Priority::Medium, Category::Health),
        ];

        let analytics = task_analytics(&tasks, wednesday_now());
        assert_eq!(analytics.by_category.len(), 2);
        let work = &analytics.by_category[&Category::Work];
        assert_eq!(work.total, 2);
        assert_eq!(work.completed, 1);
        assert!(!analytics.by_category.contains_key(&Category::General));
    }

    #[test]
    fn dated_windows_respect_day_week_and_month_boundaries() {
        let tasks = vec![
            // Today.
            completed("today", Priority::Medium, Category::Work, at(2025, 6, 11, 8, 0)),
            // Sunday, first day of this week.
            completed("week", Priority::Medium, Category::Work, at(2025, 6, 8, 8, 0)),
            // Last Saturday: this month but not this week.
            completed("month", Priority::Medium, Category::Work, at(2025, 6, 7, 8, 0)),
            // May: outside every window.
            completed("old", Priority::Medium, Category::Work, at(2025, 5, 30, 8, 0)),
        ];

        let analytics = task_analytics(&tasks, wednesday_now());
        assert_eq!(analytics.completed_today, 1);
        assert_eq!(analytics.completed_this_week, 2);
        assert_eq!(analytics.completed_this_month, 3);
    }

    #[test]
    fn completed_without_transition_time_is_excluded_from_dated_windows() {
        let mut never_stamped = task("n", Priority::Medium, Category::Work);
        never_stamped.status = TaskStatus::Completed;
        let tasks = vec![never_stamped];

        let analytics = task_analytics(&tasks, wednesday_now());
        assert_eq!(analytics.completed, 1);
        assert_eq!(analytics.completed_today, 0);
        assert_eq!(analytics.completed_this_week, 0);
        assert_eq!(analytics.completed_this_month, 0);
    }

    #[test]
    fn created_today_uses_creation_date() {
        let mut fresh = task("f", Priority::Medium, Category::Work);
        fresh.created_at = at(2025, 6, 11, 7, 0);
        let tasks = vec![fresh, task("stale", Priority::Medium, Category::Work)];

        let analytics = task_analytics(&tasks, wednesday_now());
        assert_eq!(analytics.created_today, 1);
    }
}

mod trend_tests {
    use super::*;

    #[test]
    fn seven_day_series_is_oldest_first_and_named() {
        let tasks = vec![
            completed("a", Priority::Medium, Category::Work, at(2025, 6, 11, 8, 0)),
            completed("b", Priority::Medium, Category::Work, at(2025, 6, 11, 9, 0)),
            completed("c", Priority::Medium, Category::Work, at(2025, 6, 5, 9, 0)),
        ];

        let trends = productivity_trends(&tasks, wednesday_now());
        assert_eq!(trends.last_7_days.len(), 7);
        // Thursday 2025-06-05 through Wednesday 2025-06-11.
        assert_eq!(trends.last_7_days[0].day_name, "Thu");
        assert_eq!(trends.last_7_days[0].completed, 1);
        assert_eq!(trends.last_7_days[6].day_name, "Wed");
        assert_eq!(trends.last_7_days[6].completed, 2);
        assert_eq!(trends.last_7_days[3].completed, 0);
    }

    #[test]
    fn four_week_series_spans_whole_calendar_weeks() {
        let tasks = vec![
            completed("this", Priority::Medium, Category::Work, at(2025, 6, 9, 8, 0)),
            completed("last", Priority::Medium, Category::Work, at(2025, 6, 4, 8, 0)),
            // Saturday of the previous week still lands inside it.
            completed("edge", Priority::Medium, Category::Work, at(2025, 6, 7, 23, 0)),
        ];

        let trends = productivity_trends(&tasks, wednesday_now());
        assert_eq!(trends.last_4_weeks.len(), 4);
        let current = &trends.last_4_weeks[3];
        assert_eq!(current.week_start, at(2025, 6, 8, 0, 0).date_naive());
        assert_eq!(current.completed, 1);
        let previous = &trends.last_4_weeks[2];
        assert_eq!(previous.completed, 2);
        assert_eq!(previous.week_end, at(2025, 6, 7, 0, 0).date_naive());
    }

    #[test]
    fn averages_are_rounded_means() {
        // One completion per day over the full 7-day window.
        let tasks: Vec<Task> = (0..7)
            .map(|i| {
                completed(
                    &format!("d{i}"),
                    Priority::Medium,
                    Category::Work,
                    at(2025, 6, 5, 10, 0) + Duration::days(i),
                )
            })
            .collect();

        let trends = productivity_trends(&tasks, wednesday_now());
        assert_eq!(trends.avg_daily, 1);
        // All 7 fall inside the current week or the previous one.
        assert_eq!(trends.avg_weekly, 2);
    }

    #[test]
    fn comparison_guards_division_by_zero() {
        let tasks = vec![
            completed("a", Priority::Medium, Category::Work, at(2025, 6, 9, 8, 0)),
            completed("b", Priority::Medium, Category::Work, at(2025, 6, 10, 8, 0)),
        ];

        let cmp = week_comparison(&tasks, wednesday_now());
        assert_eq!(cmp.this_week, 2);
        assert_eq!(cmp.last_week, 0);
        assert_eq!(cmp.change_percent, 0);
        assert!(!cmp.improving);
    }

    #[test]
    fn comparison_reports_signed_percent_change() {
        let improving = vec![
            completed("l1", Priority::Medium, Category::Work, at(2025, 6, 2, 8, 0)),
            completed("l2", Priority::Medium, Category::Work, at(2025, 6, 3, 8, 0)),
            completed("t1", Priority::Medium, Category::Work, at(2025, 6, 9, 8, 0)),
            completed("t2", Priority::Medium, Category::Work, at(2025, 6, 10, 8, 0)),
            completed("t3", Priority::Medium, Category::Work, at(2025, 6, 11, 8, 0)),
        ];
        let cmp = week_comparison(&improving, wednesday_now());
        assert_eq!(cmp.change_percent, 50);
        assert!(cmp.improving);

        let declining = vec![
            completed("l1", Priority::Medium, Category::Work, at(2025, 6, 2, 8, 0)),
            completed("l2", Priority::Medium, Category::Work, at(2025, 6, 3, 8, 0)),
            completed("l3", Priority::Medium, Category::Work, at(2025, 6, 4, 8, 0)),
            completed("l4", Priority::Medium, Category::Work, at(2025, 6, 5, 8, 0)),
            completed("t1", Priority::Medium, Category::Work, at(2025, 6, 9, 8, 0)),
        ];
        let cmp = week_comparison(&declining, wednesday_now());
        assert_eq!(cmp.change_percent, -75);
        assert!(!cmp.improving);
    }
}

mod score_tests {
    use super::*;

    #[test]
    fn score_composes_its_four_components() {
        // Seven completions, one per day across the whole window, plus
        // three pending tasks: a 70% rate.
        let mut tasks: Vec<Task> = (0..7)
            .map(|i| {
                completed(
                    &format!("d{i}"),
                    Priority::Medium,
                    Category::Work,
                    at(2025, 6, 5, 10, 0) + Duration::days(i),
                )
            })
            .collect();
        for i in 0..3 {
            tasks.push(task(&format!("p{i}"), Priority::Medium, Category::Work));
        }

        let state = GamificationState {
            current_streak: 5,
            ..Default::default()
        };
        let now = wednesday_now();
        let score = productivity_score(
            &task_analytics(&tasks, now),
            &state,
            &productivity_trends(&tasks, now),
        );
        // 28 (rate) + 10 (streak) + 20 (active days) + 2 (daily average).
        assert_eq!(score, 60);
    }

    #[test]
    fn score_is_zero_with_no_history() {
        let now = wednesday_now();
        let score = productivity_score(
            &task_analytics(&[], now),
            &GamificationState::default(),
            &productivity_trends(&[], now),
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn score_never_exceeds_one_hundred() {
        // Saturate every component.
        let tasks: Vec<Task> = (0..70)
            .map(|i| {
                completed(
                    &format!("d{i}"),
                    Priority::Medium,
                    Category::Work,
                    at(2025, 6, 5, 10, 0) + Duration::days(i64::from(i) % 7),
                )
            })
            .collect();
        let state = GamificationState {
            current_streak: 45,
            ..Default::default()
        };
        let now = wednesday_now();
        let score = productivity_score(
            &task_analytics(&tasks, now),
            &state,
            &productivity_trends(&tasks, now),
        );
        assert_eq!(score, 100);
    }
}

mod insight_tests {
    use super::*;

    #[test]
    fn completion_rate_extremes_pick_opposite_insights() {
        let now = wednesday_now();
        let (best_time, weekdays) = quiet_sessions();

        let strong: Vec<Task> = (0..9)
            .map(|i| {
                completed(&format!("c{i}"), Priority::Medium, Category::Work, at(2025, 6, 10, 8, 0))
            })
            .chain(std::iter::once(task("p", Priority::Medium, Category::Work)))
            .collect();
        let insights = advanced_insights(
            &task_analytics(&strong, now),
            &productivity_trends(&strong, now),
            &GamificationState::default(),
            &best_time,
            &weekdays,
        );
        assert!(titles(&insights).contains(&"Excellent Completion Rate"));
        assert!(!titles(&insights).contains(&"Low Completion Rate"));

        let weak: Vec<Task> = (0..3)
            .map(|i| {
                completed(&format!("c{i}"), Priority::Medium, Category::Work, at(2025, 6, 10, 8, 0))
            })
            .chain((0..7).map(|i| task(&format!("p{i}"), Priority::Medium, Category::Work)))
            .collect();
        let insights = advanced_insights(
            &task_analytics(&weak, now),
            &productivity_trends(&weak, now),
            &GamificationState::default(),
            &best_time,
            &weekdays,
        );
        assert!(titles(&insights).contains(&"Low Completion Rate"));
        assert!(!titles(&insights).contains(&"Excellent Completion Rate"));
    }

    #[test]
    fn best_time_insight_needs_three_sessions() {
        let now = wednesday_now();
        let analytics = task_analytics(&[], now);
        let trends = productivity_trends(&[], now);
        let state = GamificationState::default();

        let sparse = BestTimeOfDay {
            period: DayPeriod::Morning,
            hour: 9,
            sessions: 2,
        };
        let insights = advanced_insights(&analytics, &trends, &state, &sparse, &[]);
        assert!(!titles(&insights).contains(&"Your Best Time"));

        let enough = BestTimeOfDay {
            period: DayPeriod::Evening,
            hour: 20,
            sessions: 3,
        };
        let insights = advanced_insights(&analytics, &trends, &state, &enough, &[]);
        let best = insights.iter().find(|i| i.title == "Your Best Time").unwrap();
        assert_eq!(best.kind, InsightKind::Info);
        assert!(best.message.contains("Evening"));
        assert!(best.message.contains("20:00"));
    }

    #[test]
    fn favorite_category_needs_five_tasks() {
        let now = wednesday_now();
        let (best_time, weekdays) = quiet_sessions();
        let state = GamificationState::default();

        let few: Vec<Task> = (0..4)
            .map(|i| task(&format!("w{i}"), Priority::Medium, Category::Work))
            .collect();
        let insights = advanced_insights(
            &task_analytics(&few, now),
            &productivity_trends(&few, now),
            &state,
            &best_time,
            &weekdays,
        );
        assert!(!titles(&insights).contains(&"Favorite Category"));

        let mut many: Vec<Task> = (0..4)
            .map(|i| task(&format!("w{i}"), Priority::Medium, Category::Study))
            .collect();
        many.push(completed("w5", Priority::Medium, Category::Study, at(2025, 6, 10, 8, 0)));
        let insights = advanced_insights(
            &task_analytics(&many, now),
            &productivity_trends(&many, now),
            &state,
            &best_time,
            &weekdays,
        );
        let favorite = insights
            .iter()
            .find(|i| i.title == "Favorite Category")
            .unwrap();
        assert!(favorite.message.contains("study"));
        assert!(favorite.message.contains("20%"));
    }

    #[test]
    fn favorite_category_tie_keeps_catalog_order() {
        let now = wednesday_now();
        let (best_time, weekdays) = quiet_sessions();

        // Work and Personal are tied at five tasks each; Work sorts first.
        let mut tasks: Vec<Task> = (0..5)
            .map(|i| {
                completed(&format!("w{i}"), Priority::Medium, Category::Work, at(2025, 6, 10, 8, 0))
            })
            .collect();
        tasks.extend((0..5).map(|i| {
            completed(&format!("p{i}"), Priority::Medium, Category::Personal, at(2025, 6, 10, 8, 0))
        }));

        let insights = advanced_insights(
            &task_analytics(&tasks, now),
            &productivity_trends(&tasks, now),
            &GamificationState::default(),
            &best_time,
            &weekdays,
        );
        let favorite = insights
            .iter()
            .find(|i| i.title == "Favorite Category")
            .unwrap();
        assert!(favorite.message.contains("work"));
        assert!(!favorite.message.contains("personal"));
    }

    #[test]
    fn neglected_high_priority_tasks_raise_a_warning() {
        let now = wednesday_now();
        let (best_time, weekdays) = quiet_sessions();

        let mut tasks: Vec<Task> = (0..4)
            .map(|i| task(&format!("h{i}"), Priority::High, Category::Work))
            .collect();
        tasks.push(completed("h5", Priority::High, Category::Work, at(2025, 6, 10, 8, 0)));

        let insights = advanced_insights(
            &task_analytics(&tasks, now),
            &productivity_trends(&tasks, now),
            &GamificationState::default(),
            &best_time,
            &weekdays,
        );
        let warning = insights
            .iter()
            .find(|i| i.title == "High-Priority Tasks Need Attention")
            .unwrap();
        assert_eq!(warning.kind, InsightKind::Warning);
        assert!(warning.message.contains("5 high-priority"));
        assert!(warning.message.contains("20%"));
    }

    #[test]
    fn recent_activity_shift_reports_a_trend() {
        let now = wednesday_now();
        let (best_time, weekdays) = quiet_sessions();
        let state = GamificationState::default();

        // All completions in the most recent three days.
        let up: Vec<Task> = (0..3)
            .map(|i| {
                completed(
                    &format!("u{i}"),
                    Priority::Medium,
                    Category::Work,
                    at(2025, 6, 9, 10, 0) + Duration::days(i),
                )
            })
            .collect();
        let insights = advanced_insights(
            &task_analytics(&up, now),
            &productivity_trends(&up, now),
            &state,
            &best_time,
            &weekdays,
        );
        assert!(titles(&insights).contains(&"Trending Up"));
        assert!(!titles(&insights).contains(&"Trending Down"));

        // All completions at the old end of the window.
        let down: Vec<Task> = (0..6)
            .map(|i| {
                completed(
                    &format!("d{i}"),
                    Priority::Medium,
                    Category::Work,
                    at(2025, 6, 5, 10, 0) + Duration::days(i64::from(i) % 3),
                )
            })
            .collect();
        let insights = advanced_insights(
            &task_analytics(&down, now),
            &productivity_trends(&down, now),
            &state,
            &best_time,
            &weekdays,
        );
        assert!(titles(&insights).contains(&"Trending Down"));
    }

    #[test]
    fn streak_insights_cover_both_ends() {
        let now = wednesday_now();
        let (best_time, weekdays) = quiet_sessions();
        let analytics = task_analytics(&[], now);
        let trends = productivity_trends(&[], now);

        let hot = GamificationState {
            current_streak: 9,
            longest_streak: 9,
            ..Default::default()
        };
        let insights = advanced_insights(&analytics, &trends, &hot, &best_time, &weekdays);
        assert!(titles(&insights).contains(&"Impressive Streak"));

        let broken = GamificationState {
            current_streak: 0,
            longest_streak: 12,
            ..Default::default()
        };
        let insights = advanced_insights(&analytics, &trends, &broken, &best_time, &weekdays);
        let lost = insights.iter().find(|i| i.title == "Streak Lost").unwrap();
        assert!(lost.message.contains("12-day"));

        // A short-lived streak that ended is not worth mourning.
        let minor = GamificationState {
            current_streak: 0,
            longest_streak: 3,
            ..Default::default()
        };
        let insights = advanced_insights(&analytics, &trends, &minor, &best_time, &weekdays);
        assert!(!titles(&insights).contains(&"Streak Lost"));
    }

    #[test]
    fn best_weekday_needs_three_sessions() {
        let now = wednesday_now();
        let analytics = task_analytics(&[], now);
        let trends = productivity_trends(&[], now);
        let state = GamificationState::default();
        let best_time = BestTimeOfDay::default();

        let sparse = vec![
            WeekdaySessions { day: "Sun", sessions: 2 },
            WeekdaySessions { day: "Mon", sessions: 1 },
        ];
        let insights = advanced_insights(&analytics, &trends, &state, &best_time, &sparse);
        assert!(!titles(&insights).contains(&"Your Best Day"));

        let busy = vec![
            WeekdaySessions { day: "Sun", sessions: 1 },
            WeekdaySessions { day: "Mon", sessions: 4 },
            WeekdaySessions { day: "Tue", sessions: 2 },
        ];
        let insights = advanced_insights(&analytics, &trends, &state, &best_time, &busy);
        let best = insights.iter().find(|i| i.title == "Your Best Day").unwrap();
        assert!(best.message.contains("Mon"));
    }

    #[test]
    fn quiet_state_produces_no_insights() {
        let now = wednesday_now();
        let (best_time, weekdays) = quiet_sessions();
        // A 60% rate sits between both thresholds; nothing else fires.
        let tasks = vec![
            completed("a", Priority::Medium, Category::Work, at(2025, 4, 1, 8, 0)),
            completed("b", Priority::Medium, Category::Work, at(2025, 4, 2, 8, 0)),
            completed("c", Priority::Medium, Category::Work, at(2025, 4, 3, 8, 0)),
            task("d", Priority::Medium, Category::Home),
            task("e", Priority::Medium, Category::Home),
        ];
        let insights = advanced_insights(
            &task_analytics(&tasks, now),
            &productivity_trends(&tasks, now),
            &GamificationState::default(),
            &best_time,
            &weekdays,
        );
        assert!(insights.is_empty());
    }
}
