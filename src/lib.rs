//! Gamification & productivity analytics engine.
//!
//! Converts task-completion and focus-session events into experience
//! points, levels, daily streaks, and achievement unlocks, and derives
//! analytics (scores, trends, insights, comparisons) from task and
//! session history. State lives behind a pluggable key-value store; a
//! missing key always means "fresh defaults", never an error.
//!
//! ```
//! use momentum::engine::Engine;
//! use momentum::types::NewTask;
//!
//! let engine = Engine::in_memory();
//! engine.update_daily_streak().unwrap();
//!
//! let task = engine
//!     .add_task(NewTask {
//!         title: "write the quarterly report".into(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! let reward = engine.on_task_completed(&task).unwrap();
//! assert!(reward.xp_gained > 0);
//! assert!(reward.new_achievements.iter().any(|a| a.id == "first_task"));
//! ```

pub mod achievements;
pub mod analytics;
pub mod clock;
pub mod engine;
pub mod error;
pub mod insights;
pub mod levels;
pub mod store;
pub mod types;
