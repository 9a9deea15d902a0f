//! Task collection persistence.
//!
//! The engine does not own the task lifecycle; these operations exist to
//! keep the collection in the store and to apply the manual status toggle
//! cycle. Everything analytical happens read-only elsewhere.

use super::Engine;
use crate::error::Result;
use crate::store::{KeyValue, keys};
use crate::types::{NewTask, Task, TaskPatch, TaskStatus};
use chrono::{DateTime, Local};
use tracing::warn;
use uuid::Uuid;

impl<S: KeyValue> Engine<S> {
    /// The full task collection (empty on first access or corrupt data).
    pub fn tasks(&self) -> Vec<Task> {
        self.with_store(|store| Self::load_or_default(store, keys::TASKS))
    }

    /// Replace the whole collection.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.with_store(|store| Self::persist(store, keys::TASKS, &tasks))
    }

    /// Append a new task with defaults filled in.
    pub fn add_task(&self, new: NewTask) -> Result<Task> {
        self.add_task_at(new, Local::now())
    }

    pub fn add_task_at(&self, new: NewTask, now: DateTime<Local>) -> Result<Task> {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: if new.title.is_empty() {
                "Untitled".to_string()
            } else {
                new.title
            },
            description: new.description,
            status: TaskStatus::Pending,
            category: new.category,
            priority: new.priority,
            created_at: now,
            updated_at: None,
        };
        self.with_store(|store| {
            let mut tasks: Vec<Task> = Self::load_or_default(store, keys::TASKS);
            tasks.push(task.clone());
            Self::persist(store, keys::TASKS, &tasks)?;
            Ok(task)
        })
    }

    /// Apply a partial update. Returns `false` for an unknown id.
    /// `updated_at` is stamped only when the status changes, since it is
    /// the completion-attribution timestamp.
    pub fn update_task(&self, id: &str, patch: TaskPatch) -> Result<bool> {
        self.update_task_at(id, patch, Local::now())
    }

    pub fn update_task_at(
        &self,
        id: &str,
        patch: TaskPatch,
        now: DateTime<Local>,
    ) -> Result<bool> {
        self.with_store(|store| {
            let mut tasks: Vec<Task> = Self::load_or_default(store, keys::TASKS);
            let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
                warn!(task_id = id, "update for unknown task");
                return Ok(false);
            };

            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(category) = patch.category {
                task.category = category;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(status) = patch.status {
                if status != task.status {
                    task.status = status;
                    task.updated_at = Some(now);
                }
            }

            Self::persist(store, keys::TASKS, &tasks)?;
            Ok(true)
        })
    }

    /// Remove a task by id. Returns `false` for an unknown id.
    pub fn remove_task(&self, id: &str) -> Result<bool> {
        self.with_store(|store| {
            let mut tasks: Vec<Task> = Self::load_or_default(store, keys::TASKS);
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            if tasks.len() == before {
                warn!(task_id = id, "remove for unknown task");
                return Ok(false);
            }
            Self::persist(store, keys::TASKS, &tasks)?;
            Ok(true)
        })
    }

    /// Advance a task around the Pending -> InProgress -> Completed ->
    /// Pending cycle. Returns the new status, or `None` for an unknown id.
    pub fn toggle_task_status(&self, id: &str) -> Result<Option<TaskStatus>> {
        self.toggle_task_status_at(id, Local::now())
    }

    pub fn toggle_task_status_at(
        &self,
        id: &str,
        now: DateTime<Local>,
    ) -> Result<Option<TaskStatus>> {
        self.with_store(|store| {
            let mut tasks: Vec<Task> = Self::load_or_default(store, keys::TASKS);
            let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
                warn!(task_id = id, "toggle for unknown task");
                return Ok(None);
            };
            task.status = task.status.next();
            task.updated_at = Some(now);
            let status = task.status;
            Self::persist(store, keys::TASKS, &tasks)?;
            Ok(Some(status))
        })
    }

    /// Drop the whole collection.
    pub fn clear_tasks(&self) -> Result<()> {
        self.with_store(|store| {
            store
                .remove(keys::TASKS)
                .map_err(|e| crate::error::EngineError::store(keys::TASKS, e))
        })
    }
}
