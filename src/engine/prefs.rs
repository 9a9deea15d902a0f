//! Theme selection and user preferences.

use super::Engine;
use crate::error::Result;
use crate::store::{KeyValue, keys};
use crate::types::{Category, Priority};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Color palette of a theme, as hex strings for the presentation layer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThemeColors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub info: &'static str,
}

/// A built-in theme.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub colors: ThemeColors,
}

pub const THEMES: [Theme; 6] = [
    Theme {
        id: "light",
        name: "Light",
        colors: ThemeColors {
            primary: "#1976d2",
            secondary: "#7b1fa2",
            background: "#f5f5f5",
            card: "#ffffff",
            text: "#212121",
            text_secondary: "#757575",
            border: "#e0e0e0",
            success: "#2e7d32",
            warning: "#fbc02d",
            error: "#e53935",
            info: "#1976d2",
        },
    },
    Theme {
        id: "dark",
        name: "Dark",
        colors: ThemeColors {
            primary: "#42a5f5",
            secondary: "#ab47bc",
            background: "#121212",
            card: "#1e1e1e",
            text: "#ffffff",
            text_secondary: "#b0b0b0",
            border: "#2c2c2c",
            success: "#4caf50",
            warning: "#ffb74d",
            error: "#ef5350",
            info: "#42a5f5",
        },
    },
    Theme {
        id: "ocean",
        name: "Ocean",
        colors: ThemeColors {
            primary: "#006064",
            secondary: "#00838f",
            background: "#e0f7fa",
            card: "#ffffff",
            text: "#004d40",
            text_secondary: "#00695c",
            border: "#b2ebf2",
            success: "#00897b",
            warning: "#ffa726",
            error: "#e53935",
            info: "#0097a7",
        },
    },
    Theme {
        id: "sunset",
        name: "Sunset",
        colors: ThemeColors {
            primary: "#d84315",
            secondary: "#f4511e",
            background: "#fff3e0",
            card: "#ffffff",
            text: "#bf360c",
            text_secondary: "#e64a19",
            border: "#ffe0b2",
            success: "#689f38",
            warning: "#ffa000",
            error: "#c62828",
            info: "#ff6f00",
        },
    },
    Theme {
        id: "forest",
        name: "Forest",
        colors: ThemeColors {
            primary: "#2e7d32",
            secondary: "#558b2f",
            background: "#f1f8e9",
            card: "#ffffff",
            text: "#1b5e20",
            text_secondary: "#33691e",
            border: "#dcedc8",
            success: "#43a047",
            warning: "#fdd835",
            error: "#d32f2f",
            info: "#66bb6a",
        },
    },
    Theme {
        id: "midnight",
        name: "Midnight",
        colors: ThemeColors {
            primary: "#5e35b1",
            secondary: "#7e57c2",
            background: "#1a1a2e",
            card: "#16213e",
            text: "#eeeeee",
            text_secondary: "#b4b4c5",
            border: "#0f3460",
            success: "#66bb6a",
            warning: "#ffca28",
            error: "#ef5350",
            info: "#9575cd",
        },
    },
];

pub fn theme_by_id(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Compact,
    #[default]
    Comfortable,
    Spacious,
}

/// User preferences. Unknown persisted fields are ignored and missing
/// fields fall back per-field, so loading always yields a full record
/// merged over the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default)]
    pub density: Density,
    #[serde(default = "default_true")]
    pub show_completed_tasks: bool,
    #[serde(default = "default_true")]
    pub enable_sounds: bool,
    #[serde(default = "default_true")]
    pub enable_vibration: bool,
    #[serde(default = "default_work_minutes")]
    pub pomodoro_work_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub pomodoro_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub pomodoro_long_break_minutes: u32,
    #[serde(default = "default_sessions_before_long_break")]
    pub pomodoro_sessions_before_long_break: u32,
    #[serde(default)]
    pub default_task_priority: Priority,
    #[serde(default)]
    pub default_task_category: Category,
    #[serde(default = "default_true")]
    pub show_xp_animations: bool,
    #[serde(default = "default_true")]
    pub show_streak_reminders: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            font_size: FontSize::default(),
            density: Density::default(),
            show_completed_tasks: true,
            enable_sounds: true,
            enable_vibration: true,
            pomodoro_work_minutes: default_work_minutes(),
            pomodoro_break_minutes: default_break_minutes(),
            pomodoro_long_break_minutes: default_long_break_minutes(),
            pomodoro_sessions_before_long_break: default_sessions_before_long_break(),
            default_task_priority: Priority::Medium,
            default_task_category: Category::General,
            show_xp_animations: true,
            show_streak_reminders: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_work_minutes() -> u32 {
    25
}

fn default_break_minutes() -> u32 {
    5
}

fn default_long_break_minutes() -> u32 {
    15
}

fn default_sessions_before_long_break() -> u32 {
    4
}

impl<S: KeyValue> Engine<S> {
    /// The selected theme, defaulting to light for a missing or unknown id.
    pub fn theme(&self) -> &'static Theme {
        let id: String = self.with_store(|store| Self::load_or_default(store, keys::THEME));
        theme_by_id(&id).unwrap_or(&THEMES[0])
    }

    /// Select a theme by id. An unknown id is rejected with `false`.
    pub fn set_theme(&self, id: &str) -> Result<bool> {
        if theme_by_id(id).is_none() {
            warn!(theme = id, "unknown theme id");
            return Ok(false);
        }
        self.with_store(|store| {
            Self::persist(store, keys::THEME, &id)?;
            Ok(true)
        })
    }

    /// Current preferences merged over the defaults.
    pub fn preferences(&self) -> Preferences {
        self.with_store(|store| Self::load_or_default(store, keys::PREFERENCES))
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> Result<()> {
        self.with_store(|store| Self::persist(store, keys::PREFERENCES, prefs))
    }

    /// Load, modify, and persist the preferences in one step.
    pub fn update_preferences(
        &self,
        f: impl FnOnce(&mut Preferences),
    ) -> Result<Preferences> {
        self.with_store(|store| {
            let mut prefs: Preferences = Self::load_or_default(store, keys::PREFERENCES);
            f(&mut prefs);
            Self::persist(store, keys::PREFERENCES, &prefs)?;
            Ok(prefs)
        })
    }

    /// Restore preferences and theme to their defaults.
    pub fn reset_preferences(&self) -> Result<()> {
        self.with_store(|store| {
            store
                .remove(keys::PREFERENCES)
                .map_err(|e| crate::error::EngineError::store(keys::PREFERENCES, e))?;
            store
                .remove(keys::THEME)
                .map_err(|e| crate::error::EngineError::store(keys::THEME, e))
        })
    }
}
