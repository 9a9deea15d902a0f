//! Static level table and level queries.

use serde::Serialize;

/// One row of the level table. Rows are strictly increasing by both
/// `level` and `xp_required`; the first row has `xp_required = 0` so a
/// lookup always succeeds.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LevelDefinition {
    pub level: u32,
    pub xp_required: u64,
    pub title: &'static str,
}

pub const LEVELS: [LevelDefinition; 10] = [
    LevelDefinition { level: 1, xp_required: 0, title: "Beginner" },
    LevelDefinition { level: 2, xp_required: 100, title: "Apprentice" },
    LevelDefinition { level: 3, xp_required: 250, title: "Dedicated" },
    LevelDefinition { level: 4, xp_required: 500, title: "Consistent" },
    LevelDefinition { level: 5, xp_required: 1000, title: "Productive" },
    LevelDefinition { level: 6, xp_required: 2000, title: "Master" },
    LevelDefinition { level: 7, xp_required: 4000, title: "Specialist" },
    LevelDefinition { level: 8, xp_required: 7000, title: "Legendary" },
    LevelDefinition { level: 9, xp_required: 12000, title: "Epic" },
    LevelDefinition { level: 10, xp_required: 20000, title: "Immortal" },
];

/// Highest level whose threshold is at or below `xp`.
pub fn level_for_xp(xp: u64) -> &'static LevelDefinition {
    for def in LEVELS.iter().rev() {
        if xp >= def.xp_required {
            return def;
        }
    }
    &LEVELS[0]
}

/// Snapshot of where `xp` sits within the level table.
#[derive(Debug, Clone, Serialize)]
pub struct LevelInfo {
    pub current_level: u32,
    pub current_title: &'static str,
    pub current_xp: u64,
    pub xp_for_current_level: u64,
    /// `None` at the top of the table.
    pub next_level: Option<u32>,
    pub next_title: Option<&'static str>,
    pub xp_for_next_level: u64,
    /// XP earned within the current level band.
    pub xp_progress: u64,
    /// XP still needed to reach the next level; 0 at the top.
    pub xp_needed: u64,
    /// Progress through the current band, clamped to [0, 100].
    /// 100 exactly when there is no next level.
    pub progress_percent: f64,
}

/// Pure query describing progress at a given XP total.
pub fn level_info(xp: u64) -> LevelInfo {
    let current = level_for_xp(xp);
    let next = LEVELS.iter().find(|d| d.level == current.level + 1);

    match next {
        Some(next) => {
            let band = (next.xp_required - current.xp_required) as f64;
            let into_band = (xp - current.xp_required) as f64;
            LevelInfo {
                current_level: current.level,
                current_title: current.title,
                current_xp: xp,
                xp_for_current_level: current.xp_required,
                next_level: Some(next.level),
                next_title: Some(next.title),
                xp_for_next_level: next.xp_required,
                xp_progress: xp - current.xp_required,
                xp_needed: next.xp_required - xp,
                progress_percent: (into_band / band * 100.0).clamp(0.0, 100.0),
            }
        }
        None => LevelInfo {
            current_level: current.level,
            current_title: current.title,
            current_xp: xp,
            xp_for_current_level: current.xp_required,
            next_level: None,
            next_title: None,
            xp_for_next_level: xp,
            xp_progress: 0,
            xp_needed: 0,
            progress_percent: 100.0,
        },
    }
}
