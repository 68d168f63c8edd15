//! Close-history persistence
//!
//! Each completed close cycle is recorded so the host screen can show what
//! closed, when, and how many deferred callbacks ran. Persisted as JSON
//! under the config directory, capped at the most recent entries.

use crate::model::snap::SnapPoint;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum entries kept on disk and in memory
pub const HISTORY_CAP: usize = 100;

/// One completed close cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseHistoryEntry {
    pub timestamp: DateTime<Local>,
    pub sheet_id: String,
    /// Snap point the sheet was resting at when the close began
    pub last_snap_point: SnapPoint,
    /// Deferred callbacks drained by this close cycle
    pub callbacks_run: usize,
}

impl CloseHistoryEntry {
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Wrapper for persisting close history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseHistory {
    pub entries: Vec<CloseHistoryEntry>,
}

impl CloseHistory {
    /// Default on-disk location (`~/.sheet-tui/history.json`)
    pub fn default_path() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".sheet-tui").join("history.json"))
    }

    /// Load the entries stored at `path`; missing or unreadable files
    /// yield an empty history
    pub fn load_from(path: &Path) -> Vec<CloseHistoryEntry> {
        if !path.exists() {
            return Vec::new();
        }

        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str::<CloseHistory>(&contents) {
            Ok(history) => history.entries,
            Err(_) => Vec::new(),
        }
    }

    /// Save the entries to `path`, creating parent directories and capping
    /// at the most recent entries
    pub fn save_to(path: &Path, entries: &[CloseHistoryEntry]) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let capped = &entries[..entries.len().min(HISTORY_CAP)];
        let contents = serde_json::to_string_pretty(&CloseHistory {
            entries: capped.to_vec(),
        })?;
        fs::write(path, contents)?;

        Ok(())
    }
}
