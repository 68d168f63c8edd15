//! Presentation configuration
//!
//! Opaque presentation/behavior parameters forwarded to the rendering and
//! animation layers: corner style, sheet background, the default drag flag
//! and the snap-point geometry. Persisted as JSON next to the close
//! history.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Rounded sheet corners (the terminal rendition of a corner radius)
    pub rounded_corners: bool,
    /// Sheet background color, by name or hex (e.g. "black", "#1e1e2e")
    pub background: String,
    /// Default drag-enable flag for newly opened sheets
    pub disable_drag: bool,
    /// Screen-height fraction of the Partial snap point
    pub partial_fraction: f32,
    /// Screen-height fraction of the Full snap point
    pub full_fraction: f32,
    /// Frames per open/move/close animation
    pub animation_frames: u8,
    /// Event-poll timeout in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_tick_rate_ms() -> u64 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rounded_corners: true,
            background: "black".to_string(),
            disable_drag: false,
            partial_fraction: 0.45,
            full_fraction: 0.9,
            animation_frames: crate::services::DEFAULT_ANIMATION_FRAMES,
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".sheet-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config from disk, falling back to defaults
    pub fn load() -> Config {
        let config_path = match Self::config_path() {
            Some(p) => p,
            None => return Config::default(),
        };

        if !config_path.exists() {
            return Config::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Config::default(),
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Parsed sheet background, falling back to black on a bad value
    pub fn background_color(&self) -> Color {
        self.background.parse().unwrap_or(Color::Black)
    }

    /// Snap fractions clamped to a sane, ordered range
    pub fn snap_fractions(&self) -> (f32, f32) {
        let full = self.full_fraction.clamp(0.2, 1.0);
        let partial = self.partial_fraction.clamp(0.1, full);
        (partial, full)
    }
}
