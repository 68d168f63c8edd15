//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::snap::SnapPoint;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations/updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Sheets
    // ─────────────────────────────────────────────────────────────────────────
    /// Begin opening the sheet with the given id
    OpenSheet(String),
    /// Request the topmost sheet begin its close animation
    CloseSheet,
    /// Confirm the topmost sheet: enqueue its confirm callback, then close
    ConfirmSheet,
    /// Programmatically move the topmost sheet to a snap point
    SnapSheet(SnapPoint),
    /// Drag-originated move of the topmost sheet toward a terminal row
    DragSheet(u16),
    /// Toggle the drag-enable flag of the topmost sheet
    ToggleDragLock,

    // ─────────────────────────────────────────────────────────────────────────
    // History
    // ─────────────────────────────────────────────────────────────────────────
    /// Clear the persisted close history
    ClearHistory,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::OpenSheet(id) => write!(f, "OpenSheet({})", id),
            Action::CloseSheet => write!(f, "CloseSheet"),
            Action::ConfirmSheet => write!(f, "ConfirmSheet"),
            Action::SnapSheet(sp) => write!(f, "SnapSheet({})", sp.label()),
            Action::DragSheet(row) => write!(f, "DragSheet({})", row),
            Action::ToggleDragLock => write!(f, "ToggleDragLock"),
            Action::ClearHistory => write!(f, "ClearHistory"),
        }
    }
}
