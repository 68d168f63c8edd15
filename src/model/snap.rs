//! Snap points and sheet lifecycle states
//!
//! A sheet rests at one of three discrete vertical positions. Ordering only
//! matters for the Full-vs-not-Full distinction: `Partial` and `Hidden` are
//! both "not expanded" as far as the expanded-count bookkeeping is concerned.

use serde::{Deserialize, Serialize};

/// Allowed resting positions for a bottom sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SnapPoint {
    #[default]
    Hidden,
    Partial,
    Full,
}

impl SnapPoint {
    /// Classify this snap point for expanded-count edge detection.
    /// Pure function, no side effects.
    pub fn is_full(self) -> bool {
        matches!(self, SnapPoint::Full)
    }

    /// Display label for status lines and history entries
    pub fn label(self) -> &'static str {
        match self {
            SnapPoint::Hidden => "hidden",
            SnapPoint::Partial => "partial",
            SnapPoint::Full => "full",
        }
    }

    /// Fraction of the screen height the sheet occupies at rest
    pub fn height_fraction(self, partial: f32, full: f32) -> f32 {
        match self {
            SnapPoint::Hidden => 0.0,
            SnapPoint::Partial => partial,
            SnapPoint::Full => full,
        }
    }
}

/// Lifecycle states reported by the animation layer.
///
/// Only `Closed` is acted upon by the controller; the other values are
/// passed through for host observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetState {
    Opening,
    Open,
    Closing,
    Closed,
}

impl SheetState {
    pub fn label(self) -> &'static str {
        match self {
            SheetState::Opening => "opening",
            SheetState::Open => "open",
            SheetState::Closing => "closing",
            SheetState::Closed => "closed",
        }
    }
}

/// Discrete notifications emitted by the animation layer as a sheet is
/// dragged, programmatically moved, or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetEvent {
    SnapPointChanged(SnapPoint),
    StateChanged(SheetState),
}
