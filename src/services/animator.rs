//! Sheet animation service
//!
//! Owns the in-flight open/move/close transitions and reports back to the
//! controller through discrete `SheetEvent`s, never by mutating sheet
//! state directly. The controller treats it as a black box. Each
//! transition runs over a fixed number of frames advanced by `tick()`, so
//! tests can step it deterministically.
//!
//! A close, once started, always emits exactly one `Closed` event. Drag
//! moves are gated by the drag flag; programmatic snaps always pass.

use crate::model::snap::{SheetEvent, SheetState, SnapPoint};
use std::collections::VecDeque;

/// Frames a single open/move/close transition takes by default
pub const DEFAULT_ANIMATION_FRAMES: u8 = 4;

/// In-flight transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Opening { frames_left: u8 },
    Moving { to: SnapPoint, frames_left: u8 },
    Closing { frames_left: u8 },
}

/// Tick-driven animator for one sheet
pub struct SheetAnimator {
    frames_per_transition: u8,
    phase: Phase,
    /// Snap point the sheet last settled at (Hidden while closed)
    resting: SnapPoint,
    disable_drag: bool,
    events: VecDeque<SheetEvent>,
}

impl Default for SheetAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_FRAMES)
    }
}

impl SheetAnimator {
    pub fn new(frames_per_transition: u8) -> Self {
        Self {
            frames_per_transition: frames_per_transition.max(1),
            phase: Phase::Idle,
            resting: SnapPoint::Hidden,
            disable_drag: false,
            events: VecDeque::new(),
        }
    }

    /// Forwarded drag-enable flag; only gates drag-originated moves
    pub fn set_disable_drag(&mut self, disable_drag: bool) {
        self.disable_drag = disable_drag;
    }

    /// Last settled snap point
    pub fn resting(&self) -> SnapPoint {
        self.resting
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, Phase::Closing { .. })
    }

    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Whether the sheet is visible at all (settled or mid-transition)
    pub fn is_visible(&self) -> bool {
        self.resting != SnapPoint::Hidden || self.is_animating()
    }

    /// Begin the open animation toward the Partial snap point.
    /// No-op unless the sheet is fully hidden and idle.
    pub fn open(&mut self) {
        if self.phase != Phase::Idle || self.resting != SnapPoint::Hidden {
            return;
        }
        self.events
            .push_back(SheetEvent::StateChanged(SheetState::Opening));
        self.phase = Phase::Opening {
            frames_left: self.frames_per_transition,
        };
    }

    /// Programmatically move the sheet to a snap point. Ignored while
    /// closing, while hidden, and for `Hidden` itself (use `close`).
    pub fn snap_to(&mut self, snap_point: SnapPoint) {
        if snap_point == SnapPoint::Hidden || self.is_closing() || !self.is_visible() {
            return;
        }
        if self.phase == Phase::Idle && self.resting == snap_point {
            return;
        }
        self.phase = Phase::Moving {
            to: snap_point,
            frames_left: self.frames_per_transition,
        };
    }

    /// Drag-originated move; dropped entirely when dragging is disabled
    pub fn drag_to(&mut self, snap_point: SnapPoint) {
        if self.disable_drag {
            return;
        }
        self.snap_to(snap_point);
    }

    /// Begin the close animation. Exactly one `Closed` event will follow;
    /// re-requesting while already closing is a no-op.
    pub fn close(&mut self) {
        if self.is_closing() || !self.is_visible() {
            return;
        }
        self.events
            .push_back(SheetEvent::StateChanged(SheetState::Closing));
        self.phase = Phase::Closing {
            frames_left: self.frames_per_transition,
        };
    }

    /// Advance one animation frame, emitting events as transitions settle
    pub fn tick(&mut self) {
        match self.phase {
            Phase::Idle => {}
            Phase::Opening { frames_left } => {
                if frames_left > 1 {
                    self.phase = Phase::Opening {
                        frames_left: frames_left - 1,
                    };
                } else {
                    self.resting = SnapPoint::Partial;
                    self.phase = Phase::Idle;
                    self.events
                        .push_back(SheetEvent::SnapPointChanged(SnapPoint::Partial));
                    self.events
                        .push_back(SheetEvent::StateChanged(SheetState::Open));
                }
            }
            Phase::Moving { to, frames_left } => {
                if frames_left > 1 {
                    self.phase = Phase::Moving {
                        to,
                        frames_left: frames_left - 1,
                    };
                } else {
                    self.resting = to;
                    self.phase = Phase::Idle;
                    self.events.push_back(SheetEvent::SnapPointChanged(to));
                }
            }
            Phase::Closing { frames_left } => {
                if frames_left > 1 {
                    self.phase = Phase::Closing {
                        frames_left: frames_left - 1,
                    };
                } else {
                    self.resting = SnapPoint::Hidden;
                    self.phase = Phase::Idle;
                    self.events
                        .push_back(SheetEvent::StateChanged(SheetState::Closed));
                }
            }
        }
    }

    /// Take all pending events in emission order
    pub fn drain_events(&mut self) -> Vec<SheetEvent> {
        self.events.drain(..).collect()
    }

    /// Current visual height fraction for rendering, interpolated linearly
    /// across the in-flight transition
    pub fn visual_fraction(&self, partial: f32, full: f32) -> f32 {
        let fraction = |sp: SnapPoint| sp.height_fraction(partial, full);
        let lerp = |from: f32, to: f32, frames_left: u8| {
            let t = 1.0 - f32::from(frames_left) / f32::from(self.frames_per_transition);
            from + (to - from) * t
        };
        match self.phase {
            Phase::Idle => fraction(self.resting),
            Phase::Opening { frames_left } => {
                lerp(0.0, fraction(SnapPoint::Partial), frames_left)
            }
            Phase::Moving { to, frames_left } => {
                lerp(fraction(self.resting), fraction(to), frames_left)
            }
            Phase::Closing { frames_left } => lerp(fraction(self.resting), 0.0, frames_left),
        }
    }
}
