//! Dialog context exposed to sheet content
//!
//! A per-open-sheet value object handed to whatever renders inside the
//! sheet. The contract is stable identity: the controller rebuilds the
//! context only when the snap point or the drag flag actually changed, so
//! content can skip work when nothing it depends on moved. The generation
//! counter makes that stability observable.

use crate::model::snap::SnapPoint;

/// Current derived state for one open sheet's content subtree.
///
/// `is_native_dialog` is a capability flag distinguishing this presentation
/// mode from other dialog-hosting strategies in the host app. Closing is
/// requested through the action channel (`Action::CloseSheet`), which
/// delegates to the controller; the context itself never runs callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogContext {
    pub is_native_dialog: bool,
    pub snap_point: SnapPoint,
    pub disable_drag: bool,
    generation: u64,
}

impl DialogContext {
    pub fn new(snap_point: SnapPoint, disable_drag: bool) -> Self {
        Self {
            is_native_dialog: true,
            snap_point,
            disable_drag,
            generation: 0,
        }
    }

    /// True when the context would have to be rebuilt for these inputs
    pub fn is_stale(&self, snap_point: SnapPoint, disable_drag: bool) -> bool {
        self.snap_point != snap_point || self.disable_drag != disable_drag
    }

    /// Replace the derived fields and bump the generation. Callers should
    /// check `is_stale` first; an unchanged rebuild would break the
    /// identity contract.
    pub fn update(&mut self, snap_point: SnapPoint, disable_drag: bool) {
        self.snap_point = snap_point;
        self.disable_drag = disable_drag;
        self.generation += 1;
    }

    /// Monotonic identity marker; unchanged inputs leave it unchanged
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for DialogContext {
    fn default() -> Self {
        Self::new(SnapPoint::Hidden, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_native_dialog() {
        let ctx = DialogContext::default();
        assert!(ctx.is_native_dialog);
    }

    #[test]
    fn test_staleness_tracks_inputs() {
        let ctx = DialogContext::new(SnapPoint::Partial, false);
        assert!(!ctx.is_stale(SnapPoint::Partial, false));
        assert!(ctx.is_stale(SnapPoint::Full, false));
        assert!(ctx.is_stale(SnapPoint::Partial, true));
    }

    #[test]
    fn test_update_bumps_generation() {
        let mut ctx = DialogContext::new(SnapPoint::Partial, false);
        let g0 = ctx.generation();
        ctx.update(SnapPoint::Full, false);
        assert_eq!(ctx.snap_point, SnapPoint::Full);
        assert_eq!(ctx.generation(), g0 + 1);
    }
}
