//! Process-wide dialog bookkeeping
//!
//! `DialogStateControl` owns the two registries shared by every sheet in the
//! process: the fully-expanded count and the id → is-open map. It is a plain
//! value passed explicitly to each controller call rather than an ambient
//! global, so the core stays testable in isolation.
//!
//! All mutation happens on the single event-dispatch thread; no locking.

use crate::model::snap::SnapPoint;
use std::collections::HashMap;

/// Shared host-level state for all sheet instances
#[derive(Debug, Default)]
pub struct DialogStateControl {
    /// Number of currently-open sheets resting at the Full snap point
    fully_expanded: usize,
    /// Per-sheet "is open" flags, keyed by owner-supplied id.
    /// An entry stays true from open until the close animation finishes.
    open: HashMap<String, bool>,
}

impl DialogStateControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sheets whose last-known snap point is Full
    pub fn fully_expanded_count(&self) -> usize {
        self.fully_expanded
    }

    /// Apply an updater to the fully-expanded count.
    ///
    /// The updater receives the current value and its result is stored
    /// verbatim. Decrementing callers use `saturating_sub` so the count
    /// cannot underflow.
    pub fn set_fully_expanded_count<F>(&mut self, updater: F)
    where
        F: FnOnce(usize) -> usize,
    {
        self.fully_expanded = updater(self.fully_expanded);
    }

    /// Record a snap-point transition edge for one sheet instance.
    ///
    /// Increments when entering Full, decrements when leaving Full, no-op
    /// otherwise. Callers must report each observed transition at most once;
    /// idempotence is the caller's responsibility, not the tracker's.
    pub fn on_transition(&mut self, from: SnapPoint, to: SnapPoint) {
        if to.is_full() && !from.is_full() {
            self.fully_expanded += 1;
        } else if !to.is_full() && from.is_full() {
            self.fully_expanded = self.fully_expanded.saturating_sub(1);
        }
    }

    /// Set a sheet's open flag. True at open; false only when the close
    /// animation has fully completed, not when a close is merely requested.
    pub fn set_dialog_is_open(&mut self, id: &str, is_open: bool) {
        self.open.insert(id.to_string(), is_open);
    }

    pub fn is_dialog_open(&self, id: &str) -> bool {
        self.open.get(id).copied().unwrap_or(false)
    }

    /// Snapshot of the registry for display, sorted by id
    pub fn open_entries(&self) -> Vec<(String, bool)> {
        let mut entries: Vec<(String, bool)> =
            self.open.iter().map(|(k, v)| (k.clone(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_edges() {
        let mut control = DialogStateControl::new();

        control.on_transition(SnapPoint::Hidden, SnapPoint::Partial);
        assert_eq!(control.fully_expanded_count(), 0);

        control.on_transition(SnapPoint::Partial, SnapPoint::Full);
        assert_eq!(control.fully_expanded_count(), 1);

        control.on_transition(SnapPoint::Full, SnapPoint::Full);
        assert_eq!(control.fully_expanded_count(), 1);

        control.on_transition(SnapPoint::Full, SnapPoint::Partial);
        assert_eq!(control.fully_expanded_count(), 0);
    }

    #[test]
    fn test_count_never_underflows() {
        let mut control = DialogStateControl::new();
        control.on_transition(SnapPoint::Full, SnapPoint::Hidden);
        assert_eq!(control.fully_expanded_count(), 0);

        control.set_fully_expanded_count(|c| c.saturating_sub(1));
        assert_eq!(control.fully_expanded_count(), 0);
    }

    #[test]
    fn test_count_tracks_multiple_instances() {
        let mut control = DialogStateControl::new();
        // Two sheets enter Full, one leaves
        control.on_transition(SnapPoint::Partial, SnapPoint::Full);
        control.on_transition(SnapPoint::Hidden, SnapPoint::Full);
        assert_eq!(control.fully_expanded_count(), 2);

        control.on_transition(SnapPoint::Full, SnapPoint::Partial);
        assert_eq!(control.fully_expanded_count(), 1);
    }

    #[test]
    fn test_open_registry() {
        let mut control = DialogStateControl::new();
        assert!(!control.is_dialog_open("s1"));

        control.set_dialog_is_open("s1", true);
        assert!(control.is_dialog_open("s1"));

        control.set_dialog_is_open("s1", false);
        assert!(!control.is_dialog_open("s1"));

        control.set_dialog_is_open("s2", true);
        let entries = control.open_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("s1".to_string(), false));
        assert_eq!(entries[1], ("s2".to_string(), true));
    }
}
