//! Sheet controller state machine
//!
//! One `SheetController` owns the lifecycle of one mounted bottom sheet:
//! `Hidden → Partial ⇄ Full → (closing) → Hidden`. It interprets the
//! discrete events the animation layer emits, keeps the process-wide
//! expanded count and open registry consistent, and guarantees the
//! deferred close callbacks and the host `on_close` hook run in a fixed
//! order once the close animation has visually completed.

use crate::model::context::DialogContext;
use crate::model::queue::{CloseCallback, CloseCallbackQueue};
use crate::model::registry::DialogStateControl;
use crate::model::snap::{SheetEvent, SheetState, SnapPoint};

/// Host-supplied hook invoked exactly once per close cycle, strictly after
/// the close-callback queue has fully drained.
pub type OnCloseHook = Box<dyn FnMut()>;

/// State machine for one mounted bottom sheet
pub struct SheetController {
    id: String,
    /// Current snap point as last reported by the animation layer
    snap_point: SnapPoint,
    /// Last observed snap point, consulted for edge detection and for the
    /// compensating decrement when a sheet is force-closed from Full
    prev_snap_point: SnapPoint,
    disable_drag: bool,
    close_callbacks: CloseCallbackQueue,
    on_close: Option<OnCloseHook>,
    context: DialogContext,
    /// Callbacks drained by the most recent close cycle
    last_close_drained: usize,
}

impl SheetController {
    /// Create a controller in the initial `Hidden` state
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            snap_point: SnapPoint::Hidden,
            prev_snap_point: SnapPoint::Hidden,
            disable_drag: false,
            close_callbacks: CloseCallbackQueue::new(),
            on_close: None,
            context: DialogContext::default(),
            last_close_drained: 0,
        }
    }

    /// Set the default drag flag at construction
    pub fn with_disable_drag(mut self, disable_drag: bool) -> Self {
        self.disable_drag = disable_drag;
        self.refresh_context();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn snap_point(&self) -> SnapPoint {
        self.snap_point
    }

    pub fn disable_drag(&self) -> bool {
        self.disable_drag
    }

    /// Update the drag flag; forwarded to the animation layer by the host
    pub fn set_disable_drag(&mut self, disable_drag: bool) {
        self.disable_drag = disable_drag;
        self.refresh_context();
    }

    /// Install the host `on_close` hook
    pub fn set_on_close(&mut self, hook: OnCloseHook) {
        self.on_close = Some(hook);
    }

    /// Defer an action until the close animation finishes
    pub fn enqueue_close_callback(&mut self, callback: CloseCallback) {
        self.close_callbacks.enqueue(callback);
    }

    pub fn pending_close_callbacks(&self) -> usize {
        self.close_callbacks.len()
    }

    /// Callbacks drained by the most recent completed close cycle
    pub fn last_close_drained(&self) -> usize {
        self.last_close_drained
    }

    /// Current per-sheet context for the content subtree. Identity is
    /// stable unless the snap point or drag flag changed.
    pub fn context(&self) -> &DialogContext {
        &self.context
    }

    /// Process one event from the animation layer.
    ///
    /// Returns the lifecycle state for host observation when the event was
    /// a state change; snap-point changes return `None`. Events must be
    /// delivered in emission order and each `Closed` at most once per close
    /// animation.
    pub fn handle_event(
        &mut self,
        event: SheetEvent,
        control: &mut DialogStateControl,
    ) -> Option<SheetState> {
        match event {
            SheetEvent::SnapPointChanged(snap_point) => {
                control.on_transition(self.prev_snap_point, snap_point);
                self.snap_point = snap_point;
                self.prev_snap_point = snap_point;
                self.refresh_context();
                None
            }
            SheetEvent::StateChanged(state) => {
                if state == SheetState::Closed {
                    self.finish_close(control);
                }
                Some(state)
            }
        }
    }

    /// Run the close sequence, in this exact order:
    /// 1. mark the open registry entry closed
    /// 2. drain the close-callback queue
    /// 3. invoke the host on_close hook
    /// 4. compensating decrement, only when the sheet was still at Full
    ///    when the close animation started (a sheet that left Full first
    ///    was already decremented on the snap-point edge)
    /// 5. reset the previous snap point for the next open cycle
    fn finish_close(&mut self, control: &mut DialogStateControl) {
        control.set_dialog_is_open(&self.id, false);

        self.last_close_drained = self.close_callbacks.drain_and_run();

        if let Some(hook) = self.on_close.as_mut() {
            hook();
        }

        if self.prev_snap_point.is_full() {
            control.set_fully_expanded_count(|c| c.saturating_sub(1));
        }

        self.prev_snap_point = SnapPoint::Hidden;
        self.snap_point = SnapPoint::Hidden;
        self.refresh_context();
        tracing::debug!(id = %self.id, drained = self.last_close_drained, "sheet closed");
    }

    fn refresh_context(&mut self) {
        if self.context.is_stale(self.snap_point, self.disable_drag) {
            self.context.update(self.snap_point, self.disable_drag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn snap(sp: SnapPoint) -> SheetEvent {
        SheetEvent::SnapPointChanged(sp)
    }

    fn state(s: SheetState) -> SheetEvent {
        SheetEvent::StateChanged(s)
    }

    #[test]
    fn test_expanded_count_follows_snap_edges() {
        let mut control = DialogStateControl::new();
        let mut sheet = SheetController::new("s1");

        sheet.handle_event(snap(SnapPoint::Partial), &mut control);
        assert_eq!(control.fully_expanded_count(), 0);

        sheet.handle_event(snap(SnapPoint::Full), &mut control);
        assert_eq!(control.fully_expanded_count(), 1);

        // Re-reporting Full is not an edge
        sheet.handle_event(snap(SnapPoint::Full), &mut control);
        assert_eq!(control.fully_expanded_count(), 1);

        sheet.handle_event(snap(SnapPoint::Partial), &mut control);
        assert_eq!(control.fully_expanded_count(), 0);
    }

    #[test]
    fn test_close_from_full_nets_single_decrement() {
        // Partial -> Full -> closed, without an intervening "leaving Full"
        // snap event. The compensating decrement must bring the count back
        // to its pre-open value exactly once.
        let mut control = DialogStateControl::new();
        let mut sheet = SheetController::new("s1");
        control.set_dialog_is_open("s1", true);

        sheet.handle_event(snap(SnapPoint::Partial), &mut control);
        sheet.handle_event(snap(SnapPoint::Full), &mut control);
        assert_eq!(control.fully_expanded_count(), 1);

        sheet.handle_event(state(SheetState::Closed), &mut control);
        assert_eq!(control.fully_expanded_count(), 0);
        assert!(!control.is_dialog_open("s1"));
        assert_eq!(sheet.snap_point(), SnapPoint::Hidden);
    }

    #[test]
    fn test_close_after_leaving_full_does_not_decrement_again() {
        // Partial -> Full -> Partial -> closed. The snap edge already
        // decremented; a second sheet pins the count at 1 so any spurious
        // close-time decrement would be visible.
        let mut control = DialogStateControl::new();
        let mut other = SheetController::new("s2");
        other.handle_event(snap(SnapPoint::Full), &mut control);
        assert_eq!(control.fully_expanded_count(), 1);

        let mut sheet = SheetController::new("s1");
        sheet.handle_event(snap(SnapPoint::Partial), &mut control);
        sheet.handle_event(snap(SnapPoint::Full), &mut control);
        assert_eq!(control.fully_expanded_count(), 2);
        sheet.handle_event(snap(SnapPoint::Partial), &mut control);
        assert_eq!(control.fully_expanded_count(), 1);

        sheet.handle_event(state(SheetState::Closed), &mut control);
        assert_eq!(control.fully_expanded_count(), 1);
    }

    #[test]
    fn test_close_sequence_order() {
        // Registry closed first, callbacks in FIFO order, on_close last
        let mut control = DialogStateControl::new();
        let mut sheet = SheetController::new("s1");
        control.set_dialog_is_open("s1", true);

        let order = Rc::new(RefCell::new(Vec::new()));
        for name in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            sheet.enqueue_close_callback(Box::new(move || {
                order.borrow_mut().push(name);
                Ok(())
            }));
        }
        {
            let order = Rc::clone(&order);
            sheet.set_on_close(Box::new(move || {
                order.borrow_mut().push("on_close");
            }));
        }

        sheet.handle_event(snap(SnapPoint::Partial), &mut control);
        sheet.handle_event(state(SheetState::Closed), &mut control);

        assert_eq!(*order.borrow(), vec!["a", "b", "c", "on_close"]);
        assert_eq!(sheet.pending_close_callbacks(), 0);
        assert_eq!(sheet.last_close_drained(), 3);
        assert!(!control.is_dialog_open("s1"));
    }

    #[test]
    fn test_failing_callback_does_not_abort_close() {
        let mut control = DialogStateControl::new();
        let mut sheet = SheetController::new("s1");

        let order = Rc::new(RefCell::new(Vec::new()));
        {
            let order = Rc::clone(&order);
            sheet.enqueue_close_callback(Box::new(move || {
                order.borrow_mut().push("a");
                Ok(())
            }));
        }
        sheet.enqueue_close_callback(Box::new(|| Err(anyhow!("b failed"))));
        {
            let order = Rc::clone(&order);
            sheet.enqueue_close_callback(Box::new(move || {
                order.borrow_mut().push("c");
                Ok(())
            }));
        }
        let closes = Rc::new(RefCell::new(0));
        {
            let closes = Rc::clone(&closes);
            sheet.set_on_close(Box::new(move || *closes.borrow_mut() += 1));
        }

        sheet.handle_event(state(SheetState::Closed), &mut control);

        assert_eq!(*order.borrow(), vec!["a", "c"]);
        assert_eq!(*closes.borrow(), 1);
        assert_eq!(sheet.pending_close_callbacks(), 0);
    }

    #[test]
    fn test_reopen_starts_fresh_queue() {
        let mut control = DialogStateControl::new();
        let mut sheet = SheetController::new("s1");

        let runs = Rc::new(RefCell::new(0));
        {
            let runs = Rc::clone(&runs);
            sheet.enqueue_close_callback(Box::new(move || {
                *runs.borrow_mut() += 1;
                Ok(())
            }));
        }

        sheet.handle_event(snap(SnapPoint::Partial), &mut control);
        sheet.handle_event(state(SheetState::Closed), &mut control);
        assert_eq!(*runs.borrow(), 1);

        // Second open/close cycle runs nothing from the first
        sheet.handle_event(state(SheetState::Opening), &mut control);
        sheet.handle_event(snap(SnapPoint::Partial), &mut control);
        sheet.handle_event(state(SheetState::Closed), &mut control);
        assert_eq!(*runs.borrow(), 1);
        assert_eq!(sheet.last_close_drained(), 0);
    }

    #[test]
    fn test_non_closed_states_pass_through() {
        let mut control = DialogStateControl::new();
        let mut sheet = SheetController::new("s1");
        sheet.handle_event(snap(SnapPoint::Full), &mut control);

        for s in [SheetState::Opening, SheetState::Open, SheetState::Closing] {
            assert_eq!(sheet.handle_event(state(s), &mut control), Some(s));
        }
        // Pass-through states mutate nothing
        assert_eq!(control.fully_expanded_count(), 1);
        assert_eq!(sheet.snap_point(), SnapPoint::Full);
    }

    #[test]
    fn test_full_scenario_end_to_end() {
        // open "s1" -> snap to Full (0 -> 1) -> close without leaving Full:
        // count back to 0, registry false, callbacks drained, on_close once
        let mut control = DialogStateControl::new();
        let mut sheet = SheetController::new("s1");
        control.set_dialog_is_open("s1", true);

        let closes = Rc::new(RefCell::new(0));
        {
            let closes = Rc::clone(&closes);
            sheet.set_on_close(Box::new(move || *closes.borrow_mut() += 1));
        }
        sheet.enqueue_close_callback(Box::new(|| Ok(())));

        sheet.handle_event(state(SheetState::Opening), &mut control);
        sheet.handle_event(snap(SnapPoint::Partial), &mut control);
        sheet.handle_event(state(SheetState::Open), &mut control);
        sheet.handle_event(snap(SnapPoint::Full), &mut control);
        assert_eq!(control.fully_expanded_count(), 1);

        sheet.handle_event(state(SheetState::Closing), &mut control);
        sheet.handle_event(state(SheetState::Closed), &mut control);

        assert_eq!(control.fully_expanded_count(), 0);
        assert!(!control.is_dialog_open("s1"));
        assert_eq!(sheet.pending_close_callbacks(), 0);
        assert_eq!(*closes.borrow(), 1);
    }

    #[test]
    fn test_context_identity_stable_unless_inputs_change() {
        let mut control = DialogStateControl::new();
        let mut sheet = SheetController::new("s1");

        sheet.handle_event(snap(SnapPoint::Partial), &mut control);
        let g = sheet.context().generation();

        // Same snap point again: identity unchanged
        sheet.handle_event(snap(SnapPoint::Partial), &mut control);
        assert_eq!(sheet.context().generation(), g);

        sheet.handle_event(snap(SnapPoint::Full), &mut control);
        assert_eq!(sheet.context().snap_point, SnapPoint::Full);
        assert!(sheet.context().generation() > g);

        let g = sheet.context().generation();
        sheet.set_disable_drag(true);
        assert!(sheet.context().disable_drag);
        assert!(sheet.context().generation() > g);

        // Setting the same flag again is not a change
        let g = sheet.context().generation();
        sheet.set_disable_drag(true);
        assert_eq!(sheet.context().generation(), g);
    }
}
