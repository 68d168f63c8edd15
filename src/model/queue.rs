//! Close-callback queue
//!
//! Deferred actions registered while a sheet is open, guaranteed to run in
//! FIFO order once the close animation has finished. A failing callback is
//! logged and must not prevent the remaining callbacks from running; the
//! queue is cleared unconditionally afterward.

use anyhow::Result;

/// A deferred zero-argument action. Failure is signalled through the
/// returned `Result` and swallowed by the drain loop.
pub type CloseCallback = Box<dyn FnOnce() -> Result<()>>;

/// Per-sheet-instance FIFO of deferred close actions
#[derive(Default)]
pub struct CloseCallbackQueue {
    callbacks: Vec<CloseCallback>,
}

impl CloseCallbackQueue {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Append an action to the queue. May be called any number of times
    /// while the sheet is open or closing.
    pub fn enqueue(&mut self, callback: CloseCallback) {
        self.callbacks.push(callback);
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Execute every queued action in FIFO order, then clear the queue.
    ///
    /// Errors from individual callbacks are logged, never propagated, so
    /// one failing callback cannot block the rest. Returns the number of
    /// callbacks that ran.
    pub fn drain_and_run(&mut self) -> usize {
        let callbacks = std::mem::take(&mut self.callbacks);
        let count = callbacks.len();
        for callback in callbacks {
            if let Err(e) = callback() {
                tracing::error!("error running close callback: {e:#}");
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_drain_runs_in_fifo_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut queue = CloseCallbackQueue::new();

        for name in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            queue.enqueue(Box::new(move || {
                order.borrow_mut().push(name);
                Ok(())
            }));
        }

        let ran = queue.drain_and_run();
        assert_eq!(ran, 3);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_failing_callback_does_not_block_rest() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut queue = CloseCallbackQueue::new();

        {
            let order = Rc::clone(&order);
            queue.enqueue(Box::new(move || {
                order.borrow_mut().push("a");
                Ok(())
            }));
        }
        {
            let order = Rc::clone(&order);
            queue.enqueue(Box::new(move || {
                order.borrow_mut().push("b");
                Err(anyhow!("b failed"))
            }));
        }
        {
            let order = Rc::clone(&order);
            queue.enqueue(Box::new(move || {
                order.borrow_mut().push("c");
                Ok(())
            }));
        }

        queue.drain_and_run();
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_queue_empty_after_drain() {
        let mut queue = CloseCallbackQueue::new();
        queue.enqueue(Box::new(|| Err(anyhow!("boom"))));
        queue.enqueue(Box::new(|| Ok(())));
        assert_eq!(queue.len(), 2);

        queue.drain_and_run();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_empty_queue_is_noop() {
        let mut queue = CloseCallbackQueue::new();
        assert_eq!(queue.drain_and_run(), 0);
        assert!(queue.is_empty());
    }
}
