//! Model layer - sheet state and process-wide bookkeeping
//!
//! This module contains all state-related types:
//! - `SheetController` - per-sheet lifecycle state machine
//! - `DialogStateControl` - process-wide expanded count and open registry
//! - `CloseCallbackQueue` - deferred actions run after the close animation
//! - `SheetStack` - presentation order of open sheets

pub mod context;
pub mod history;
pub mod queue;
pub mod registry;
pub mod sheet;
pub mod snap;
pub mod stack;

// Re-export commonly used types
pub use context::DialogContext;
pub use history::{CloseHistory, CloseHistoryEntry};
pub use queue::{CloseCallback, CloseCallbackQueue};
pub use registry::DialogStateControl;
pub use sheet::SheetController;
pub use snap::{SheetEvent, SheetState, SnapPoint};
pub use stack::SheetStack;
