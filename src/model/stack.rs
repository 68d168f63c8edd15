//! Presentation stack for open sheets
//!
//! Tracks the order sheets were opened in. Sheets render bottom-to-top and
//! only the topmost receives input, the same contract as a modal overlay
//! stack. Opening and closing are driven by the controller lifecycle; this
//! is bookkeeping only.

/// Open sheets in presentation order (bottom to top)
#[derive(Debug, Default)]
pub struct SheetStack {
    stack: Vec<String>,
}

impl SheetStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a sheet id when it begins opening. No-op if already present.
    pub fn push(&mut self, id: &str) {
        if !self.contains(id) {
            self.stack.push(id.to_string());
        }
    }

    /// Remove a sheet id once its close animation has finished
    pub fn remove(&mut self, id: &str) {
        self.stack.retain(|s| s != id);
    }

    /// The sheet currently receiving input
    pub fn top(&self) -> Option<&str> {
        self.stack.last().map(|s| s.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.stack.iter().any(|s| s == id)
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Ids in render order (bottom to top)
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stack.iter().map(|s| s.as_str())
    }
}
