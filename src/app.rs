//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component. It owns the dialog state control, the presentation stack,
//! and one host per registered sheet; input goes to the topmost visible
//! sheet, everything else falls through to the home screen.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    snap_for_row, HomeComponent, HomeRenderContext, SheetComponent, SheetKind,
    SheetRenderContext,
};
use crate::config::Config;
use crate::model::history::{CloseHistory, CloseHistoryEntry, HISTORY_CAP};
use crate::model::registry::DialogStateControl;
use crate::model::sheet::SheetController;
use crate::model::snap::{SheetState, SnapPoint};
use crate::model::stack::SheetStack;
use crate::services::SheetAnimator;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

// ═══════════════════════════════════════════════════════════════════════════════
// Host Notices
// ═══════════════════════════════════════════════════════════════════════════════

/// Messages that deferred callbacks and close hooks send back to the app.
/// Callbacks run after the close animation, so they cannot touch App state
/// directly; they send a notice instead and the app applies it on drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostNotice {
    /// A tasks-sheet confirmation took effect
    Applied,
    /// The quit sheet was confirmed; quit now that it has closed
    QuitConfirmed,
    /// A sheet finished its close cycle
    SheetClosed(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sheet Host
// ═══════════════════════════════════════════════════════════════════════════════

/// Controller, animator, and view for one registered sheet
struct SheetHost {
    controller: SheetController,
    animator: SheetAnimator,
    view: SheetComponent,
}

impl SheetHost {
    fn new(view: SheetComponent, disable_drag: bool, frames: u8, tx: Sender<HostNotice>) -> Self {
        let id = view.id().to_string();
        let mut controller = SheetController::new(&id).with_disable_drag(disable_drag);
        controller.set_on_close(Box::new(move || {
            let _ = tx.send(HostNotice::SheetClosed(id.clone()));
        }));

        let mut animator = SheetAnimator::new(frames);
        animator.set_disable_drag(disable_drag);

        Self {
            controller,
            animator,
            view,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Expanded count and dialog open registry
    pub control: DialogStateControl,

    /// Presentation order; the topmost visible sheet receives input
    pub stack: SheetStack,

    /// One host per registered sheet
    sheets: Vec<SheetHost>,

    /// Home screen under the sheets
    pub home: HomeComponent,

    pub config: Config,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    /// Confirmations that have taken effect (applied after close)
    applied_count: usize,

    /// Close history, newest first
    close_history: Vec<CloseHistoryEntry>,

    /// Where the close history is persisted; `None` keeps it in memory only
    history_path: Option<PathBuf>,

    /// Sender handed to deferred callbacks
    notice_tx: Sender<HostNotice>,
    notice_rx: Receiver<HostNotice>,

    /// Last drawn area, for translating drag rows into snap points
    last_area: Rect,
}

impl App {
    /// Create a new App instance with the two demo sheets registered,
    /// persisting its close history at the default location
    pub fn new(config: Config) -> App {
        Self::with_history_path(config, CloseHistory::default_path())
    }

    /// Create an App whose close history is read from and written to
    /// `history_path`. `None` disables persistence entirely.
    pub fn with_history_path(config: Config, history_path: Option<PathBuf>) -> App {
        let (notice_tx, notice_rx) = mpsc::channel();
        let frames = config.animation_frames;

        let sheets = vec![
            SheetHost::new(
                SheetComponent::new("tasks", "Tasks", SheetKind::Tasks),
                config.disable_drag,
                frames,
                notice_tx.clone(),
            ),
            // Confirmation sheets are never draggable
            SheetHost::new(
                SheetComponent::new("quit", "Quit?", SheetKind::QuitConfirm),
                true,
                frames,
                notice_tx.clone(),
            ),
        ];

        let close_history = match &history_path {
            Some(path) => CloseHistory::load_from(path),
            None => Vec::new(),
        };

        App {
            control: DialogStateControl::new(),
            stack: SheetStack::new(),
            sheets,
            home: HomeComponent::new(),
            config,
            should_quit: false,
            status_message: None,
            applied_count: 0,
            close_history,
            history_path,
            notice_tx,
            notice_rx,
            last_area: Rect::default(),
        }
    }

    pub fn applied_count(&self) -> usize {
        self.applied_count
    }

    pub fn close_history(&self) -> &[CloseHistoryEntry] {
        &self.close_history
    }

    fn host_index(&self, id: &str) -> Option<usize> {
        self.sheets.iter().position(|host| host.view.id() == id)
    }

    fn top_host_index(&self) -> Option<usize> {
        let top = self.stack.top()?;
        self.host_index(top)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sheet Operations
    // ─────────────────────────────────────────────────────────────────────────

    fn open_sheet(&mut self, id: &str) {
        let idx = match self.host_index(id) {
            Some(i) => i,
            None => {
                self.status_message = Some(format!("unknown sheet: {}", id));
                return;
            }
        };

        if self.sheets[idx].animator.is_visible() {
            return;
        }

        self.control.set_dialog_is_open(id, true);
        self.stack.push(id);

        let host = &mut self.sheets[idx];
        host.animator
            .set_disable_drag(host.controller.disable_drag());
        host.animator.open();
        self.status_message = None;
    }

    fn close_top_sheet(&mut self) {
        if let Some(idx) = self.top_host_index() {
            self.sheets[idx].animator.close();
        }
    }

    /// Enqueue the confirm callback, then begin the close animation.
    /// The callback takes effect only after the close completes.
    fn confirm_top_sheet(&mut self) {
        let idx = match self.top_host_index() {
            Some(i) => i,
            None => return,
        };

        let tx = self.notice_tx.clone();
        let notice = match self.sheets[idx].view.kind() {
            SheetKind::Tasks => HostNotice::Applied,
            SheetKind::QuitConfirm => HostNotice::QuitConfirmed,
        };
        self.sheets[idx]
            .controller
            .enqueue_close_callback(Box::new(move || {
                tx.send(notice)?;
                Ok(())
            }));
        self.sheets[idx].animator.close();
    }

    fn snap_top_sheet(&mut self, snap_point: SnapPoint) {
        if let Some(idx) = self.top_host_index() {
            self.sheets[idx].animator.snap_to(snap_point);
        }
    }

    /// Translate a drag row into a snap target for the topmost sheet.
    /// A drag below the partial threshold closes the sheet.
    fn drag_top_sheet(&mut self, row: u16) {
        let idx = match self.top_host_index() {
            Some(i) => i,
            None => return,
        };

        if self.sheets[idx].controller.disable_drag() {
            return;
        }

        let (partial, full) = self.config.snap_fractions();
        match snap_for_row(self.last_area, row, partial, full) {
            SnapPoint::Hidden => self.sheets[idx].animator.close(),
            target => self.sheets[idx].animator.drag_to(target),
        }
    }

    fn toggle_drag_lock(&mut self) {
        if let Some(idx) = self.top_host_index() {
            let host = &mut self.sheets[idx];
            let disable = !host.controller.disable_drag();
            host.controller.set_disable_drag(disable);
            host.animator.set_disable_drag(disable);
            self.status_message = Some(if disable {
                "dragging disabled".to_string()
            } else {
                "dragging enabled".to_string()
            });
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tick Processing
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance animations, route emitted events through each controller,
    /// and apply any notices sent by deferred callbacks.
    fn tick(&mut self) {
        let mut closed: Vec<String> = Vec::new();

        for i in 0..self.sheets.len() {
            self.sheets[i].animator.tick();
            let events = self.sheets[i].animator.drain_events();

            for event in events {
                // The controller resets its snap state inside the close
                // sequence, so capture it first for the history record.
                let pre_snap = self.sheets[i].controller.snap_point();
                let state = self.sheets[i]
                    .controller
                    .handle_event(event, &mut self.control);

                if state == Some(SheetState::Closed) {
                    let id = self.sheets[i].controller.id().to_string();
                    self.record_close(&id, pre_snap, self.sheets[i].controller.last_close_drained());
                    closed.push(id);
                }
            }
        }

        for id in closed {
            self.stack.remove(&id);
        }

        while let Ok(notice) = self.notice_rx.try_recv() {
            match notice {
                HostNotice::Applied => {
                    self.applied_count += 1;
                    self.status_message = Some("confirmation applied".to_string());
                }
                HostNotice::QuitConfirmed => self.should_quit = true,
                HostNotice::SheetClosed(id) => {
                    self.status_message = Some(format!("{} closed", id));
                }
            }
        }
    }

    fn record_close(&mut self, id: &str, last_snap_point: SnapPoint, callbacks_run: usize) {
        self.close_history.insert(
            0,
            CloseHistoryEntry {
                timestamp: Local::now(),
                sheet_id: id.to_string(),
                last_snap_point,
                callbacks_run,
            },
        );
        self.close_history.truncate(HISTORY_CAP);
        self.persist_history();
    }

    fn clear_history(&mut self) {
        self.close_history.clear();
        self.persist_history();
        self.status_message = Some("close history cleared".to_string());
    }

    fn persist_history(&self) {
        if let Some(path) = &self.history_path {
            if let Err(e) = CloseHistory::save_to(path, &self.close_history) {
                tracing::warn!("failed to save close history: {e:#}");
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        match self.top_host_index() {
            Some(idx) => self.sheets[idx].view.handle_key_event(key),
            None => self.home.handle_key_event(key),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match self.top_host_index() {
            Some(idx) => self.sheets[idx].view.handle_mouse_event(mouse),
            None => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.tick(),
            Action::Resize(_, _) => {}
            Action::ForceQuit => self.should_quit = true,
            Action::OpenSheet(id) => self.open_sheet(&id),
            Action::CloseSheet => self.close_top_sheet(),
            Action::ConfirmSheet => self.confirm_top_sheet(),
            Action::SnapSheet(snap_point) => self.snap_top_sheet(snap_point),
            Action::DragSheet(row) => self.drag_top_sheet(row),
            Action::ToggleDragLock => self.toggle_drag_lock(),
            Action::ClearHistory => self.clear_history(),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.last_area = area;

        let ctx = HomeRenderContext {
            control: &self.control,
            history: &self.close_history,
            applied: self.applied_count,
            status: self.status_message.as_deref(),
        };
        self.home.draw_home(frame, area, &ctx);

        // Bottom of the stack first so the topmost sheet draws on top
        let (partial, full) = self.config.snap_fractions();
        let order: Vec<String> = self.stack.iter().map(|id| id.to_string()).collect();
        for id in order {
            if let Some(idx) = self.host_index(&id) {
                let host = &self.sheets[idx];
                if !host.animator.is_visible() {
                    continue;
                }
                let ctx = SheetRenderContext {
                    context: host.controller.context(),
                    fraction: host.animator.visual_fraction(partial, full),
                    config: &self.config,
                };
                host.view.draw_sheet(frame, area, &ctx);
            }
        }

        Ok(())
    }
}
