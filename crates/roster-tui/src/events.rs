//! UI events fed to the reducer.

use crossterm::event::Event as CrosstermEvent;
use roster_core::User;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// The table viewer is on screen; triggers the initial fetch.
    Mounted,

    /// Timer tick (toast expiry, spinner).
    Tick,

    /// Emitted once per frame before other events are processed.
    /// Contains terminal dimensions for layout calculations.
    Frame { width: u16, height: u16 },

    /// Terminal input event (key, mouse, paste, resize).
    Terminal(CrosstermEvent),

    /// An async task was spawned.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    /// An async task finished; `result` is the event it produced.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Users fetch finished (Err = human-readable message).
    UsersLoaded(Result<Vec<User>, String>),

    /// Text was written to the clipboard.
    ClipboardCopied { text: String },

    /// Clipboard write failed.
    ClipboardFailed { error: String },
}
