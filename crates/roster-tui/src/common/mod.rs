//! Shared helpers for the TUI: async task bookkeeping, clipboard access and
//! text measurement.

pub mod clipboard;
pub mod task;
pub mod text;

pub use clipboard::{Clipboard, ClipboardError};
pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::{truncate_start_with_ellipsis, truncate_with_ellipsis};
