//! Application state composition.
//!
//! ```text
//! AppState
//! ├── users: UsersState      (records, filtered list, fetch status, criteria, copy flag)
//! ├── focus: Field           (filter input receiving keystrokes)
//! ├── selection: Selection   (selected row/cell and scroll offset)
//! ├── toasts: Toasts         (clipboard notifications)
//! ├── task_seq / tasks       (async task bookkeeping)
//! └── screen: Rect           (last known terminal size)
//! ```

use ratatui::layout::Rect;
use roster_core::{Field, UsersState};

use crate::common::{TaskSeq, Tasks};
use crate::layout::ScreenLayout;
use crate::toast::Toasts;

pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Users store (the single source of truth for table data).
    pub users: UsersState,
    /// Filter input that receives typed characters.
    pub focus: Field,
    /// Selected cell and scroll position in the filtered list.
    pub selection: Selection,
    /// Active notifications.
    pub toasts: Toasts,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Spinner animation frame counter (while loading).
    pub spinner_frame: usize,
    /// Terminal area from the latest frame.
    pub screen: Rect,
}

impl AppState {
    pub fn new(copy_enabled: bool) -> Self {
        let mut users = UsersState::new();
        users.set_copy_enabled(copy_enabled);
        Self {
            should_quit: false,
            users,
            focus: Field::Name,
            selection: Selection::default(),
            toasts: Toasts::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            screen: Rect::default(),
        }
    }

    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.screen)
    }

    /// Number of table rows visible on screen (at least one).
    pub fn visible_rows(&self) -> usize {
        self.layout().body_rows().max(1)
    }

    /// Re-clamps the selection after the filtered list or screen changed.
    pub fn clamp_selection(&mut self) {
        let total = self.users.filtered_users().len();
        let visible = self.visible_rows();
        self.selection.clamp(total, visible);
    }

    /// Text of the selected cell, if any row is selected.
    pub fn selected_text(&self) -> Option<&str> {
        self.users
            .filtered_users()
            .get(self.selection.row)
            .map(|user| user.field(self.selection.column))
    }
}

/// Selected cell plus the first visible row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub row: usize,
    pub column: Field,
    pub offset: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            row: 0,
            column: Field::Name,
            offset: 0,
        }
    }
}

impl Selection {
    /// Moves the row by `delta`, stopping at the ends.
    pub fn move_by(&mut self, delta: isize, total: usize, visible: usize) {
        if total == 0 {
            self.row = 0;
            self.offset = 0;
            return;
        }
        let last = total - 1;
        self.row = self.row.saturating_add_signed(delta).min(last);
        self.scroll_into_view(visible);
    }

    pub fn select(&mut self, row: usize, column: Field, total: usize, visible: usize) {
        self.row = row;
        self.column = column;
        self.clamp(total, visible);
    }

    pub fn to_first(&mut self, visible: usize) {
        self.row = 0;
        self.scroll_into_view(visible);
    }

    pub fn to_last(&mut self, total: usize, visible: usize) {
        self.row = total.saturating_sub(1);
        self.scroll_into_view(visible);
    }

    pub fn clamp(&mut self, total: usize, visible: usize) {
        if total == 0 {
            self.row = 0;
            self.offset = 0;
            return;
        }
        self.row = self.row.min(total - 1);
        self.offset = self.offset.min(total.saturating_sub(visible));
        self.scroll_into_view(visible);
    }

    fn scroll_into_view(&mut self, visible: usize) {
        let visible = visible.max(1);
        if self.row < self.offset {
            self.offset = self.row;
        } else if self.row >= self.offset + visible {
            self.offset = self.row + 1 - visible;
        }
    }
}
