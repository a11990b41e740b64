//! Screen geometry shared by the renderer and mouse hit testing.
//!
//! ```text
//! ┌ title ─────────────────────────────────────┐  1 row
//! │ filters: #  | name | username | email | phone │  3 rows (bordered)
//! │ table: header + body rows                  │  rest (bordered)
//! └ status bar ────────────────────────────────┘  1 row
//! ```

use std::rc::Rc;

use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use roster_core::Field;

/// Gap between table columns.
pub const COLUMN_SPACING: u16 = 1;

/// Widths of the `#`, name, username, email and phone columns.
pub const COLUMNS: [Constraint; 5] = [
    Constraint::Length(5),
    Constraint::Fill(3),
    Constraint::Fill(2),
    Constraint::Fill(3),
    Constraint::Fill(3),
];

const TITLE_HEIGHT: u16 = 1;
const FILTERS_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;
const HEADER_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub filters: Rect,
    pub table: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let [title, filters, table, status] = Layout::vertical([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(FILTERS_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .areas(area);
        Self {
            title,
            filters,
            table,
            status,
        }
    }

    /// Table area inside its border.
    pub fn table_inner(&self) -> Rect {
        self.table.inner(Margin::new(1, 1))
    }

    /// Filter inputs area inside its border.
    pub fn filters_inner(&self) -> Rect {
        self.filters.inner(Margin::new(1, 1))
    }

    /// Number of user rows that fit below the header.
    pub fn body_rows(&self) -> usize {
        usize::from(self.table_inner().height.saturating_sub(HEADER_HEIGHT))
    }
}

/// Splits a row into the five column slots.
pub fn column_areas(area: Rect) -> Rc<[Rect]> {
    Layout::horizontal(COLUMNS)
        .spacing(COLUMN_SPACING)
        .split(area)
}

/// Field shown in column slot `index` (slot 0 is the id column).
pub fn column_field(index: usize) -> Option<Field> {
    index.checked_sub(1).and_then(|i| Field::ALL.get(i).copied())
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableHit {
    /// A filter input.
    Filter(Field),
    /// A body row; `column` is `None` for the id column or a gap.
    Cell { row: usize, column: Option<Field> },
}

/// Maps a terminal position to a table row/cell or filter input.
///
/// `offset` is the index of the first visible row.
pub fn hit_test(layout: &ScreenLayout, offset: usize, x: u16, y: u16) -> Option<TableHit> {
    let pos = Position::new(x, y);

    let filters = layout.filters_inner();
    if filters.contains(pos) {
        let slots = column_areas(filters);
        let index = slots.iter().position(|slot| slot.contains(pos))?;
        return column_field(index).map(TableHit::Filter);
    }

    let inner = layout.table_inner();
    if !inner.contains(pos) || y < inner.y + HEADER_HEIGHT {
        return None;
    }

    let row = offset + usize::from(y - inner.y - HEADER_HEIGHT);
    let slots = column_areas(inner);
    let column = slots
        .iter()
        .position(|slot| slot.contains(pos))
        .and_then(column_field);
    Some(TableHit::Cell { row, column })
}
