//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects. Geometry comes from `layout`, which the
//! reducer also uses for mouse hit testing.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use roster_core::{FetchStatus, Field, User};
use unicode_width::UnicodeWidthStr;

use crate::common::text::{truncate_start_with_ellipsis, truncate_with_ellipsis};
use crate::layout::{COLUMN_SPACING, COLUMNS, ScreenLayout, column_areas};
use crate::state::AppState;
use crate::toast::{Toast, ToastKind};

pub const TITLE: &str = "User Management Table";

/// Spinner frames for the status bar while a fetch is running.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Key hints shown in the status bar.
const HINTS: &str = "Tab filter · ↑↓←→ select · Enter copy · ^T toggle · ^R reload · Esc quit";

const ACCENT: Color = Color::Cyan;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let layout = ScreenLayout::new(frame.area());

    render_title(frame, layout.title);
    render_filters(app, frame, &layout);
    render_table(app, frame, &layout);
    render_status(app, frame, layout.status);
    render_toasts(app, frame, &layout);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_filters(app: &AppState, frame: &mut Frame, layout: &ScreenLayout) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Filters ");
    frame.render_widget(block, layout.filters);

    let inner = layout.filters_inner();
    let slots = column_areas(inner);
    if let Some(label) = slots.first() {
        frame.render_widget(
            Paragraph::new(Span::styled("Find", Style::default().fg(Color::DarkGray))),
            *label,
        );
    }

    for field in Field::ALL {
        let Some(slot) = slots.get(field.index() + 1).copied() else {
            continue;
        };
        let focused = app.focus == field;
        let value = app.users.criteria().get(field);
        let max_width = usize::from(slot.width.saturating_sub(1));

        let (text, style) = if value.is_empty() {
            (
                truncate_with_ellipsis(field.placeholder(), max_width),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (
                truncate_start_with_ellipsis(value, max_width),
                Style::default().fg(Color::White),
            )
        };
        let style = if focused {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        };
        frame.render_widget(Paragraph::new(Span::styled(text.clone(), style)), slot);

        if focused {
            let typed_width = if value.is_empty() { 0 } else { text.width() };
            let x = slot.x + (typed_width as u16).min(slot.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(x, slot.y));
        }
    }
}

fn render_table(app: &AppState, frame: &mut Frame, layout: &ScreenLayout) {
    let users = &app.users;
    let title = format!(
        " Users ({} of {}) ",
        users.filtered_users().len(),
        users.users().len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);
    frame.render_widget(block, layout.table);

    let inner = layout.table_inner();
    let message = match users.status() {
        FetchStatus::Idle | FetchStatus::Loading if users.users().is_empty() => Some(Line::from(
            Span::styled("Loading...", Style::default().fg(Color::DarkGray)),
        )),
        FetchStatus::Failed(error) if users.users().is_empty() => Some(Line::from(Span::styled(
            format!("Could not load {TITLE}: {error}"),
            Style::default().fg(Color::Red),
        ))),
        _ => None,
    };
    if let Some(message) = message {
        render_centered(frame, inner, message);
        return;
    }

    let header = Row::new(
        std::iter::once("#")
            .chain(Field::ALL.iter().map(|field| field.title()))
            .map(|title| Cell::from(title).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().fg(ACCENT));

    let visible = layout.body_rows();
    let rows: Vec<Row> = users
        .filtered_users()
        .iter()
        .enumerate()
        .skip(app.selection.offset)
        .take(visible)
        .map(|(index, user)| user_row(app, index, user))
        .collect();
    let is_empty = rows.is_empty();

    let table = Table::new(rows, COLUMNS)
        .header(header)
        .column_spacing(COLUMN_SPACING);
    frame.render_widget(table, inner);

    if is_empty {
        let body = Rect {
            y: inner.y.saturating_add(1),
            height: inner.height.saturating_sub(1),
            ..inner
        };
        render_centered(
            frame,
            body,
            Line::from(Span::styled(
                "No users found",
                Style::default().fg(Color::DarkGray),
            )),
        );
    }
}

fn user_row<'a>(app: &AppState, index: usize, user: &'a User) -> Row<'a> {
    let selected = index == app.selection.row;
    let id = Cell::from(user.id.to_string()).style(Style::default().fg(Color::DarkGray));
    let cells = std::iter::once(id).chain(Field::ALL.iter().map(|&field| {
        let cell = Cell::from(user.field(field));
        if selected && field == app.selection.column {
            cell.style(Style::default().fg(Color::Black).bg(ACCENT))
        } else {
            cell
        }
    }));

    let row = Row::new(cells);
    if selected {
        row.style(Style::default().bg(Color::DarkGray))
    } else {
        row
    }
}

fn render_centered(frame: &mut Frame, area: Rect, line: Line<'_>) {
    if area.height == 0 {
        return;
    }
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}

fn render_status(app: &AppState, frame: &mut Frame, area: Rect) {
    let copy_enabled = app.users.copy_enabled();
    let switch = Span::styled(
        format!(" [{}] Copy on click ", if copy_enabled { "x" } else { " " }),
        if copy_enabled {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        },
    );

    let right = if app.users.is_loading() {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        Span::styled(format!("{spinner} Loading "), Style::default().fg(ACCENT))
    } else if let Some(error) = app.users.error() {
        Span::styled(format!("⚠ {error} "), Style::default().fg(Color::Red))
    } else {
        Span::raw("")
    };

    let [left_area, right_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(right.width() as u16),
    ])
    .areas(area);

    let hints_width = usize::from(left_area.width).saturating_sub(switch.width() + 1);
    let left = Line::from(vec![
        switch,
        Span::raw(" "),
        Span::styled(
            truncate_with_ellipsis(HINTS, hints_width),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(left), left_area);
    frame.render_widget(Paragraph::new(Line::from(right)), right_area);
}

/// Stacks toasts bottom-center above the status bar, newest lowest.
fn render_toasts(app: &AppState, frame: &mut Frame, layout: &ScreenLayout) {
    let area = frame.area();
    let mut bottom = layout.status.y;

    let toasts: Vec<&Toast> = app.toasts.iter().collect();
    for toast in toasts.into_iter().rev() {
        if bottom < 3 {
            break;
        }
        let max_width = usize::from(area.width.saturating_sub(4));
        let message = truncate_with_ellipsis(&toast.message, max_width);
        let width = (message.width() as u16 + 4).min(area.width);
        let rect = Rect {
            x: area.x + (area.width - width) / 2,
            y: bottom - 3,
            width,
            height: 3,
        };

        let color = match toast.kind {
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                ),
            rect,
        );
        bottom -= 3;
    }
}
