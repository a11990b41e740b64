//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use roster_core::Field;
use tracing::{debug, info};

use crate::common::{TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::layout::{TableHit, hit_test};
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Mounted => start_fetch(app),
        UiEvent::Tick => {
            app.toasts.prune_expired(Instant::now());
            if app.users.is_loading() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
        UiEvent::Frame { width, height } => {
            app.screen = Rect::new(0, 0, width, height);
            app.clamp_selection();
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            match kind {
                TaskKind::FetchUsers => app.users.begin_fetch(),
            }
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tasks.state_mut(kind).finish_if_active(completed.id);
            if ok {
                update(app, *completed.result)
            } else {
                debug!(?kind, id = completed.id.0, "dropping stale task result");
                vec![]
            }
        }
        UiEvent::UsersLoaded(result) => {
            match result {
                Ok(users) => app.users.fetch_succeeded(users),
                Err(message) => app.users.fetch_failed(message),
            }
            app.clamp_selection();
            vec![]
        }
        UiEvent::ClipboardCopied { text } => {
            app.toasts.success(format!("{text} copied to clipboard."));
            vec![]
        }
        UiEvent::ClipboardFailed { error } => {
            app.toasts.error(format!("Cannot copy to clipboard: {error}"));
            vec![]
        }
    }
}

/// Requests a users fetch unless one is already in flight.
fn start_fetch(app: &mut AppState) -> Vec<UiEffect> {
    if app.tasks.state(TaskKind::FetchUsers).is_running() {
        debug!("fetch already running, ignoring request");
        return vec![];
    }
    let task = app.task_seq.next_id();
    // Mark active now so a second request before TaskStarted arrives is refused.
    app.tasks
        .state_mut(TaskKind::FetchUsers)
        .on_started(&TaskStarted { id: task });
    vec![UiEffect::FetchUsers { task }]
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Paste(text) => {
            let text: String = text.chars().filter(|c| !c.is_control()).collect();
            if !text.is_empty() {
                edit_focused_filter(app, |value| value.push_str(&text));
            }
            vec![]
        }
        Event::Resize(width, height) => {
            app.screen = Rect::new(0, 0, width, height);
            app.clamp_selection();
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let total = app.users.filtered_users().len();
    let visible = app.visible_rows();

    match key.code {
        KeyCode::Esc => quit(app),
        KeyCode::Char('c') if ctrl => quit(app),
        KeyCode::Char('u') if ctrl => {
            edit_focused_filter(app, String::clear);
            vec![]
        }
        KeyCode::Char('t') if ctrl => {
            let enabled = !app.users.copy_enabled();
            app.users.set_copy_enabled(enabled);
            info!(enabled, "copy on click toggled");
            vec![]
        }
        KeyCode::Char('r') if ctrl => start_fetch(app),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            edit_focused_filter(app, |value| value.push(c));
            vec![]
        }
        KeyCode::Backspace => {
            edit_focused_filter(app, |value| {
                value.pop();
            });
            vec![]
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            vec![]
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            vec![]
        }
        KeyCode::Up => {
            app.selection.move_by(-1, total, visible);
            vec![]
        }
        KeyCode::Down => {
            app.selection.move_by(1, total, visible);
            vec![]
        }
        KeyCode::PageUp => {
            app.selection.move_by(-(visible as isize), total, visible);
            vec![]
        }
        KeyCode::PageDown => {
            app.selection.move_by(visible as isize, total, visible);
            vec![]
        }
        KeyCode::Home => {
            app.selection.to_first(visible);
            vec![]
        }
        KeyCode::End => {
            app.selection.to_last(total, visible);
            vec![]
        }
        KeyCode::Left => {
            app.selection.column = app.selection.column.prev();
            vec![]
        }
        KeyCode::Right => {
            app.selection.column = app.selection.column.next();
            vec![]
        }
        KeyCode::Enter => copy_selected(app),
        _ => vec![],
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    let total = app.users.filtered_users().len();
    let visible = app.visible_rows();

    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.selection.move_by(-1, total, visible);
            vec![]
        }
        MouseEventKind::ScrollDown => {
            app.selection.move_by(1, total, visible);
            vec![]
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = app.layout();
            match hit_test(&layout, app.selection.offset, mouse.column, mouse.row) {
                Some(TableHit::Filter(field)) => {
                    app.focus = field;
                    vec![]
                }
                Some(TableHit::Cell { row, column }) if row < total => {
                    let column = column.unwrap_or(app.selection.column);
                    app.selection.select(row, column, total, visible);
                    copy_selected(app)
                }
                _ => vec![],
            }
        }
        _ => vec![],
    }
}

/// Emits a clipboard write for the selected cell when copy on click is on.
fn copy_selected(app: &AppState) -> Vec<UiEffect> {
    if !app.users.copy_enabled() {
        return vec![];
    }
    app.selected_text()
        .map(|text| {
            vec![UiEffect::CopyToClipboard {
                text: text.to_string(),
            }]
        })
        .unwrap_or_default()
}

/// Applies `edit` to the focused filter and pushes the result to the store.
fn edit_focused_filter(app: &mut AppState, edit: impl FnOnce(&mut String)) {
    let field: Field = app.focus;
    let mut value = app.users.criteria().get(field).to_string();
    edit(&mut value);
    if value == app.users.criteria().get(field) {
        return;
    }
    app.users.update_filter(field, value);
    app.selection.row = 0;
    app.selection.offset = 0;
    app.clamp_selection();
}

fn quit(app: &mut AppState) -> Vec<UiEffect> {
    app.should_quit = true;
    vec![UiEffect::Quit]
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use roster_core::User;

    use super::*;
    use crate::common::{TaskCompleted, TaskId};
    use crate::layout::ScreenLayout;

    fn user(id: u64, name: &str, username: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            phone: format!("555-010{id}"),
        }
    }

    fn sample_users() -> Vec<User> {
        vec![
            user(1, "Leanne Graham", "Bret"),
            user(2, "Ervin Howell", "Antonette"),
            user(3, "Clementine Bauch", "Samantha"),
        ]
    }

    fn loaded_app(copy_enabled: bool) -> AppState {
        let mut app = AppState::new(copy_enabled);
        update(
            &mut app,
            UiEvent::Frame {
                width: 100,
                height: 30,
            },
        );
        update(&mut app, UiEvent::UsersLoaded(Ok(sample_users())));
        app
    }

    fn key(code: KeyCode) -> UiEvent {
        key_with(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn left_click(app: &AppState, row: usize, field: Field) -> UiEvent {
        let layout = ScreenLayout::new(app.screen);
        let inner = layout.table_inner();
        let slots = crate::layout::column_areas(inner);
        let slot = slots[field.index() + 1];
        UiEvent::Terminal(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: slot.x,
            row: inner.y + 1 + row as u16,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            update(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_mount_requests_fetch() {
        let mut app = AppState::new(false);
        let effects = update(&mut app, UiEvent::Mounted);

        assert_eq!(effects, vec![UiEffect::FetchUsers { task: TaskId(0) }]);
        assert!(app.tasks.state(TaskKind::FetchUsers).is_running());
    }

    #[test]
    fn test_task_started_sets_loading() {
        let mut app = AppState::new(false);
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::FetchUsers,
                started: TaskStarted { id: TaskId(0) },
            },
        );
        assert!(app.users.is_loading());
    }

    #[test]
    fn test_refetch_ignored_while_running() {
        let mut app = AppState::new(false);
        update(&mut app, UiEvent::Mounted);

        let effects = update(&mut app, key_with(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_completed_fetch_loads_users_and_allows_refetch() {
        let mut app = AppState::new(false);
        update(&mut app, UiEvent::Mounted);

        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::FetchUsers,
                completed: TaskCompleted {
                    id: TaskId(0),
                    result: Box::new(UiEvent::UsersLoaded(Ok(sample_users()))),
                },
            },
        );
        assert_eq!(app.users.users().len(), 3);
        assert!(!app.tasks.is_any_running());

        let effects = update(&mut app, key_with(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(effects, vec![UiEffect::FetchUsers { task: TaskId(1) }]);
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut app = AppState::new(false);
        update(&mut app, UiEvent::Mounted);

        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::FetchUsers,
                completed: TaskCompleted {
                    id: TaskId(42),
                    result: Box::new(UiEvent::UsersLoaded(Ok(sample_users()))),
                },
            },
        );
        assert!(app.users.users().is_empty());
        assert!(app.tasks.is_any_running());
    }

    #[test]
    fn test_failed_fetch_keeps_previous_users() {
        let mut app = loaded_app(false);
        update(
            &mut app,
            UiEvent::UsersLoaded(Err("Network Error".to_string())),
        );

        assert_eq!(app.users.error(), Some("Network Error"));
        assert_eq!(app.users.filtered_users().len(), 3);
    }

    #[test]
    fn test_typing_filters_focused_field() {
        let mut app = loaded_app(false);
        type_text(&mut app, "ERVIN");

        assert_eq!(app.users.criteria().get(Field::Name), "ERVIN");
        assert_eq!(app.users.filtered_users().len(), 1);
        assert_eq!(app.users.filtered_users()[0].id, 2);

        update(&mut app, key_with(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.users.filtered_users().len(), 3);
    }

    #[test]
    fn test_tab_moves_focus_to_next_filter() {
        let mut app = loaded_app(false);
        update(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Field::Username);

        type_text(&mut app, "sam");
        update(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.users.criteria().get(Field::Username), "sa");
        assert_eq!(app.users.filtered_users().len(), 1);

        update(&mut app, key_with(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(app.focus, Field::Name);
    }

    #[test]
    fn test_paste_appends_to_filter() {
        let mut app = loaded_app(false);
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("Graham\n".to_string())),
        );
        assert_eq!(app.users.criteria().get(Field::Name), "Graham");
        assert_eq!(app.users.filtered_users().len(), 1);
    }

    #[test]
    fn test_filter_resets_selection() {
        let mut app = loaded_app(false);
        update(&mut app, key(KeyCode::End));
        assert_eq!(app.selection.row, 2);

        type_text(&mut app, "e");
        assert_eq!(app.selection.row, 0);
    }

    #[test]
    fn test_click_copies_when_enabled() {
        let mut app = loaded_app(true);
        let click = left_click(&app, 1, Field::Email);

        let effects = update(&mut app, click);
        assert_eq!(
            effects,
            vec![UiEffect::CopyToClipboard {
                text: "Antonette@example.com".to_string()
            }]
        );
        assert_eq!(app.selection.row, 1);
        assert_eq!(app.selection.column, Field::Email);

        update(
            &mut app,
            UiEvent::ClipboardCopied {
                text: "Antonette@example.com".to_string(),
            },
        );
        let toast = app.toasts.iter().next().expect("toast");
        assert_eq!(toast.message, "Antonette@example.com copied to clipboard.");
    }

    #[test]
    fn test_click_does_nothing_when_copy_disabled() {
        let mut app = loaded_app(false);
        let click = left_click(&app, 1, Field::Email);

        let effects = update(&mut app, click);
        assert!(effects.is_empty());
        assert!(app.toasts.is_empty());
        assert_eq!(app.selection.row, 1);
    }

    #[test]
    fn test_click_below_last_row_is_ignored() {
        let mut app = loaded_app(true);
        let click = left_click(&app, 10, Field::Name);

        assert!(update(&mut app, click).is_empty());
        assert_eq!(app.selection.row, 0);
    }

    #[test]
    fn test_toggle_copy_and_copy_with_enter() {
        let mut app = loaded_app(false);
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());

        update(&mut app, key_with(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert!(app.users.copy_enabled());

        update(&mut app, key(KeyCode::Down));
        update(&mut app, key(KeyCode::Right));
        let effects = update(&mut app, key(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![UiEffect::CopyToClipboard {
                text: "Antonette".to_string()
            }]
        );
    }

    #[test]
    fn test_clipboard_failure_shows_error_toast() {
        let mut app = loaded_app(true);
        update(
            &mut app,
            UiEvent::ClipboardFailed {
                error: "no display".to_string(),
            },
        );
        let toast = app.toasts.iter().next().expect("toast");
        assert_eq!(toast.message, "Cannot copy to clipboard: no display");
        assert_eq!(app.users.users().len(), 3);
    }

    #[test]
    fn test_escape_quits() {
        let mut app = AppState::new(false);
        let effects = update(&mut app, key(KeyCode::Esc));
        assert_eq!(effects, vec![UiEffect::Quit]);
        assert!(app.should_quit);
    }
}
