//! Event handling for the notes view
//!
//! Maps keyboard and mouse events onto the state controllers. Browse mode
//! edits the query and moves through the list; modal mode edits the form.

use super::regions::show_pagination;
use super::state::NotesState;
use super::widgets::{Pagination, TextField};
use crate::api::NewNote;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::{Duration, Instant};

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Leave the view
    Quit,
    /// The query text changed and a debounced update is pending
    QueryChanged,
    /// The page changed
    PageChanged,
    /// The form passed validation and should be sent
    Submit(NewNote),
    /// Fetch the current key again
    Refetch,
    /// No action taken
    Ignored,
}

/// What the handlers need to know about the rendered data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContext {
    /// Pages reported by the displayed data
    pub total_pages: u32,
    /// Notes in the displayed list
    pub list_len: usize,
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn query_edit(state: &mut NotesState, now: Instant, edit: impl FnOnce(&mut TextField) -> bool) -> EventResult {
    if state.edit_query(now, edit) {
        EventResult::QueryChanged
    } else {
        EventResult::Ignored
    }
}

fn change_page(state: &mut NotesState, target: u32) -> EventResult {
    if target == state.page() {
        return EventResult::Ignored;
    }
    state.set_page(target);
    EventResult::PageChanged
}

/// Handle keys while the note list has focus
fn handle_browse_mode(
    state: &mut NotesState,
    key: KeyEvent,
    ctx: ViewContext,
    now: Instant,
) -> EventResult {
    if is_ctrl(&key, 'c') || key.code == KeyCode::Esc {
        state.should_exit = true;
        return EventResult::Quit;
    }
    if is_ctrl(&key, 'n') {
        state.toggle_modal();
        return EventResult::Continue;
    }
    if is_ctrl(&key, 'r') {
        return EventResult::Refetch;
    }
    if is_ctrl(&key, 'u') {
        return query_edit(state, now, TextField::clear);
    }
    if is_ctrl(&key, 'w') {
        return query_edit(state, now, TextField::delete_word_backwards);
    }
    if is_ctrl(&key, 'a') {
        state.move_query_cursor(TextField::cursor_home);
        return EventResult::Continue;
    }
    if is_ctrl(&key, 'e') {
        state.move_query_cursor(TextField::cursor_end);
        return EventResult::Continue;
    }

    let pagination = show_pagination(ctx.total_pages);
    match key.code {
        KeyCode::PageDown if pagination => {
            change_page(state, Pagination::next_page(state.page(), ctx.total_pages))
        }
        KeyCode::PageUp if pagination => {
            change_page(state, Pagination::prev_page(state.page(), ctx.total_pages))
        }
        KeyCode::PageDown | KeyCode::PageUp => EventResult::Ignored,
        KeyCode::Up => {
            state.cursor_up();
            EventResult::Continue
        }
        KeyCode::Down => {
            state.cursor_down(ctx.list_len);
            EventResult::Continue
        }
        KeyCode::Home => {
            state.cursor_home();
            EventResult::Continue
        }
        KeyCode::End => {
            state.cursor_end(ctx.list_len);
            EventResult::Continue
        }
        KeyCode::Left => {
            state.move_query_cursor(TextField::cursor_left);
            EventResult::Continue
        }
        KeyCode::Right => {
            state.move_query_cursor(TextField::cursor_right);
            EventResult::Continue
        }
        KeyCode::Backspace => query_edit(state, now, TextField::backspace),
        KeyCode::Delete => query_edit(state, now, TextField::delete),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            query_edit(state, now, |field| {
                field.insert(c);
                true
            })
        }
        _ => EventResult::Ignored,
    }
}

/// Handle keys while the create-note modal is open
fn handle_modal_mode(state: &mut NotesState, key: KeyEvent) -> EventResult {
    if is_ctrl(&key, 'c') {
        state.should_exit = true;
        return EventResult::Quit;
    }
    if is_ctrl(&key, 'n') || key.code == KeyCode::Esc {
        state.close_modal();
        return EventResult::Continue;
    }

    let form = &mut state.form;
    match key.code {
        KeyCode::Enter => form.submit().map_or(EventResult::Continue, EventResult::Submit),
        KeyCode::Tab => {
            form.focus_next();
            EventResult::Continue
        }
        KeyCode::BackTab => {
            form.focus_prev();
            EventResult::Continue
        }
        KeyCode::Left => {
            form.left();
            EventResult::Continue
        }
        KeyCode::Right => {
            form.right();
            EventResult::Continue
        }
        KeyCode::Home => {
            form.home();
            EventResult::Continue
        }
        KeyCode::End => {
            form.end();
            EventResult::Continue
        }
        KeyCode::Backspace => {
            form.backspace();
            EventResult::Continue
        }
        KeyCode::Delete => {
            form.delete();
            EventResult::Continue
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            form.insert(c);
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Handle a key event in the current mode
pub fn handle_key(state: &mut NotesState, key: KeyEvent, ctx: ViewContext, now: Instant) -> EventResult {
    if key.kind != KeyEventKind::Press {
        return EventResult::Ignored;
    }
    if state.modal_open() {
        handle_modal_mode(state, key)
    } else {
        handle_browse_mode(state, key, ctx, now)
    }
}

/// Handle mouse events
fn handle_mouse(state: &mut NotesState, mouse: MouseEvent, ctx: ViewContext) -> EventResult {
    if state.modal_open() {
        return EventResult::Ignored;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.cursor_up();
            EventResult::Continue
        }
        MouseEventKind::ScrollDown => {
            state.cursor_down(ctx.list_len);
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(
    state: &mut NotesState,
    ctx: ViewContext,
    timeout: Duration,
) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) => handle_key(state, key, ctx, Instant::now()),
        Event::Mouse(mouse) => handle_mouse(state, mouse, ctx),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}
