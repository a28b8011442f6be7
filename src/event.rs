//! Keyboard and mouse event handling.
//!
//! This module maps crossterm input to actions depending on the focused
//! widget:
//! - `Tab` / `Shift+Tab`: move focus
//! - In a sequence input: printable characters insert, `Backspace`,
//!   `Delete`, `Left`, `Right`, `Home`, `End` edit, `Enter` submits
//! - On the submit button: `Enter` or `Space` submits
//! - In the result: `h/j/k/l` or arrows move, `v` toggles a selection,
//!   `y` copies the selection (or the whole row)
//! - Mouse: left press in the result anchors a selection, drag extends it,
//!   release copies it, the wheel scrolls the result
//! - `F1`: toggle help
//! - `Esc` or `Ctrl+C`: quit

use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::clipboard::Clipboard;
use crate::model::{AppState, Focus, TextInput};
use crate::validate::Field;

/// Edits applied to a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// Actions that can be triggered by user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Move focus to the next widget
    FocusNext,
    /// Move focus to the previous widget
    FocusPrevious,
    /// Edit the focused input
    Edit(Field, InputEdit),
    /// Submit the form
    Submit,
    /// Move the result cursor by (rows, cells)
    MoveCursor(isize, isize),
    /// Start or cancel a keyboard selection
    ToggleSelection,
    /// Copy the selection, or the current row if nothing is selected
    Yank,
    /// Left button pressed at (column, row)
    MouseDown(u16, u16),
    /// Mouse dragged with the left button to (column, row)
    MouseDrag(u16, u16),
    /// Left button released
    MouseUp,
    /// Scroll the result by lines
    Scroll(isize),
    /// Toggle the help overlay
    ToggleHelp,
    /// Dismiss the help overlay
    DismissHelp,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for input events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on the current state.
pub fn handle_event(event: Event, state: &AppState) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, state.focus, state.show_help),
        Event::Mouse(mouse_event) => handle_mouse_event(mouse_event, state.show_help),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event based on the focused widget.
fn handle_key_event(key: KeyEvent, focus: Focus, show_help: bool) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    // If help is shown, any key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    // Handle Ctrl+C for emergency quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Esc => return Action::Quit,
        KeyCode::F(1) => return Action::ToggleHelp,
        KeyCode::Tab => return Action::FocusNext,
        KeyCode::BackTab => return Action::FocusPrevious,
        _ => {}
    }

    match focus {
        Focus::Seq1 => handle_input_key(key, Field::Seq1),
        Focus::Seq2 => handle_input_key(key, Field::Seq2),
        Focus::Submit => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Action::Submit,
            _ => Action::None,
        },
        Focus::Results => handle_results_key(key),
    }
}

/// Handles key events in a sequence input.
fn handle_input_key(key: KeyEvent, field: Field) -> Action {
    let edit = match key.code {
        KeyCode::Enter => return Action::Submit,
        KeyCode::Backspace => InputEdit::Backspace,
        KeyCode::Delete => InputEdit::Delete,
        KeyCode::Left => InputEdit::Left,
        KeyCode::Right => InputEdit::Right,
        KeyCode::Home => InputEdit::Home,
        KeyCode::End => InputEdit::End,
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            InputEdit::Insert(c)
        }
        _ => return Action::None,
    };
    Action::Edit(field, edit)
}

/// Handles key events in the result panel (Vim-style navigation).
fn handle_results_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::MoveCursor(0, -1),
        KeyCode::Char('l') | KeyCode::Right => Action::MoveCursor(0, 1),
        KeyCode::Char('k') | KeyCode::Up => Action::MoveCursor(-1, 0),
        KeyCode::Char('j') | KeyCode::Down => Action::MoveCursor(1, 0),
        KeyCode::Char('0') | KeyCode::Home => Action::MoveCursor(0, isize::MIN),
        KeyCode::Char('$') | KeyCode::End => Action::MoveCursor(0, isize::MAX),
        KeyCode::Char('v') => Action::ToggleSelection,
        KeyCode::Char('y') => Action::Yank,
        _ => Action::None,
    }
}

/// Handles mouse events. Only the left button is used.
fn handle_mouse_event(mouse: MouseEvent, show_help: bool) -> Action {
    if show_help {
        return match mouse.kind {
            MouseEventKind::Down(_) => Action::DismissHelp,
            _ => Action::None,
        };
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::MouseDown(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => Action::MouseDrag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => Action::MouseUp,
        MouseEventKind::ScrollUp => Action::Scroll(-1),
        MouseEventKind::ScrollDown => Action::Scroll(1),
        _ => Action::None,
    }
}

fn apply_edit(input: &mut TextInput, edit: InputEdit) -> bool {
    match edit {
        InputEdit::Insert(c) => input.insert(c),
        InputEdit::Backspace => input.backspace(),
        InputEdit::Delete => input.delete(),
        InputEdit::Left => {
            input.move_left();
            false
        }
        InputEdit::Right => {
            input.move_right();
            false
        }
        InputEdit::Home => {
            input.move_home();
            false
        }
        InputEdit::End => {
            input.move_end();
            false
        }
    }
}

/// Applies an action to the application state.
///
/// Returns `true` if the application should continue, `false` if it should quit.
pub fn apply_action(
    state: &mut AppState,
    action: Action,
    clipboard: &mut dyn Clipboard,
    now: Instant,
) -> bool {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::FocusNext => {
            state.focus_next();
        }
        Action::FocusPrevious => {
            state.focus_previous();
        }
        Action::Edit(field, edit) => {
            state.edit(field, |input| apply_edit(input, edit));
        }
        Action::Submit => {
            state.submit();
        }
        Action::MoveCursor(d_row, d_index) => {
            state.move_results_cursor(d_row, d_index);
        }
        Action::ToggleSelection => {
            state.toggle_selection();
        }
        Action::Yank => {
            if state.selection.is_some() {
                state.finalize_selection(false, clipboard, now);
            } else {
                state.copy_current_row(clipboard, now);
            }
        }
        Action::MouseDown(x, y) => match state.result_geometry().and_then(|g| g.cell_at(x, y)) {
            Some(pos) => state.begin_selection(pos),
            None => state.selection = None,
        },
        Action::MouseDrag(x, y) => {
            if let Some(pos) = state.result_geometry().and_then(|g| g.cell_at(x, y)) {
                state.extend_selection(pos);
            }
        }
        Action::MouseUp => {
            if state.selection.is_some() {
                state.finalize_selection(true, clipboard, now);
            }
        }
        Action::Scroll(delta) => {
            state.scroll_results(delta);
        }
        Action::ToggleHelp => {
            state.toggle_help();
        }
        Action::DismissHelp => {
            state.show_help = false;
        }
        Action::Resize(width, height) => {
            state.set_terminal_size(width, height);
        }
    }

    !state.should_quit
}
