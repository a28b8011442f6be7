//! Data model for the sequence comparison form.
//!
//! This module contains all data structures for representing:
//! - Sequences and the submitted pair
//! - The two text inputs and their validation state
//! - The rendered result, cursor and selection over it
//! - Transient notifications
//! - Application state

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::alphabet::normalize;
use crate::clipboard::Clipboard;
use crate::highlight::{count_differences, render, DisplayCell};
use crate::palette::{ColorScheme, StaticColorScheme, AMINO_ACID_COLORS};
use crate::ui::layout::{FormLayout, ResultGeometry};
use crate::validate::{validate, Field, ValidationError};

/// How long a notification stays on screen.
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(2000);

/// An uppercase sequence ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence(String);

impl Sequence {
    /// Creates a sequence, uppercasing the input.
    pub fn new(data: impl AsRef<str>) -> Self {
        Self(normalize(data.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the length of the sequence, in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The two sequences accepted by a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    pub primary: Sequence,
    pub secondary: Sequence,
}

impl SequencePair {
    pub fn new(primary: impl AsRef<str>, secondary: impl AsRef<str>) -> Self {
        Self {
            primary: Sequence::new(primary),
            secondary: Sequence::new(secondary),
        }
    }
}

/// A single-line text input with a cursor (in characters).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    /// Creates an input holding `text`, cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Inserts a character at the cursor.
    pub fn insert(&mut self, c: char) -> bool {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
        true
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }
}

/// A form field: its input, whether the user has edited it, and the last
/// error shown for it.
#[derive(Debug, Clone, Default)]
pub struct FieldState {
    pub input: TextInput,
    pub touched: bool,
    pub shown_error: Option<ValidationError>,
}

/// Widgets that can hold the keyboard focus, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Seq1,
    Seq2,
    Submit,
    Results,
}

impl Focus {
    pub fn field(self) -> Option<Field> {
        match self {
            Focus::Seq1 => Some(Field::Seq1),
            Focus::Seq2 => Some(Field::Seq2),
            _ => None,
        }
    }
}

/// A position in the rendered result: row 0 is the primary sequence, row 1
/// the secondary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct CellPos {
    pub row: usize,
    pub index: usize,
}

impl CellPos {
    pub fn new(row: usize, index: usize) -> Self {
        Self { row, index }
    }
}

/// A text selection over the rendered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: CellPos,
    pub head: CellPos,
    /// True once the head has moved away from the anchor at least once.
    pub extended: bool,
}

impl Selection {
    pub fn at(pos: CellPos) -> Self {
        Self {
            anchor: pos,
            head: pos,
            extended: false,
        }
    }

    pub fn extend_to(&mut self, pos: CellPos) {
        if pos != self.anchor {
            self.extended = true;
        }
        self.head = pos;
    }

    /// Start and end, in reading order.
    pub fn ordered(&self) -> (CellPos, CellPos) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        let (start, end) = self.ordered();
        start <= pos && pos <= end
    }
}

/// A submitted pair and its rendered rows.
#[derive(Debug, Clone)]
pub struct ResultView {
    pub pair: SequencePair,
    pub primary: Vec<DisplayCell>,
    pub secondary: Vec<DisplayCell>,
}

impl ResultView {
    pub fn new(pair: SequencePair, scheme: &dyn ColorScheme) -> Self {
        let primary = render(pair.primary.as_str(), None, scheme);
        let secondary = render(
            pair.secondary.as_str(),
            Some(pair.primary.as_str()),
            scheme,
        );
        Self {
            pair,
            primary,
            secondary,
        }
    }

    pub fn row(&self, row: usize) -> &[DisplayCell] {
        match row {
            0 => &self.primary,
            1 => &self.secondary,
            _ => &[],
        }
    }

    /// Lengths of both rows.
    pub fn row_lengths(&self) -> [usize; 2] {
        [self.primary.len(), self.secondary.len()]
    }

    pub fn difference_count(&self) -> usize {
        count_differences(&self.secondary)
    }

    /// Text between two positions (inclusive), whitespace removed.
    pub fn selected_text(&self, selection: &Selection) -> String {
        let (start, end) = selection.ordered();
        let mut text = String::new();
        for row in start.row..=end.row.min(1) {
            let cells = self.row(row);
            let from = if row == start.row { start.index } else { 0 };
            let to = if row == end.row {
                (end.index + 1).min(cells.len())
            } else {
                cells.len()
            };
            if from < to {
                text.extend(cells[from..to].iter().map(|cell| cell.character));
            }
        }
        text.retain(|c| !c.is_whitespace());
        text
    }
}

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A message that disappears on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind, now: Instant) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: now + NOTIFICATION_DURATION,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// The complete application state.
#[derive(Debug)]
pub struct AppState {
    pub seq1: FieldState,
    pub seq2: FieldState,
    /// The last accepted submission, cleared by any edit
    pub result: Option<ResultView>,
    /// Widget holding keyboard focus
    pub focus: Focus,
    /// Cursor in the results panel
    pub results_cursor: CellPos,
    /// First content line shown in the results panel
    pub results_scroll: usize,
    /// Active selection in the results panel
    pub selection: Option<Selection>,
    /// Transient message shown in the status bar
    pub notification: Option<Notification>,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Last known terminal size (width, height)
    pub terminal_size: (u16, u16),
    /// Colors for the standalone row
    pub scheme: StaticColorScheme,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl AppState {
    /// Creates a state with optional pre-filled inputs. Non-empty inputs
    /// count as edited and are validated right away.
    pub fn new(seq1: &str, seq2: &str) -> Self {
        let mut state = Self {
            seq1: FieldState::default(),
            seq2: FieldState::default(),
            result: None,
            focus: Focus::Seq1,
            results_cursor: CellPos::default(),
            results_scroll: 0,
            selection: None,
            notification: None,
            show_help: false,
            should_quit: false,
            terminal_size: (0, 0),
            scheme: AMINO_ACID_COLORS,
        };
        for (field, text) in [(Field::Seq1, seq1), (Field::Seq2, seq2)] {
            if !text.is_empty() {
                state.edit(field, |input| {
                    *input = TextInput::new(text);
                    true
                });
            }
        }
        state
    }

    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Seq1 => &self.seq1,
            Field::Seq2 => &self.seq2,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Seq1 => &mut self.seq1,
            Field::Seq2 => &mut self.seq2,
        }
    }

    /// Applies an edit to a field's input. If the text changed, the field
    /// and its already-touched dependents are re-validated and any
    /// previous result is discarded.
    pub fn edit(&mut self, field: Field, op: impl FnOnce(&mut TextInput) -> bool) {
        let before = self.field(field).input.text().to_string();
        if !op(&mut self.field_mut(field).input) {
            return;
        }
        if self.field(field).input.text() == before {
            return;
        }

        self.field_mut(field).touched = true;
        self.revalidate(field);
        for &dependent in field.dependents() {
            if self.field(dependent).touched {
                self.revalidate(dependent);
            }
        }

        if self.result.take().is_some() {
            debug!("result cleared by edit of {:?}", field);
        }
        self.selection = None;
    }

    fn revalidate(&mut self, field: Field) {
        let report = validate(self.seq1.input.text(), self.seq2.input.text());
        self.field_mut(field).shown_error = report.field(field).error();
    }

    /// Message currently shown under a field.
    pub fn shown_message(&self, field: Field) -> Option<String> {
        self.field(field).shown_error.map(|e| e.to_string())
    }

    /// Submit is enabled while no field shows an error.
    pub fn can_submit(&self) -> bool {
        Field::ALL
            .iter()
            .all(|&field| self.field(field).shown_error.is_none())
    }

    /// Validates every field and, if the form is valid, renders the pair.
    ///
    /// Returns true if the submission was accepted.
    pub fn submit(&mut self) -> bool {
        let report = validate(self.seq1.input.text(), self.seq2.input.text());
        for field in Field::ALL {
            let state = self.field_mut(field);
            state.touched = true;
            state.shown_error = report.field(field).error();
        }

        if !report.is_valid() {
            debug!("submission rejected");
            return false;
        }

        let pair = SequencePair::new(self.seq1.input.text(), self.seq2.input.text());
        let view = ResultView::new(pair, &self.scheme);
        info!(
            "submitted pair of length {} with {} differences",
            view.pair.primary.len(),
            view.difference_count()
        );
        self.result = Some(view);
        self.results_cursor = CellPos::default();
        self.results_scroll = 0;
        self.selection = None;
        true
    }

    /// Moves focus to the next widget. Results are skipped when empty.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Seq1 => Focus::Seq2,
            Focus::Seq2 => Focus::Submit,
            Focus::Submit if self.result.is_some() => Focus::Results,
            Focus::Submit | Focus::Results => Focus::Seq1,
        };
    }

    /// Moves focus to the previous widget.
    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            Focus::Seq1 if self.result.is_some() => Focus::Results,
            Focus::Seq1 => Focus::Submit,
            Focus::Seq2 => Focus::Seq1,
            Focus::Submit => Focus::Seq2,
            Focus::Results => Focus::Submit,
        };
    }

    /// Moves the results cursor by the given deltas, clamped to the rows.
    pub fn move_results_cursor(&mut self, d_row: isize, d_index: isize) {
        let Some(view) = &self.result else {
            return;
        };
        let lengths = view.row_lengths();
        let row = self.results_cursor.row.saturating_add_signed(d_row).min(1);
        let max_index = lengths[row].saturating_sub(1);
        let index = self
            .results_cursor
            .index
            .saturating_add_signed(d_index)
            .min(max_index);
        self.results_cursor = CellPos::new(row, index);
        if let Some(selection) = &mut self.selection {
            selection.extend_to(self.results_cursor);
        }
        self.scroll_to_cursor();
    }

    /// Geometry of the results panel for the last known terminal size.
    pub fn result_geometry(&self) -> Option<ResultGeometry> {
        let view = self.result.as_ref()?;
        let (width, height) = self.terminal_size;
        let layout = FormLayout::compute(width, height);
        Some(ResultGeometry::new(
            layout.results_inner(),
            view.row_lengths(),
            self.results_scroll,
        ))
    }

    /// Scrolls the results panel so the cursor line is visible.
    fn scroll_to_cursor(&mut self) {
        if let Some(geometry) = self.result_geometry() {
            self.results_scroll = geometry.scroll_to_show(self.results_cursor);
        }
    }

    /// Scrolls the results panel by `delta` lines without moving the cursor.
    pub fn scroll_results(&mut self, delta: isize) {
        if let Some(geometry) = self.result_geometry() {
            self.results_scroll = self
                .results_scroll
                .saturating_add_signed(delta)
                .min(geometry.max_scroll());
        }
    }

    /// Records a new terminal size and keeps the results cursor in view.
    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.scroll_to_cursor();
    }

    /// Starts a keyboard selection at the cursor, or cancels the current one.
    pub fn toggle_selection(&mut self) {
        if self.result.is_none() {
            return;
        }
        self.selection = match self.selection {
            Some(_) => None,
            None => Some(Selection::at(self.results_cursor)),
        };
    }

    /// Starts a mouse selection at `pos`.
    pub fn begin_selection(&mut self, pos: CellPos) {
        if self.result.is_none() {
            return;
        }
        self.focus = Focus::Results;
        self.results_cursor = pos;
        self.selection = Some(Selection::at(pos));
        self.scroll_to_cursor();
    }

    /// Extends the active selection to `pos`.
    pub fn extend_selection(&mut self, pos: CellPos) {
        if let Some(selection) = &mut self.selection {
            selection.extend_to(pos);
            self.results_cursor = pos;
            self.scroll_to_cursor();
        }
    }

    /// Text of the active selection. A mouse click that never moved selects
    /// nothing.
    pub fn selection_text(&self, require_extended: bool) -> Option<String> {
        let view = self.result.as_ref()?;
        let selection = self.selection.as_ref()?;
        if require_extended && !selection.extended {
            return None;
        }
        let text = view.selected_text(selection);
        (!text.is_empty()).then_some(text)
    }

    /// Copies `text` and raises a notification with the outcome.
    pub fn copy_text(&mut self, text: &str, clipboard: &mut dyn Clipboard, now: Instant) {
        match clipboard.copy(text) {
            Ok(()) => {
                info!("copied {} characters", text.chars().count());
                self.notify("Text copied!", NotificationKind::Success, now);
            }
            Err(e) => {
                warn!("copy failed: {}", e);
                self.notify(format!("Copy failed: {e}"), NotificationKind::Error, now);
            }
        }
    }

    /// Finalizes the selection: copies its text if there is any.
    pub fn finalize_selection(
        &mut self,
        require_extended: bool,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) {
        match self.selection_text(require_extended) {
            Some(text) => self.copy_text(&text, clipboard, now),
            None if require_extended => self.selection = None,
            None => {}
        }
    }

    /// Copies the whole row under the results cursor.
    pub fn copy_current_row(&mut self, clipboard: &mut dyn Clipboard, now: Instant) {
        let Some(view) = &self.result else {
            return;
        };
        let text = match self.results_cursor.row {
            0 => view.pair.primary.as_str().to_string(),
            _ => view.pair.secondary.as_str().to_string(),
        };
        self.copy_text(&text, clipboard, now);
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.notification = Some(Notification::new(message, kind, now));
    }

    /// Drops the notification once it has expired.
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}
