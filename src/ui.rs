//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - The two sequence inputs with their inline error messages
//! - The submit button, disabled while a field shows an error
//! - The result panel: colored primary row, difference-highlighted
//!   secondary row, cursor and selection
//! - Status bar with lengths, differences and notifications
//! - Help overlay

pub mod glyphs;
pub mod layout;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::highlight::{DisplayCell, TextColor};
use crate::model::{AppState, CellPos, Focus, NotificationKind};
use crate::palette::Rgb;
use crate::validate::Field;
use glyphs::Glyphs;
use layout::{inner, input_scroll, FormLayout, ResultGeometry};

/// Key bindings shown in the help overlay.
const HELP_TEXT: &str = "Type two protein sequences (amino acids ARNDCEQGHILKMFPSTWYV and gap -, any case) of the same length, then press Enter to visualize them. \
The first sequence is colored by residue; in the second one, positions that differ from the first are shown in red.\n\n\
Tab / Shift+Tab: move between fields, button and result.\n\
Enter: submit.\n\
In the result: h j k l or arrows move, v starts a selection, y copies it (or the whole row). \
Dragging with the mouse selects and copies on release.\n\
F1: toggle this help. Esc or Ctrl+C: quit.";

fn cell_style(cell: &DisplayCell) -> Style {
    let bg: Color = Rgb::from_id(cell.category.color_id()).into();
    let fg = match cell.text {
        TextColor::Default => Color::Black,
        TextColor::Inverted => Color::White,
    };
    Style::default().fg(fg).bg(bg)
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState, glyphs: &Glyphs) {
    let area = frame.area();
    let layout = FormLayout::compute(area.width, area.height);

    render_input(frame, state, glyphs, Field::Seq1, layout.seq1_input);
    render_error_line(frame, state, glyphs, Field::Seq1, layout.seq1_error);
    render_input(frame, state, glyphs, Field::Seq2, layout.seq2_input);
    render_error_line(frame, state, glyphs, Field::Seq2, layout.seq2_error);
    render_submit(frame, state, glyphs, layout.submit);
    render_results(frame, state, layout.results);
    render_status_bar(frame, state, glyphs, layout.status);

    if state.show_help {
        render_help(frame, area);
    }
}

/// Renders a sequence input. ASCII letters are displayed uppercased so the
/// text keeps one cell per character.
fn render_input(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, field: Field, area: Rect) {
    let field_state = state.field(field);
    let focused = state.focus.field() == Some(field);
    let has_error = field_state.shown_error.is_some();

    let border_style = match (focused, has_error) {
        (_, true) => Style::default().fg(Color::Red),
        (true, false) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default(),
    };
    let title = if focused {
        format!("{} {}", glyphs.focus_marker, field.label())
    } else {
        field.label()
    };

    let width = inner(area).width as usize;
    let cursor = field_state.input.cursor();
    let scroll = input_scroll(cursor, width);
    let visible: String = field_state
        .input
        .text()
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .skip(scroll)
        .take(width)
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    frame.render_widget(Paragraph::new(visible).block(block), area);

    if focused && !state.show_help {
        let x = area.x + 1 + (cursor - scroll) as u16;
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_error_line(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, field: Field, area: Rect) {
    let line = match state.shown_message(field) {
        Some(message) => Line::from(Span::styled(
            format!(" {}{}", glyphs.error_prefix, message),
            Style::default().fg(Color::Red),
        )),
        None if state.field(field).touched => Line::from(Span::styled(
            format!(" {}", glyphs.valid_mark),
            Style::default().fg(Color::Green),
        )),
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_submit(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let enabled = state.can_submit();
    let focused = state.focus == Focus::Submit;
    let mut style = if enabled {
        Style::default().fg(Color::Black).bg(Color::Blue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if focused {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    let label = format!("{}Visualize{}", glyphs.button_left, glyphs.button_right);
    let marker = if focused { glyphs.focus_marker } else { " " };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(format!("{marker} ")),
            Span::styled(label, style),
        ])),
        area,
    );
}

/// Renders the two rendered rows, wrapped to the panel width and scrolled
/// to `results_scroll`.
fn render_results(frame: &mut Frame, state: &AppState, area: Rect) {
    let focused = state.focus == Focus::Results;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });

    let Some(view) = &state.result else {
        frame.render_widget(block.title("Result"), area);
        return;
    };

    let geometry = ResultGeometry::new(inner(area), view.row_lengths(), state.results_scroll);
    let scroll = geometry.scroll.min(geometry.max_scroll());
    let total = geometry.total_lines();
    let title = if total > geometry.visible_lines() {
        format!(
            "Result [{}-{}/{}]",
            scroll + 1,
            (scroll + geometry.visible_lines()).min(total),
            total
        )
    } else {
        "Result".to_string()
    };
    let mut lines: Vec<Line> = Vec::new();

    for row in 0..2 {
        if row == 1 {
            lines.push(Line::default());
        }
        let cells = view.row(row);
        if cells.is_empty() {
            lines.push(Line::default());
            continue;
        }
        for (chunk_idx, chunk) in cells.chunks(geometry.cells_per_line).enumerate() {
            let mut spans: Vec<Span> = Vec::with_capacity(chunk.len() * 2);
            for (offset, cell) in chunk.iter().enumerate() {
                let pos = CellPos::new(row, chunk_idx * geometry.cells_per_line + offset);
                let mut style = cell_style(cell);
                if state.selection.is_some_and(|s| s.contains(pos)) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                if focused && pos == state.results_cursor {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                spans.push(Span::styled(cell.character.to_string(), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
    }

    let offset = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(lines).block(block.title(title)).scroll((offset, 0)),
        area,
    );
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let bar = Style::default().fg(Color::Black).bg(Color::Cyan);

    let left = match &state.notification {
        Some(n) => {
            let style = match n.kind {
                NotificationKind::Success => bar.bg(Color::Green),
                NotificationKind::Error => bar.bg(Color::Red).fg(Color::White),
            };
            Span::styled(format!(" {}{} ", glyphs.copied_prefix, n.message), style)
        }
        None => Span::styled(" F1 help | Esc quit ".to_string(), bar),
    };

    let right = match &state.result {
        Some(view) => format!(
            "Length {} {} Differences {} ",
            view.pair.primary.len(),
            glyphs.h_separator,
            view.difference_count()
        ),
        None => format!(
            "Seq 1: {} {} Seq 2: {} ",
            state.seq1.input.text().chars().count(),
            glyphs.h_separator,
            state.seq2.input.text().chars().count()
        ),
    };

    let used = left.content.width() + right.width();
    let line = Line::from(vec![
        left,
        Span::styled(" ".repeat((area.width as usize).saturating_sub(used)), bar),
        Span::styled(right, bar.add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the help overlay centered on the screen.
fn render_help(frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(8).min(72);
    let text_width = width.saturating_sub(2).max(1) as usize;
    let lines: Vec<Line> = HELP_TEXT
        .split('\n')
        .flat_map(|paragraph| {
            if paragraph.is_empty() {
                vec![Line::default()]
            } else {
                textwrap::wrap(paragraph, text_width)
                    .into_iter()
                    .map(|l| Line::from(l.into_owned()))
                    .collect()
            }
        })
        .collect();

    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Help (any key to close)");
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::ColorCategory;
    use ratatui::{backend::TestBackend, layout::Position, Terminal};

    fn draw(state: &AppState, width: u16, height: u16) -> ratatui::buffer::Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let glyphs = glyphs::select(false);
        terminal.draw(|frame| render(frame, state, &glyphs)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text_at(buffer: &ratatui::buffer::Buffer, xs: std::ops::Range<u16>, y: u16) -> String {
        xs.map(|x| buffer[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn test_cell_style() {
        let cell = DisplayCell {
            character: 'N',
            category: ColorCategory::DifferenceRed,
            text: TextColor::Inverted,
        };
        let style = cell_style(&cell);
        assert_eq!(style.bg, Some(Color::Rgb(0xf4, 0x43, 0x36)));
        assert_eq!(style.fg, Some(Color::White));
    }

    #[test]
    fn test_inputs_display_uppercase() {
        let state = AppState::new("arnd", "");
        let buffer = draw(&state, 40, 20);
        assert_eq!(text_at(&buffer, 1..5, 1), "ARND");
    }

    #[test]
    fn test_error_line_is_drawn() {
        let state = AppState::new("ARND", "AR");
        let buffer = draw(&state, 60, 20);
        let line = text_at(&buffer, 0..60, 7);
        assert!(line.contains("Sequences have different lengths"), "{line:?}");
    }

    #[test]
    fn test_result_cells_are_colored() {
        let mut state = AppState::new("ARND", "ARGD");
        assert!(state.submit());
        let buffer = draw(&state, 40, 20);
        let layout = FormLayout::compute(40, 20);
        let geometry = ResultGeometry::new(layout.results_inner(), [4, 4], 0);

        let (x, y) = geometry.position(CellPos::new(0, 0)).unwrap();
        assert_eq!(buffer[(x, y)].symbol(), "A");
        assert_eq!(buffer[(x, y)].bg, Color::Rgb(0xc2, 0xf0, 0xc2));

        let (x, y) = geometry.position(CellPos::new(1, 2)).unwrap();
        assert_eq!(buffer[(x, y)].symbol(), "G");
        assert_eq!(buffer[(x, y)].bg, Color::Rgb(0xf4, 0x43, 0x36));
        assert_eq!(buffer[(x, y)].fg, Color::White);
    }

    #[test]
    fn test_input_keeps_one_cell_per_character() {
        let mut state = AppState::new("ßa", "");
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        let glyphs = glyphs::select(false);
        terminal.draw(|frame| render(frame, &state, &glyphs)).unwrap();
        assert_eq!(text_at(terminal.backend().buffer(), 1..4, 1), "ßA ");
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(3, 1));

        state.edit(Field::Seq1, |input| {
            input.move_left();
            false
        });
        terminal.draw(|frame| render(frame, &state, &glyphs)).unwrap();
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(2, 1));
    }

    fn red_cells(buffer: &ratatui::buffer::Buffer) -> usize {
        buffer
            .content()
            .iter()
            .filter(|cell| cell.bg == Color::Rgb(0xf4, 0x43, 0x36))
            .count()
    }

    #[test]
    fn test_long_result_scrolls_to_cursor() {
        let secondary = format!("{}G", "A".repeat(599));
        let mut state = AppState::new(&"A".repeat(600), &secondary);
        state.set_terminal_size(80, 24);
        assert!(state.submit());

        // The second row starts below the visible lines
        let buffer = draw(&state, 80, 24);
        assert_eq!(red_cells(&buffer), 0);
        assert!(text_at(&buffer, 0..80, 9).contains("Result [1-12/33]"));

        state.focus = Focus::Results;
        state.move_results_cursor(1, isize::MAX);
        let buffer = draw(&state, 80, 24);
        assert_eq!(red_cells(&buffer), 1);
        assert!(text_at(&buffer, 0..80, 9).contains("Result [22-33/33]"));

        let geometry = state.result_geometry().unwrap();
        let (x, y) = geometry.position(CellPos::new(1, 599)).unwrap();
        assert_eq!(buffer[(x, y)].symbol(), "G");
        assert_eq!(buffer[(x, y)].bg, Color::Rgb(0xf4, 0x43, 0x36));
    }

    #[test]
    fn test_status_bar_fits_wide_glyphs() {
        let mut state = AppState::new("ARND", "ARND");
        assert!(state.submit());
        state.notify("Text copied!", NotificationKind::Success, std::time::Instant::now());

        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let glyphs = glyphs::select(true);
        terminal.draw(|frame| render(frame, &state, &glyphs)).unwrap();
        let buffer = terminal.backend().buffer();

        // The right-hand text ends with "Differences 0 " in the last columns
        assert_eq!(buffer[(58, 23)].symbol(), "0");
        assert_eq!(buffer[(59, 23)].symbol(), " ");
        assert!(text_at(buffer, 40..60, 23).contains("Differences 0"));
    }

    #[test]
    fn test_help_overlay_draws() {
        let mut state = AppState::default();
        state.toggle_help();
        let buffer = draw(&state, 80, 24);
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Help (any key to close)"));
    }
}
