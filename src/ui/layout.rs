//! Screen geometry.
//!
//! Layout is computed from the terminal size alone so the same areas can be
//! used for drawing and for mapping mouse positions back to cells.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::model::CellPos;

/// Height of a bordered text input.
const INPUT_HEIGHT: u16 = 3;
/// Height of the line under an input showing its error.
const ERROR_HEIGHT: u16 = 1;
/// Height of the submit button line.
const SUBMIT_HEIGHT: u16 = 1;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;

/// Terminal columns taken by one rendered character (the character and a gap).
pub const CELL_WIDTH: u16 = 2;

/// Areas of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    pub seq1_input: Rect,
    pub seq1_error: Rect,
    pub seq2_input: Rect,
    pub seq2_error: Rect,
    pub submit: Rect,
    pub results: Rect,
    pub status: Rect,
}

impl FormLayout {
    /// Splits a full terminal of the given size.
    pub fn compute(width: u16, height: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Length(ERROR_HEIGHT),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Length(ERROR_HEIGHT),
                Constraint::Length(SUBMIT_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(Rect::new(0, 0, width, height));

        Self {
            seq1_input: chunks[0],
            seq1_error: chunks[1],
            seq2_input: chunks[2],
            seq2_error: chunks[3],
            submit: chunks[4],
            results: chunks[5],
            status: chunks[6],
        }
    }

    /// Inside of the bordered results panel.
    pub fn results_inner(&self) -> Rect {
        inner(self.results)
    }
}

/// Area inside a one-cell border.
pub fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// How the two result rows wrap inside the results panel, and which part
/// of the wrapped content is scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultGeometry {
    pub area: Rect,
    pub cells_per_line: usize,
    pub lengths: [usize; 2],
    /// Content line shown at the top of the area
    pub scroll: usize,
}

impl ResultGeometry {
    pub fn new(area: Rect, lengths: [usize; 2], scroll: usize) -> Self {
        let cells_per_line = ((area.width / CELL_WIDTH) as usize).max(1);
        Self {
            area,
            cells_per_line,
            lengths,
            scroll,
        }
    }

    /// Screen lines used by a row. An empty row still takes one line.
    pub fn line_count(&self, row: usize) -> usize {
        self.lengths[row].div_ceil(self.cells_per_line).max(1)
    }

    /// First content line of a row. Rows are separated by a blank line.
    pub fn first_line(&self, row: usize) -> usize {
        match row {
            0 => 0,
            _ => self.line_count(0) + 1,
        }
    }

    /// Content lines of both rows and the separator.
    pub fn total_lines(&self) -> usize {
        self.first_line(1) + self.line_count(1)
    }

    pub fn visible_lines(&self) -> usize {
        self.area.height as usize
    }

    /// Largest scroll offset that still fills the area.
    pub fn max_scroll(&self) -> usize {
        self.total_lines().saturating_sub(self.visible_lines())
    }

    /// Content line and cell column of a cell, ignoring scrolling.
    pub fn line_col(&self, pos: CellPos) -> (usize, usize) {
        (
            self.first_line(pos.row) + pos.index / self.cells_per_line,
            pos.index % self.cells_per_line,
        )
    }

    /// Screen position of a cell, `None` if it is scrolled out of view.
    pub fn position(&self, pos: CellPos) -> Option<(u16, u16)> {
        let (line, col) = self.line_col(pos);
        if line < self.scroll || line >= self.scroll + self.visible_lines() {
            return None;
        }
        Some((
            self.area.x + (col as u16) * CELL_WIDTH,
            self.area.y + (line - self.scroll) as u16,
        ))
    }

    /// Cell at a content line and column.
    ///
    /// Columns past the end of a row snap to its last cell, so dragging
    /// beyond the text selects to the end. The blank separator line maps to
    /// nothing.
    pub fn cell_on_line(&self, line: usize, col: usize) -> Option<CellPos> {
        if col >= self.cells_per_line {
            return None;
        }
        for row in 0..2 {
            let first = self.first_line(row);
            if line >= first && line < first + self.line_count(row) {
                let len = self.lengths[row];
                if len == 0 {
                    return None;
                }
                let index = ((line - first) * self.cells_per_line + col).min(len - 1);
                return Some(CellPos::new(row, index));
            }
        }
        None
    }

    /// Maps a screen position to a cell, taking the scroll offset into
    /// account. Anything outside the area maps to nothing.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<CellPos> {
        let area = self.area;
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }
        let line = self.scroll + (y - area.y) as usize;
        let col = ((x - area.x) / CELL_WIDTH) as usize;
        self.cell_on_line(line, col)
    }

    /// Scroll offset that keeps `pos` in view, moving as little as possible
    /// from the current one.
    pub fn scroll_to_show(&self, pos: CellPos) -> usize {
        let visible = self.visible_lines();
        let scroll = self.scroll.min(self.max_scroll());
        if visible == 0 {
            return scroll;
        }
        let (line, _) = self.line_col(pos);
        if line < scroll {
            line
        } else if line >= scroll + visible {
            line + 1 - visible
        } else {
            scroll
        }
    }
}

/// First visible character of an input so that the cursor stays in view.
pub fn input_scroll(cursor: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    cursor.saturating_sub(width - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_layout() {
        let layout = FormLayout::compute(80, 24);
        assert_eq!(layout.seq1_input, Rect::new(0, 0, 80, 3));
        assert_eq!(layout.seq1_error, Rect::new(0, 3, 80, 1));
        assert_eq!(layout.seq2_input, Rect::new(0, 4, 80, 3));
        assert_eq!(layout.submit.y, 8);
        assert_eq!(layout.results, Rect::new(0, 9, 80, 14));
        assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.results_inner(), Rect::new(1, 10, 78, 12));
    }

    #[test]
    fn test_wrapping() {
        // 10 columns → 5 cells per line
        let geometry = ResultGeometry::new(Rect::new(0, 0, 10, 10), [12, 3], 0);
        assert_eq!(geometry.cells_per_line, 5);
        assert_eq!(geometry.line_count(0), 3);
        assert_eq!(geometry.first_line(1), 4);
        assert_eq!(geometry.total_lines(), 5);
        assert_eq!(geometry.max_scroll(), 0);
        assert_eq!(geometry.position(CellPos::new(0, 7)), Some((4, 1)));
        assert_eq!(geometry.position(CellPos::new(1, 2)), Some((4, 4)));
    }

    #[test]
    fn test_cell_at() {
        let geometry = ResultGeometry::new(Rect::new(2, 5, 10, 10), [12, 3], 0);
        assert_eq!(geometry.cell_at(2, 5), Some(CellPos::new(0, 0)));
        // Gap column belongs to the cell on its left
        assert_eq!(geometry.cell_at(3, 5), Some(CellPos::new(0, 0)));
        assert_eq!(geometry.cell_at(6, 6), Some(CellPos::new(0, 7)));
        // Past the end of the last line snaps to the last cell
        assert_eq!(geometry.cell_at(10, 7), Some(CellPos::new(0, 11)));
        // Separator line
        assert_eq!(geometry.cell_at(2, 8), None);
        assert_eq!(geometry.cell_at(4, 9), Some(CellPos::new(1, 1)));
        // Below the second row and outside the area
        assert_eq!(geometry.cell_at(2, 10), None);
        assert_eq!(geometry.cell_at(1, 5), None);
        assert_eq!(geometry.cell_at(12, 5), None);
    }

    #[test]
    fn test_cell_at_round_trips_position() {
        let geometry = ResultGeometry::new(Rect::new(1, 1, 9, 20), [9, 9], 0);
        for row in 0..2 {
            for index in 0..9 {
                let pos = CellPos::new(row, index);
                let (x, y) = geometry.position(pos).unwrap();
                assert_eq!(geometry.cell_at(x, y), Some(pos));
            }
        }
    }

    #[test]
    fn test_scrolled_geometry() {
        // 5 cells per line, 3 visible lines: rows of 20 take 4 lines each,
        // 9 content lines with the separator
        let area = Rect::new(0, 0, 10, 3);
        let geometry = ResultGeometry::new(area, [20, 20], 5);
        assert_eq!(geometry.total_lines(), 9);
        assert_eq!(geometry.max_scroll(), 6);

        // Line 5 is the first line of the second row
        assert_eq!(geometry.position(CellPos::new(1, 0)), Some((0, 0)));
        assert_eq!(geometry.position(CellPos::new(1, 12)), Some((4, 2)));
        assert_eq!(geometry.position(CellPos::new(0, 19)), None);
        assert_eq!(geometry.position(CellPos::new(1, 15)), None);
        assert_eq!(geometry.cell_at(2, 1), Some(CellPos::new(1, 6)));

        // Line 4 is the separator
        let geometry = ResultGeometry::new(area, [20, 20], 4);
        assert_eq!(geometry.cell_at(0, 0), None);
        assert_eq!(geometry.cell_at(0, 1), Some(CellPos::new(1, 0)));
    }

    #[test]
    fn test_scroll_to_show() {
        let area = Rect::new(0, 0, 10, 3);
        let top = ResultGeometry::new(area, [20, 20], 0);
        assert_eq!(top.scroll_to_show(CellPos::new(0, 14)), 0);
        assert_eq!(top.scroll_to_show(CellPos::new(0, 15)), 1);
        assert_eq!(top.scroll_to_show(CellPos::new(1, 19)), 6);

        let bottom = ResultGeometry::new(area, [20, 20], 6);
        assert_eq!(bottom.scroll_to_show(CellPos::new(1, 0)), 5);
        assert_eq!(bottom.scroll_to_show(CellPos::new(0, 0)), 0);

        // A stale offset past the end is clamped
        let stale = ResultGeometry::new(area, [20, 20], 40);
        assert_eq!(stale.scroll_to_show(CellPos::new(1, 19)), 6);

        // Nothing visible: offset is left alone
        let hidden = ResultGeometry::new(Rect::new(0, 0, 10, 0), [20, 20], 2);
        assert_eq!(hidden.scroll_to_show(CellPos::new(1, 19)), 2);
    }

    #[test]
    fn test_input_scroll() {
        assert_eq!(input_scroll(3, 10), 0);
        assert_eq!(input_scroll(10, 10), 1);
        assert_eq!(input_scroll(25, 10), 16);
        assert_eq!(input_scroll(4, 0), 4);
    }
}
