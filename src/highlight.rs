//! Per-character rendering of a sequence, optionally against a reference.
//!
//! Standalone mode colors each character by the color scheme. Reference
//! mode drops per-letter colors and only distinguishes positions that match
//! the reference (neutral gray) from positions that differ (red, inverted
//! text). A reference shorter than the sequence never produces a difference
//! past its end.

use log::debug;

use crate::palette::{ColorScheme, DIFFERENCE_RED, NEUTRAL_GRAY};

/// Background category of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCategory {
    /// The scheme color of the character.
    Alphabet(&'static str),
    NeutralGray,
    DifferenceRed,
}

impl ColorCategory {
    /// The color identifier to paint.
    pub fn color_id(self) -> &'static str {
        match self {
            ColorCategory::Alphabet(color) => color,
            ColorCategory::NeutralGray => NEUTRAL_GRAY,
            ColorCategory::DifferenceRed => DIFFERENCE_RED,
        }
    }
}

/// Foreground of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextColor {
    #[default]
    Default,
    /// White text over a strong background.
    Inverted,
}

/// One rendered character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCell {
    pub character: char,
    pub category: ColorCategory,
    pub text: TextColor,
}

impl DisplayCell {
    pub fn is_difference(&self) -> bool {
        self.category == ColorCategory::DifferenceRed
    }
}

/// Renders `sequence` into one cell per character.
///
/// `sequence` and `reference` are expected to be uppercase already; no
/// normalization happens here.
pub fn render(
    sequence: &str,
    reference: Option<&str>,
    scheme: &dyn ColorScheme,
) -> Vec<DisplayCell> {
    let cells: Vec<DisplayCell> = match reference {
        Some(reference) => {
            let mut reference_chars = reference.chars();
            sequence
                .chars()
                .map(|c| match reference_chars.next() {
                    Some(r) if r != c => DisplayCell {
                        character: c,
                        category: ColorCategory::DifferenceRed,
                        text: TextColor::Inverted,
                    },
                    _ => DisplayCell {
                        character: c,
                        category: ColorCategory::NeutralGray,
                        text: TextColor::Default,
                    },
                })
                .collect()
        }
        None => sequence
            .chars()
            .map(|c| DisplayCell {
                character: c,
                category: scheme
                    .color_of(c)
                    .map_or(ColorCategory::NeutralGray, ColorCategory::Alphabet),
                text: TextColor::Default,
            })
            .collect(),
    };
    debug!(
        "rendered {} cells ({})",
        cells.len(),
        if reference.is_some() { "diff" } else { "standalone" }
    );
    cells
}

/// Number of highlighted differences.
pub fn count_differences(cells: &[DisplayCell]) -> usize {
    cells.iter().filter(|cell| cell.is_difference()).count()
}
