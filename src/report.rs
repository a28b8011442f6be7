//! Non-interactive output.
//!
//! Writes the rendered pair to a terminal, a pipe or a file, either with
//! ANSI colors (the same cells the TUI draws) or as plain text with the
//! differing positions marked on a third line.
//!
//! ```text
//! ARND
//! ARGD
//!   ^
//! length 4, 1 difference
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use thiserror::Error;

use crate::highlight::{count_differences, DisplayCell, TextColor};
use crate::model::{ResultView, SequencePair};
use crate::palette::{ColorScheme, Rgb};
use crate::validate::{Field, ValidationReport};

/// Errors that can occur while writing a report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to create {path}: {source}")]
    Create { path: String, source: io::Error },
}

/// How cells are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    Ansi,
    Plain,
}

fn write_ansi_row<W: Write>(out: &mut W, cells: &[DisplayCell]) -> io::Result<()> {
    for cell in cells {
        let fg = match cell.text {
            TextColor::Default => Color::Black,
            TextColor::Inverted => Color::White,
        };
        queue!(
            out,
            SetBackgroundColor(Rgb::from_id(cell.category.color_id()).into()),
            SetForegroundColor(fg),
            Print(cell.character),
            ResetColor,
            Print(' ')
        )?;
    }
    writeln!(out)
}

fn difference_markers(cells: &[DisplayCell]) -> String {
    let markers: String = cells
        .iter()
        .map(|cell| if cell.is_difference() { '^' } else { ' ' })
        .collect();
    markers.trim_end().to_string()
}

/// Writes a rendered pair followed by a summary line.
pub fn write_report<W: Write>(
    out: &mut W,
    pair: &SequencePair,
    style: ReportStyle,
    scheme: &dyn ColorScheme,
) -> io::Result<()> {
    let view = ResultView::new(pair.clone(), scheme);
    match style {
        ReportStyle::Ansi => {
            write_ansi_row(out, &view.primary)?;
            write_ansi_row(out, &view.secondary)?;
        }
        ReportStyle::Plain => {
            writeln!(out, "{}", pair.primary.as_str())?;
            writeln!(out, "{}", pair.secondary.as_str())?;
            writeln!(out, "{}", difference_markers(&view.secondary))?;
        }
    }
    let differences = count_differences(&view.secondary);
    writeln!(
        out,
        "length {}, {} difference{}",
        pair.primary.len(),
        differences,
        if differences == 1 { "" } else { "s" }
    )?;
    out.flush()
}

/// Writes the report to `output`: `-` for stdout, otherwise a file path.
pub fn write_report_to(
    output: &str,
    pair: &SequencePair,
    style: ReportStyle,
    scheme: &dyn ColorScheme,
) -> Result<(), ReportError> {
    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_report(&mut handle, pair, style, scheme)?;
    } else {
        let file = File::create(Path::new(output)).map_err(|source| ReportError::Create {
            path: output.to_string(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        write_report(&mut writer, pair, style, scheme)?;
    }
    Ok(())
}

/// One line per field error, for printing when validation fails.
pub fn format_errors(report: &ValidationReport) -> Vec<String> {
    Field::ALL
        .iter()
        .filter_map(|&field| {
            report
                .field(field)
                .message()
                .map(|message| format!("{}: {}", field.label(), message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::AMINO_ACID_COLORS;
    use crate::validate::validate;

    fn report(pair: &SequencePair, style: ReportStyle) -> String {
        let mut out = Vec::new();
        write_report(&mut out, pair, style, &AMINO_ACID_COLORS).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_report() {
        let pair = SequencePair::new("ARND", "ARGD");
        assert_eq!(
            report(&pair, ReportStyle::Plain),
            "ARND\nARGD\n  ^\nlength 4, 1 difference\n"
        );
    }

    #[test]
    fn test_plain_report_identical() {
        let pair = SequencePair::new("ARND", "arnd");
        assert_eq!(
            report(&pair, ReportStyle::Plain),
            "ARND\nARND\n\nlength 4, 0 differences\n"
        );
    }

    #[test]
    fn test_ansi_report_colors() {
        let pair = SequencePair::new("A", "G");
        let text = report(&pair, ReportStyle::Ansi);
        // Primary 'A' on its scheme color, secondary 'G' on red
        assert!(text.contains("\x1b[48;2;194;240;194m"), "{text:?}");
        assert!(text.contains("\x1b[48;2;244;67;54m"), "{text:?}");
        assert!(text.ends_with("length 1, 1 difference\n"));
    }

    #[test]
    fn test_format_errors() {
        let lines = format_errors(&validate("", "ARX"));
        assert_eq!(
            lines,
            vec![
                "Sequence 1: This field is required".to_string(),
                "Sequence 2: Invalid characters in sequence 2".to_string(),
            ]
        );
        assert!(format_errors(&validate("AR", "AR")).is_empty());
    }
}
