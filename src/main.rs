//! seqdiff - Terminal Sequence Comparison
//!
//! Compares two protein sequences position by position.
//!
//! ## Usage
//!
//! ```bash
//! seqdiff                                  # interactive form
//! seqdiff --seq1 ARND --seq2 ARGD          # form pre-filled
//! seqdiff --seq1 ARND --seq2 ARGD -o -     # colored report on stdout
//! seqdiff --seq1 ARND --seq2 ARGD -o - --plain
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use seqdiff::clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard};
use seqdiff::controller::run_app;
use seqdiff::logging;
use seqdiff::model::AppState;
use seqdiff::palette::AMINO_ACID_COLORS;
use seqdiff::report::{format_errors, write_report_to, ReportStyle};
use seqdiff::ui::glyphs;
use seqdiff::validate::accept;

/// Runs report mode: validate, render and write to output.
fn run_report_mode(seq1: &str, seq2: &str, output: &str, plain: bool) -> Result<()> {
    let pair = match accept(seq1, seq2) {
        Ok(pair) => pair,
        Err(report) => {
            for line in format_errors(&report) {
                eprintln!("{line}");
            }
            anyhow::bail!("Invalid input");
        }
    };

    let style = if plain {
        ReportStyle::Plain
    } else {
        ReportStyle::Ansi
    };
    write_report_to(output, &pair, style, &AMINO_ACID_COLORS)?;
    if output != "-" {
        eprintln!("Wrote comparison to {}", output);
    }
    Ok(())
}

/// seqdiff - Compare two protein sequences position by position
///
/// When run without -o/--output, opens an interactive form.
/// With -o/--output, validates --seq1/--seq2 and writes the comparison to
/// a file (or stdout with "-").
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First sequence (reference)
    #[arg(long = "seq1", default_value = "")]
    seq1: String,

    /// Second sequence (compared against the first)
    #[arg(long = "seq2", default_value = "")]
    seq2: String,

    /// Output file (enables report mode). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// In report mode, write plain text with differences marked by '^'
    #[arg(long = "plain")]
    plain: bool,

    /// Use ASCII markers instead of Unicode symbols
    #[arg(long = "ascii")]
    ascii: bool,

    /// Keep copied text inside the application instead of sending it to
    /// the terminal clipboard
    #[arg(long = "no-clipboard")]
    no_clipboard: bool,

    /// Write logs to this file
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Enable debug logging (to --log-file, or a file in the temp directory)
    #[arg(long = "debug")]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = match args.log_file {
        Some(path) => Some(path),
        None if args.debug => Some(logging::default_log_path()),
        None => None,
    };
    if let Some(path) = &log_path {
        logging::init(path, args.debug)?;
        info!("logging to {}", path.display());
    }

    // Report mode: output to file/stdout
    if let Some(output) = args.output {
        return run_report_mode(&args.seq1, &args.seq2, &output, args.plain);
    }

    let clipboard: Box<dyn Clipboard> = if args.no_clipboard {
        Box::new(MemoryClipboard::default())
    } else {
        Box::new(Osc52Clipboard::new(io::stdout()))
    };
    let state = AppState::new(&args.seq1, &args.seq2);
    run_app(state, clipboard, glyphs::select(!args.ascii))?;

    if let Some(path) = log_path {
        eprintln!("Log written to {}", path.display());
    }
    Ok(())
}
