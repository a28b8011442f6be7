//! # seqdiff - Terminal Sequence Comparison
//!
//! A terminal tool that takes two protein sequences, checks that they use
//! the amino-acid alphabet and share the same length, and shows them
//! character by character: the first colored by residue, the second with
//! every position that differs from the first highlighted in red. Text
//! selected in the result can be copied to the clipboard.
//!
//! ## Architecture
//!
//! - `alphabet`: the accepted characters and their pattern
//! - `validate`: per-field and cross-field validation rules
//! - `palette`: color scheme and color identifiers
//! - `highlight`: per-character rendering against an optional reference
//! - `model`: form, result, selection and application state
//! - `event`: keyboard and mouse handling
//! - `ui`: TUI rendering with ratatui
//! - `clipboard`: OSC 52 and in-memory clipboards
//! - `report`: non-interactive output
//! - `logging`: file logging
//! - `controller`: orchestration of the event loop

pub mod alphabet;
pub mod clipboard;
pub mod controller;
pub mod event;
pub mod highlight;
pub mod logging;
pub mod model;
pub mod palette;
pub mod report;
pub mod ui;
pub mod validate;
