//! Validation of the two sequence inputs.
//!
//! Rules, per field:
//! 1. the field must be non-empty (`Required`)
//! 2. every character must belong to the alphabet, any case (`InvalidAlphabet`)
//!
//! and across fields:
//! 3. both fields must have the same length; a mismatch is reported on the
//!    second field only (`LengthMismatch`).
//!
//! Validation never fails as such: errors are returned as data and the
//! caller decides whether to block submission.

use log::debug;
use thiserror::Error;

use crate::alphabet::{matches_alphabet, normalize};
use crate::model::SequencePair;

/// The two input fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Seq1,
    Seq2,
}

impl Field {
    /// Both fields, in form order.
    pub const ALL: [Field; 2] = [Field::Seq1, Field::Seq2];

    /// 1-based number used in labels and messages.
    pub fn number(self) -> usize {
        match self {
            Field::Seq1 => 1,
            Field::Seq2 => 2,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> String {
        format!("Sequence {}", self.number())
    }

    /// Fields whose validation must be re-run when this field changes.
    pub fn dependents(self) -> &'static [Field] {
        match self {
            Field::Seq1 => &[Field::Seq2],
            Field::Seq2 => &[],
        }
    }
}

/// A user-input validation error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Invalid characters in sequence {}", .0.number())]
    InvalidAlphabet(Field),

    #[error("Sequences have different lengths")]
    LengthMismatch,
}

/// Outcome for one field. Errors are kept in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub field: Field,
    pub errors: Vec<ValidationError>,
}

impl FieldReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The error to show, if any.
    pub fn error(&self) -> Option<ValidationError> {
        self.errors.first().copied()
    }

    /// The message to show, if any.
    pub fn message(&self) -> Option<String> {
        self.error().map(|e| e.to_string())
    }
}

/// Outcome for the whole form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub seq1: FieldReport,
    pub seq2: FieldReport,
}

impl ValidationReport {
    pub fn field(&self, field: Field) -> &FieldReport {
        match field {
            Field::Seq1 => &self.seq1,
            Field::Seq2 => &self.seq2,
        }
    }

    /// True when every field passes every rule.
    pub fn is_valid(&self) -> bool {
        self.seq1.is_valid() && self.seq2.is_valid()
    }
}

/// Checks rules 1 and 2 on a single field.
fn field_errors(field: Field, raw: &str) -> Vec<ValidationError> {
    if raw.is_empty() {
        vec![ValidationError::Required]
    } else if !matches_alphabet(raw) {
        vec![ValidationError::InvalidAlphabet(field)]
    } else {
        Vec::new()
    }
}

/// Validates both raw inputs.
pub fn validate(seq1: &str, seq2: &str) -> ValidationReport {
    let seq1_errors = field_errors(Field::Seq1, seq1);
    let mut seq2_errors = field_errors(Field::Seq2, seq2);

    if seq1.chars().count() != seq2.chars().count() {
        seq2_errors.push(ValidationError::LengthMismatch);
    }

    let report = ValidationReport {
        seq1: FieldReport {
            field: Field::Seq1,
            errors: seq1_errors,
        },
        seq2: FieldReport {
            field: Field::Seq2,
            errors: seq2_errors,
        },
    };
    debug!(
        "validated seq1={:?} seq2={:?}: {:?} / {:?}",
        seq1, seq2, report.seq1.errors, report.seq2.errors
    );
    report
}

/// Validates both inputs and, if they pass, returns the normalized pair.
pub fn accept(seq1: &str, seq2: &str) -> Result<SequencePair, ValidationReport> {
    let report = validate(seq1, seq2);
    if report.is_valid() {
        Ok(SequencePair::new(normalize(seq1), normalize(seq2)))
    } else {
        Err(report)
    }
}
