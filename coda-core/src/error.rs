//! Decode failures for single fields and whole lines.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::RecordKind;

/// Why one fixed-width slice could not be extracted or coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The line ends before the field does.
    #[error("line is {actual} characters long, field needs {start}..{end}")]
    Layout {
        start: usize,
        end: usize,
        actual: usize,
    },

    /// The line runs past the last field of its layout.
    #[error("line is {actual} characters long, expected {expected}")]
    Length { expected: usize, actual: usize },

    /// Digits, enumerated value or flag slice holds something else.
    #[error("{reason}: {raw:?}")]
    Format { raw: String, reason: &'static str },

    /// Not a valid `ddmmyy` calendar date.
    #[error("invalid ddmmyy date: {raw:?}")]
    Date { raw: String },
}

impl FieldError {
    pub(crate) fn format(raw: &str, reason: &'static str) -> Self {
        FieldError::Format {
            raw: raw.to_string(),
            reason,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FieldError::Layout { .. } | FieldError::Length { .. } => ErrorCategory::Layout,
            FieldError::Format { .. } => ErrorCategory::FieldFormat,
            FieldError::Date { .. } => ErrorCategory::DateFormat,
        }
    }
}

/// Coarse error taxonomy, convenient for counting and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    Layout,
    FieldFormat,
    DateFormat,
}

/// A line failed to decode as the record kind its prefix selected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{record} record, field `{field}`: {source}")]
pub struct DecodeError {
    pub record: RecordKind,
    pub field: &'static str,
    #[source]
    pub source: FieldError,
}

impl DecodeError {
    pub fn new(record: RecordKind, field: &'static str, source: FieldError) -> Self {
        Self {
            record,
            field,
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.source.category()
    }

    /// The offending slice, when the line was long enough to have one.
    pub fn raw(&self) -> Option<&str> {
        match &self.source {
            FieldError::Layout { .. } | FieldError::Length { .. } => None,
            FieldError::Format { raw, .. } | FieldError::Date { raw } => Some(raw),
        }
    }
}
