use std::fmt;
use std::str::FromStr;

use coda_core::{DecodeError, Record};
use serde::{Deserialize, Serialize};

/// What to do with a line that fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop at the first failing line.
    #[default]
    Abort,
    /// Log and drop the line.
    Skip,
    /// Keep the error in [`DecodedFile::errors`].
    Collect,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorPolicy::Abort => "abort",
            ErrorPolicy::Skip => "skip",
            ErrorPolicy::Collect => "collect",
        })
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            "collect" => Ok(ErrorPolicy::Collect),
            other => Err(format!("unknown error policy {other:?} (abort, skip, collect)")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    pub on_error: ErrorPolicy,
}

/// A record together with the 1-based line it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedLine {
    pub line_no: usize,
    pub record: Record,
}

/// A line rejected under [`ErrorPolicy::Collect`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line_no: usize,
    pub line: String,
    pub error: DecodeError,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_no, self.error)
    }
}

/// Everything decoded from one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedFile {
    pub records: Vec<DecodedLine>,
    pub errors: Vec<LineError>,
    /// Lines whose prefix is not a decodable record kind
    pub unrecognized: usize,
    pub blank: usize,
    /// Failing lines dropped under [`ErrorPolicy::Skip`]
    pub rejected: usize,
    /// Lines read as Latin-1 because they were not UTF-8; also counted above
    pub latin1: usize,
}

impl DecodedFile {
    pub fn lines_read(&self) -> usize {
        self.records.len() + self.errors.len() + self.unrecognized + self.blank + self.rejected
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().map(|d| &d.record)
    }
}
