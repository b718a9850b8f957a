//! Record kinds and the decoded record sum type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::records::{InitialRecord, OldBalanceRecord, TransactionPurposeRecord, TransactionRecord};

/// Line type, selected by the first one or two characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Initial,
    OldBalance,
    Transaction,
    TransactionPurpose,
    Unrecognized,
}

impl RecordKind {
    /// Every decodable kind, in file order.
    pub const DECODABLE: [RecordKind; 4] = [
        RecordKind::Initial,
        RecordKind::OldBalance,
        RecordKind::Transaction,
        RecordKind::TransactionPurpose,
    ];

    /// Classify a line by its prefix. Two-character prefixes are tested
    /// before one-character ones.
    pub fn of(line: &str) -> RecordKind {
        if line.starts_with("21") {
            RecordKind::Transaction
        } else if line.starts_with("22") {
            RecordKind::TransactionPurpose
        } else if line.starts_with('0') {
            RecordKind::Initial
        } else if line.starts_with('1') {
            RecordKind::OldBalance
        } else {
            RecordKind::Unrecognized
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Initial => "initial",
            RecordKind::OldBalance => "old-balance",
            RecordKind::Transaction => "transaction",
            RecordKind::TransactionPurpose => "transaction-purpose",
            RecordKind::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A successfully decoded line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Record {
    Initial(InitialRecord),
    OldBalance(OldBalanceRecord),
    Transaction(TransactionRecord),
    TransactionPurpose(TransactionPurposeRecord),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Initial(_) => RecordKind::Initial,
            Record::OldBalance(_) => RecordKind::OldBalance,
            Record::Transaction(_) => RecordKind::Transaction,
            Record::TransactionPurpose(_) => RecordKind::TransactionPurpose,
        }
    }

    pub fn as_transaction(&self) -> Option<&TransactionRecord> {
        match self {
            Record::Transaction(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Initial(r) => fmt::Display::fmt(r, f),
            Record::OldBalance(r) => fmt::Display::fmt(r, f),
            Record::Transaction(r) => fmt::Display::fmt(r, f),
            Record::TransactionPurpose(r) => fmt::Display::fmt(r, f),
        }
    }
}

/// Render an optional value, or `-` when absent.
pub(crate) struct Opt<'a, T>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for Opt<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => fmt::Display::fmt(v, f),
            None => f.write_str("-"),
        }
    }
}
