//! Per-kind counts and movement totals over decoded records.
//!
//! This only tallies what was decoded; it does not check that balances and
//! movements reconcile.

use std::collections::BTreeMap;
use std::fmt;

use coda_core::{Record, RecordKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub counts: BTreeMap<RecordKind, usize>,
    /// Initial records flagged as duplicates
    pub duplicates: usize,
    /// Sum of debit movements, minor units
    pub debit_total: u128,
    /// Sum of credit movements, minor units
    pub credit_total: u128,
}

impl Summary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut s = Summary::default();
        for record in records {
            *s.counts.entry(record.kind()).or_default() += 1;
            match record {
                Record::Initial(r) if r.is_duplicate => s.duplicates += 1,
                Record::Transaction(t) => {
                    let amount = u128::from(t.balance.unwrap_or(0));
                    if t.is_debit {
                        s.debit_total += amount;
                    } else {
                        s.credit_total += amount;
                    }
                }
                _ => {}
            }
        }
        s
    }

    pub fn count(&self, kind: RecordKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in RecordKind::DECODABLE {
            writeln!(f, "{:<20} {}", kind, self.count(kind))?;
        }
        writeln!(f, "{:<20} {}", "duplicates", self.duplicates)?;
        writeln!(f, "{:<20} {}", "debit total", self.debit_total)?;
        write!(f, "{:<20} {}", "credit total", self.credit_total)
    }
}
