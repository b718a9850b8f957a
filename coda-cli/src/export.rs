//! CSV export of transaction (`21`) records.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use coda_ingest::DecodedFile;
use serde::Serialize;
use std::io;

#[derive(Debug, Serialize)]
struct MovementRow<'a> {
    line: usize,
    serial_number: u64,
    detail_number: u64,
    booking_date: NaiveDate,
    value_date: Option<NaiveDate>,
    /// D or C
    sign: &'static str,
    amount: Option<u64>,
    transaction_code: &'a str,
    bank_reference: &'a str,
    reference: &'a str,
}

/// Write one row per transaction record; returns the row count.
pub fn write_movements<W: io::Write>(w: W, decoded: &DecodedFile) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(w);
    let mut rows = 0;

    for d in &decoded.records {
        let Some(t) = d.record.as_transaction() else {
            continue;
        };
        wtr.serialize(MovementRow {
            line: d.line_no,
            serial_number: t.serial_number,
            detail_number: t.detail_number,
            booking_date: t.booking_date,
            value_date: t.balance_date,
            sign: if t.is_debit { "D" } else { "C" },
            amount: t.balance,
            transaction_code: &t.transaction_code,
            bank_reference: &t.bank_reference,
            reference: &t.reference,
        })
        .with_context(|| format!("writing movement from line {}", d.line_no))?;
        rows += 1;
    }

    wtr.flush().context("flushing CSV output")?;
    Ok(rows)
}
