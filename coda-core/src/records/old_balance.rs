//! Old-balance record (`1`): account identity and opening balance.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::layout::{Date, Field, Filler, Flag, Layout, OptionalInteger, TrimmedString};
use crate::record::{Opt, RecordKind};

const KIND: RecordKind = RecordKind::OldBalance;

const MARKER: Field<Filler> = Field::new("record_type", 0, 1);
const ACCOUNT_STRUCTURE: Field<OptionalInteger> = Field::new("account_structure", 1, 1);
const SERIAL_NUMBER: Field<OptionalInteger> = Field::new("serial_number", 2, 3);
const ACCOUNT_NUMBER: Field<TrimmedString> = Field::new("account_number", 5, 37);
const BALANCE_SIGN: Field<Flag<'1'>> = Field::new("balance_sign", 42, 1);
const OLD_BALANCE: Field<OptionalInteger> = Field::new("old_balance", 43, 15);
const BALANCE_DATE: Field<Date> = Field::new("balance_date", 58, 6);
const HOLDER_NAME: Field<TrimmedString> = Field::new("account_holder_name", 64, 26);
const DESCRIPTION: Field<TrimmedString> = Field::new("account_description", 90, 35);
const STATEMENT_SERIAL: Field<OptionalInteger> =
    Field::new("bank_statement_serial_number", 125, 3);

pub const LAYOUT: Layout = Layout {
    kind: KIND,
    fields: &[
        MARKER.spec(),
        ACCOUNT_STRUCTURE.spec(),
        SERIAL_NUMBER.spec(),
        ACCOUNT_NUMBER.spec(),
        BALANCE_SIGN.spec(),
        OLD_BALANCE.spec(),
        BALANCE_DATE.spec(),
        HOLDER_NAME.spec(),
        DESCRIPTION.spec(),
        STATEMENT_SERIAL.spec(),
    ],
};

/// Balance of the account before this statement's movements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldBalanceRecord {
    pub account_structure: Option<u64>,
    pub serial_number: Option<u64>,
    pub account_number: String,
    /// True means debit, false credit
    pub is_debit: bool,
    /// Minor currency units
    pub old_balance: Option<u64>,
    pub balance_date: NaiveDate,
    pub account_holder_name: String,
    pub account_description: String,
    pub bank_statement_serial_number: Option<u64>,
}

impl OldBalanceRecord {
    /// Balance with the debit sign applied.
    pub fn signed_balance(&self) -> Option<i128> {
        let amount = i128::from(self.old_balance?);
        Some(if self.is_debit { -amount } else { amount })
    }
}

pub fn decode(line: &str) -> Result<OldBalanceRecord, DecodeError> {
    LAYOUT.check(line)?;
    Ok(OldBalanceRecord {
        account_structure: ACCOUNT_STRUCTURE.read(KIND, line)?,
        serial_number: SERIAL_NUMBER.read(KIND, line)?,
        account_number: ACCOUNT_NUMBER.read(KIND, line)?,
        is_debit: BALANCE_SIGN.read(KIND, line)?,
        old_balance: OLD_BALANCE.read(KIND, line)?,
        balance_date: BALANCE_DATE.read(KIND, line)?,
        account_holder_name: HOLDER_NAME.read(KIND, line)?,
        account_description: DESCRIPTION.read(KIND, line)?,
        bank_statement_serial_number: STATEMENT_SERIAL.read(KIND, line)?,
    })
}

impl fmt::Display for OldBalanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "old-balance {} account={:?} holder={:?} balance={} statement={}",
            self.balance_date,
            self.account_number,
            self.account_holder_name,
            Opt(&self.signed_balance()),
            Opt(&self.bank_statement_serial_number),
        )
    }
}
