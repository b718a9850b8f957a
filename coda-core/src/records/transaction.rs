//! Transaction record (`21`): one movement on the account.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::layout::{
    Date, Field, Filler, FixedString, Flag, Layout, MandatoryInteger, OptionalFlag,
    OptionalInteger, SentinelDate, TrimmedString,
};
use crate::record::{Opt, RecordKind};

const KIND: RecordKind = RecordKind::Transaction;

const MARKER: Field<Filler> = Field::new("record_type", 0, 2);
const SERIAL_NUMBER: Field<MandatoryInteger> = Field::new("serial_number", 2, 4);
const DETAIL_NUMBER: Field<MandatoryInteger> = Field::new("detail_number", 6, 4);
const BANK_REFERENCE: Field<TrimmedString> = Field::new("bank_reference", 10, 21);
const BALANCE_SIGN: Field<Flag<'1'>> = Field::new("balance_sign", 31, 1);
const BALANCE: Field<OptionalInteger> = Field::new("balance", 32, 15);
const BALANCE_DATE: Field<SentinelDate> = Field::new("balance_date", 47, 6);
const TRANSACTION_CODE: Field<FixedString> = Field::new("transaction_code", 53, 8);
const REFERENCE_TYPE: Field<OptionalFlag<'1'>> = Field::new("reference_type", 61, 1);
const REFERENCE: Field<TrimmedString> = Field::new("reference", 62, 53);
const BOOKING_DATE: Field<Date> = Field::new("booking_date", 115, 6);
const STATEMENT_SERIAL: Field<OptionalInteger> =
    Field::new("bank_statement_serial_number", 121, 3);
const GLOBALISATION: Field<OptionalInteger> = Field::new("globalisation_code", 124, 1);
const TRANSACTION_SEQUENCE: Field<Flag<'1'>> = Field::new("transaction_sequence", 125, 1);
const RESERVED: Field<Filler> = Field::new("reserved", 126, 1);
const INFORMATION_SEQUENCE: Field<Flag<'1'>> = Field::new("information_sequence", 127, 1);

pub const LAYOUT: Layout = Layout {
    kind: KIND,
    fields: &[
        MARKER.spec(),
        SERIAL_NUMBER.spec(),
        DETAIL_NUMBER.spec(),
        BANK_REFERENCE.spec(),
        BALANCE_SIGN.spec(),
        BALANCE.spec(),
        BALANCE_DATE.spec(),
        TRANSACTION_CODE.spec(),
        REFERENCE_TYPE.spec(),
        REFERENCE.spec(),
        BOOKING_DATE.spec(),
        STATEMENT_SERIAL.spec(),
        GLOBALISATION.spec(),
        TRANSACTION_SEQUENCE.spec(),
        RESERVED.spec(),
        INFORMATION_SEQUENCE.spec(),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub serial_number: u64,
    pub detail_number: u64,
    pub bank_reference: String,
    /// True means debit, false credit
    pub is_debit: bool,
    /// Minor currency units
    pub balance: Option<u64>,
    /// `None` when the bank sent `000000`
    pub balance_date: Option<NaiveDate>,
    /// Eight digits, kept verbatim
    pub transaction_code: String,
    /// `1` structured communication, `0` free-form, blank absent
    pub structured_reference: Option<bool>,
    pub reference: String,
    pub booking_date: NaiveDate,
    pub bank_statement_serial_number: Option<u64>,
    pub globalisation_code: Option<u64>,
    /// Another transaction record (`2x`) follows
    pub has_next_transaction: bool,
    /// An information record (`3x`) follows
    pub has_information: bool,
}

impl TransactionRecord {
    /// Amount with the debit sign applied.
    pub fn signed_balance(&self) -> Option<i128> {
        let amount = i128::from(self.balance?);
        Some(if self.is_debit { -amount } else { amount })
    }
}

pub fn decode(line: &str) -> Result<TransactionRecord, DecodeError> {
    LAYOUT.check(line)?;
    Ok(TransactionRecord {
        serial_number: SERIAL_NUMBER.read(KIND, line)?,
        detail_number: DETAIL_NUMBER.read(KIND, line)?,
        bank_reference: BANK_REFERENCE.read(KIND, line)?,
        is_debit: BALANCE_SIGN.read(KIND, line)?,
        balance: BALANCE.read(KIND, line)?,
        balance_date: BALANCE_DATE.read(KIND, line)?,
        transaction_code: TRANSACTION_CODE.read(KIND, line)?,
        structured_reference: REFERENCE_TYPE.read(KIND, line)?,
        reference: REFERENCE.read(KIND, line)?,
        booking_date: BOOKING_DATE.read(KIND, line)?,
        bank_statement_serial_number: STATEMENT_SERIAL.read(KIND, line)?,
        globalisation_code: GLOBALISATION.read(KIND, line)?,
        has_next_transaction: TRANSACTION_SEQUENCE.read(KIND, line)?,
        has_information: INFORMATION_SEQUENCE.read(KIND, line)?,
    })
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transaction {}/{} booked={} value={} amount={} code={} ref={:?}",
            self.serial_number,
            self.detail_number,
            self.booking_date,
            Opt(&self.balance_date),
            Opt(&self.signed_balance()),
            self.transaction_code,
            self.reference,
        )
    }
}
