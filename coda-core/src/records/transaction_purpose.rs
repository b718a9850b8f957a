//! Transaction-purpose record (`22`): continuation of a movement with
//! counterparty and purpose details.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::layout::{
    Field, Filler, Flag, Layout, MandatoryInteger, TransactionType, TrimmedString,
};
use crate::record::{Opt, RecordKind};

const KIND: RecordKind = RecordKind::TransactionPurpose;

const MARKER: Field<Filler> = Field::new("record_type", 0, 2);
const SERIAL_NUMBER: Field<MandatoryInteger> = Field::new("serial_number", 2, 4);
const DETAIL_NUMBER: Field<MandatoryInteger> = Field::new("detail_number", 6, 4);
const STATEMENT_TEXT: Field<TrimmedString> = Field::new("statement_text", 10, 53);
const CLIENT_REFERENCE: Field<TrimmedString> = Field::new("client_reference", 63, 35);
const BIC: Field<TrimmedString> = Field::new("bic", 98, 11);
const RESERVED_1: Field<Filler> = Field::new("reserved", 109, 3);
const TRANSACTION_TYPE: Field<TransactionType> = Field::new("transaction_type", 112, 1);
const REASON_CODE: Field<TrimmedString> = Field::new("reason_code", 113, 4);
const PURPOSE_CATEGORY: Field<TrimmedString> = Field::new("purpose_category", 117, 4);
const PURPOSE: Field<TrimmedString> = Field::new("purpose", 121, 4);
const TRANSACTION_SEQUENCE: Field<Flag<'1'>> = Field::new("transaction_sequence", 125, 1);
const RESERVED_2: Field<Filler> = Field::new("reserved", 126, 1);
const INFORMATION_SEQUENCE: Field<Flag<'1'>> = Field::new("information_sequence", 127, 1);

pub const LAYOUT: Layout = Layout {
    kind: KIND,
    fields: &[
        MARKER.spec(),
        SERIAL_NUMBER.spec(),
        DETAIL_NUMBER.spec(),
        STATEMENT_TEXT.spec(),
        CLIENT_REFERENCE.spec(),
        BIC.spec(),
        RESERVED_1.spec(),
        TRANSACTION_TYPE.spec(),
        REASON_CODE.spec(),
        PURPOSE_CATEGORY.spec(),
        PURPOSE.spec(),
        TRANSACTION_SEQUENCE.spec(),
        RESERVED_2.spec(),
        INFORMATION_SEQUENCE.spec(),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPurposeRecord {
    pub serial_number: u64,
    pub detail_number: u64,
    pub statement_text: String,
    pub client_reference: String,
    /// BIC of the counterparty's bank
    pub bic: String,
    /// 1..=5 when present
    pub transaction_type: Option<u8>,
    /// R-transaction reason/return code
    pub reason_code: String,
    pub purpose_category: String,
    pub purpose: String,
    pub has_next_transaction: bool,
    pub has_information: bool,
}

pub fn decode(line: &str) -> Result<TransactionPurposeRecord, DecodeError> {
    LAYOUT.check(line)?;
    Ok(TransactionPurposeRecord {
        serial_number: SERIAL_NUMBER.read(KIND, line)?,
        detail_number: DETAIL_NUMBER.read(KIND, line)?,
        statement_text: STATEMENT_TEXT.read(KIND, line)?,
        client_reference: CLIENT_REFERENCE.read(KIND, line)?,
        bic: BIC.read(KIND, line)?,
        transaction_type: TRANSACTION_TYPE.read(KIND, line)?,
        reason_code: REASON_CODE.read(KIND, line)?,
        purpose_category: PURPOSE_CATEGORY.read(KIND, line)?,
        purpose: PURPOSE.read(KIND, line)?,
        has_next_transaction: TRANSACTION_SEQUENCE.read(KIND, line)?,
        has_information: INFORMATION_SEQUENCE.read(KIND, line)?,
    })
}

impl fmt::Display for TransactionPurposeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transaction-purpose {}/{} text={:?} client_ref={:?} bic={} type={}",
            self.serial_number,
            self.detail_number,
            self.statement_text,
            self.client_reference,
            self.bic,
            Opt(&self.transaction_type),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    const SAMPLE: &str = "2268590000                                                                                                                   0 0";

    #[test]
    fn test_layout_covers_line() {
        assert!(LAYOUT.is_contiguous());
    }

    #[test]
    fn test_decode_sample() {
        let r = decode(SAMPLE).unwrap();
        assert_eq!(r.serial_number, 6859);
        assert_eq!(r.detail_number, 0);
        assert_eq!(r.statement_text, "");
        assert_eq!(r.client_reference, "");
        assert_eq!(r.bic, "");
        assert_eq!(r.transaction_type, None);
        assert_eq!(r.reason_code, "");
        assert!(!r.has_next_transaction);
        assert!(!r.has_information);
    }

    #[test]
    fn test_filled_fields() {
        let mut line = SAMPLE.to_string();
        line.replace_range(10..63, &format!("{:<53}", "INVOICE 2024/117"));
        line.replace_range(63..98, &format!("{:<35}", "CLIENT-42"));
        line.replace_range(98..109, "GEBABEBB   ");
        line.replace_range(112..125, "3MS02CASHSALA");
        let r = decode(&line).unwrap();
        assert_eq!(r.statement_text, "INVOICE 2024/117");
        assert_eq!(r.client_reference, "CLIENT-42");
        assert_eq!(r.bic, "GEBABEBB");
        assert_eq!(r.transaction_type, Some(3));
        assert_eq!(r.reason_code, "MS02");
        assert_eq!(r.purpose_category, "CASH");
        assert_eq!(r.purpose, "SALA");
    }

    #[test]
    fn test_transaction_type_out_of_range() {
        for bad in ["0", "6", "9", "A"] {
            let mut line = SAMPLE.to_string();
            line.replace_range(112..113, bad);
            let err = decode(&line).unwrap_err();
            assert_eq!(err.field, "transaction_type");
            assert_eq!(err.category(), ErrorCategory::FieldFormat);
        }
    }
}
