//! Initial record (`0`): the header line of a CODA file.
//!
//! ```text
//! 0 0000 ddmmyy BBB 05 D ....... REFERENCE. ADDRESSEE(26) BIC(11) 0HOLDERREF. _ FREE TRANSACTIONREF RELATEDREF ....... V
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::layout::{Date, Field, Filler, Flag, Layout, OptionalInteger, TrimmedString};
use crate::record::{Opt, RecordKind};

const KIND: RecordKind = RecordKind::Initial;

const MARKER: Field<Filler> = Field::new("record_type", 0, 1);
const ZEROES: Field<Filler> = Field::new("zeroes", 1, 4);
const CREATION_DATE: Field<Date> = Field::new("creation_date", 5, 6);
const BANK_ID: Field<OptionalInteger> = Field::new("bank_identification_number", 11, 3);
const APPLICATION_CODE: Field<Filler> = Field::new("application_code", 14, 2);
const DUPLICATE: Field<Flag<'D'>> = Field::new("duplicate", 16, 1);
const RESERVED_1: Field<Filler> = Field::new("reserved", 17, 7);
const REFERENCE: Field<TrimmedString> = Field::new("reference", 24, 10);
const ADDRESSEE: Field<TrimmedString> = Field::new("addressee", 34, 26);
const BIC: Field<TrimmedString> = Field::new("bic", 60, 11);
// account holder id is "0" followed by ten digits
const HOLDER_ZERO: Field<Filler> = Field::new("account_holder_zero", 71, 1);
const HOLDER_REF: Field<OptionalInteger> = Field::new("account_holder_reference", 72, 10);
const RESERVED_2: Field<Filler> = Field::new("reserved", 82, 1);
const FREE: Field<TrimmedString> = Field::new("free", 83, 5);
const TRANSACTION_REF: Field<TrimmedString> = Field::new("transaction_reference", 88, 16);
const RELATED_REF: Field<TrimmedString> = Field::new("related_reference", 104, 16);
const RESERVED_3: Field<Filler> = Field::new("reserved", 120, 7);
const VERSION_CODE: Field<OptionalInteger> = Field::new("version_code", 127, 1);

pub const LAYOUT: Layout = Layout {
    kind: KIND,
    fields: &[
        MARKER.spec(),
        ZEROES.spec(),
        CREATION_DATE.spec(),
        BANK_ID.spec(),
        APPLICATION_CODE.spec(),
        DUPLICATE.spec(),
        RESERVED_1.spec(),
        REFERENCE.spec(),
        ADDRESSEE.spec(),
        BIC.spec(),
        HOLDER_ZERO.spec(),
        HOLDER_REF.spec(),
        RESERVED_2.spec(),
        FREE.spec(),
        TRANSACTION_REF.spec(),
        RELATED_REF.spec(),
        RESERVED_3.spec(),
        VERSION_CODE.spec(),
    ],
};

/// First line of a CODA file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialRecord {
    pub creation_date: NaiveDate,
    pub bank_identification_number: Option<u64>,
    /// `D` in the duplicate position
    pub is_duplicate: bool,
    pub reference: String,
    pub addressee: String,
    pub bic: String,
    pub account_holder_reference: Option<u64>,
    pub free: String,
    pub transaction_reference: String,
    pub related_reference: String,
    pub version_code: Option<u64>,
}

pub fn decode(line: &str) -> Result<InitialRecord, DecodeError> {
    LAYOUT.check(line)?;
    Ok(InitialRecord {
        creation_date: CREATION_DATE.read(KIND, line)?,
        bank_identification_number: BANK_ID.read(KIND, line)?,
        is_duplicate: DUPLICATE.read(KIND, line)?,
        reference: REFERENCE.read(KIND, line)?,
        addressee: ADDRESSEE.read(KIND, line)?,
        bic: BIC.read(KIND, line)?,
        account_holder_reference: HOLDER_REF.read(KIND, line)?,
        free: FREE.read(KIND, line)?,
        transaction_reference: TRANSACTION_REF.read(KIND, line)?,
        related_reference: RELATED_REF.read(KIND, line)?,
        version_code: VERSION_CODE.read(KIND, line)?,
    })
}

impl fmt::Display for InitialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "initial {} bank={} ref={} addressee={:?} bic={} holder={} version={}",
            self.creation_date,
            Opt(&self.bank_identification_number),
            self.reference,
            self.addressee,
            self.bic,
            Opt(&self.account_holder_reference),
            Opt(&self.version_code),
        )?;
        if self.is_duplicate {
            write!(f, " DUPLICATE")?;
        }
        Ok(())
    }
}
