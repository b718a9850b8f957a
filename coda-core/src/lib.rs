//! coda-core: decoding of CODA (Coded Statement of Account) lines into typed records.
//!
//! Each CODA line is exactly 128 characters of positional fields. The first one or two
//! characters select the record kind; [`decode_line`] dispatches to the
//! matching decoder, which slices and coerces fields from a static
//! [`Layout`] table.
//!
//! ```
//! use coda_core::{decode_line, Record};
//!
//! let line = "0000013020912605        YjeybrNhwgMichael Campbell          BBRUBEBB   03155032542                                             2";
//! match decode_line(line).unwrap() {
//!     Some(Record::Initial(r)) => assert_eq!(r.addressee, "Michael Campbell"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! assert_eq!(decode_line("9 trailer").unwrap(), None);
//! ```

pub mod codec;
pub mod dispatch;
pub mod error;
pub mod layout;
pub mod record;
pub mod records;

pub use dispatch::{decode_line, layout_for};
pub use error::{DecodeError, ErrorCategory, FieldError};
pub use layout::{FieldKind, FieldSpec, LINE_WIDTH, Layout};
pub use record::{Record, RecordKind};
pub use records::{InitialRecord, OldBalanceRecord, TransactionPurposeRecord, TransactionRecord};
