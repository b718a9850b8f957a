//! Static field layouts.
//!
//! A [`Field`] couples a position with a coercion type, so a decoder cannot
//! read a slice with a different coercion than its layout table declares.
//! [`Layout`] is the ordered table of [`FieldSpec`]s for one record kind.

use std::fmt;
use std::marker::PhantomData;

use chrono::NaiveDate;

use crate::codec;
use crate::error::{DecodeError, FieldError};
use crate::record::RecordKind;

/// Every CODA record is this many bytes.
pub const LINE_WIDTH: usize = 128;

/// How a slice is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Positions the decoder does not surface (markers, reserved blanks).
    Filler,
    FixedString,
    TrimmedString,
    OptionalInteger,
    MandatoryInteger,
    Date,
    /// Date where `000000` or blank is absent.
    SentinelDate,
    Flag(char),
    OptionalFlag(char),
    /// Single digit `1`..=`5`, or blank.
    TransactionType,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Filler => write!(f, "filler"),
            FieldKind::FixedString => write!(f, "fixed string"),
            FieldKind::TrimmedString => write!(f, "string"),
            FieldKind::OptionalInteger => write!(f, "integer?"),
            FieldKind::MandatoryInteger => write!(f, "integer"),
            FieldKind::Date => write!(f, "date ddmmyy"),
            FieldKind::SentinelDate => write!(f, "date ddmmyy?"),
            FieldKind::Flag(c) => write!(f, "flag '{c}'"),
            FieldKind::OptionalFlag(c) => write!(f, "flag '{c}'?"),
            FieldKind::TransactionType => write!(f, "type 1-5?"),
        }
    }
}

/// One row of a layout table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub start: usize,
    pub width: usize,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn end(&self) -> usize {
        self.start + self.width
    }
}

/// A coercion from a raw slice to a typed value.
pub trait Coerce {
    type Output;
    const KIND: FieldKind;

    fn coerce(raw: &str) -> Result<Self::Output, FieldError>;
}

pub struct Filler;
pub struct FixedString;
pub struct TrimmedString;
pub struct OptionalInteger;
pub struct MandatoryInteger;
pub struct Date;
pub struct SentinelDate;
pub struct Flag<const C: char>;
pub struct OptionalFlag<const C: char>;
pub struct TransactionType;

impl Coerce for Filler {
    type Output = ();
    const KIND: FieldKind = FieldKind::Filler;

    fn coerce(_raw: &str) -> Result<(), FieldError> {
        Ok(())
    }
}

impl Coerce for FixedString {
    type Output = String;
    const KIND: FieldKind = FieldKind::FixedString;

    fn coerce(raw: &str) -> Result<String, FieldError> {
        Ok(raw.to_string())
    }
}

impl Coerce for TrimmedString {
    type Output = String;
    const KIND: FieldKind = FieldKind::TrimmedString;

    fn coerce(raw: &str) -> Result<String, FieldError> {
        Ok(codec::as_trimmed_string(raw))
    }
}

impl Coerce for OptionalInteger {
    type Output = Option<u64>;
    const KIND: FieldKind = FieldKind::OptionalInteger;

    fn coerce(raw: &str) -> Result<Option<u64>, FieldError> {
        codec::as_optional_integer(raw)
    }
}

impl Coerce for MandatoryInteger {
    type Output = u64;
    const KIND: FieldKind = FieldKind::MandatoryInteger;

    fn coerce(raw: &str) -> Result<u64, FieldError> {
        codec::as_mandatory_integer(raw)
    }
}

impl Coerce for Date {
    type Output = NaiveDate;
    const KIND: FieldKind = FieldKind::Date;

    fn coerce(raw: &str) -> Result<NaiveDate, FieldError> {
        codec::as_date(raw)
    }
}

impl Coerce for SentinelDate {
    type Output = Option<NaiveDate>;
    const KIND: FieldKind = FieldKind::SentinelDate;

    fn coerce(raw: &str) -> Result<Option<NaiveDate>, FieldError> {
        codec::as_sentinel_date(raw)
    }
}

impl<const C: char> Coerce for Flag<C> {
    type Output = bool;
    const KIND: FieldKind = FieldKind::Flag(C);

    fn coerce(raw: &str) -> Result<bool, FieldError> {
        Ok(codec::as_flag(raw, C))
    }
}

impl<const C: char> Coerce for OptionalFlag<C> {
    type Output = Option<bool>;
    const KIND: FieldKind = FieldKind::OptionalFlag(C);

    fn coerce(raw: &str) -> Result<Option<bool>, FieldError> {
        Ok(codec::as_optional_flag(raw, C))
    }
}

impl Coerce for TransactionType {
    type Output = Option<u8>;
    const KIND: FieldKind = FieldKind::TransactionType;

    fn coerce(raw: &str) -> Result<Option<u8>, FieldError> {
        codec::as_transaction_type(raw)
    }
}

/// A named, typed position within a record line.
pub struct Field<C> {
    pub name: &'static str,
    pub start: usize,
    pub width: usize,
    _kind: PhantomData<C>,
}

impl<C: Coerce> Field<C> {
    pub const fn new(name: &'static str, start: usize, width: usize) -> Self {
        Self {
            name,
            start,
            width,
            _kind: PhantomData,
        }
    }

    pub const fn spec(&self) -> FieldSpec {
        FieldSpec {
            name: self.name,
            start: self.start,
            width: self.width,
            kind: C::KIND,
        }
    }

    pub fn raw<'a>(&self, line: &'a str) -> Result<&'a str, FieldError> {
        codec::slice(line, self.start, self.width)
    }

    /// Slice and coerce this field, tagging failures with `record` and the field name.
    pub fn read(&self, record: RecordKind, line: &str) -> Result<C::Output, DecodeError> {
        self.raw(line)
            .and_then(C::coerce)
            .map_err(|e| DecodeError::new(record, self.name, e))
    }
}

/// The full field table of one record kind.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub kind: RecordKind,
    pub fields: &'static [FieldSpec],
}

impl Layout {
    /// Bytes covered by the table.
    pub fn width(&self) -> usize {
        self.fields.last().map_or(0, FieldSpec::end)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fail unless the line is exactly as long as the table.
    ///
    /// A short line names the first field it cannot contain; a long one names
    /// the last field, after which the surplus starts.
    pub fn check(&self, line: &str) -> Result<(), DecodeError> {
        let actual = line.chars().count();
        let expected = self.width();
        if actual > expected {
            let last = self.fields.last().map_or("line", |f| f.name);
            return Err(DecodeError::new(
                self.kind,
                last,
                FieldError::Length { expected, actual },
            ));
        }
        match self.fields.iter().find(|f| actual < f.end()) {
            Some(f) => Err(DecodeError::new(
                self.kind,
                f.name,
                FieldError::Layout {
                    start: f.start,
                    end: f.end(),
                    actual,
                },
            )),
            None => Ok(()),
        }
    }

    /// Fields are in order, touch each other, and end at [`LINE_WIDTH`].
    pub fn is_contiguous(&self) -> bool {
        let mut pos = 0;
        for f in self.fields {
            if f.start != pos || f.width == 0 {
                return false;
            }
            pos = f.end();
        }
        pos == LINE_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIAL: Field<MandatoryInteger> = Field::new("serial_number", 2, 4);
    const SIGN: Field<Flag<'1'>> = Field::new("balance_sign", 6, 1);

    #[test]
    fn test_spec_carries_coercion_kind() {
        assert_eq!(
            SERIAL.spec(),
            FieldSpec {
                name: "serial_number",
                start: 2,
                width: 4,
                kind: FieldKind::MandatoryInteger,
            }
        );
        assert_eq!(SIGN.spec().kind, FieldKind::Flag('1'));
    }

    #[test]
    fn test_read_tags_errors_with_field_name() {
        assert_eq!(SERIAL.read(RecordKind::Transaction, "210042 "), Ok(42));
        let err = SERIAL.read(RecordKind::Transaction, "21    1").unwrap_err();
        assert_eq!(err.record, RecordKind::Transaction);
        assert_eq!(err.field, "serial_number");
        assert!(SIGN.read(RecordKind::Transaction, "2100421").unwrap());
        assert!(!SIGN.read(RecordKind::Transaction, "210042 ").unwrap());
    }

    #[test]
    fn test_check_reports_first_short_field() {
        const FIELDS: &[FieldSpec] = &[
            Field::<Filler>::new("marker", 0, 2).spec(),
            SERIAL.spec(),
            SIGN.spec(),
        ];
        let layout = Layout {
            kind: RecordKind::Transaction,
            fields: FIELDS,
        };
        assert_eq!(layout.width(), 7);
        assert!(layout.check("2100421").is_ok());
        let err = layout.check("2100").unwrap_err();
        assert_eq!(err.field, "serial_number");
        assert!(!layout.is_contiguous());

        let err = layout.check("2100421 ").unwrap_err();
        assert_eq!(err.field, "balance_sign");
        assert_eq!(
            err.source,
            FieldError::Length {
                expected: 7,
                actual: 8
            }
        );
        assert!(layout.check("21004é1").is_ok());
    }
}
