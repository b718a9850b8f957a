//! Slicing and coercion primitives for fixed-width fields.
//!
//! Every function here is pure. Offsets count characters, not bytes: CODA
//! positions are defined over a single-byte character set, so a Latin-1
//! name decoded into a `str` still occupies one position per letter.

use chrono::NaiveDate;

use crate::error::FieldError;

/// Value of a `SentinelDate` slice meaning "no date".
pub const ZERO_DATE: &str = "000000";

/// Return the `width` characters starting at `start`.
pub fn slice(line: &str, start: usize, width: usize) -> Result<&str, FieldError> {
    let end = start + width;
    if line.is_ascii() {
        return line.get(start..end).ok_or(FieldError::Layout {
            start,
            end,
            actual: line.len(),
        });
    }
    match (char_offset(line, start), char_offset(line, end)) {
        (Some(from), Some(to)) => Ok(&line[from..to]),
        _ => Err(FieldError::Layout {
            start,
            end,
            actual: line.chars().count(),
        }),
    }
}

/// Byte offset of the `n`th character; `n == len` maps to the end of the line.
fn char_offset(line: &str, n: usize) -> Option<usize> {
    line.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .nth(n)
}

pub fn as_trimmed_string(raw: &str) -> String {
    raw.trim().to_string()
}

/// Trimmed digits, or `None` when the slice is blank.
pub fn as_optional_integer(raw: &str) -> Result<Option<u64>, FieldError> {
    let digits = raw.trim();
    if digits.is_empty() {
        return Ok(None);
    }
    parse_digits(raw, digits).map(Some)
}

pub fn as_mandatory_integer(raw: &str) -> Result<u64, FieldError> {
    as_optional_integer(raw)?.ok_or_else(|| FieldError::format(raw, "required number is blank"))
}

fn parse_digits(raw: &str, digits: &str) -> Result<u64, FieldError> {
    // u64::from_str would accept a leading '+'
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::format(raw, "expected digits"));
    }
    digits
        .parse()
        .map_err(|_| FieldError::format(raw, "number out of range"))
}

/// Parse `ddmmyy`; the two-digit year always lands in the 2000s.
pub fn as_date(raw: &str) -> Result<NaiveDate, FieldError> {
    let date_err = || FieldError::Date {
        raw: raw.to_string(),
    };
    let b = raw.as_bytes();
    if b.len() != 6 || !b.iter().all(u8::is_ascii_digit) {
        return Err(date_err());
    }
    let pair = |i: usize| u32::from(b[i] - b'0') * 10 + u32::from(b[i + 1] - b'0');
    let (day, month, year) = (pair(0), pair(2), pair(4));
    NaiveDate::from_ymd_opt(2000 + year as i32, month, day).ok_or_else(date_err)
}

/// Like [`as_date`], but `000000` and blank mean absent.
pub fn as_sentinel_date(raw: &str) -> Result<Option<NaiveDate>, FieldError> {
    if raw == ZERO_DATE || raw.trim().is_empty() {
        return Ok(None);
    }
    as_date(raw).map(Some)
}

/// Exact match against `true_char`; the slice is not trimmed.
pub fn as_flag(raw: &str, true_char: char) -> bool {
    let mut chars = raw.chars();
    chars.next() == Some(true_char) && chars.next().is_none()
}

pub fn as_optional_flag(raw: &str, true_char: char) -> Option<bool> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(as_flag(raw, true_char))
    }
}

/// Transaction type of a purpose record: blank or one of `1`..=`5`.
pub fn as_transaction_type(raw: &str) -> Result<Option<u8>, FieldError> {
    match raw.trim() {
        "" => Ok(None),
        t @ ("1" | "2" | "3" | "4" | "5") => Ok(Some(t.as_bytes()[0] - b'0')),
        _ => Err(FieldError::format(raw, "transaction type must be 1-5")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_bounds() {
        assert_eq!(slice("0123456789", 2, 3).unwrap(), "234");
        assert_eq!(slice("0123456789", 7, 3).unwrap(), "789");
        assert_eq!(
            slice("0123", 2, 3),
            Err(FieldError::Layout {
                start: 2,
                end: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn test_slice_counts_characters() {
        assert_eq!(slice("aéb", 1, 2).unwrap(), "éb");
        assert_eq!(slice("Zoë  ", 0, 4).unwrap(), "Zoë ");
        assert_eq!(
            slice("aéb", 2, 2),
            Err(FieldError::Layout {
                start: 2,
                end: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_trimmed_string_keeps_inner_spaces() {
        assert_eq!(as_trimmed_string("  Michael Campbell   "), "Michael Campbell");
        assert_eq!(as_trimmed_string("     "), "");
    }

    #[test]
    fn test_optional_integer() {
        assert_eq!(as_optional_integer("   "), Ok(None));
        assert_eq!(as_optional_integer(""), Ok(None));
        assert_eq!(as_optional_integer("000"), Ok(Some(0)));
        assert_eq!(as_optional_integer(" 42 "), Ok(Some(42)));
        assert_eq!(as_optional_integer("000000550584847"), Ok(Some(550584847)));
        assert!(as_optional_integer("+12").is_err());
        assert!(as_optional_integer("-12").is_err());
        assert!(as_optional_integer("1 2").is_err());
        assert!(as_optional_integer("12a").is_err());
        assert!(as_optional_integer("99999999999999999999").is_err());
    }

    #[test]
    fn test_mandatory_integer_rejects_blank() {
        assert_eq!(as_mandatory_integer("0007"), Ok(7));
        let err = as_mandatory_integer("    ").unwrap_err();
        assert!(matches!(err, FieldError::Format { .. }));
    }

    #[test]
    fn test_date_ddmmyy() {
        assert_eq!(
            as_date("130209").unwrap(),
            NaiveDate::from_ymd_opt(2009, 2, 13).unwrap()
        );
        assert_eq!(
            as_date("241114").unwrap(),
            NaiveDate::from_ymd_opt(2014, 11, 24).unwrap()
        );
        // two-digit years never wrap into the 1900s
        assert_eq!(
            as_date("010199").unwrap(),
            NaiveDate::from_ymd_opt(2099, 1, 1).unwrap()
        );
        assert_eq!(
            as_date("290200").unwrap(),
            NaiveDate::from_ymd_opt(2000, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_date_rejects_invalid() {
        for raw in ["000000", "320115", "011315", "290201", "      ", "12 345", "1234567", "ab0101"] {
            assert_eq!(
                as_date(raw),
                Err(FieldError::Date {
                    raw: raw.to_string()
                }),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn test_sentinel_date() {
        assert_eq!(as_sentinel_date("000000"), Ok(None));
        assert_eq!(as_sentinel_date("      "), Ok(None));
        assert_eq!(
            as_sentinel_date("051100"),
            Ok(NaiveDate::from_ymd_opt(2000, 11, 5))
        );
        assert!(as_sentinel_date("000001").is_err());
    }

    #[test]
    fn test_flag_is_exact_equality() {
        assert!(as_flag("D", 'D'));
        assert!(!as_flag(" ", 'D'));
        assert!(!as_flag("d", 'D'));
        assert!(as_flag("1", '1'));
        assert!(!as_flag("0", '1'));
        assert!(!as_flag(" 1", '1'));
    }

    #[test]
    fn test_optional_flag() {
        assert_eq!(as_optional_flag(" ", '1'), None);
        assert_eq!(as_optional_flag("1", '1'), Some(true));
        assert_eq!(as_optional_flag("0", '1'), Some(false));
    }

    #[test]
    fn test_transaction_type() {
        assert_eq!(as_transaction_type(" "), Ok(None));
        for (raw, v) in [("1", 1), ("3", 3), ("5", 5)] {
            assert_eq!(as_transaction_type(raw), Ok(Some(v)));
        }
        assert!(as_transaction_type("0").is_err());
        assert!(as_transaction_type("6").is_err());
        assert!(as_transaction_type("x").is_err());
    }
}
