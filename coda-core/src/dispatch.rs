//! Line-level dispatch from prefix to decoder.

use crate::error::DecodeError;
use crate::layout::Layout;
use crate::record::{Record, RecordKind};
use crate::records::{initial, old_balance, transaction, transaction_purpose};

/// Decode one line.
///
/// Returns `Ok(None)` for lines whose prefix is not a decodable record kind
/// (trailer, information and free-text records). Decoder errors are returned
/// unchanged.
pub fn decode_line(line: &str) -> Result<Option<Record>, DecodeError> {
    let record = match RecordKind::of(line) {
        RecordKind::Initial => Record::Initial(initial::decode(line)?),
        RecordKind::OldBalance => Record::OldBalance(old_balance::decode(line)?),
        RecordKind::Transaction => Record::Transaction(transaction::decode(line)?),
        RecordKind::TransactionPurpose => {
            Record::TransactionPurpose(transaction_purpose::decode(line)?)
        }
        RecordKind::Unrecognized => return Ok(None),
    };
    Ok(Some(record))
}

/// Layout table for a record kind.
pub fn layout_for(kind: RecordKind) -> Option<&'static Layout> {
    match kind {
        RecordKind::Initial => Some(&initial::LAYOUT),
        RecordKind::OldBalance => Some(&old_balance::LAYOUT),
        RecordKind::Transaction => Some(&transaction::LAYOUT),
        RecordKind::TransactionPurpose => Some(&transaction_purpose::LAYOUT),
        RecordKind::Unrecognized => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_prefixes_are_skipped() {
        for line in ["", "9", "8", "3100010000", "4", "23", "9               000004000000000000000000000000000000 2"] {
            assert_eq!(decode_line(line), Ok(None), "{line:?}");
        }
    }

    #[test]
    fn test_errors_propagate_with_kind() {
        let err = decode_line("21").unwrap_err();
        assert_eq!(err.record, RecordKind::Transaction);
        let err = decode_line("1").unwrap_err();
        assert_eq!(err.record, RecordKind::OldBalance);
    }

    #[test]
    fn test_every_decodable_kind_has_layout() {
        for kind in RecordKind::DECODABLE {
            let layout = layout_for(kind).unwrap();
            assert_eq!(layout.kind, kind);
            assert!(layout.is_contiguous(), "{kind} layout has gaps");
        }
        assert!(layout_for(RecordKind::Unrecognized).is_none());
    }
}
