//! Feed lines from a file or reader through the record dispatcher.
//!
//! Lines are numbered from 1. A trailing `\r` is dropped so files with DOS
//! line endings decode like Unix ones. Lines that are not UTF-8 are read as
//! ISO-8859-1, the usual charset of bank-issued CODA files.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use coda_core::decode_line;
use tracing::{debug, info, warn};

use crate::types::{DecodedFile, DecodedLine, ErrorPolicy, IngestOptions, LineError};

pub fn decode_reader<R: BufRead>(mut reader: R, opts: &IngestOptions) -> Result<DecodedFile> {
    let mut out = DecodedFile::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("reading line {}", line_no + 1))?;
        if n == 0 {
            break;
        }
        line_no += 1;

        let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        let text = decode_text(bytes);
        if matches!(text, Cow::Owned(_)) {
            debug!(line_no, "line is not UTF-8, reading it as Latin-1");
            out.latin1 += 1;
        }
        let line: &str = &text;

        if line.trim().is_empty() {
            out.blank += 1;
            continue;
        }

        match decode_line(line) {
            Ok(Some(record)) => out.records.push(DecodedLine { line_no, record }),
            Ok(None) => {
                debug!(line_no, prefix = %line.chars().next().unwrap_or(' '), "skipping unrecognized line");
                out.unrecognized += 1;
            }
            Err(error) => match opts.on_error {
                ErrorPolicy::Abort => {
                    return Err(anyhow::Error::new(error).context(format!("decoding line {line_no}")));
                }
                ErrorPolicy::Skip => {
                    warn!(line_no, %error, "dropping undecodable line");
                    out.rejected += 1;
                }
                ErrorPolicy::Collect => {
                    warn!(line_no, %error, "undecodable line");
                    out.errors.push(LineError {
                        line_no,
                        line: line.to_string(),
                        error,
                    });
                }
            },
        }
    }

    info!(
        records = out.records.len(),
        errors = out.errors.len(),
        rejected = out.rejected,
        unrecognized = out.unrecognized,
        latin1 = out.latin1,
        "decoded CODA input"
    );
    Ok(out)
}

/// Every byte is a valid ISO-8859-1 code point, and those map one to one onto
/// the first 256 Unicode scalars.
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().copied().map(char::from).collect()),
    }
}

pub fn decode_str(text: &str, opts: &IngestOptions) -> Result<DecodedFile> {
    decode_reader(text.as_bytes(), opts)
}

pub fn decode_file(path: impl AsRef<Path>, opts: &IngestOptions) -> Result<DecodedFile> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    decode_reader(BufReader::new(file), opts).with_context(|| format!("decoding {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coda_core::{ErrorCategory, Record, RecordKind};

    const INITIAL: &str = "0000013020912605        YjeybrNhwgMichael Campbell          BBRUBEBB   03155032542                                             2";
    const OLD_BALANCE: &str = "10000                                     0000000550584847241114                                                             000";
    const TRANSACTION: &str = "2139660000                     0000000160483785051100000000000                                                     21031600000 0";

    fn opts(on_error: ErrorPolicy) -> IngestOptions {
        IngestOptions { on_error }
    }

    #[test]
    fn test_numbers_lines_and_skips() {
        let text = format!("{INITIAL}\r\n\n{OLD_BALANCE}\n9 trailer\n{TRANSACTION}\n");
        let out = decode_str(&text, &opts(ErrorPolicy::Abort)).unwrap();

        let kinds: Vec<_> = out.records.iter().map(|d| (d.line_no, d.record.kind())).collect();
        assert_eq!(
            kinds,
            vec![
                (1, RecordKind::Initial),
                (3, RecordKind::OldBalance),
                (5, RecordKind::Transaction),
            ]
        );
        assert_eq!(out.blank, 1);
        assert_eq!(out.unrecognized, 1);
        assert_eq!(out.lines_read(), 5);
    }

    #[test]
    fn test_abort_reports_line_number() {
        let text = format!("{INITIAL}\n10000\n");
        let err = decode_str(&text, &opts(ErrorPolicy::Abort)).unwrap_err();
        assert!(format!("{err:#}").contains("decoding line 2"), "{err:#}");
        let decode = err.downcast_ref::<coda_core::DecodeError>().unwrap();
        assert_eq!(decode.category(), ErrorCategory::Layout);
    }

    #[test]
    fn test_skip_and_collect() {
        let text = format!("{INITIAL}\n10000\n{TRANSACTION}\n");

        let skipped = decode_str(&text, &opts(ErrorPolicy::Skip)).unwrap();
        assert_eq!(skipped.records.len(), 2);
        assert_eq!(skipped.rejected, 1);
        assert!(skipped.errors.is_empty());

        let collected = decode_str(&text, &opts(ErrorPolicy::Collect)).unwrap();
        assert_eq!(collected.records.len(), 2);
        assert_eq!(collected.errors.len(), 1);
        assert_eq!(collected.errors[0].line_no, 2);
        assert_eq!(collected.errors[0].line, "10000");
        assert_eq!(collected.errors[0].error.record, RecordKind::OldBalance);
    }

    #[test]
    fn test_latin1_line_decodes_under_collect() {
        // 0xE9 is 'é' in ISO-8859-1 and never valid on its own in UTF-8
        let mut input = INITIAL.as_bytes().to_vec();
        input[35] = 0xE9;
        input.extend_from_slice(b"\r\n");
        input.extend_from_slice(TRANSACTION.as_bytes());
        input.push(b'\n');

        let out = decode_reader(&input[..], &opts(ErrorPolicy::Collect)).unwrap();
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.latin1, 1);
        match &out.records[0].record {
            Record::Initial(r) => {
                assert_eq!(r.addressee, "M\u{e9}chael Campbell");
                assert_eq!(r.bic, "BBRUBEBB");
            }
            other => panic!("expected initial record, got {other:?}"),
        }
    }

    #[test]
    fn test_last_line_without_newline() {
        let text = format!("{INITIAL}\n{TRANSACTION}");
        let out = decode_str(&text, &opts(ErrorPolicy::Abort)).unwrap();
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[1].line_no, 2);
    }
}
