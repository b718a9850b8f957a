//! coda-ingest: line source for CODA files and batch-level bookkeeping.

pub mod reader;
pub mod summary;
pub mod types;

pub use reader::{decode_file, decode_reader, decode_str};
pub use summary::Summary;
pub use types::{DecodedFile, DecodedLine, ErrorPolicy, IngestOptions, LineError};
