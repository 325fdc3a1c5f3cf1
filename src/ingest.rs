//! Input parsing and record ingestion.
//!
//! Consumes one line per input item, normalizes each item to a
//! fixed-width tuple of nullable bytes, and appends it to the record
//! store. All inserts for one input stream form a single batch with one
//! commit at the end; a malformed line is a diagnostic and a skip, never
//! an abort.

use std::fs::File;
use std::io::{BufRead, Read};
use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::store::RecordStore;

/// How input lines are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Each line is a hex-digit string, decoded left-to-right.
    HexLines,
    /// Each line names a file; the first `size` bytes are read.
    FileList,
}

/// Outcome of one ingestion pass.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Records appended to the store.
    pub stored: u64,
    /// Input items skipped after a parse or read failure.
    pub skipped: u64,
    /// Raw text of each skipped item, in input order.
    pub failures: Vec<String>,
}

/// Ingests every line of `input` into `store` according to `format`.
///
/// Normalization: decoded bytes are truncated to the store width and
/// right-padded with the missing sentinel. An empty hex line is valid
/// and stores an all-missing record. A read error on the stream itself
/// commits the records inserted so far, then propagates.
pub fn ingest<R: BufRead>(
    store: &RecordStore,
    format: InputFormat,
    input: R,
) -> Result<IngestReport> {
    let mut report = IngestReport::default();
    store.begin_batch()?;
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                store.commit()?;
                return Err(err.into());
            }
        };
        let raw = line.trim();
        match decode_item(format, raw, store.size()) {
            Some(bytes) => {
                let slots = normalize(&bytes, store.size());
                store.insert(&slots)?;
                report.stored += 1;
            }
            None => {
                warn!(input = raw, "failure parsing input, skipping");
                report.skipped += 1;
                report.failures.push(raw.to_string());
            }
        }
    }
    store.commit()?;
    info!(
        stored = report.stored,
        skipped = report.skipped,
        "ingestion batch committed"
    );
    Ok(report)
}

fn decode_item(format: InputFormat, raw: &str, size: usize) -> Option<Vec<u8>> {
    match format {
        InputFormat::HexLines => decode_hex_line(raw),
        InputFormat::FileList => read_file_prefix(Path::new(raw), size),
    }
}

/// Decodes a hex line, tolerating whitespace between byte pairs the way
/// `bytes.fromhex` does.
fn decode_hex_line(raw: &str) -> Option<Vec<u8>> {
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    hex::decode(compact).ok()
}

fn read_file_prefix(path: &Path, size: usize) -> Option<Vec<u8>> {
    let file = File::open(path).ok()?;
    let mut bytes = Vec::with_capacity(size);
    file.take(size as u64).read_to_end(&mut bytes).ok()?;
    Some(bytes)
}

/// Truncates to `size` and right-pads with the missing sentinel.
fn normalize(bytes: &[u8], size: usize) -> Vec<Option<u8>> {
    let mut slots: Vec<Option<u8>> = bytes.iter().take(size).copied().map(Some).collect();
    slots.resize(size, None);
    slots
}
