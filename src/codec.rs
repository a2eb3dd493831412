//! Reading and writing the cost table as CSV.
//!
//! The file has a header line followed by one line per record, eight fields each, in
//! `RecordColumn::ALL` order. A field is quoted only when it has to be and quotes inside a quoted
//! field are doubled. Every line ends with `\n`. Quoting follows the `csv` crate's
//! `QuoteStyle::Necessary`, which also quotes a field holding a line break. The reader works one
//! line at a time, so such a field does not load back.
//!
//! Reading is lenient and works line by line. The first line is skipped without looking at it.
//! Each remaining line is split on commas outside of quotes, where every unpaired `"` opens or
//! closes a quoted region and `""` inside one is a literal quote. A line that does not split into
//! exactly eight fields is dropped and the rest of the file still loads. The only error is not
//! being able to read or write the file at all.

use crate::model::{Record, RecordColumn, COLUMN_COUNT};
use crate::{utils, Result};
use anyhow::{anyhow, Context};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::Path;
use tracing::debug;

/// Serializes `records`, header line included.
pub fn to_csv(records: &[Record]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer
        .write_record(RecordColumn::headers())
        .context("Unable to write the CSV header")?;
    for record in records {
        writer
            .write_record(record.fields())
            .context("Unable to write a CSV record")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Unable to flush CSV data: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Parses CSV text into records, dropping any line that does not have eight fields.
pub fn from_csv(text: &str) -> Vec<Record> {
    let mut records = Vec::new();
    for (ix, line) in text.lines().enumerate().skip(1) {
        let fields = split_line(line);
        let found = fields.len();
        match Record::from_fields(fields) {
            Some(record) => records.push(record),
            None => debug!(
                "Skipping CSV line {}: expected {COLUMN_COUNT} fields, found {found}",
                ix + 1
            ),
        }
    }
    records
}

/// Splits one line into fields. A quote that is never closed runs to the end of the line.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }
    fields.push(field);
    fields
}

/// Writes `records` to the file at `path`, replacing it.
pub async fn save(path: &Path, records: &[Record]) -> Result<()> {
    let text = to_csv(records)?;
    utils::write(path, text).await?;
    debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Reads the records in the file at `path`.
pub async fn load(path: &Path) -> Result<Vec<Record>> {
    let text = utils::read(path).await?;
    let records = from_csv(&text);
    debug!("Read {} rows from {}", records.len(), path.display());
    Ok(records)
}
