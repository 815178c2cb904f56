//! Bulk import and export of ledger rows as CSV.
use crate::core::transaction::{RECORD_HEADER, Transaction};
use crate::store::Ledger;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, Writer};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// A row left out of an import, with the reason it was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based line number in the source file.
    pub line: u64,
    pub fields: Vec<String>,
    pub reason: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct ImportReport {
    pub imported: usize,
    pub rejected: Vec<RejectedRow>,
    /// The input had no header row at all.
    pub empty_input: bool,
}

impl ImportReport {
    /// Nothing was written because no row survived validation.
    pub fn no_valid_rows(&self) -> bool {
        !self.empty_input && self.imported == 0
    }
}

/// Reads `coin_id,currency,amount,sell,date` records after a header row.
///
/// Malformed rows are rejected individually and never abort the import. The
/// rows that pass validation are written in one batch.
pub fn import_from_table<R: Read>(ledger: &mut Ledger, reader: R) -> Result<ImportReport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = rdr.records();
    let mut report = ImportReport::default();

    match records.next() {
        None => {
            report.empty_input = true;
            return Ok(report);
        }
        Some(header) => {
            let header = header.context("Failed to read CSV header")?;
            debug!(?header, "Skipping header row");
        }
    }

    let mut valid = Vec::new();
    for record in records {
        let record = record.context("Failed to read CSV record")?;
        let line = record.position().map_or(0, |p| p.line());
        match Transaction::from_record(record.iter()) {
            Ok(tx) => valid.push(tx),
            Err(e) => {
                warn!(line, error = %e, "Rejecting CSV row");
                report.rejected.push(RejectedRow {
                    line,
                    fields: record.iter().map(str::to_string).collect(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if valid.is_empty() {
        return Ok(report);
    }

    report.imported = ledger.append_many(&valid)?;
    Ok(report)
}

pub fn import_from_path(ledger: &mut Ledger, path: &Path) -> Result<ImportReport> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    import_from_table(ledger, file)
}

/// Writes a header row followed by every stored transaction. Returns the
/// number of data rows written.
pub fn export_to_table<W: Write>(ledger: &Ledger, writer: W) -> Result<usize> {
    let transactions = ledger.query_all()?;

    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(RECORD_HEADER)
        .context("Failed to write CSV header")?;
    for tx in &transactions {
        wtr.write_record(tx.to_record())
            .context("Failed to write CSV record")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;

    Ok(transactions.len())
}

pub fn export_to_path(ledger: &Ledger, path: &Path) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    export_to_table(ledger, file)
}
