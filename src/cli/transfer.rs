use super::ui;
use crate::core::transfer::{self, ImportReport};
use crate::store::Ledger;
use anyhow::Result;
use std::path::Path;

/// Status lines for an import, one per rejected row followed by a summary.
pub fn describe_import(report: &ImportReport, csv_file: &Path) -> Vec<String> {
    let mut lines: Vec<String> = report
        .rejected
        .iter()
        .map(|row| {
            ui::style_text(
                &format!(
                    "Skipping invalid row {} {:?}: {}",
                    row.line, row.fields, row.reason
                ),
                ui::StyleType::Warning,
            )
        })
        .collect();

    let summary = if report.empty_input {
        "CSV file is empty.".to_string()
    } else if report.no_valid_rows() {
        "No valid rows to import.".to_string()
    } else {
        format!(
            "Imported {} investments from {}",
            report.imported,
            csv_file.display()
        )
    };
    lines.push(summary);
    lines
}

pub fn import(ledger: &mut Ledger, csv_file: &Path) -> Result<ImportReport> {
    let report = transfer::import_from_path(ledger, csv_file)?;
    for line in describe_import(&report, csv_file) {
        println!("{line}");
    }
    Ok(report)
}

pub fn export(ledger: &Ledger, csv_file: &Path) -> Result<usize> {
    let written = transfer::export_to_path(ledger, csv_file)?;
    println!("Exported {} investments to {}", written, csv_file.display());
    Ok(written)
}
