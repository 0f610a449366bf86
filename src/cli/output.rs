//! Console rendering for CLI commands
//!
//! [`ConsoleSurface`] is the terminal [`DisplaySurface`]: errors go to stderr,
//! records are printed as a table.

use crate::core::selection::DisplaySurface;
use crate::domain::{PersistedRecord, SelectionLevel, VaxdeskError, RECORD_COLUMNS};

/// Placeholder shown when a dependent level has nothing to offer
pub fn empty_placeholder(level: SelectionLevel) -> &'static str {
    match level {
        SelectionLevel::Location => "No Locations Available",
        SelectionLevel::Centre => "No Centres Available",
        SelectionLevel::Patient => "No Patients Available",
        SelectionLevel::Slot => "No Slots Available",
    }
}

/// Renders records as a left-aligned table with an `ID` column
pub fn render_records(records: &[PersistedRecord]) -> String {
    let header: Vec<&str> = std::iter::once("ID").chain(RECORD_COLUMNS).collect();
    let ids: Vec<String> = records.iter().map(|r| r.id.to_string()).collect();
    let rows: Vec<Vec<&str>> = records
        .iter()
        .zip(&ids)
        .map(|(record, id)| {
            std::iter::once(id.as_str())
                .chain(record.record.cells())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(
        &mut out,
        &rule.iter().map(String::as_str).collect::<Vec<_>>(),
        &widths,
    );
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Prints controller events to the terminal
#[derive(Debug, Default)]
pub struct ConsoleSurface;

impl DisplaySurface for ConsoleSurface {
    fn record_added(&self, record: &PersistedRecord) {
        println!(
            "✅ Record {} added: {} at {} on {} {}",
            record.id,
            record.record.patient,
            record.record.centre,
            record.record.slot_date,
            record.record.slot_time
        );
    }

    fn records_changed(&self, records: &[PersistedRecord]) {
        tracing::debug!(count = records.len(), "Record list refreshed");
    }

    fn report_error(&self, error: &VaxdeskError) {
        eprintln!("❌ {error}");
    }
}
