//! Heuristic table fills.
//!
//! Data rows are overwritten in place: row `r` of the dataset goes into
//! table row `r + 1` (row 0 is the header). Rows past either end are
//! dropped or left alone. The grid is never resized.

use super::classify::{DatasetKind, TableClassifier};
use super::mapping::Datasets;
use crate::error::ElementError;
use crate::model::Table;

/// Result of filling a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillOutcome {
    /// Data rows written (fully or partly)
    pub rows_written: usize,
    /// Cells written
    pub cells_written: usize,
    /// Cell writes that failed, with their position
    pub failures: Vec<((usize, usize), ElementError)>,
}

/// Result of classifying and filling a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOutcome {
    /// Kind the header matched, if any
    pub kind: Option<DatasetKind>,
    /// What the fill did; empty when nothing was filled
    pub fill: FillOutcome,
}

impl TableOutcome {
    /// Check if any cell was written.
    pub fn filled(&self) -> bool {
        self.fill.cells_written > 0
    }
}

/// Overwrite a table's data rows with `rows`.
///
/// For each data row that has a supplied counterpart, every column up to the
/// header's column count is written with the supplied value, or an empty
/// string when the supplied row is shorter. A failing cell is recorded and
/// skipped.
pub fn fill_table(table: &mut Table, rows: &[Vec<String>]) -> FillOutcome {
    let mut outcome = FillOutcome::default();
    let data_rows = table.row_count().saturating_sub(1);
    let columns = table.column_count();

    for (r, supplied) in rows.iter().take(data_rows).enumerate() {
        let row = r + 1;
        let mut wrote_any = false;
        for column in 0..columns {
            let value = supplied.get(column).map(String::as_str).unwrap_or("");
            match table.set_cell_text(row, column, value) {
                Ok(()) => {
                    outcome.cells_written += 1;
                    wrote_any = true;
                }
                Err(e) => {
                    log::debug!("Cell ({}, {}) rejected the write: {}", row, column, e);
                    outcome.failures.push(((row, column), e));
                }
            }
        }
        if wrote_any {
            outcome.rows_written += 1;
        }
    }

    if rows.len() > data_rows {
        log::debug!(
            "Dropped {} supplied row(s) beyond the table's {} data row(s)",
            rows.len() - data_rows,
            data_rows
        );
    }
    outcome
}

/// Classify a table by its header and fill it from the matching dataset.
///
/// Tables that match no rule, or whose dataset is absent or empty, are left
/// untouched.
pub fn classify_and_fill(
    table: &mut Table,
    classifier: &TableClassifier,
    datasets: &Datasets,
) -> TableOutcome {
    let kind = classifier.classify(table);
    let Some(kind) = kind else {
        return TableOutcome::default();
    };
    log::debug!("Table classified as {}", kind);

    let fill = match datasets.rows(kind) {
        Some(rows) => fill_table(table, rows),
        None => FillOutcome::default(),
    };
    TableOutcome {
        kind: Some(kind),
        fill,
    }
}
