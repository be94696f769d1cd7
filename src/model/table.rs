//! Table types.
//!
//! A table's grid is fixed once it exists in a document. Only cell content
//! can change, so the public mutators address existing cells and never add
//! or remove rows or columns.

use super::{Paragraph, RichText};
use crate::error::ElementError;
use serde::{Deserialize, Serialize};

/// A table grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Column widths in points (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<f32>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows of text values.
    pub fn from_strings<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(TableRow::from_strings).collect(),
            column_widths: None,
        }
    }

    /// Add a row to the table.
    ///
    /// Used while building a document; the merge never calls it.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by position.
    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(column))
    }

    /// Get a mutable cell by position.
    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(column))
    }

    /// Overwrite the text of an existing cell.
    ///
    /// The new text inherits the formatting of the cell's first run.
    pub fn set_cell_text(
        &mut self,
        row: usize,
        column: usize,
        text: &str,
    ) -> Result<(), ElementError> {
        let rows = self.rows.len();
        let columns = self.rows.get(row).map(|r| r.cells.len()).unwrap_or(0);
        let cell = self
            .cell_mut(row, column)
            .ok_or(ElementError::CellOutOfRange {
                row,
                column,
                rows,
                columns,
            })?;
        if cell.spanned {
            return Err(ElementError::SpannedCell { row, column });
        }
        cell.text.set_text(text);
        Ok(())
    }

    /// Header row texts (first row), unnormalized.
    pub fn header_texts(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|r| r.cells.iter().map(|c| c.plain_text()).collect())
            .unwrap_or_default()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Row height in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            height: None,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub text: RichText,

    /// Number of rows this cell spans
    #[serde(default = "one")]
    pub rowspan: u8,

    /// Number of columns this cell spans
    #[serde(default = "one")]
    pub colspan: u8,

    /// Covered by another cell's span; holds no content of its own
    #[serde(default)]
    pub spanned: bool,
}

fn one() -> u8 {
    1
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_content(RichText::from_paragraphs(vec![Paragraph::with_text(text)]))
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::with_content(RichText::new())
    }

    /// Create a cell with rich text content.
    pub fn with_content(text: RichText) -> Self {
        Self {
            text,
            rowspan: 1,
            colspan: 1,
            spanned: false,
        }
    }

    /// Create a cell covered by a neighbouring span.
    pub fn covered() -> Self {
        Self {
            spanned: true,
            ..Self::empty()
        }
    }

    /// Set colspan and return self.
    pub fn colspan(mut self, span: u8) -> Self {
        self.colspan = span;
        self
    }

    /// Set rowspan and return self.
    pub fn rowspan(mut self, span: u8) -> Self {
        self.rowspan = span;
        self
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.text.plain_text()
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
