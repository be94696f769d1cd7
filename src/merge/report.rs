//! Merge report with counters and swallowed failures.

use super::classify::DatasetKind;
use super::image::Placement;
use crate::error::ElementError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Summary of a merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Pages walked in the mutation pass
    pub pages_visited: u32,

    /// Shapes walked in the mutation pass
    pub shapes_visited: u32,

    /// Token occurrences replaced (text shapes and, when enabled, cells)
    pub substitutions: u32,

    /// Text containers rewritten
    pub containers_rewritten: u32,

    /// Tables whose header matched a dataset kind
    pub tables_classified: u32,

    /// Tables that received at least one cell from a dataset
    pub tables_filled: u32,

    /// Cells written by dataset fills
    pub cells_written: u32,

    /// Whether at least one sentinel was swapped for the image
    pub image_swapped: bool,

    /// Placement level used for each swap, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placements: Vec<Placement>,

    /// Dataset kind per classified table, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classified_kinds: Vec<DatasetKind>,

    /// Distinct tokens found before mutation
    pub tokens: BTreeSet<String>,

    /// Found tokens with no mapping
    pub missing: BTreeSet<String>,

    /// Swallowed failures per category
    pub failures: FailureCounts,

    /// Detail for each swallowed failure
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failure_log: Vec<ElementFailure>,
}

impl MergeReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the merge changed the document.
    pub fn changed(&self) -> bool {
        self.substitutions > 0 || self.cells_written > 0 || self.image_swapped
    }

    /// Check if every element was processed without failure.
    pub fn is_clean(&self) -> bool {
        self.failures.total() == 0
    }

    /// Record a placement.
    pub fn add_placement(&mut self, placement: Placement) {
        self.placements.push(placement);
        self.image_swapped = true;
    }

    /// Record a classified table.
    pub fn add_classified(&mut self, kind: DatasetKind) {
        self.classified_kinds.push(kind);
        self.tables_classified += 1;
    }

    /// Count a failure and, if `log` is set, keep its detail.
    pub fn add_failure(&mut self, failure: ElementFailure, log: bool) {
        self.failures.add(failure.kind);
        if log {
            self.failure_log.push(failure);
        }
    }
}

/// Category of a swallowed failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Writing substituted text back to a shape or cell
    Substitution,
    /// Writing a dataset value into a table cell
    TableCell,
    /// Placing the image over a sentinel
    ImagePlacement,
}

/// Failure counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCounts {
    /// Text boxes or cells whose substitution could not be written back
    pub substitution: u32,
    /// Dataset values that could not be written into a cell
    pub table_cell: u32,
    /// Sentinels left in place because every placement failed
    pub image_placement: u32,
}

impl FailureCounts {
    /// Increment the counter for `kind`.
    pub fn add(&mut self, kind: FailureKind) {
        match kind {
            FailureKind::Substitution => self.substitution += 1,
            FailureKind::TableCell => self.table_cell += 1,
            FailureKind::ImagePlacement => self.image_placement += 1,
        }
    }

    /// Sum of all counters.
    pub fn total(&self) -> u32 {
        self.substitution + self.table_cell + self.image_placement
    }
}

/// One swallowed failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementFailure {
    /// Page number (1-indexed)
    pub page: u32,
    /// Shape identifier
    pub shape_id: u32,
    /// `(row, column)` for cell failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<(usize, usize)>,
    /// Failure category
    pub kind: FailureKind,
    /// Error message
    pub message: String,
}

impl ElementFailure {
    /// Create a failure record for a shape.
    pub fn new(page: u32, shape_id: u32, kind: FailureKind, error: &ElementError) -> Self {
        Self {
            page,
            shape_id,
            cell: None,
            kind,
            message: error.to_string(),
        }
    }

    /// Attach a cell position.
    pub fn at_cell(mut self, row: usize, column: usize) -> Self {
        self.cell = Some((row, column));
        self
    }
}
