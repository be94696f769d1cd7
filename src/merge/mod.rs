//! Template merge over a slide document.
//!
//! A merge runs in two passes. The first is read-only: it collects every
//! placeholder token and works out which ones the mapping does not cover.
//! The second walks each page's shapes in order and mutates them:
//!
//! - tables are classified by header and filled from the matching dataset
//!   (and, if enabled, have their cells substituted);
//! - a text shape that is exactly the sentinel is swapped for the image,
//!   when one is supplied;
//! - any other text shape gets token substitution.
//!
//! Failures scoped to one shape or cell are counted in the [`MergeReport`]
//! and the walk continues. Only an invalid document or invalid options stop
//! a merge, and they do so before anything is touched.

pub mod classify;
pub mod image;
mod mapping;
mod options;
mod report;
pub mod scanner;
pub mod substitute;
pub mod table;

pub use classify::{ClassifierRule, DatasetKind, HeaderPredicate, TableClassifier};
pub use image::{ImageSource, Placement};
pub use mapping::{DatasetRows, Datasets, Mapping};
pub use options::{MergeOptions, DEFAULT_IMAGE_RESOURCE_ID, DEFAULT_SENTINEL};
pub use report::{ElementFailure, FailureCounts, FailureKind, MergeReport};
pub use scanner::{extract_tokens, is_token, scan, scan_locations, TokenLocation};
pub use substitute::{substitute, SubstitutionMode};
pub use table::{classify_and_fill, fill_table};

use crate::error::{ElementError, Result};
use crate::model::{Document, ImageResource, Page, Shape, TableShape, TextShape};

/// Merge with default options.
pub fn merge(
    document: &mut Document,
    mapping: &Mapping,
    image: Option<&ImageResource>,
    datasets: &Datasets,
) -> Result<MergeReport> {
    merge_with_options(document, mapping, image, datasets, &MergeOptions::default())
}

/// Merge with explicit options.
pub fn merge_with_options(
    document: &mut Document,
    mapping: &Mapping,
    image: Option<&ImageResource>,
    datasets: &Datasets,
    options: &MergeOptions,
) -> Result<MergeReport> {
    options.validate()?;
    document.validate()?;

    let mut report = MergeReport::new();
    report.tokens = scanner::scan(document);
    report.missing = mapping.missing(&report.tokens);
    log::debug!(
        "Found {} token(s), {} without a mapping",
        report.tokens.len(),
        report.missing.len()
    );

    let merger = Merger {
        mapping,
        datasets,
        image: image.map(|image| ImageSource {
            resource_id: &options.image_resource_id,
            image,
        }),
        options,
    };

    for page in &mut document.pages {
        report.pages_visited += 1;
        for index in 0..page.shapes.len() {
            report.shapes_visited += 1;
            merger.visit(page, index, &mut report);
        }
    }

    if report.image_swapped {
        if let Some(image) = image {
            let previous =
                document.add_resource(options.image_resource_id.clone(), image.clone());
            if previous.is_some_and(|previous| previous != *image) {
                log::warn!(
                    "Replaced existing resource '{}'; earlier pictures now show the new image",
                    options.image_resource_id
                );
            }
        }
    }
    if options.touch_modified && report.changed() {
        document.metadata.modified = Some(chrono::Utc::now());
    }

    log::debug!(
        "Merged {} page(s): {} substitution(s), {} table(s) filled, {} failure(s)",
        report.pages_visited,
        report.substitutions,
        report.tables_filled,
        report.failures.total()
    );
    Ok(report)
}

struct Merger<'a> {
    mapping: &'a Mapping,
    datasets: &'a Datasets,
    image: Option<ImageSource<'a>>,
    options: &'a MergeOptions,
}

impl Merger<'_> {
    fn visit(&self, page: &mut Page, index: usize, report: &mut MergeReport) {
        let number = page.number;
        match &mut page.shapes[index] {
            Shape::Table(shape) => {
                self.merge_table(number, shape, report);
                return;
            }
            Shape::Text(_) => {}
            Shape::Image(_) | Shape::Generic(_) => return,
        }

        if let Some(source) = self.image {
            if image::is_sentinel(&page.shapes[index], &self.options.sentinel) {
                let shape_id = page.shapes[index].id();
                match image::resolve(page, index, source, &self.options.sentinel) {
                    Ok(Some(placement)) => report.add_placement(placement),
                    Ok(None) => {}
                    Err(e) => self.fail(report, number, shape_id, FailureKind::ImagePlacement, e),
                }
                return;
            }
        }

        if let Shape::Text(shape) = &mut page.shapes[index] {
            self.merge_text(number, shape, report);
        }
    }

    fn merge_text(&self, page: u32, shape: &mut TextShape, report: &mut MergeReport) {
        match substitute::substitute_shape(shape, self.mapping) {
            Ok(0) => {}
            Ok(count) => {
                report.substitutions += count as u32;
                report.containers_rewritten += 1;
            }
            Err(e) => self.fail(report, page, shape.id, FailureKind::Substitution, e),
        }
    }

    fn merge_table(&self, page: u32, shape: &mut TableShape, report: &mut MergeReport) {
        if self.options.substitute_in_tables {
            let outcome = substitute::substitute_table(&mut shape.table, self.mapping);
            report.substitutions += outcome.replacements as u32;
            for (cell, e) in outcome.failures {
                self.fail_cell(report, page, shape.id, FailureKind::Substitution, cell, e);
            }
        }

        let outcome =
            table::classify_and_fill(&mut shape.table, &self.options.classifier, self.datasets);
        if let Some(kind) = outcome.kind {
            report.add_classified(kind);
        }
        if outcome.filled() {
            report.tables_filled += 1;
        }
        report.cells_written += outcome.fill.cells_written as u32;
        for (cell, e) in outcome.fill.failures {
            self.fail_cell(report, page, shape.id, FailureKind::TableCell, cell, e);
        }
    }

    fn fail(
        &self,
        report: &mut MergeReport,
        page: u32,
        shape_id: u32,
        kind: FailureKind,
        error: ElementError,
    ) {
        log::warn!("Page {}, shape {}: {}", page, shape_id, error);
        report.add_failure(
            ElementFailure::new(page, shape_id, kind, &error),
            self.options.record_failures,
        );
    }

    fn fail_cell(
        &self,
        report: &mut MergeReport,
        page: u32,
        shape_id: u32,
        kind: FailureKind,
        (row, column): (usize, usize),
        error: ElementError,
    ) {
        log::warn!(
            "Page {}, shape {}, cell ({}, {}): {}",
            page,
            shape_id,
            row,
            column,
            error
        );
        report.add_failure(
            ElementFailure::new(page, shape_id, kind, &error).at_cell(row, column),
            self.options.record_failures,
        );
    }
}
