//! # slidemerge
//!
//! Template mail merge for slide decks.
//!
//! A deck carries `{{TOKEN}}` placeholders in its text boxes and table cells.
//! This library fills them from a key/value mapping while keeping run
//! formatting, swaps a sentinel placeholder box for an image, and writes rows
//! of caller data into tables it recognizes by their header.
//!
//! ## Quick Start
//!
//! ```no_run
//! use slidemerge::{json, merge, Datasets, Mapping};
//!
//! fn main() -> slidemerge::Result<()> {
//!     let mut doc = json::load_document("deck.json")?;
//!
//!     let mapping = Mapping::new()
//!         .with_field("CUSTOMER_NAME", "Acme")
//!         .with_field("DATE", "14/11/2025");
//!     let report = merge::merge(&mut doc, &mapping, None, &Datasets::new())?;
//!
//!     for token in &report.missing {
//!         println!("no value for {}", token);
//!     }
//!     json::save_document("merged.json", &doc, slidemerge::JsonFormat::Pretty)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Formatting-preserving substitution**: per-run edits, with a rebuild
//!   only when a token is split across runs
//! - **Image placeholders**: exact box first, then width-only, then position-only
//! - **Table fills**: header classification with a data-driven rule list;
//!   tables are never resized
//! - **Failure containment**: per-element failures are counted in the report,
//!   never raised

pub mod error;
pub mod job;
pub mod json;
pub mod merge;
pub mod model;

// Re-export commonly used types
pub use error::{ElementError, Error, Result};
pub use job::MergeJob;
pub use json::JsonFormat;
pub use merge::{
    DatasetKind, Datasets, ElementFailure, FailureCounts, Mapping, MergeOptions, MergeReport,
    Placement, TableClassifier, TokenLocation,
};
pub use model::{
    Document, Geometry, ImageResource, Metadata, Page, Paragraph, RichText, Shape, Table,
    TableCell, TableRow, TextRun, TextShape, TextStyle,
};

use std::collections::BTreeSet;
use std::path::Path;

/// Collect the distinct tokens in a document file.
///
/// # Example
///
/// ```no_run
/// let tokens = slidemerge::scan_file("deck.json").unwrap();
/// for token in tokens {
///     println!("{}", token);
/// }
/// ```
pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<BTreeSet<String>> {
    let doc = json::load_document(path)?;
    Ok(merge::scan(&doc))
}

/// Load a document file and merge it with default options.
///
/// # Arguments
///
/// * `path` - Path to the document JSON
/// * `mapping` - Token values
/// * `image` - Image for the sentinel placeholder, if any
/// * `datasets` - Table rows per dataset kind
///
/// # Example
///
/// ```no_run
/// use slidemerge::{merge_file, Datasets, JsonFormat, Mapping};
///
/// let mapping = Mapping::new().with_field("CUSTOMER_NAME", "Acme");
/// let result = merge_file("deck.json", &mapping, None, &Datasets::new()).unwrap();
/// println!("{} substitution(s)", result.report.substitutions);
/// std::fs::write("merged.json", result.to_json(JsonFormat::Pretty).unwrap()).unwrap();
/// ```
pub fn merge_file<P: AsRef<Path>>(
    path: P,
    mapping: &Mapping,
    image: Option<&ImageResource>,
    datasets: &Datasets,
) -> Result<MergeResult> {
    let mut document = json::load_document(path)?;
    let report = merge::merge(&mut document, mapping, image, datasets)?;
    Ok(MergeResult { document, report })
}

/// Builder for configuring and running a merge.
///
/// # Example
///
/// ```no_run
/// use slidemerge::{DatasetKind, SlideMerge};
///
/// let result = SlideMerge::new()
///     .with_field("CUSTOMER_NAME", "Acme")
///     .with_dataset(DatasetKind::Milestones, [["Kickoff", "01/06/2025", "Done"]])
///     .with_sentinel("{{COMPANY_LOGO}}")
///     .merge_file("deck.json")?;
/// println!("{:?}", result.report.missing);
/// # Ok::<(), slidemerge::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlideMerge {
    mapping: Mapping,
    datasets: Datasets,
    image: Option<ImageResource>,
    options: MergeOptions,
}

impl SlideMerge {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from a job, loading its image.
    pub fn from_job(job: &MergeJob) -> Result<Self> {
        Ok(Self {
            mapping: job.mapping(),
            datasets: job.datasets.clone(),
            image: job.load_image()?,
            options: job.options(),
        })
    }

    /// Add a field value; bare names get braces.
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.mapping.insert_field(name, value);
        self
    }

    /// Merge a mapping into the current one.
    pub fn with_mapping(mut self, mapping: Mapping) -> Self {
        self.mapping.extend(mapping);
        self
    }

    /// Set the rows for one dataset kind.
    pub fn with_dataset<R, S>(
        mut self,
        kind: DatasetKind,
        rows: impl IntoIterator<Item = R>,
    ) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datasets.insert(kind, rows);
        self
    }

    /// Replace all datasets.
    pub fn with_datasets(mut self, datasets: Datasets) -> Self {
        self.datasets = datasets;
        self
    }

    /// Set the image for the sentinel placeholder.
    pub fn with_image(mut self, image: ImageResource) -> Self {
        self.image = Some(image);
        self
    }

    /// Set the sentinel token.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.options = self.options.with_sentinel(sentinel);
        self
    }

    /// Enable token substitution inside table cells.
    pub fn with_table_substitution(mut self) -> Self {
        self.options = self.options.with_table_substitution(true);
        self
    }

    /// Stamp the modification date when the merge changes anything.
    pub fn touch_modified(mut self) -> Self {
        self.options = self.options.with_touch_modified(true);
        self
    }

    /// Replace all merge options.
    pub fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }

    /// The token mapping in use.
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Merge a document in place.
    pub fn merge(&self, document: &mut Document) -> Result<MergeReport> {
        merge::merge_with_options(
            document,
            &self.mapping,
            self.image.as_ref(),
            &self.datasets,
            &self.options,
        )
    }

    /// Load a document file and merge it.
    pub fn merge_file<P: AsRef<Path>>(&self, path: P) -> Result<MergeResult> {
        let mut document = json::load_document(path)?;
        let report = self.merge(&mut document)?;
        Ok(MergeResult { document, report })
    }
}

/// A merged document and its report.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// The merged document
    pub document: Document,
    /// What the merge did
    pub report: MergeReport,
}

impl MergeResult {
    /// Convert the document to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        json::to_json(&self.document, format)
    }

    /// Convert the report to JSON.
    pub fn report_json(&self, format: JsonFormat) -> Result<String> {
        json::report_to_json(&self.report, format)
    }

    /// Write the document to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P, format: JsonFormat) -> Result<()> {
        json::save_document(path, &self.document, format)
    }
}
