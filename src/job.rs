//! Merge job files.
//!
//! A job bundles everything a merge needs besides the document itself:
//!
//! ```json
//! {
//!   "fields": { "CUSTOMER_NAME": "Acme", "DATE": "14/11/2025" },
//!   "datasets": { "milestones": [["Kickoff", "01/06/2025", "Done"]] },
//!   "image": "logo.png",
//!   "sentinel": "{{LOGO}}",
//!   "substitute_in_tables": false
//! }
//! ```
//!
//! Field names may be bare (`CUSTOMER_NAME`) or braced (`{{CUSTOMER_NAME}}`).
//! A relative image path is resolved against the job file's directory.

use crate::error::{Error, Result};
use crate::merge::{Datasets, Mapping, MergeOptions};
use crate::model::ImageResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A merge job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeJob {
    /// Field name to replacement text
    pub fields: BTreeMap<String, String>,

    /// Table rows per dataset kind
    pub datasets: Datasets,

    /// Image for the sentinel placeholder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,

    /// Sentinel override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentinel: Option<String>,

    /// Also substitute inside table cells
    pub substitute_in_tables: bool,
}

impl MergeJob {
    /// Parse a job from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a job file, resolving a relative image path against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut job = Self::from_json(&fs::read_to_string(path)?)?;
        if let (Some(image), Some(dir)) = (job.image.as_ref(), path.parent()) {
            if image.is_relative() {
                job.image = Some(dir.join(image));
            }
        }
        Ok(job)
    }

    /// Token mapping built from the fields.
    pub fn mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        for (name, value) in &self.fields {
            mapping.insert_field(name, value.as_str());
        }
        mapping
    }

    /// Merge options with this job's overrides applied.
    pub fn options(&self) -> MergeOptions {
        let mut options = MergeOptions::new().with_table_substitution(self.substitute_in_tables);
        if let Some(sentinel) = &self.sentinel {
            options = options.with_sentinel(sentinel.as_str());
        }
        options
    }

    /// Load the job's image, if it names one.
    pub fn load_image(&self) -> Result<Option<ImageResource>> {
        self.image.as_deref().map(load_image).transpose()
    }
}

/// Read an image file.
///
/// Fails when the file cannot be read or is not a PNG, JPEG, GIF, BMP,
/// WebP or TIFF image.
pub fn load_image(path: &Path) -> Result<ImageResource> {
    let data = fs::read(path)
        .map_err(|e| Error::ImageLoad(format!("{}: {}", path.display(), e)))?;
    if ImageResource::detect_mime_type(&data).is_none() {
        return Err(Error::ImageLoad(format!(
            "{}: unrecognized image format",
            path.display()
        )));
    }

    let mut resource = ImageResource::from_bytes(data);
    if let Some(name) = path.file_name() {
        resource = resource.with_filename(name.to_string_lossy());
    }
    log::debug!(
        "Loaded {} image {} ({} bytes)",
        resource.mime_type,
        path.display(),
        resource.size()
    );
    Ok(resource)
}
