//! Document-level types.

use super::{ImageResource, Page};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A slide deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, slide size)
    #[serde(default)]
    pub metadata: Metadata,

    /// Pages (slides) in the document
    #[serde(default)]
    pub pages: Vec<Page>,

    /// Embedded images, keyed by resource id
    #[serde(default)]
    pub resources: HashMap<String, ImageResource>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Add a resource to the document, returning the one it replaced.
    pub fn add_resource(
        &mut self,
        id: impl Into<String>,
        resource: ImageResource,
    ) -> Option<ImageResource> {
        self.resources.insert(id.into(), resource)
    }

    /// Get a resource by ID.
    pub fn get_resource(&self, id: &str) -> Option<&ImageResource> {
        self.resources.get(id)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of shapes across all pages.
    pub fn shape_count(&self) -> usize {
        self.pages.iter().map(|p| p.shape_count()).sum()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check the invariants that make the document usable as a whole.
    ///
    /// Problems confined to a single shape are not reported here; the merge
    /// handles those per element.
    pub fn validate(&self) -> Result<()> {
        let Metadata {
            slide_width,
            slide_height,
            ..
        } = self.metadata;
        if !(slide_width.is_finite() && slide_width > 0.0)
            || !(slide_height.is_finite() && slide_height > 0.0)
        {
            return Err(Error::Corrupted(format!(
                "invalid slide size {}x{}",
                slide_width, slide_height
            )));
        }

        let mut seen = HashSet::new();
        for page in &self.pages {
            if !seen.insert(page.number) {
                return Err(Error::Corrupted(format!(
                    "page number {} appears more than once",
                    page.number
                )));
            }
        }
        Ok(())
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,

    /// Document author
    #[serde(default)]
    pub author: Option<String>,

    /// Creation date
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,

    /// Slide width in points
    #[serde(default = "default_slide_width")]
    pub slide_width: f32,

    /// Slide height in points
    #[serde(default = "default_slide_height")]
    pub slide_height: f32,
}

fn default_slide_width() -> f32 {
    960.0 // 13.333in, 16:9
}

fn default_slide_height() -> f32 {
    540.0 // 7.5in
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            created: None,
            modified: None,
            slide_width: default_slide_width(),
            slide_height: default_slide_height(),
        }
    }
}

impl Metadata {
    /// Create metadata for a given slide size in points.
    pub fn with_slide_size(width: f32, height: f32) -> Self {
        Self {
            slide_width: width,
            slide_height: height,
            ..Default::default()
        }
    }

    /// Check if slides are wider than tall.
    pub fn is_landscape(&self) -> bool {
        self.slide_width > self.slide_height
    }
}
