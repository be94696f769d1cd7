//! Merge options and configuration.

use super::classify::TableClassifier;
use super::scanner::is_token;
use crate::error::{Error, Result};

/// Default sentinel token for the image placeholder.
pub const DEFAULT_SENTINEL: &str = "{{LOGO}}";

/// Default resource id the swapped-in image is stored under.
pub const DEFAULT_IMAGE_RESOURCE_ID: &str = "merge-image";

/// Options for merging a document.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Token that marks the image placeholder shape
    pub sentinel: String,

    /// Resource id used for the inserted picture
    pub image_resource_id: String,

    /// Header rules for table classification
    pub classifier: TableClassifier,

    /// Also substitute tokens inside table cells
    pub substitute_in_tables: bool,

    /// Keep a log of every swallowed element failure in the report
    pub record_failures: bool,

    /// Stamp `metadata.modified` when the merge changed anything
    pub touch_modified: bool,
}

impl MergeOptions {
    /// Create new merge options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sentinel token.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Set the resource id for the inserted picture.
    pub fn with_image_resource_id(mut self, id: impl Into<String>) -> Self {
        self.image_resource_id = id.into();
        self
    }

    /// Set the table classifier.
    pub fn with_classifier(mut self, classifier: TableClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Enable or disable token substitution inside table cells.
    pub fn with_table_substitution(mut self, enabled: bool) -> Self {
        self.substitute_in_tables = enabled;
        self
    }

    /// Enable or disable the failure log.
    pub fn with_failure_log(mut self, record: bool) -> Self {
        self.record_failures = record;
        self
    }

    /// Enable or disable stamping the modification date.
    pub fn with_touch_modified(mut self, touch: bool) -> Self {
        self.touch_modified = touch;
        self
    }

    /// Check the options before a merge.
    pub fn validate(&self) -> Result<()> {
        if !is_token(&self.sentinel) {
            return Err(Error::InvalidOptions(format!(
                "sentinel {:?} is not a {{{{TOKEN}}}}",
                self.sentinel
            )));
        }
        if self.image_resource_id.trim().is_empty() {
            return Err(Error::InvalidOptions(
                "image resource id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            image_resource_id: DEFAULT_IMAGE_RESOURCE_ID.to_string(),
            classifier: TableClassifier::default(),
            substitute_in_tables: false,
            record_failures: true,
            touch_modified: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_options_builder() {
        let options = MergeOptions::new()
            .with_sentinel("{{COMPANY_LOGO}}")
            .with_image_resource_id("logo")
            .with_table_substitution(true)
            .with_failure_log(false)
            .with_touch_modified(true);

        assert_eq!(options.sentinel, "{{COMPANY_LOGO}}");
        assert_eq!(options.image_resource_id, "logo");
        assert!(options.substitute_in_tables);
        assert!(!options.record_failures);
        assert!(options.touch_modified);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_default_options() {
        let options = MergeOptions::default();
        assert_eq!(options.sentinel, "{{LOGO}}");
        assert!(!options.substitute_in_tables);
        assert!(options.record_failures);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_sentinel() {
        for sentinel in ["LOGO", "{{logo}}", "{{LOGO}} ", ""] {
            let err = MergeOptions::new().with_sentinel(sentinel).validate();
            assert!(matches!(err, Err(Error::InvalidOptions(_))), "{:?}", sentinel);
        }
    }

    #[test]
    fn test_empty_resource_id() {
        let err = MergeOptions::new().with_image_resource_id(" ").validate();
        assert!(matches!(err, Err(Error::InvalidOptions(_))));
    }
}
