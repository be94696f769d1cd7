//! JSON form of the document model and merge report.

use crate::error::Result;
use crate::merge::MergeReport;
use crate::model::Document;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn write<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    write(doc, format)
}

/// Convert a merge report to JSON.
pub fn report_to_json(report: &MergeReport, format: JsonFormat) -> Result<String> {
    write(report, format)
}

/// Parse a document from JSON and check its structure.
pub fn from_json(json: &str) -> Result<Document> {
    let doc: Document = serde_json::from_str(json)?;
    doc.validate()?;
    Ok(doc)
}

/// Read a document from a JSON file.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    log::debug!("Loading document from {}", path.display());
    let json = fs::read_to_string(path)?;
    from_json(&json)
}

/// Write a document to a JSON file.
pub fn save_document(path: impl AsRef<Path>, doc: &Document, format: JsonFormat) -> Result<()> {
    let json = to_json(doc, format)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Geometry, Page, RichText, Shape, TextShape};

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.metadata.title = Some("Transition Plan".to_string());
        let mut page = Page::new(1);
        page.add_shape(Shape::Text(TextShape::new(
            1,
            Geometry::new(0.0, 0.0, 100.0, 20.0),
            RichText::plain("{{CUSTOMER_NAME}}"),
        )));
        doc.add_page(page);
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Transition Plan"));
        assert!(json.contains("\"type\": \"text\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{"metadata": {"slide_width": -1.0}, "pages": []}"#;
        assert!(matches!(from_json(json), Err(Error::Corrupted(_))));

        assert!(matches!(from_json("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_from_json_defaults() {
        let doc = from_json(r#"{"pages": [{"number": 1}]}"#).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.metadata.slide_width, 960.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_document("/nonexistent/deck.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
