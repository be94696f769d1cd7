//! Page-level types.

use super::{Paragraph, RichText, Shape, Table};
use serde::{Deserialize, Serialize};

/// A single slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Name of the slide layout the page was built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// Shapes in z-order (back to front)
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            layout: None,
            shapes: Vec::new(),
        }
    }

    /// Set the layout name and return self.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// Add a shape on top of the existing ones.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Find a shape by identifier.
    pub fn shape(&self, id: u32) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Find the z-order index of a shape.
    pub fn shape_index(&self, id: u32) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// Replace the shape at `index`, keeping its z-order slot.
    ///
    /// Returns the shape that was removed, or gives `shape` back when
    /// `index` is out of range.
    pub fn replace_shape(&mut self, index: usize, shape: Shape) -> Result<Shape, Shape> {
        match self.shapes.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, shape)),
            None => Err(shape),
        }
    }

    /// Iterate over the tables on the page.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Table(t) => Some(&t.table),
            _ => None,
        })
    }

    /// Iterate over the text bodies on the page.
    pub fn text_bodies(&self) -> impl Iterator<Item = &RichText> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text(t) => Some(&t.text),
            _ => None,
        })
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Text(t) => Some(t.text.plain_text()),
                Shape::Table(t) => Some(t.table.plain_text()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the page has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes on the page.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Number of paragraphs across all text bodies.
    pub fn paragraph_count(&self) -> usize {
        self.text_bodies()
            .map(|t| t.paragraphs.iter().filter(|p: &&Paragraph| !p.is_empty()).count())
            .sum()
    }
}
