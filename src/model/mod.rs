//! Document model types for slide decks.
//!
//! This module defines the in-memory representation the merge operates on.
//! Loading it from a package and writing it back are handled elsewhere; the
//! model only guarantees that a document owns its pages, a page owns its
//! shapes, and table grids keep their shape once built.

mod document;
mod page;
mod paragraph;
mod resource;
mod shape;
mod table;

pub use document::{Document, Metadata};
pub use page::Page;
pub use paragraph::{Alignment, Paragraph, ParagraphStyle, RichText, TextRun, TextStyle};
pub use resource::ImageResource;
pub use shape::{
    GenericShape, Geometry, ImageShape, PictureFrame, Shape, ShapeLocks, TableShape, TextShape,
    MAX_EXTENT,
};
pub use table::{Table, TableCell, TableRow};
