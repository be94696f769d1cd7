//! Shape types.

use super::{ImageResource, RichText, Table};
use crate::error::ElementError;
use serde::{Deserialize, Serialize};

/// Largest extent a slide object may have, in points (56 inches).
pub const MAX_EXTENT: f32 = 4032.0;

/// Bounding box of a shape, in points (1 point = 1/72 inch).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Distance from the left slide edge
    pub left: f32,
    /// Distance from the top slide edge
    pub top: f32,
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
}

impl Geometry {
    /// Create a geometry record.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a geometry record from inches.
    pub fn inches(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left * 72.0, top * 72.0, width * 72.0, height * 72.0)
    }
}

/// Editing locks set on a shape by the template author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeLocks {
    /// Text content may not be edited
    #[serde(default)]
    pub no_text_edit: bool,
    /// The shape may not be deleted
    #[serde(default)]
    pub no_delete: bool,
}

/// A shape on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// A shape with a text body
    Text(TextShape),
    /// A table frame
    Table(TableShape),
    /// A picture
    Image(ImageShape),
    /// Anything else (connectors, groups, charts)
    Generic(GenericShape),
}

impl Shape {
    /// Shape identifier, unique within its page.
    pub fn id(&self) -> u32 {
        match self {
            Shape::Text(s) => s.id,
            Shape::Table(s) => s.id,
            Shape::Image(s) => s.id,
            Shape::Generic(s) => s.id,
        }
    }

    /// Shape name as shown in the selection pane.
    pub fn name(&self) -> &str {
        match self {
            Shape::Text(s) => &s.name,
            Shape::Table(s) => &s.name,
            Shape::Image(s) => &s.name,
            Shape::Generic(s) => &s.name,
        }
    }

    /// Bounding box.
    pub fn geometry(&self) -> Geometry {
        match self {
            Shape::Text(s) => s.geometry,
            Shape::Table(s) => s.geometry,
            Shape::Image(s) => s.geometry,
            Shape::Generic(s) => s.geometry,
        }
    }

    /// Plain text of a text shape; `None` for shapes without a text body.
    pub fn text(&self) -> Option<String> {
        match self {
            Shape::Text(s) => Some(s.text.plain_text()),
            _ => None,
        }
    }

    /// Check if this shape is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Shape::Table(_))
    }

    /// Check if this shape is a picture.
    pub fn is_image(&self) -> bool {
        matches!(self, Shape::Image(_))
    }
}

/// A shape with a text body (text box, placeholder, autoshape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    /// Shape identifier
    pub id: u32,
    /// Shape name
    #[serde(default)]
    pub name: String,
    /// Bounding box
    pub geometry: Geometry,
    /// Text body
    pub text: RichText,
    /// Editing locks
    #[serde(default)]
    pub locks: ShapeLocks,
}

impl TextShape {
    /// Create a text shape.
    pub fn new(id: u32, geometry: Geometry, text: RichText) -> Self {
        Self {
            id,
            name: format!("TextBox {}", id),
            geometry,
            text,
            locks: ShapeLocks::default(),
        }
    }

    /// Set the shape name and return self.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the locks and return self.
    pub fn with_locks(mut self, locks: ShapeLocks) -> Self {
        self.locks = locks;
        self
    }
}

/// A table frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableShape {
    /// Shape identifier
    pub id: u32,
    /// Shape name
    #[serde(default)]
    pub name: String,
    /// Bounding box
    pub geometry: Geometry,
    /// Table grid
    pub table: Table,
}

impl TableShape {
    /// Create a table shape.
    pub fn new(id: u32, geometry: Geometry, table: Table) -> Self {
        Self {
            id,
            name: format!("Table {}", id),
            geometry,
            table,
        }
    }
}

/// Requested position and extents for a new picture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PictureFrame {
    /// Distance from the left slide edge
    pub left: f32,
    /// Distance from the top slide edge
    pub top: f32,
    /// Fixed width, or `None` to derive it
    pub width: Option<f32>,
    /// Fixed height, or `None` to derive it
    pub height: Option<f32>,
}

impl PictureFrame {
    /// Position only; the size comes from the image.
    pub fn at(left: f32, top: f32) -> Self {
        Self {
            left,
            top,
            width: None,
            height: None,
        }
    }

    /// Fix the width and return self.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Fix the height and return self.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }
}

/// A picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageShape {
    /// Shape identifier
    pub id: u32,
    /// Shape name
    #[serde(default)]
    pub name: String,
    /// Bounding box
    pub geometry: Geometry,
    /// Key of the image in the document's resources
    pub resource_id: String,
    /// Alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl ImageShape {
    /// Build a picture in `frame`.
    ///
    /// With both extents the box is used as given. With only a width the
    /// height follows the image's aspect ratio. With neither the image's
    /// natural size is used. Fails without touching anything when the
    /// resulting box is unusable.
    pub fn placed(
        id: u32,
        name: impl Into<String>,
        resource_id: impl Into<String>,
        image: &ImageResource,
        frame: PictureFrame,
    ) -> Result<Self, ElementError> {
        let PictureFrame {
            left,
            top,
            width,
            height,
        } = frame;
        if !left.is_finite() || !top.is_finite() {
            return Err(ElementError::InvalidGeometry(format!(
                "position ({}, {}) is not finite",
                left, top
            )));
        }

        let (width, height) = match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => {
                let (nw, nh) = image.natural_size().ok_or(ElementError::UnknownImageSize)?;
                (w, w * nh / nw)
            }
            (None, Some(h)) => {
                let (nw, nh) = image.natural_size().ok_or(ElementError::UnknownImageSize)?;
                (h * nw / nh, h)
            }
            (None, None) => image.natural_size().ok_or(ElementError::UnknownImageSize)?,
        };
        check_extent("width", width)?;
        check_extent("height", height)?;

        Ok(Self {
            id,
            name: name.into(),
            geometry: Geometry::new(left, top, width, height),
            resource_id: resource_id.into(),
            alt_text: None,
        })
    }
}

fn check_extent(label: &str, value: f32) -> Result<(), ElementError> {
    if value.is_finite() && value > 0.0 && value <= MAX_EXTENT {
        Ok(())
    } else {
        Err(ElementError::InvalidGeometry(format!(
            "{} {} is outside (0, {}]",
            label, value, MAX_EXTENT
        )))
    }
}

/// A shape the merge never edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericShape {
    /// Shape identifier
    pub id: u32,
    /// Shape name
    #[serde(default)]
    pub name: String,
    /// Bounding box
    pub geometry: Geometry,
    /// Kind of object (e.g., "connector", "group", "chart")
    #[serde(default)]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized_image() -> ImageResource {
        ImageResource::new(vec![0; 8], "image/png").with_dimensions(200, 100)
    }

    fn box_at(left: f32, top: f32, width: f32, height: f32) -> PictureFrame {
        PictureFrame::at(left, top).with_width(width).with_height(height)
    }

    #[test]
    fn test_shape_accessors() {
        let shape = Shape::Text(TextShape::new(
            3,
            Geometry::inches(1.0, 1.0, 2.0, 0.5),
            RichText::plain("Hello"),
        ));
        assert_eq!(shape.id(), 3);
        assert_eq!(shape.name(), "TextBox 3");
        assert_eq!(shape.geometry().width, 144.0);
        assert_eq!(shape.text().as_deref(), Some("Hello"));
        assert!(!shape.is_table());
    }

    #[test]
    fn test_placed_exact_box() {
        let img =
            ImageShape::placed(1, "Logo", "img", &sized_image(), box_at(10.0, 20.0, 50.0, 50.0))
                .unwrap();
        assert_eq!(img.geometry, Geometry::new(10.0, 20.0, 50.0, 50.0));
    }

    #[test]
    fn test_placed_width_only_keeps_aspect() {
        let frame = PictureFrame::at(0.0, 0.0).with_width(60.0);
        let img = ImageShape::placed(1, "Logo", "img", &sized_image(), frame).unwrap();
        assert_eq!(img.geometry.height, 30.0);
    }

    #[test]
    fn test_placed_natural_size() {
        let frame = PictureFrame::at(0.0, 0.0);
        let img = ImageShape::placed(1, "Logo", "img", &sized_image(), frame).unwrap();
        assert_eq!((img.geometry.width, img.geometry.height), (150.0, 75.0));
    }

    #[test]
    fn test_placed_rejects_bad_geometry() {
        let image = sized_image();
        assert!(matches!(
            ImageShape::placed(1, "", "img", &image, PictureFrame::at(f32::NAN, 0.0)),
            Err(ElementError::InvalidGeometry(_))
        ));
        assert!(matches!(
            ImageShape::placed(1, "", "img", &image, box_at(0.0, 0.0, 0.0, 10.0)),
            Err(ElementError::InvalidGeometry(_))
        ));
        assert!(matches!(
            ImageShape::placed(1, "", "img", &image, box_at(0.0, 0.0, 10.0, 1e6)),
            Err(ElementError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_placed_unknown_size() {
        let image = ImageResource::new(vec![0; 8], "application/octet-stream");
        assert_eq!(
            ImageShape::placed(1, "", "img", &image, PictureFrame::at(0.0, 0.0).with_width(10.0)),
            Err(ElementError::UnknownImageSize)
        );
    }

    #[test]
    fn test_shape_serde_tag() {
        let shape = Shape::Generic(GenericShape {
            id: 9,
            name: "Connector 9".into(),
            geometry: Geometry::default(),
            kind: "connector".into(),
        });
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"type\":\"generic\""));
    }
}
