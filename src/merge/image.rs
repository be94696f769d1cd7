//! Image placeholder replacement.
//!
//! A text shape whose whole trimmed text is the sentinel token is swapped for
//! a picture in the same z-order slot. Placement is tried with decreasing
//! fidelity: the exact box, then the width alone, then the position alone.
//! The sentinel shape is only removed once one attempt has produced a
//! picture.

use crate::error::ElementError;
use crate::model::{ImageResource, ImageShape, Page, PictureFrame, Shape};
use serde::{Deserialize, Serialize};

/// Which placement attempt succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Position, width and height kept
    ExactBox,
    /// Position and width kept; height from the aspect ratio
    WidthOnly,
    /// Position kept; natural image size
    PositionOnly,
}

impl Placement {
    /// Attempts in the order they are tried.
    pub const ORDER: [Placement; 3] = [
        Placement::ExactBox,
        Placement::WidthOnly,
        Placement::PositionOnly,
    ];

    /// Check if fidelity was reduced.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, Placement::ExactBox)
    }
}

/// Image to place and the resource id it is stored under.
#[derive(Debug, Clone, Copy)]
pub struct ImageSource<'a> {
    /// Resource id the picture references
    pub resource_id: &'a str,
    /// The image payload
    pub image: &'a ImageResource,
}

/// Check if a shape is the sentinel placeholder.
pub fn is_sentinel(shape: &Shape, sentinel: &str) -> bool {
    match shape {
        Shape::Text(s) => s.text.plain_text().trim() == sentinel,
        _ => false,
    }
}

/// Replace the shape at `index` with a picture if it is the sentinel.
///
/// Returns `Ok(None)` when the shape is not the sentinel, `Ok(Some(_))` with
/// the placement used once the picture is in, and an error when every
/// attempt failed, in which case the page is unchanged.
pub fn resolve(
    page: &mut Page,
    index: usize,
    source: ImageSource<'_>,
    sentinel: &str,
) -> Result<Option<Placement>, ElementError> {
    let Some(Shape::Text(shape)) = page.shapes.get(index) else {
        return Ok(None);
    };
    if shape.text.plain_text().trim() != sentinel {
        return Ok(None);
    }
    if shape.locks.no_delete {
        return Err(ElementError::ShapeLocked {
            shape_id: shape.id,
            action: "delete",
        });
    }

    let (shape_id, name, geometry) = (shape.id, shape.name.clone(), shape.geometry);
    let mut last_error = ElementError::InvalidGeometry("no placement attempted".into());
    for placement in Placement::ORDER {
        let frame = match placement {
            Placement::ExactBox => PictureFrame::at(geometry.left, geometry.top)
                .with_width(geometry.width)
                .with_height(geometry.height),
            Placement::WidthOnly => {
                PictureFrame::at(geometry.left, geometry.top).with_width(geometry.width)
            }
            Placement::PositionOnly => PictureFrame::at(geometry.left, geometry.top),
        };

        match ImageShape::placed(
            shape_id,
            name.clone(),
            source.resource_id,
            source.image,
            frame,
        ) {
            Ok(picture) => {
                if page.replace_shape(index, Shape::Image(picture)).is_err() {
                    // index was validated by the lookup above
                    return Ok(None);
                }
                if placement.is_degraded() {
                    log::debug!(
                        "Placed image on page {} with {:?} after rejected geometry",
                        page.number,
                        placement
                    );
                }
                return Ok(Some(placement));
            }
            Err(e) => {
                log::debug!(
                    "Image placement {:?} rejected on page {}: {}",
                    placement,
                    page.number,
                    e
                );
                last_error = e;
            }
        }
    }
    Err(last_error)
}
