//! Integration tests for image placeholder replacement.

use std::io::Cursor;

use slidemerge::merge::image::{is_sentinel, resolve, ImageSource};
use slidemerge::model::{Geometry, ImageResource, Page, RichText, Shape, TextShape, MAX_EXTENT};
use slidemerge::{job, ElementError, Placement};

fn encoded(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

fn encoded_png(width: u32, height: u32) -> Vec<u8> {
    encoded(width, height, image::ImageFormat::Png)
}

fn sentinel_page(geometry: Geometry) -> Page {
    let mut page = Page::new(4);
    page.add_shape(Shape::Text(TextShape::new(1, geometry, RichText::plain("title"))));
    page.add_shape(Shape::Text(
        TextShape::new(2, geometry, RichText::plain("{{LOGO}}")).named("Logo"),
    ));
    page.add_shape(Shape::Text(TextShape::new(3, geometry, RichText::plain("footer"))));
    page
}

fn source(image: &ImageResource) -> ImageSource<'_> {
    ImageSource {
        resource_id: "logo",
        image,
    }
}

#[test]
fn test_from_bytes_probes_size() {
    let image = ImageResource::from_bytes(encoded_png(40, 20));
    assert_eq!(image.mime_type, "image/png");
    assert_eq!((image.width, image.height), (Some(40), Some(20)));
    assert_eq!(image.natural_size(), Some((30.0, 15.0)));
}

#[test]
fn test_swap_keeps_z_order() {
    let image = ImageResource::from_bytes(encoded_png(40, 20));
    let mut page = sentinel_page(Geometry::new(100.0, 50.0, 200.0, 100.0));

    let placed = resolve(&mut page, 1, source(&image), "{{LOGO}}").unwrap();
    assert_eq!(placed, Some(Placement::ExactBox));
    assert_eq!(page.shape_count(), 3);
    assert_eq!(page.shapes[0].text().as_deref(), Some("title"));
    assert!(page.shapes[1].is_image());
    assert_eq!(page.shapes[1].name(), "Logo");
    assert_eq!(page.shapes[2].text().as_deref(), Some("footer"));
}

#[test]
fn test_oversized_box_falls_back_to_width() {
    let image = ImageResource::from_bytes(encoded_png(40, 20));
    let mut page = sentinel_page(Geometry::new(0.0, 0.0, 300.0, MAX_EXTENT * 2.0));

    let placed = resolve(&mut page, 1, source(&image), "{{LOGO}}").unwrap();
    assert_eq!(placed, Some(Placement::WidthOnly));
    assert_eq!(page.shapes[1].geometry(), Geometry::new(0.0, 0.0, 300.0, 150.0));
}

#[test]
fn test_unsized_image_needs_exact_box() {
    // Unknown format: no natural size, so only the exact box can work.
    let image = ImageResource::new(vec![1, 2, 3, 4], "image/x-emf");

    let mut ok = sentinel_page(Geometry::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(
        resolve(&mut ok, 1, source(&image), "{{LOGO}}"),
        Ok(Some(Placement::ExactBox))
    );

    let mut degenerate = sentinel_page(Geometry::new(0.0, 0.0, 0.0, 0.0));
    let err = resolve(&mut degenerate, 1, source(&image), "{{LOGO}}").unwrap_err();
    assert_eq!(err, ElementError::UnknownImageSize);
    assert_eq!(degenerate.shapes[1].text().as_deref(), Some("{{LOGO}}"));
}

#[test]
fn test_sentinel_matching() {
    let geometry = Geometry::default();
    let shape = |text: &str| Shape::Text(TextShape::new(1, geometry, RichText::plain(text)));

    assert!(is_sentinel(&shape("{{LOGO}}"), "{{LOGO}}"));
    assert!(is_sentinel(&shape("  {{LOGO}}  "), "{{LOGO}}"));
    assert!(!is_sentinel(&shape("Our {{LOGO}}"), "{{LOGO}}"));
    assert!(!is_sentinel(&shape("{{LOGO}}{{LOGO}}"), "{{LOGO}}"));
    assert!(!is_sentinel(&shape("{{logo}}"), "{{LOGO}}"));
}

#[test]
fn test_load_image_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.png");
    std::fs::write(&path, encoded_png(8, 8)).unwrap();

    let image = job::load_image(&path).unwrap();
    assert_eq!(image.filename.as_deref(), Some("logo.png"));
    assert_eq!(image.extension(), "png");
    assert_eq!(image.width, Some(8));
}

#[test]
fn test_every_accepted_format_has_a_size() {
    let dir = tempfile::tempdir().unwrap();
    let formats = [
        (image::ImageFormat::Png, "image/png"),
        (image::ImageFormat::Jpeg, "image/jpeg"),
        (image::ImageFormat::Gif, "image/gif"),
        (image::ImageFormat::Bmp, "image/bmp"),
        (image::ImageFormat::Tiff, "image/tiff"),
        (image::ImageFormat::WebP, "image/webp"),
    ];

    for (format, mime) in formats {
        let path = dir.path().join(format!("logo.{}", format.extensions_str()[0]));
        std::fs::write(&path, encoded(16, 12, format)).unwrap();

        let image = job::load_image(&path).unwrap();
        assert_eq!(image.mime_type, mime);
        assert_eq!((image.width, image.height), (Some(16), Some(12)), "{}", mime);
        assert_eq!(image.natural_size(), Some((12.0, 9.0)));
    }
}
