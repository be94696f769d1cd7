//! Integration tests for formatting-preserving substitution.

use slidemerge::merge::substitute::{substitute, substitute_shape, SubstitutionMode};
use slidemerge::model::{
    Alignment, Geometry, Paragraph, ParagraphStyle, RichText, TextRun, TextShape, TextStyle,
};
use slidemerge::Mapping;

fn styled(font: &str, size: f32, color: &str) -> TextStyle {
    TextStyle {
        font_name: Some(font.to_string()),
        font_size: Some(size),
        color: Some(color.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_bold_and_italic_runs_keep_their_styles() {
    let text = RichText::from_paragraphs(vec![Paragraph::from_runs(vec![
        TextRun::bold("Hello "),
        TextRun::italic("{{NAME}}"),
    ])]);
    let mapping = Mapping::new().with_field("NAME", "World");

    let result = substitute(&text, &mapping).unwrap();
    assert_eq!(result.mode, SubstitutionMode::PerRun);
    assert_eq!(
        result.text.paragraphs[0].runs,
        vec![TextRun::bold("Hello "), TextRun::italic("World")]
    );
}

#[test]
fn test_untouched_runs_are_identical() {
    let title = styled("Segoe UI", 28.0, "#1F3864");
    let body = styled("Calibri", 12.0, "#000000");
    let text = RichText::from_paragraphs(vec![
        Paragraph::from_runs(vec![TextRun::styled("Quarterly review", title.clone())]),
        Paragraph::from_runs(vec![
            TextRun::styled("Prepared for ", body.clone()),
            TextRun::styled("{{CUSTOMER_NAME}}", body.clone()),
        ]),
    ]);
    let mapping = Mapping::new().with_field("CUSTOMER_NAME", "Contoso");

    let result = substitute(&text, &mapping).unwrap();
    assert_eq!(result.mode, SubstitutionMode::PerRun);
    assert_eq!(result.text.paragraphs[0], text.paragraphs[0]);
    assert_eq!(result.text.paragraphs[1].runs[0], text.paragraphs[1].runs[0]);
    assert_eq!(result.text.paragraphs[1].runs[1].style, body);
}

#[test]
fn test_split_token_uses_first_run_style() {
    let first = styled("Arial", 18.0, "#FFFFFF");
    let text = RichText::from_paragraphs(vec![Paragraph::from_runs(vec![
        TextRun::styled("{{NA", first.clone()),
        TextRun::styled("ME}}", styled("Courier", 9.0, "#FF0000")),
    ])]);
    let mapping = Mapping::new().with_field("NAME", "World");

    let result = substitute(&text, &mapping).unwrap();
    assert_eq!(result.mode, SubstitutionMode::WholeReplace);
    assert_eq!(result.replacements, 1);
    assert_eq!(result.text.paragraphs.len(), 1);
    assert_eq!(result.text.paragraphs[0].runs, vec![TextRun::styled("World", first)]);
}

#[test]
fn test_whole_replace_keeps_paragraph_style() {
    let mut paragraph = Paragraph::from_runs(vec![TextRun::new("{{CUST"), TextRun::new("OMER}}")]);
    paragraph.style = ParagraphStyle {
        alignment: Alignment::Center,
        level: 1,
    };
    let text = RichText::from_paragraphs(vec![paragraph]);
    let mapping = Mapping::new().with_field("CUSTOMER", "Contoso");

    let result = substitute(&text, &mapping).unwrap();
    assert_eq!(result.text.plain_text(), "Contoso");
    assert_eq!(result.text.paragraphs[0].style.alignment, Alignment::Center);
    assert_eq!(result.text.paragraphs[0].style.level, 1);
}

#[test]
fn test_whole_replace_with_unstyled_text_uses_default_style() {
    let text = RichText::from_paragraphs(vec![Paragraph::from_runs(vec![
        TextRun::new("{{"),
        TextRun::new("X}}"),
    ])]);
    let mapping = Mapping::new().with_field("X", "y");
    let result = substitute(&text, &mapping).unwrap();
    assert_eq!(result.text.paragraphs[0].runs, vec![TextRun::new("y")]);
}

#[test]
fn test_unmapped_tokens_stay_literal() {
    let text = RichText::plain("{{A}} and {{B}}");
    let mapping = Mapping::new().with_field("A", "1");
    let result = substitute(&text, &mapping).unwrap();
    assert_eq!(result.text.plain_text(), "1 and {{B}}");
}

#[test]
fn test_value_may_contain_braces() {
    let text = RichText::plain("{{A}}");
    let mapping = Mapping::new().with_field("A", "{{B}}").with_field("B", "2");
    let result = substitute(&text, &mapping).unwrap();
    // Keys are applied in sorted order, so the value of A is then replaced.
    assert_eq!(result.text.plain_text(), "2");
}

#[test]
fn test_shape_write_back() {
    let mut shape = TextShape::new(
        7,
        Geometry::default(),
        RichText::plain("Dear {{NAME}}, welcome {{NAME}}"),
    );
    let mapping = Mapping::new().with_field("NAME", "Ann");
    assert_eq!(substitute_shape(&mut shape, &mapping), Ok(2));
    assert_eq!(shape.text.plain_text(), "Dear Ann, welcome Ann");
}
