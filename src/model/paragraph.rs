//! Rich text, paragraph, and run types.

use serde::{Deserialize, Serialize};

/// The text body of a shape or table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    /// Paragraphs in reading order
    pub paragraphs: Vec<Paragraph>,
}

impl RichText {
    /// Create an empty text body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text body with one unstyled paragraph per line.
    pub fn plain(text: &str) -> Self {
        Self::rebuilt(text, &TextStyle::default(), &ParagraphStyle::default())
    }

    /// Create a text body from paragraphs.
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Build a text body whose every line is one paragraph holding a single run.
    ///
    /// All runs share `run_style` and all paragraphs share `paragraph_style`.
    pub fn rebuilt(text: &str, run_style: &TextStyle, paragraph_style: &ParagraphStyle) -> Self {
        let paragraphs = text
            .split('\n')
            .map(|line| Paragraph {
                runs: vec![TextRun {
                    text: line.to_string(),
                    style: run_style.clone(),
                }],
                style: paragraph_style.clone(),
            })
            .collect();
        Self { paragraphs }
    }

    /// Replace the whole text, inheriting the formatting of the first run.
    pub fn set_text(&mut self, text: &str) {
        let run_style = self.first_run_style().cloned().unwrap_or_default();
        let paragraph_style = self
            .paragraphs
            .first()
            .map(|p| p.style.clone())
            .unwrap_or_default();
        *self = Self::rebuilt(text, &run_style, &paragraph_style);
    }

    /// Style of the first run, if any run exists.
    pub fn first_run_style(&self) -> Option<&TextStyle> {
        self.runs().next().map(|run| &run.style)
    }

    /// Iterate over all runs in order.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.paragraphs.iter().flat_map(|p| p.runs.iter())
    }

    /// Iterate mutably over all runs in order.
    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut TextRun> {
        self.paragraphs.iter_mut().flat_map(|p| p.runs.iter_mut())
    }

    /// Get the plain text, paragraphs joined by newlines.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the text body holds no visible text.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.is_empty())
    }
}

/// A paragraph of text runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    pub runs: Vec<TextRun>,

    /// Paragraph style
    #[serde(default)]
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a paragraph from runs.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            style: ParagraphStyle::default(),
        }
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(TextRun::new(text));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default)]
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with inherited style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a text run with an explicit style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: Some(true),
                ..Default::default()
            },
        )
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                italic: Some(true),
                ..Default::default()
            },
        )
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Run formatting. `None` means the value is inherited from the layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    /// Font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Bold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    /// Italic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    /// Underline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,

    /// Text color (hex format, e.g., "#FF0000")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextStyle {
    /// Check if any attribute is set explicitly.
    pub fn has_styling(&self) -> bool {
        self.font_name.is_some()
            || self.font_size.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.underline.is_some()
            || self.color.is_some()
    }
}

/// Paragraph styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Text alignment
    #[serde(default)]
    pub alignment: Alignment,

    /// Outline level (0 = top level bullet)
    #[serde(default)]
    pub level: u8,
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}
