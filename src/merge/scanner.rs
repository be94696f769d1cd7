//! Placeholder discovery.
//!
//! Tokens are `{{` + one or more of `[A-Z0-9_-]` + `}}`. Scanning reads text
//! bodies and table cells and never mutates the document.

use crate::model::{Document, Shape};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\{\{[A-Z0-9_-]+\}\}").expect("token pattern is valid"))
}

/// Iterate over the tokens in `text`, in order of appearance.
pub fn extract_tokens(text: &str) -> impl Iterator<Item = &str> {
    token_regex().find_iter(text).map(|m| m.as_str())
}

/// Check if `text` is exactly one token.
pub fn is_token(text: &str) -> bool {
    token_regex()
        .find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}

/// Where a token was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLocation {
    /// The token, braces included
    pub token: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Shape identifier
    pub shape_id: u32,
    /// `(row, column)` when the token sits in a table cell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<(usize, usize)>,
}

/// Collect the distinct tokens in a document.
pub fn scan(document: &Document) -> BTreeSet<String> {
    document
        .pages
        .iter()
        .flat_map(|page| page.shapes.iter())
        .flat_map(scan_shape)
        .collect()
}

/// Tokens in one shape, in order of appearance (duplicates kept).
///
/// Shapes without text contribute nothing.
pub fn scan_shape(shape: &Shape) -> Vec<String> {
    match shape {
        Shape::Text(s) => extract_tokens(&s.text.plain_text())
            .map(str::to_string)
            .collect(),
        Shape::Table(s) => s
            .table
            .rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .flat_map(|cell| {
                extract_tokens(&cell.plain_text())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect(),
        Shape::Image(_) | Shape::Generic(_) => Vec::new(),
    }
}

/// Every token occurrence with its position in the document.
pub fn scan_locations(document: &Document) -> Vec<TokenLocation> {
    let mut locations = Vec::new();
    for page in &document.pages {
        for shape in &page.shapes {
            match shape {
                Shape::Text(s) => {
                    for token in extract_tokens(&s.text.plain_text()) {
                        locations.push(TokenLocation {
                            token: token.to_string(),
                            page: page.number,
                            shape_id: s.id,
                            cell: None,
                        });
                    }
                }
                Shape::Table(s) => {
                    for (r, row) in s.table.rows.iter().enumerate() {
                        for (c, cell) in row.cells.iter().enumerate() {
                            for token in extract_tokens(&cell.plain_text()) {
                                locations.push(TokenLocation {
                                    token: token.to_string(),
                                    page: page.number,
                                    shape_id: s.id,
                                    cell: Some((r, c)),
                                });
                            }
                        }
                    }
                }
                Shape::Image(_) | Shape::Generic(_) => {}
            }
        }
    }
    locations
}
