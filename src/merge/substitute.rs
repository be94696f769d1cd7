//! Token substitution inside rich text.
//!
//! Substitution prefers editing each run on its own, which leaves every
//! run's formatting exactly as it was. When a token is split across runs
//! (the template editor put `{{NA` and `ME}}` in different runs) per-run
//! editing cannot see it; the text body is then rebuilt from the replaced
//! plain text, formatted like its first run.

use super::mapping::Mapping;
use crate::error::ElementError;
use crate::model::{ParagraphStyle, RichText, Table, TextShape};
use serde::{Deserialize, Serialize};

/// How a text body was rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionMode {
    /// Each run edited in place
    PerRun,
    /// Body rebuilt as single-run paragraphs
    WholeReplace,
}

/// Outcome of a substitution that changed the text.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    /// The rewritten text body
    pub text: RichText,
    /// Which strategy produced it
    pub mode: SubstitutionMode,
    /// Token occurrences replaced
    pub replacements: usize,
}

/// Replace every mapped key in `text`, in mapping order.
///
/// Returns the new text and the number of occurrences replaced.
pub fn replace_all(text: &str, mapping: &Mapping) -> (String, usize) {
    let mut result = text.to_string();
    let mut count = 0;
    for (key, value) in mapping.iter() {
        if key.is_empty() {
            continue;
        }
        let hits = result.matches(key).count();
        if hits > 0 {
            result = result.replace(key, value);
            count += hits;
        }
    }
    (result, count)
}

/// Substitute mapped tokens in a text body.
///
/// Returns `None` when nothing changes. Unmapped tokens stay as literal text.
pub fn substitute(text: &RichText, mapping: &Mapping) -> Option<Substitution> {
    let original = text.plain_text();
    let (whole, whole_count) = replace_all(&original, mapping);
    if whole == original {
        return None;
    }

    let mut per_run = text.clone();
    let mut run_count = 0;
    for run in per_run.runs_mut() {
        let (replaced, hits) = replace_all(&run.text, mapping);
        if hits > 0 {
            run.text = replaced;
            run_count += hits;
        }
    }

    if per_run.plain_text() == whole {
        log::debug!("Substituted {} token(s) per run", run_count);
        return Some(Substitution {
            text: per_run,
            mode: SubstitutionMode::PerRun,
            replacements: run_count,
        });
    }

    let run_style = text.first_run_style().cloned().unwrap_or_default();
    let paragraph_style = text
        .paragraphs
        .first()
        .map(|p| p.style.clone())
        .unwrap_or_else(ParagraphStyle::default);
    log::debug!(
        "Token crosses a run boundary; rebuilding text body ({} token(s))",
        whole_count
    );
    Some(Substitution {
        text: RichText::rebuilt(&whole, &run_style, &paragraph_style),
        mode: SubstitutionMode::WholeReplace,
        replacements: whole_count,
    })
}

/// Substitute tokens in a text shape and write the result back.
///
/// Returns the number of token occurrences replaced. The shape is left
/// untouched on error.
pub fn substitute_shape(shape: &mut TextShape, mapping: &Mapping) -> Result<usize, ElementError> {
    let Some(result) = substitute(&shape.text, mapping) else {
        return Ok(0);
    };
    if shape.locks.no_text_edit {
        return Err(ElementError::ShapeLocked {
            shape_id: shape.id,
            action: "text edit",
        });
    }
    shape.text = result.text;
    Ok(result.replacements)
}

/// Outcome of substituting across a table's cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSubstitution {
    /// Token occurrences replaced
    pub replacements: usize,
    /// Cells that could not be written, with their position
    pub failures: Vec<((usize, usize), ElementError)>,
}

/// Substitute tokens in every cell of a table.
///
/// Cells covered by a merge are skipped with a failure; the rest continue.
pub fn substitute_table(table: &mut Table, mapping: &Mapping) -> TableSubstitution {
    let mut outcome = TableSubstitution::default();
    for (r, row) in table.rows.iter_mut().enumerate() {
        for (c, cell) in row.cells.iter_mut().enumerate() {
            let Some(result) = substitute(&cell.text, mapping) else {
                continue;
            };
            if cell.spanned {
                outcome
                    .failures
                    .push(((r, c), ElementError::SpannedCell { row: r, column: c }));
                continue;
            }
            cell.text = result.text;
            outcome.replacements += result.replacements;
        }
    }
    outcome
}
