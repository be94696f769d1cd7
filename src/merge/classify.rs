//! Table classification by header text.
//!
//! A table is matched against an ordered list of rules; the first rule whose
//! predicate holds for the normalized header row decides the dataset kind.

use crate::model::Table;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Logical dataset a table can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// Milestone, baseline date, target date, status
    Milestones,
    /// Deliverable, date delivered
    Deliverables,
    /// Task, date, owner, next steps
    OpenItems,
    /// Rollout phases
    Rollout,
    /// Project objectives
    Objectives,
    /// Today's date, start date, end date
    ProjectDates,
}

impl DatasetKind {
    /// All kinds, in default rule priority.
    pub const ALL: [DatasetKind; 6] = [
        DatasetKind::Milestones,
        DatasetKind::Deliverables,
        DatasetKind::OpenItems,
        DatasetKind::Rollout,
        DatasetKind::Objectives,
        DatasetKind::ProjectDates,
    ];

    /// Name used in job files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Milestones => "milestones",
            DatasetKind::Deliverables => "deliverables",
            DatasetKind::OpenItems => "open_items",
            DatasetKind::Rollout => "rollout",
            DatasetKind::Objectives => "objectives",
            DatasetKind::ProjectDates => "project_dates",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A test over the normalized header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "keywords", rename_all = "snake_case")]
pub enum HeaderPredicate {
    /// Some header contains any of the keywords
    AnyHeaderContains(Vec<String>),
    /// The joined header text contains every keyword
    ConcatContainsAll(Vec<String>),
}

impl HeaderPredicate {
    /// Some header contains `keyword`.
    pub fn header_contains(keyword: &str) -> Self {
        HeaderPredicate::AnyHeaderContains(vec![keyword.to_string()])
    }

    /// Some header contains one of `keywords`.
    pub fn header_contains_any(keywords: &[&str]) -> Self {
        HeaderPredicate::AnyHeaderContains(keywords.iter().map(|k| k.to_string()).collect())
    }

    /// The joined header text contains all of `keywords`.
    pub fn concat_contains_all(keywords: &[&str]) -> Self {
        HeaderPredicate::ConcatContainsAll(keywords.iter().map(|k| k.to_string()).collect())
    }

    /// Evaluate against normalized headers and their joined text.
    pub fn matches(&self, headers: &[String], concat: &str) -> bool {
        match self {
            HeaderPredicate::AnyHeaderContains(keywords) => headers
                .iter()
                .any(|h| keywords.iter().any(|k| h.contains(k.as_str()))),
            HeaderPredicate::ConcatContainsAll(keywords) => {
                !keywords.is_empty() && keywords.iter().all(|k| concat.contains(k.as_str()))
            }
        }
    }
}

/// One classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierRule {
    /// Kind assigned when the predicate holds
    pub kind: DatasetKind,
    /// Header test
    pub predicate: HeaderPredicate,
}

impl ClassifierRule {
    /// Create a rule.
    pub fn new(kind: DatasetKind, predicate: HeaderPredicate) -> Self {
        Self { kind, predicate }
    }
}

/// Ordered rule list; first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableClassifier {
    rules: Vec<ClassifierRule>,
}

impl TableClassifier {
    /// Create a classifier from rules in priority order.
    pub fn with_rules(rules: Vec<ClassifierRule>) -> Self {
        Self { rules }
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[ClassifierRule] {
        &self.rules
    }

    /// Classify a table by its first row.
    pub fn classify(&self, table: &Table) -> Option<DatasetKind> {
        let headers: Vec<String> = table
            .header_texts()
            .iter()
            .map(|h| normalize_header(h))
            .collect();
        self.classify_headers(&headers)
    }

    /// Classify already-normalized header texts.
    pub fn classify_headers(&self, headers: &[String]) -> Option<DatasetKind> {
        if headers.is_empty() {
            return None;
        }
        let concat = headers.join(" ");
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(headers, &concat))
            .map(|rule| rule.kind)
    }
}

impl Default for TableClassifier {
    fn default() -> Self {
        Self::with_rules(vec![
            ClassifierRule::new(
                DatasetKind::Milestones,
                HeaderPredicate::header_contains("milestone"),
            ),
            ClassifierRule::new(
                DatasetKind::Deliverables,
                HeaderPredicate::header_contains("deliverable"),
            ),
            ClassifierRule::new(
                DatasetKind::OpenItems,
                HeaderPredicate::concat_contains_all(&["task", "owner"]),
            ),
            ClassifierRule::new(
                DatasetKind::Rollout,
                HeaderPredicate::header_contains_any(&["rollout", "phase"]),
            ),
            ClassifierRule::new(
                DatasetKind::Objectives,
                HeaderPredicate::header_contains("objective"),
            ),
            ClassifierRule::new(
                DatasetKind::ProjectDates,
                HeaderPredicate::concat_contains_all(&["start date", "end date"]),
            ),
        ])
    }
}

/// NFKC-normalize, lower-case, trim, and collapse inner whitespace.
pub fn normalize_header(text: &str) -> String {
    let normalized: String = text.nfkc().collect();
    normalized
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
