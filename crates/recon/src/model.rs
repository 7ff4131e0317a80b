use std::collections::{BTreeMap, BTreeSet};

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::matcher::try_parse_number;

// ---------------------------------------------------------------------------
// Answer key
// ---------------------------------------------------------------------------

/// Accepted answers for one key item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Acceptance {
    /// Stringified accepted values, empty strings removed.
    pub values: BTreeSet<String>,
    /// Lowercased accepted labels, empty strings removed.
    pub labels: BTreeSet<String>,
    /// Numeric view of `values`; entries that do not parse (or are NaN) are absent.
    numbers: BTreeSet<OrderedFloat<f64>>,
}

impl Acceptance {
    pub fn new(values: BTreeSet<String>, labels: BTreeSet<String>) -> Self {
        let numbers = values
            .iter()
            .filter_map(|v| try_parse_number(v))
            .filter(|n| !n.is_nan())
            .map(OrderedFloat)
            .collect();
        Self { values, labels, numbers }
    }

    pub fn accepts_number(&self, n: f64) -> bool {
        !n.is_nan() && self.numbers.contains(&OrderedFloat(n))
    }

    pub fn accepts_label(&self, lowered: &str) -> bool {
        self.labels.contains(lowered)
    }
}

/// Key item identifier → accepted answers, for one scale.
#[derive(Debug, Clone, Default)]
pub struct AnswerKey {
    entries: BTreeMap<String, Acceptance>,
}

impl AnswerKey {
    /// Insert an item; returns the acceptance it replaced, if any.
    pub fn insert(&mut self, item: String, acceptance: Acceptance) -> Option<Acceptance> {
        self.entries.insert(item, acceptance)
    }

    pub fn get(&self, item: &str) -> Option<&Acceptance> {
        self.entries.get(item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// One scored row from the response table. Values stay raw strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRow {
    /// 1-based line number in the source CSV (header is line 1).
    pub line: usize,
    pub item: String,
    pub response: String,
    pub correct: String,
    pub incorrect: String,
    /// Every other column, by header name.
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradedStatus {
    Correct,
    Incorrect,
    NotApplicable,
}

impl std::fmt::Display for GradedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::Incorrect => write!(f, "incorrect"),
            Self::NotApplicable => write!(f, "NA"),
        }
    }
}

// ---------------------------------------------------------------------------
// Discrepancies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyReason {
    CountedCorrectNotInKey,
    CountedIncorrectMatchesKey,
}

impl std::fmt::Display for DiscrepancyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CountedCorrectNotInKey => write!(f, "counted correct but not in key"),
            Self::CountedIncorrectMatchesKey => write!(f, "counted incorrect but matches key"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discrepancy {
    pub item: String,
    /// Trimmed response text.
    pub response: String,
    pub reason: DiscrepancyReason,
}

// ---------------------------------------------------------------------------
// Per-item tallies + Summary + Output
// ---------------------------------------------------------------------------

/// Which raw responses for one grouped item were counted correct / incorrect.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemTally {
    pub item: String,
    /// Derived answer-key identifier; `None` when the item code lacks the prefix.
    pub key_item: Option<String>,
    /// Whether the answer key had an entry for `key_item`.
    pub keyed: bool,
    pub correct: BTreeMap<String, usize>,
    pub incorrect: BTreeMap<String, usize>,
    pub not_applicable: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckSummary {
    pub rows_checked: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub not_applicable: usize,
    pub discrepancies: usize,
    /// Grouped items checked against an empty acceptance set.
    pub unkeyed_items: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub scale: String,
    pub summary: CheckSummary,
    pub discrepancies: Vec<Discrepancy>,
    pub items: Vec<ItemTally>,
}
