//! Comparison verdicts and path-qualified difference records.
//!
//! A [`Difference`] pairs a path (`root.friends[0].name`) with the reason the
//! two sides diverged there. Records are append-only and kept in discovery
//! order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why two values diverged at a given path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Exactly one side is absent.
    OneAbsent,
    /// The two sides have different concrete types.
    TypesDiffer { left: String, right: String },
    /// Terminal values are not equal.
    ValuesDiffer { left: String, right: String },
    /// Only one side is a collection.
    OneNotCollection,
    /// Collections have different lengths.
    CountsDiffer { left: usize, right: usize },
    /// Terminal-only collections hold different multisets.
    ItemsDiffer,
    /// An element found no structural match on the other side.
    NoMatchingItem,
    /// Recursion went past the configured limit.
    DepthLimit { max: usize },
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneAbsent => f.write_str("one is absent, the other is not"),
            Self::TypesDiffer { left, right } => write!(f, "types differ ({left} vs {right})"),
            Self::ValuesDiffer { left, right } => write!(f, "values differ ({left} vs {right})"),
            Self::OneNotCollection => f.write_str("one is a collection, the other is not"),
            Self::CountsDiffer { left, right } => {
                write!(f, "collection counts differ ({left} vs {right})")
            }
            Self::ItemsDiffer => f.write_str("collection items differ"),
            Self::NoMatchingItem => f.write_str("no matching item found"),
            Self::DepthLimit { max } => write!(f, "depth limit ({max}) reached"),
        }
    }
}

/// A single path-qualified difference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    pub path: String,
    #[serde(flatten)]
    pub kind: DifferenceKind,
}

impl Difference {
    pub fn new(path: impl Into<String>, kind: DifferenceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Returns `true` for depth-limit notes.
    pub fn is_depth_limit(&self) -> bool {
        matches!(self.kind, DifferenceKind::DepthLimit { .. })
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Result of a reporting comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareReport {
    /// The overall verdict.
    pub equal: bool,
    /// Differences in discovery order.
    pub differences: Vec<Difference>,
}

impl CompareReport {
    pub fn new(equal: bool, differences: Vec<Difference>) -> Self {
        Self { equal, differences }
    }

    pub fn is_equal(&self) -> bool {
        self.equal
    }

    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    /// Differences rendered as `<path>: <reason>` lines.
    pub fn messages(&self) -> Vec<String> {
        self.differences.iter().map(ToString::to_string).collect()
    }

    /// Returns `true` if any rendered difference contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.differences
            .iter()
            .any(|d| d.to_string().contains(needle))
    }
}

impl fmt::Display for CompareReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.equal {
            return f.write_str("Objects are equal.");
        }
        f.write_str("Objects differ:")?;
        for d in &self.differences {
            write!(f, "\n - {d}")?;
        }
        Ok(())
    }
}
