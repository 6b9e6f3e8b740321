use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data::record::{Dataset, Record};

/// Case-insensitive substring set marking total/summary rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExclusionPattern {
    needles: Vec<String>,
}

impl From<Vec<String>> for ExclusionPattern {
    fn from(needles: Vec<String>) -> Self {
        Self::new(needles)
    }
}

impl From<ExclusionPattern> for Vec<String> {
    fn from(p: ExclusionPattern) -> Self {
        p.needles
    }
}

impl Default for ExclusionPattern {
    fn default() -> Self {
        Self::new(["总计", "Total"])
    }
}

impl ExclusionPattern {
    /// Build a pattern from literal substrings. Empty needles are ignored.
    pub fn new<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            needles: needles
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// A pattern that never matches.
    pub fn none() -> Self {
        Self {
            needles: Vec::new(),
        }
    }

    /// Return `true` when `entity` contains any needle, ignoring case.
    pub fn matches(&self, entity: &str) -> bool {
        if self.needles.is_empty() {
            return false;
        }
        let hay = entity.to_lowercase();
        self.needles.iter().any(|n| hay.contains(n.as_str()))
    }
}

/// Drop records with a null entity and records whose entity matches `exclude`.
pub fn filter_records(dataset: &Dataset, exclude: &ExclusionPattern) -> Dataset {
    dataset
        .records()
        .iter()
        .filter(|r| match r.entity.as_deref() {
            None => false,
            Some(e) => !exclude.matches(e),
        })
        .cloned()
        .collect()
}

/// Distinct non-null entity identifiers in first-occurrence order.
pub fn distinct_entities(dataset: &Dataset) -> Vec<String> {
    let mut seen = IndexMap::<&str, ()>::new();
    for r in dataset.records() {
        if let Some(e) = r.entity.as_deref() {
            seen.entry(e).or_insert(());
        }
    }
    seen.keys().map(|s| (*s).to_string()).collect()
}

/// Partition non-null records by entity, keyed in first-occurrence order.
pub fn group_by_entity(dataset: &Dataset) -> IndexMap<String, Vec<Record>> {
    let mut out = IndexMap::<String, Vec<Record>>::new();
    for r in dataset.records() {
        if let Some(e) = r.entity.as_deref() {
            out.entry(e.to_string()).or_default().push(r.clone());
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/data/filter.rs"]
mod tests;
