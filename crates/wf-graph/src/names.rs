//! Place-name index backing the search box.
//!
//! Names are compared in a normalised form: only ASCII letters and spaces
//! survive, lower-cased.  `"Top Dog"`, `"top dog!"` and `"TOP DOG"` are all
//! the same key.  The index is a `BTreeMap`, so a prefix query is a single
//! ordered range scan.

use std::collections::BTreeMap;
use std::ops::Bound;

use wf_core::{NodeId, NodeIdx};

/// A named place, as returned by full-text search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub lat:  f64,
    pub lon:  f64,
    pub name: String,
    pub id:   NodeId,
}

/// Normalise a place name or query for comparison.
pub fn clean_name(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub(crate) struct NameIndex {
    by_clean: BTreeMap<String, Vec<NodeIdx>>,
}

impl NameIndex {
    pub(crate) fn build(names: &[Option<String>]) -> Self {
        let mut by_clean: BTreeMap<String, Vec<NodeIdx>> = BTreeMap::new();
        for (i, name) in names.iter().enumerate() {
            let Some(name) = name else { continue };
            let key = clean_name(name);
            if key.trim().is_empty() {
                continue;
            }
            by_clean.entry(key).or_default().push(NodeIdx(i as u32));
        }
        Self { by_clean }
    }

    pub(crate) fn by_prefix(&self, prefix: &str, names: &[Option<String>]) -> Vec<String> {
        let prefix = clean_name(prefix);
        if prefix.trim().is_empty() {
            return Vec::new();
        }
        let mut out: Vec<String> = Vec::new();
        for (_, nodes) in self
            .by_clean
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(&prefix))
        {
            for n in nodes {
                if let Some(name) = &names[n.index()] {
                    if !out.contains(name) {
                        out.push(name.clone());
                    }
                }
            }
        }
        out
    }

    pub(crate) fn exact(&self, name: &str) -> &[NodeIdx] {
        self.by_clean
            .get(&clean_name(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
