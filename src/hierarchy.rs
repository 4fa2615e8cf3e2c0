//! Two-level grouping index over the filter-query catalog.
//!
//! The index is built once, at startup, from the generated catalog and is
//! read-only afterward. The first level groups queries by their first
//! segment; the second level groups each family by its (first, second)
//! segment pair. A third segment shares the key of its two-segment prefix,
//! so grouping never looks past two segments: a family made up entirely of
//! three-segment queries still forms one second-level group, and each of
//! its members renders as a leaf.
//!
//! There is no error path here. The catalog is static and trusted; a family
//! without its bare one-segment entry is a generator bug and fails the build
//! loudly rather than surfacing at render time.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::catalog::{self, QueryDoc};

/// Splits a query path into its first three colon-delimited segments.
pub fn split_segments(query: &str) -> (&str, Option<&str>, Option<&str>) {
    let mut segments = query.splitn(3, ':');
    let first = segments.next().unwrap_or_default();
    (first, segments.next(), segments.next())
}

/// Prebuilt lookup structure the tree provider queries on demand.
///
/// Group sequences hold positions into the catalog so that every listing
/// preserves catalog order without cloning entries.
#[derive(Debug)]
pub struct FilterQueryIndex {
    docs: Vec<QueryDoc>,
    /// First-segment groups in first-seen order.
    level1: Vec<(String, Vec<usize>)>,
    level1_slots: FxHashMap<String, usize>,
    /// Per family: (second segment or `None` for the bare entry) -> members.
    level2: FxHashMap<String, FxHashMap<Option<String>, Vec<usize>>>,
}

impl FilterQueryIndex {
    /// Groups the catalog in a single pass.
    ///
    /// Panics if a non-empty family lacks its bare one-segment entry; the
    /// root node's tooltip cannot be resolved without it.
    pub fn build(docs: Vec<QueryDoc>) -> Self {
        let mut level1: Vec<(String, Vec<usize>)> = Vec::new();
        let mut level1_slots = FxHashMap::default();
        let mut level2: FxHashMap<String, FxHashMap<Option<String>, Vec<usize>>> =
            FxHashMap::default();

        for (position, doc) in docs.iter().enumerate() {
            let (first, second, _) = split_segments(&doc.query);

            let slot = *level1_slots.entry(first.to_string()).or_insert_with(|| {
                level1.push((first.to_string(), Vec::new()));
                level1.len() - 1
            });
            level1[slot].1.push(position);

            level2
                .entry(first.to_string())
                .or_default()
                .entry(second.map(String::from))
                .or_default()
                .push(position);
        }

        for (first, _) in &level1 {
            if first.is_empty() {
                continue;
            }
            assert!(
                level2[first].contains_key(&None),
                "catalog family `{first}` has no bare `{first}` entry"
            );
        }

        Self {
            docs,
            level1,
            level1_slots,
            level2,
        }
    }

    /// The full catalog, in generator order.
    pub fn docs(&self) -> &[QueryDoc] {
        &self.docs
    }

    /// Distinct first segments, in first-seen catalog order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.level1.iter().map(|(first, _)| first.as_str())
    }

    /// Size of the second-level group for the given segment pair.
    /// `None` addresses the family's bare-entry group.
    pub fn group_len(&self, first: &str, second: Option<&str>) -> usize {
        self.level2
            .get(first)
            .and_then(|groups| groups.get(&second.map(String::from)))
            .map_or(0, Vec::len)
    }

    /// The family's bare one-segment entry, first match in catalog order.
    pub fn bare_doc(&self, first: &str) -> Option<&QueryDoc> {
        self.level2
            .get(first)?
            .get(&None)?
            .first()
            .map(|&position| &self.docs[position])
    }

    /// Members of a first-segment family, in catalog order.
    pub fn family_docs(&self, first: &str) -> impl Iterator<Item = &QueryDoc> {
        self.level1_slots
            .get(first)
            .into_iter()
            .flat_map(|&slot| self.level1[slot].1.iter())
            .map(|&position| &self.docs[position])
    }
}

static GLOBAL: Lazy<FilterQueryIndex> =
    Lazy::new(|| FilterQueryIndex::build(catalog::generate()));

/// Process-wide index over the embedded catalog, built on first use and
/// kept for the process lifetime.
pub fn global() -> &'static FilterQueryIndex {
    &GLOBAL
}
