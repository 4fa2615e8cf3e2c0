//! Tree-facing value types and the lazy tree provider.
//!
//! The editor client renders the sidebar tree from these values. Nothing is
//! cached between calls: each expansion rescans the catalog, which is small
//! and static, and rebuilds its child nodes from scratch.

use serde::{Deserialize, Serialize};

use crate::hierarchy::{FilterQueryIndex, split_segments};

/// One rendered tree node: a query-path prefix plus its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterNode {
    pub label: String,
    pub tooltip: String,
    pub expandable: bool,
}

impl FilterNode {
    /// Builds a node for `label`, deriving the expand affordance from the
    /// prebuilt index so that it comes out the same on every render.
    pub fn new(
        index: &FilterQueryIndex,
        label: impl Into<String>,
        tooltip: impl Into<String>,
    ) -> Self {
        let label = label.into();
        let expandable = has_children(index, &label);
        Self {
            label,
            tooltip: tooltip.into(),
            expandable,
        }
    }
}

/// Decides whether a node with this label gets an expand affordance.
///
/// One-segment labels always expand. Two-segment labels expand only when
/// their second-level group holds more than the label's own entry.
/// Three-segment labels are always leaves.
pub fn has_children(index: &FilterQueryIndex, label: &str) -> bool {
    let (first, second, third) = split_segments(label);
    if third.is_some() {
        return false;
    }
    match second {
        Some(second) => index.group_len(first, Some(second)) > 1,
        None => true,
    }
}

/// Parameters of the `filterQueries/children` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildrenParams {
    pub label: String,
}

/// Lazy tree traversal over the prebuilt index.
#[derive(Debug, Clone, Copy)]
pub struct TreeProvider<'a> {
    index: &'a FilterQueryIndex,
}

impl<'a> TreeProvider<'a> {
    pub fn new(index: &'a FilterQueryIndex) -> Self {
        Self { index }
    }

    /// One node per distinct first-segment family, in first-seen catalog
    /// order, tooltipped with the description of the family's bare entry.
    /// Empty family keys are skipped.
    pub fn roots(&self) -> Vec<FilterNode> {
        self.index
            .groups()
            .filter(|first| !first.is_empty())
            .map(|first| {
                let bare = self
                    .index
                    .bare_doc(first)
                    .expect("family without a bare entry survived the index build");
                FilterNode::new(self.index, first, bare.description.clone())
            })
            .collect()
    }

    /// Child nodes for `label`, or `None` when the label is already a full
    /// three-segment path.
    ///
    /// Scans the whole catalog in order and keeps every query under the
    /// label's prefix, so children of a one-segment label include its
    /// three-segment descendants as well.
    pub fn children(&self, label: &str) -> Option<Vec<FilterNode>> {
        let (first, second, third) = split_segments(label);
        if third.is_some() {
            return None;
        }
        let prefix = match second {
            Some(second) => format!("{first}:{second}:"),
            None => format!("{first}:"),
        };
        Some(
            self.index
                .docs()
                .iter()
                .filter(|doc| doc.query.starts_with(&prefix))
                .map(|doc| {
                    FilterNode::new(self.index, doc.query.clone(), doc.description.clone())
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{Arbitrary, Gen, QuickCheck};

    use super::*;
    use crate::catalog::QueryDoc;
    use crate::hierarchy;

    fn doc(query: &str, description: &str) -> QueryDoc {
        QueryDoc::new(query, description)
    }

    fn example_index() -> FilterQueryIndex {
        FilterQueryIndex::build(vec![
            doc("message", "D0"),
            doc("message:text", "D1"),
            doc("message:photo", "D2"),
        ])
    }

    #[test]
    fn roots_match_the_worked_example() {
        let index = example_index();
        let provider = TreeProvider::new(&index);
        assert_eq!(
            provider.roots(),
            vec![FilterNode {
                label: "message".to_string(),
                tooltip: "D0".to_string(),
                expandable: true,
            }]
        );
    }

    #[test]
    fn children_match_the_worked_example() {
        let index = example_index();
        let provider = TreeProvider::new(&index);
        assert_eq!(
            provider.children("message").unwrap(),
            vec![
                FilterNode {
                    label: "message:text".to_string(),
                    tooltip: "D1".to_string(),
                    expandable: false,
                },
                FilterNode {
                    label: "message:photo".to_string(),
                    tooltip: "D2".to_string(),
                    expandable: false,
                },
            ]
        );
    }

    #[test]
    fn three_segment_labels_are_terminal() {
        let index = FilterQueryIndex::build(vec![
            doc("message", "D0"),
            doc("message:entities", "D1"),
            doc("message:entities:url", "D2"),
        ]);
        let provider = TreeProvider::new(&index);
        assert_eq!(provider.children("message:entities:url"), None);
        assert!(!has_children(&index, "message:entities:url"));
    }

    #[test]
    fn two_segment_label_with_descendants_expands() {
        let index = FilterQueryIndex::build(vec![
            doc("message", "D0"),
            doc("message:entities", "D1"),
            doc("message:entities:url", "D2"),
            doc("message:entities:mention", "D3"),
        ]);
        let provider = TreeProvider::new(&index);
        assert!(has_children(&index, "message:entities"));
        let grandchildren = provider.children("message:entities").unwrap();
        let labels: Vec<&str> = grandchildren.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["message:entities:url", "message:entities:mention"]);
        assert!(grandchildren.iter().all(|n| !n.expandable));
    }

    #[test]
    fn singleton_two_segment_group_is_a_leaf() {
        let index = example_index();
        assert!(!has_children(&index, "message:text"));
    }

    #[test]
    fn bare_only_family_expands_to_nothing() {
        // Families holding just the bare entry still get an expand
        // affordance; expanding them yields nothing.
        let index = FilterQueryIndex::build(vec![doc("poll", "D0")]);
        let provider = TreeProvider::new(&index);
        assert!(provider.roots()[0].expandable);
        assert_eq!(provider.children("poll").unwrap(), vec![]);
    }

    #[test]
    fn children_are_idempotent() {
        let index = hierarchy::global();
        let provider = TreeProvider::new(index);
        for root in provider.roots() {
            assert_eq!(provider.children(&root.label), provider.children(&root.label));
        }
    }

    #[test]
    fn embedded_catalog_roots_are_distinct_and_ordered() {
        let index = hierarchy::global();
        let provider = TreeProvider::new(index);
        let roots = provider.roots();
        assert_eq!(roots[0].label, "message");
        for (i, node) in roots.iter().enumerate() {
            assert!(
                !roots[..i].iter().any(|other| other.label == node.label),
                "duplicate root {}",
                node.label
            );
        }
    }

    /// A small generated catalog that respects the generator's invariants:
    /// segments are non-empty and every family carries its bare entry.
    #[derive(Debug, Clone)]
    struct ArbCatalog(Vec<QueryDoc>);

    impl Arbitrary for ArbCatalog {
        fn arbitrary(g: &mut Gen) -> Self {
            const SEGMENTS: &[&str] = &[
                "message", "edited", "post", "text", "photo", "entities", "url", "mention",
            ];
            let len = usize::arbitrary(g) % 24;
            let mut docs: Vec<QueryDoc> = Vec::new();
            for i in 0..len {
                let depth = 1 + usize::arbitrary(g) % 3;
                let query = (0..depth)
                    .map(|_| *g.choose(SEGMENTS).unwrap())
                    .collect::<Vec<_>>()
                    .join(":");
                if docs.iter().any(|d| d.query == query) {
                    continue;
                }
                docs.push(QueryDoc::new(query, format!("doc {i}")));
            }
            let firsts: Vec<String> = docs
                .iter()
                .map(|d| d.query.split(':').next().unwrap().to_string())
                .collect();
            for first in firsts {
                if !docs.iter().any(|d| d.query == first) {
                    docs.push(QueryDoc::new(first.clone(), format!("bare {first}")));
                }
            }
            ArbCatalog(docs)
        }
    }

    #[test]
    fn prop_one_root_per_family_with_bare_tooltip() {
        fn prop(catalog: ArbCatalog) -> bool {
            let docs = catalog.0;
            let mut expected: Vec<&str> = Vec::new();
            for doc in &docs {
                let first = doc.query.split(':').next().unwrap();
                if !expected.contains(&first) {
                    expected.push(first);
                }
            }
            let index = FilterQueryIndex::build(docs.clone());
            let provider = TreeProvider::new(&index);
            let roots = provider.roots();
            roots.len() == expected.len()
                && roots.iter().zip(&expected).all(|(node, first)| {
                    let bare = docs.iter().find(|d| d.query == **first).unwrap();
                    node.label == **first && node.tooltip == bare.description
                })
        }
        QuickCheck::new().quickcheck(prop as fn(ArbCatalog) -> bool);
    }

    #[test]
    fn prop_children_are_idempotent_and_ordered() {
        fn prop(catalog: ArbCatalog) -> bool {
            let index = FilterQueryIndex::build(catalog.0.clone());
            let provider = TreeProvider::new(&index);
            provider.roots().iter().all(|root| {
                let first = provider.children(&root.label);
                let second = provider.children(&root.label);
                if first != second {
                    return false;
                }
                let labels: Vec<String> = first
                    .unwrap_or_default()
                    .into_iter()
                    .map(|n| n.label)
                    .collect();
                let expected: Vec<String> = catalog
                    .0
                    .iter()
                    .filter(|d| d.query.starts_with(&format!("{}:", root.label)))
                    .map(|d| d.query.clone())
                    .collect();
                labels == expected
            })
        }
        QuickCheck::new().quickcheck(prop as fn(ArbCatalog) -> bool);
    }
}
