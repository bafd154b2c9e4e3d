// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pass topology snapshot derived from the flat store.
//!
//! The chart never materializes an adjacency structure: parent/child/level
//! relationships are functions of the payloads' id and parent-id fields. A
//! [`Topology`] is built once at the start of a layout or geometry pass so
//! the pass itself does not rescan the store per query, and is discarded
//! afterwards. Building it is also where parent-reference cycles are caught.

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::types::{ChartError, ChartItem, Node};

/// Index-based snapshot of the store's derived relationships.
///
/// All fields are parallel to the store: entry `i` describes `nodes[i]`.
/// Duplicate ids resolve first-match in store order, matching the on-demand
/// accessors.
#[derive(Debug)]
pub(crate) struct Topology {
    /// Resolved parent index, `None` for roots (no parent id, or dangling).
    pub(crate) parent: Vec<Option<usize>>,
    /// Child indices in store order.
    pub(crate) children: Vec<SmallVec<[usize; 4]>>,
    /// 1-based depth; roots are level 1.
    pub(crate) levels: Vec<u32>,
    /// Indices of all level-1 nodes, in store order.
    pub(crate) roots: Vec<usize>,
}

impl Topology {
    /// Derive the snapshot, failing on any parent-reference cycle.
    pub(crate) fn build<T: ChartItem>(nodes: &[Node<T>]) -> Result<Self, ChartError> {
        let len = nodes.len();

        let mut by_id: HashMap<T::Id, usize> = HashMap::with_capacity(len);
        for (i, node) in nodes.iter().enumerate() {
            if let Some(id) = node.item().id() {
                // First match wins for duplicate ids.
                by_id.entry(id).or_insert(i);
            }
        }

        let parent: Vec<Option<usize>> = nodes
            .iter()
            .map(|node| {
                node.item()
                    .parent_id()
                    .and_then(|p| by_id.get(&p).copied())
            })
            .collect();

        // Levels via upward walks, sharing already-computed prefixes. The
        // walk path doubles as the visited set for cycle detection.
        let mut levels = alloc::vec![0_u32; len];
        for start in 0..len {
            if levels[start] != 0 {
                continue;
            }
            let mut path: Vec<usize> = Vec::new();
            let mut at = start;
            let base = loop {
                if levels[at] != 0 {
                    break levels[at];
                }
                if path.contains(&at) {
                    return Err(ChartError::cycle(nodes[at].item().id().as_ref()));
                }
                path.push(at);
                match parent[at] {
                    Some(p) => at = p,
                    None => break 0,
                }
            };
            let mut level = base;
            for &i in path.iter().rev() {
                level += 1;
                levels[i] = level;
            }
        }

        let mut children: Vec<SmallVec<[usize; 4]>> = alloc::vec![SmallVec::new(); len];
        for (i, &p) in parent.iter().enumerate() {
            if let Some(p) = p {
                children[p].push(i);
            }
        }

        let roots = (0..len).filter(|&i| levels[i] == 1).collect();

        Ok(Self {
            parent,
            children,
            levels,
            roots,
        })
    }

    /// Whether any ancestor of `index` collapses its descendants.
    ///
    /// The parent chain is acyclic by construction (building the snapshot
    /// rejects cycles), so the walk terminates.
    pub(crate) fn ancestor_hidden<T>(&self, nodes: &[Node<T>], index: usize) -> bool {
        let mut at = self.parent[index];
        while let Some(p) = at {
            if nodes[p].hide_nodes() {
                return true;
            }
            at = self.parent[p];
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::Topology;
    use crate::types::{ChartError, ChartItem, Node};

    #[derive(Clone, Debug)]
    struct Item {
        id: Option<&'static str>,
        to: Option<&'static str>,
    }

    impl ChartItem for Item {
        type Id = &'static str;

        fn id(&self) -> Option<&'static str> {
            self.id
        }

        fn parent_id(&self) -> Option<&'static str> {
            self.to
        }
    }

    fn nodes(items: &[(&'static str, Option<&'static str>)]) -> Vec<Node<Item>> {
        items
            .iter()
            .map(|&(id, to)| Node::new(Item { id: Some(id), to }))
            .collect()
    }

    #[test]
    fn levels_roots_and_children() {
        // Forest: a -> (b -> d, c), plus a second one-node tree e.
        let store = nodes(&[
            ("a", None),
            ("b", Some("a")),
            ("c", Some("a")),
            ("d", Some("b")),
            ("e", None),
        ]);
        let topo = Topology::build(&store).unwrap();

        assert_eq!(topo.levels, alloc::vec![1, 2, 2, 3, 1]);
        assert_eq!(topo.roots, alloc::vec![0, 4]);
        // Children are reported in store order.
        assert_eq!(topo.children[0].as_slice(), &[1, 2]);
        assert_eq!(topo.children[1].as_slice(), &[3]);
        assert!(topo.children[3].is_empty());
        assert_eq!(topo.parent[3], Some(1));
        assert_eq!(topo.parent[0], None);
    }

    #[test]
    fn dangling_parent_reference_is_a_root() {
        let store = nodes(&[("a", Some("missing")), ("b", Some("a"))]);
        let topo = Topology::build(&store).unwrap();
        assert_eq!(topo.levels, alloc::vec![1, 2]);
        assert_eq!(topo.roots, alloc::vec![0]);
    }

    #[test]
    fn duplicate_ids_resolve_first_match() {
        // Two nodes claim id "x"; the child attaches to the first.
        let store = nodes(&[("x", None), ("x", None), ("c", Some("x"))]);
        let topo = Topology::build(&store).unwrap();
        assert_eq!(topo.children[0].as_slice(), &[2]);
        assert!(topo.children[1].is_empty());
    }

    #[test]
    fn cycle_is_detected_not_looped_on() {
        let store = nodes(&[("a", Some("b")), ("b", Some("a")), ("ok", None)]);
        let err = Topology::build(&store).unwrap_err();
        assert!(matches!(err, ChartError::CyclicReference { .. }));

        // Self-reference is the degenerate cycle.
        let store = nodes(&[("a", Some("a"))]);
        let err = Topology::build(&store).unwrap_err();
        assert!(matches!(err, ChartError::CyclicReference { .. }));
    }

    #[test]
    fn ancestor_hidden_walks_the_chain() {
        let mut store = nodes(&[("a", None), ("b", Some("a")), ("c", Some("b"))]);
        let topo = Topology::build(&store).unwrap();
        assert!(!topo.ancestor_hidden(&store, 2));

        store[0].set_hide_nodes(true);
        let topo = Topology::build(&store).unwrap();
        assert!(topo.ancestor_hidden(&store, 1));
        assert!(topo.ancestor_hidden(&store, 2));
        // The collapsing node itself stays visible.
        assert!(!topo.ancestor_hidden(&store, 0));
    }

    #[test]
    fn string_ids_work_through_the_hash_map() {
        #[derive(Clone, Debug)]
        struct Owned {
            id: String,
            to: Option<String>,
        }

        impl ChartItem for Owned {
            type Id = String;

            fn id(&self) -> Option<String> {
                Some(self.id.clone())
            }

            fn parent_id(&self) -> Option<String> {
                self.to.clone()
            }
        }

        let store = alloc::vec![
            Node::new(Owned {
                id: "1".to_string(),
                to: None,
            }),
            Node::new(Owned {
                id: "2".to_string(),
                to: Some("1".to_string()),
            }),
        ];
        let topo = Topology::build(&store).unwrap();
        assert_eq!(topo.levels, alloc::vec![1, 2]);
    }
}
