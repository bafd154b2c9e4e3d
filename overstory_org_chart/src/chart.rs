// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart controller: store ownership, derived topology queries,
//! mutations, and geometry queries.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashSet;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size};

use crate::layout;
use crate::topology::Topology;
use crate::types::{
    ChartConfig, ChartError, ChartHost, ChartItem, ChartItemMut, Node, Orientation, RemovePolicy,
};

/// Layout engine and mutation controller for a forest of org-chart nodes.
///
/// The chart exclusively owns its node store (a flat `Vec` in insertion
/// order) and derives all parent/child/level relationships from the payloads
/// on demand via [`ChartItem`]. Mutating operations re-run the layout pass
/// and signal the supplied [`ChartHost`]; read-only queries never touch
/// positions.
///
/// Store order is preserved by insertion and only affects zig-zag pairing
/// and column choice among leaf siblings; it carries no other meaning.
///
/// The controller is single-threaded and synchronous. Exactly one logical
/// owner is expected to mutate it at a time, which the borrow checker
/// enforces for free.
#[derive(Debug)]
pub struct OrgChart<T: ChartItem> {
    nodes: Vec<Node<T>>,
    config: ChartConfig,
}

impl<T: ChartItem> OrgChart<T> {
    /// Create an empty chart with the given configuration.
    #[must_use]
    pub fn new(config: ChartConfig) -> Self {
        Self {
            nodes: Vec::new(),
            config,
        }
    }

    /// The chart's configuration.
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    ///
    /// Geometry changes take effect on the next [`OrgChart::layout`] call;
    /// the chart does not re-lay out eagerly here.
    pub fn config_mut(&mut self) -> &mut ChartConfig {
        &mut self.config
    }

    /// Flip the orientation and re-lay out (centered).
    pub fn set_orientation<H: ChartHost>(
        &mut self,
        orientation: Orientation,
        host: &mut H,
    ) -> Result<(), ChartError> {
        self.config.orientation = orientation;
        self.layout(host, true)
    }

    /// All stored nodes, in store order.
    #[must_use]
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// Number of stored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The first node (in store order) whose payload resolves to `id`.
    #[must_use]
    pub fn get_node(&self, id: &T::Id) -> Option<&Node<T>> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    /// Mutable access to the payload with the given id.
    ///
    /// This is how the interaction layer reparents on drag-drop: rewrite the
    /// payload's parent field, then call [`OrgChart::layout`].
    pub fn item_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.index_of(id).map(|i| self.nodes[i].item_mut())
    }

    /// All nodes whose resolved parent id equals `id`, in store order.
    #[must_use]
    pub fn get_children(&self, id: &T::Id) -> Vec<&Node<T>> {
        self.nodes
            .iter()
            .filter(|n| n.item().parent_id().as_ref() == Some(id))
            .collect()
    }

    /// The parent of the node with the given id: the first node resolving to
    /// the child's parent id, or `None` when there is no parent id or no
    /// match.
    #[must_use]
    pub fn get_parent(&self, id: &T::Id) -> Option<&Node<T>> {
        let parent_id = self.get_node(id)?.item().parent_id()?;
        self.get_node(&parent_id)
    }

    /// All level-1 nodes, in store order.
    ///
    /// A node is a root when it has no parent id or its parent id resolves
    /// to no stored node (dangling references are rootless, not an error).
    pub fn roots(&self) -> Result<Vec<&Node<T>>, ChartError> {
        let topo = Topology::build(&self.nodes)?;
        Ok(topo.roots.iter().map(|&i| &self.nodes[i]).collect())
    }

    /// 1-based depth of the node with the given id.
    ///
    /// Walks parent references upward until a missing parent id or a failed
    /// lookup; a revisited id means the parent chain is cyclic and yields
    /// [`ChartError::CyclicReference`] instead of looping.
    pub fn level(&self, id: &T::Id) -> Result<u32, ChartError> {
        let mut index = self.index_of(id).ok_or_else(|| ChartError::not_found(id))?;
        let mut visited: HashSet<T::Id> = HashSet::new();
        let mut level = 1_u32;
        loop {
            if let Some(current) = self.nodes[index].item().id()
                && !visited.insert(current.clone())
            {
                return Err(ChartError::cycle(Some(&current)));
            }
            match self.nodes[index]
                .item()
                .parent_id()
                .and_then(|p| self.index_of(&p))
            {
                Some(parent) => {
                    index = parent;
                    level += 1;
                }
                None => return Ok(level),
            }
        }
    }

    /// True iff every listed node is collapsed or childless (true for the
    /// empty list).
    ///
    /// This is the predicate the layout pass uses to pick the zig-zag
    /// branch for a sibling group.
    #[must_use]
    pub fn all_leaves(&self, nodes: &[&Node<T>]) -> bool {
        nodes.iter().all(|n| {
            n.hide_nodes()
                || match n.item().id() {
                    Some(id) => self.get_children(&id).is_empty(),
                    None => true,
                }
        })
    }

    /// Toggle collapsing of the node's descendants.
    ///
    /// Takes effect on the next layout pass; callers re-lay out when ready.
    pub fn set_hide_nodes(&mut self, id: &T::Id, hidden: bool) -> Result<(), ChartError> {
        let index = self.index_of(id).ok_or_else(|| ChartError::not_found(id))?;
        self.nodes[index].set_hide_nodes(hidden);
        Ok(())
    }

    /// Recompute every node's position and signal the host.
    ///
    /// Roots are laid out in store order at successive cross offsets; every
    /// reachable node's position is overwritten. `host.apply_state()` fires
    /// once afterwards, then `host.center_chart()` when `center` is true.
    ///
    /// Layout is a pure function of store contents, store order, and
    /// configuration, so calling this twice without an intervening mutation
    /// writes identical positions.
    pub fn layout<H: ChartHost>(&mut self, host: &mut H, center: bool) -> Result<(), ChartError> {
        let topo = Topology::build(&self.nodes)?;
        layout::compute(&mut self.nodes, &topo, &self.config);
        host.apply_state();
        if center {
            host.center_chart();
        }
        Ok(())
    }

    /// Replace the entire store with fresh node wrappers and re-lay out
    /// (centered).
    pub fn set_items<H: ChartHost>(
        &mut self,
        items: Vec<T>,
        host: &mut H,
    ) -> Result<(), ChartError> {
        self.nodes = items.into_iter().map(Node::new).collect();
        self.layout(host, true)
    }

    /// Append one payload and re-lay out (centered).
    ///
    /// No uniqueness check is applied to the derived id; synthesize fresh
    /// ids with [`OrgChart::unique_node_id`] when the host has none.
    pub fn add_item<H: ChartHost>(&mut self, item: T, host: &mut H) -> Result<(), ChartError> {
        self.nodes.push(Node::new(item));
        self.layout(host, true)
    }

    /// Move the node with the given id to a new store position.
    ///
    /// `None` appends; an out-of-range index clamps to the end. This changes
    /// zig-zag pairing among leaf siblings but deliberately does **not**
    /// re-lay out; positions update on the next layout pass.
    pub fn change_node_index(
        &mut self,
        id: &T::Id,
        index: Option<usize>,
    ) -> Result<(), ChartError> {
        let from = self.index_of(id).ok_or_else(|| ChartError::not_found(id))?;
        let node = self.nodes.remove(from);
        match index {
            Some(to) => {
                let to = to.min(self.nodes.len());
                self.nodes.insert(to, node);
            }
            None => self.nodes.push(node),
        }
        Ok(())
    }

    /// Smallest `(width, height)` fully containing every visible node.
    ///
    /// Walks each root subtree (skipping the descendants of collapsed
    /// nodes), takes the maximum position seen, and adds one box size for
    /// the extent past the top-left anchor. An empty chart reports a single
    /// box.
    pub fn bounding_size(&self) -> Result<Size, ChartError> {
        let topo = Topology::build(&self.nodes)?;
        let mut max_x = 0.0_f64;
        let mut max_y = 0.0_f64;
        let mut stack: Vec<usize> = topo.roots.clone();
        while let Some(index) = stack.pop() {
            let position = self.nodes[index].position();
            max_x = max_x.max(position.x);
            max_y = max_y.max(position.y);
            if !self.nodes[index].hide_nodes() {
                stack.extend(topo.children[index].iter().copied());
            }
        }
        Ok(Size::new(
            max_x + self.config.box_size.width,
            max_y + self.config.box_size.height,
        ))
    }

    /// Visible nodes whose boxes overlap the box of the node with the given
    /// id, nearest first.
    ///
    /// A node overlaps when its position differs by less than the box width
    /// on `x` *and* less than the box height on `y`. The target itself (and
    /// anything sharing its id), plus nodes behind a collapsed ancestor, are
    /// excluded. Results are sorted ascending by squared distance, so the
    /// consuming UI can take the front of the list as the drop target.
    pub fn overlapping(&self, id: &T::Id) -> Result<Vec<&Node<T>>, ChartError> {
        let topo = Topology::build(&self.nodes)?;
        let target = self.index_of(id).ok_or_else(|| ChartError::not_found(id))?;
        let origin = self.nodes[target].position();
        let width = self.config.box_size.width;
        let height = self.config.box_size.height;

        let mut hits: Vec<(f64, &Node<T>)> = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            if node.item().id().as_ref() == Some(id) {
                continue;
            }
            if topo.ancestor_hidden(&self.nodes, index) {
                continue;
            }
            let dx = node.position().x - origin.x;
            let dy = node.position().y - origin.y;
            if dx.abs() < width && dy.abs() < height {
                hits.push((dx * dx + dy * dy, node));
            }
        }
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(hits.into_iter().map(|(_, node)| node).collect())
    }

    /// Ask the host to center the viewport on the node with the given id.
    ///
    /// Passes the node's box center to [`ChartHost::center_on`]. Skipped
    /// silently when any ancestor of the node is collapsed (the node is not
    /// on screen); a missing id is an error.
    pub fn center_node<H: ChartHost>(&self, id: &T::Id, host: &mut H) -> Result<(), ChartError> {
        let topo = Topology::build(&self.nodes)?;
        let index = self.index_of(id).ok_or_else(|| ChartError::not_found(id))?;
        if topo.ancestor_hidden(&self.nodes, index) {
            return Ok(());
        }
        let position = self.nodes[index].position();
        host.center_on(Point::new(
            position.x + self.config.box_size.width / 2.0,
            position.y + self.config.box_size.height / 2.0,
        ));
        Ok(())
    }

    fn index_of(&self, id: &T::Id) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.item().id().as_ref() == Some(id))
    }
}

impl<T: ChartItemMut> OrgChart<T> {
    /// Remove the node with the given id, applying `policy` to each of its
    /// current direct children, then re-lay out (centered).
    ///
    /// Fails fast with [`ChartError::NodeNotFound`] before any mutation when
    /// the id is absent. The descendant walk of
    /// [`RemovePolicy::RemoveDescendants`] is visited-set guarded, so a
    /// malformed parent cycle below the target cannot loop it.
    pub fn remove_item<H: ChartHost>(
        &mut self,
        id: &T::Id,
        policy: RemovePolicy,
        host: &mut H,
    ) -> Result<(), ChartError> {
        let target = self.index_of(id).ok_or_else(|| ChartError::not_found(id))?;
        let parent_id = self.nodes[target].item().parent_id();
        let child_indices: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.item().parent_id().as_ref() == Some(id))
            .map(|(i, _)| i)
            .collect();

        match policy {
            RemovePolicy::Unlink => {
                for &child in &child_indices {
                    self.nodes[child].item_mut().set_parent_id(None);
                }
                self.nodes.remove(target);
            }
            RemovePolicy::ConnectToParent => {
                for &child in &child_indices {
                    self.nodes[child].item_mut().set_parent_id(parent_id.clone());
                }
                self.nodes.remove(target);
            }
            RemovePolicy::RemoveDescendants => {
                let mut keep = alloc::vec![true; self.nodes.len()];
                keep[target] = false;
                let mut stack = child_indices;
                while let Some(index) = stack.pop() {
                    if !keep[index] {
                        continue;
                    }
                    keep[index] = false;
                    if let Some(child_id) = self.nodes[index].item().id() {
                        stack.extend(
                            self.nodes
                                .iter()
                                .enumerate()
                                .filter(|(_, n)| {
                                    n.item().parent_id().as_ref() == Some(&child_id)
                                })
                                .map(|(i, _)| i),
                        );
                    }
                }
                let mut at = 0;
                self.nodes.retain(|_| {
                    let kept = keep[at];
                    at += 1;
                    kept
                });
            }
        }

        self.layout(host, true)
    }
}

impl<T: ChartItem<Id = String>> OrgChart<T> {
    /// Synthesize a fresh id: the smallest non-negative integer, rendered as
    /// a string, that no stored payload currently uses.
    ///
    /// Non-numeric ids are ignored by the scan, so mixed id schemes still
    /// get unique numeric ids.
    #[must_use]
    pub fn unique_node_id(&self) -> String {
        let used: HashSet<u64> = self
            .nodes
            .iter()
            .filter_map(|n| n.item().id())
            .filter_map(|id| id.parse().ok())
            .collect();
        let mut candidate = 0_u64;
        while used.contains(&candidate) {
            candidate += 1;
        }
        candidate.to_string()
    }
}
