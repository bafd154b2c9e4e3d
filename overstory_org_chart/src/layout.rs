// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The recursive position solver.
//!
//! Levels stack along the orientation's primary axis; sibling subtrees pack
//! along the cross axis. Each subtree is laid out by one of two branches:
//!
//! - **All-leaves**: every child is childless or collapsed. Children fill a
//!   two-column (or two-row) zig-zag, pairs descending one primary slot at a
//!   time, and the whole block consumes a fixed two-column width no matter
//!   how many children there are.
//! - **General**: children are laid out recursively, each advancing the
//!   running cross offset by the space it reports, so sibling subtrees never
//!   overlap. The parent centers over the sum of its children's footprints.
//!
//! The footprint recursion is position-free and deliberately counts every
//! leaf at full width (no zig-zag compaction), so it is an upper bound on
//! the space a subtree actually consumes; centering and sibling advancement
//! by footprint therefore never collide.

use crate::topology::Topology;
use crate::types::{ChartConfig, ChartItem, Node};

/// Overwrite every reachable node's position.
///
/// Roots are processed in store order, each at the cumulative cross offset
/// consumed by the roots before it. Nodes on no root's subtree (impossible
/// once [`Topology::build`] has succeeded) would simply keep their previous
/// position.
pub(crate) fn compute<T: ChartItem>(nodes: &mut [Node<T>], topo: &Topology, config: &ChartConfig) {
    let mut offset = 0.0;
    for &root in &topo.roots {
        offset += layout_subtree(nodes, topo, config, root, offset);
    }
}

/// Cross-axis space a subtree claims, without writing positions.
pub(crate) fn footprint<T>(
    nodes: &[Node<T>],
    topo: &Topology,
    config: &ChartConfig,
    index: usize,
) -> f64 {
    let cross_box = config.orientation.cross_extent(config.box_size);
    if nodes[index].hide_nodes() || topo.children[index].is_empty() {
        cross_box + 2.0 * config.spacing
    } else {
        topo.children[index]
            .iter()
            .map(|&child| footprint(nodes, topo, config, child))
            .sum()
    }
}

fn is_leaf<T>(nodes: &[Node<T>], topo: &Topology, index: usize) -> bool {
    nodes[index].hide_nodes() || topo.children[index].is_empty()
}

/// Position `index` and its subtree at the given cross offset; returns the
/// cross-axis space consumed.
fn layout_subtree<T: ChartItem>(
    nodes: &mut [Node<T>],
    topo: &Topology,
    config: &ChartConfig,
    index: usize,
    offset: f64,
) -> f64 {
    let spacing = config.spacing;
    let cross_box = config.orientation.cross_extent(config.box_size);
    let slot = config.orientation.primary_extent(config.box_size) + config.run_spacing;
    let own_primary = f64::from(topo.levels[index] - 1) * slot;

    // A collapsed node is laid out as if childless.
    let children: &[usize] = if nodes[index].hide_nodes() {
        &[]
    } else {
        topo.children[index].as_slice()
    };

    if children.iter().all(|&c| is_leaf(nodes, topo, c)) {
        // Zig-zag: even indices in the near column, odd in the far one,
        // each (even, odd) pair sharing a primary slot. The last unpaired
        // child stays in the near column rather than dangling half a pair.
        for (i, &child) in children.iter().enumerate() {
            let cross = offset + spacing + (i % 2) as f64 * (cross_box + spacing);
            let primary =
                f64::from(topo.levels[child] - 1) * slot + (i / 2) as f64 * slot;
            nodes[child].set_position(config.orientation.point(primary, cross));
        }
        if children.len() > 1 {
            // Centered between the two columns.
            let cross = offset + spacing + (cross_box + spacing) / 2.0;
            nodes[index].set_position(config.orientation.point(own_primary, cross));
            2.0 * cross_box + 3.0 * spacing
        } else {
            // Zero or one child: flush, sharing the single child's column.
            nodes[index].set_position(config.orientation.point(own_primary, offset + spacing));
            cross_box + 2.0 * spacing
        }
    } else {
        let mut child_offset = offset;
        for &child in children {
            child_offset += layout_subtree(nodes, topo, config, child, child_offset);
        }
        let relative: f64 = children
            .iter()
            .map(|&child| footprint(nodes, topo, config, child))
            .sum();
        let cross = if children.len() == 1 {
            // One (deep) child: line the parent up with it exactly.
            config.orientation.cross_of(nodes[children[0]].position())
        } else {
            offset + relative / 2.0 - cross_box / 2.0 - spacing
        };
        nodes[index].set_position(config.orientation.point(own_primary, cross));
        relative
    }
}
