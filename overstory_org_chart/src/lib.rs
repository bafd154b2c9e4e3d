// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_org_chart --heading-base-level=0

//! Overstory Org Chart: a renderer-agnostic 2D tree layout engine.
//!
//! This crate lays out a forest of uniformly sized boxes from a flat list of
//! host payloads. It owns no rendering and no node data of its own: identity
//! and parent linkage are derived from each payload through the [`ChartItem`]
//! capability trait, and visual effects are raised through the [`ChartHost`]
//! trait as plain synchronous calls.
//!
//! The core concepts are:
//!
//! - [`ChartItem`] (and [`ChartItemMut`]): the capability interface payloads
//!   implement so the chart can derive ids and parent references on demand.
//! - [`OrgChart`]: the controller owning the node store, the layout pass, and
//!   all mutations (replace, append, remove with a [`RemovePolicy`], reorder,
//!   collapse, reparent-by-payload-edit).
//! - [`ChartConfig`] and [`Orientation`]: uniform box size, sibling and level
//!   spacing, and whether levels stack top-to-bottom or left-to-right.
//! - [`Node`]: one stored payload plus its chart-owned position and collapse
//!   flag.
//! - Geometry queries: [`OrgChart::bounding_size`] for the visible extent and
//!   [`OrgChart::overlapping`] for nearest-first drop-target hit testing.
//!
//! Levels stack along the orientation's primary axis at a fixed pitch, and
//! sibling subtrees pack along the cross axis. Groups in which every child is
//! a leaf (childless or collapsed) fill a compact two-column zig-zag; all
//! other groups lay out recursively with each subtree advancing the running
//! cross offset, so visible boxes never overlap.
//!
//! # Example
//!
//! ```rust
//! use overstory_org_chart::{ChartConfig, ChartItem, OrgChart};
//!
//! #[derive(Clone)]
//! struct Employee {
//!     id: u32,
//!     manager: Option<u32>,
//! }
//!
//! impl ChartItem for Employee {
//!     type Id = u32;
//!
//!     fn id(&self) -> Option<u32> {
//!         Some(self.id)
//!     }
//!
//!     fn parent_id(&self) -> Option<u32> {
//!         self.manager
//!     }
//! }
//!
//! let mut chart = OrgChart::new(ChartConfig::default());
//! chart
//!     .set_items(
//!         vec![
//!             Employee { id: 1, manager: None },
//!             Employee { id: 2, manager: Some(1) },
//!             Employee { id: 3, manager: Some(1) },
//!         ],
//!         &mut (),
//!     )
//!     .unwrap();
//!
//! // Positions are ready; the default orientation stacks levels downward.
//! let root = chart.get_node(&1).unwrap();
//! let child = chart.get_node(&2).unwrap();
//! assert!(child.position().y > root.position().y);
//! assert_eq!(chart.level(&3).unwrap(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod chart;
mod layout;
mod topology;
mod types;

pub use chart::OrgChart;
pub use types::{
    ChartConfig, ChartError, ChartHost, ChartItem, ChartItemMut, Node, Orientation, RemovePolicy,
};
