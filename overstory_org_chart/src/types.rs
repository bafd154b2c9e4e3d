// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the org chart: payload capabilities, node wrappers,
//! configuration, the host interface, and errors.

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use kurbo::{Point, Size};

/// Capability interface the chart requires of every payload.
///
/// Identity and parent linkage are *derived* from the payload on every query
/// rather than stored in the chart, so the chart can never disagree with the
/// host's data. Both accessors are called frequently (once or more per node
/// per layout pass) and must be cheap, side-effect free, and stable for a
/// given payload.
///
/// A payload with no id cannot be referenced as a parent and never has
/// children; a parent id that matches no stored payload makes the node a
/// root (a dangling reference is not an error).
pub trait ChartItem {
    /// Identifier type. Uniqueness across the chart is the caller's
    /// responsibility; duplicate ids resolve to the first match in store
    /// order.
    type Id: Clone + Eq + Hash + fmt::Debug;

    /// The payload's own identifier, if it has one.
    fn id(&self) -> Option<Self::Id>;

    /// The identifier of the payload's parent, or `None` for a root.
    fn parent_id(&self) -> Option<Self::Id>;
}

/// A [`ChartItem`] whose parent reference can be rewritten.
///
/// Required by [`OrgChart::remove_item`](crate::OrgChart::remove_item): the
/// unlink and connect-to-parent policies splice children out of the removed
/// node's chain by mutating payload state the chart does not own.
pub trait ChartItemMut: ChartItem {
    /// Reassign the payload's parent reference.
    fn set_parent_id(&mut self, parent: Option<Self::Id>);
}

/// A stored node: one payload plus the chart-owned geometry for it.
///
/// Nodes are created by [`OrgChart::set_items`](crate::OrgChart::set_items)
/// and [`OrgChart::add_item`](crate::OrgChart::add_item), destroyed by
/// [`OrgChart::remove_item`](crate::OrgChart::remove_item), and never aliased
/// outside the chart's store.
#[derive(Clone, Debug)]
pub struct Node<T> {
    item: T,
    position: Point,
    hide_nodes: bool,
}

impl<T> Node<T> {
    pub(crate) fn new(item: T) -> Self {
        Self {
            item,
            position: Point::ZERO,
            hide_nodes: false,
        }
    }

    /// The wrapped payload.
    #[must_use]
    pub fn item(&self) -> &T {
        &self.item
    }

    pub(crate) fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    /// Layout-space position of the node's top-left corner, as of the last
    /// layout pass.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Whether this node's descendants are collapsed.
    ///
    /// Collapsed descendants stay in the store but are excluded from layout,
    /// bounding-size, and overlap computation.
    #[must_use]
    pub fn hide_nodes(&self) -> bool {
        self.hide_nodes
    }

    pub(crate) fn set_hide_nodes(&mut self, hidden: bool) {
        self.hide_nodes = hidden;
    }
}

/// Direction in which levels stack.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Orientation {
    /// Roots at the top, deeper levels below; siblings spread horizontally.
    TopToBottom,
    /// Roots at the left, deeper levels to the right; siblings spread
    /// vertically.
    LeftToRight,
}

impl Orientation {
    /// Box extent along the primary (depth) axis.
    pub(crate) fn primary_extent(self, box_size: Size) -> f64 {
        match self {
            Self::TopToBottom => box_size.height,
            Self::LeftToRight => box_size.width,
        }
    }

    /// Box extent along the cross (spread) axis.
    pub(crate) fn cross_extent(self, box_size: Size) -> f64 {
        match self {
            Self::TopToBottom => box_size.width,
            Self::LeftToRight => box_size.height,
        }
    }

    /// Assemble a position from primary- and cross-axis coordinates.
    pub(crate) fn point(self, primary: f64, cross: f64) -> Point {
        match self {
            Self::TopToBottom => Point::new(cross, primary),
            Self::LeftToRight => Point::new(primary, cross),
        }
    }

    /// The cross-axis coordinate of a position.
    pub(crate) fn cross_of(self, point: Point) -> f64 {
        match self {
            Self::TopToBottom => point.x,
            Self::LeftToRight => point.y,
        }
    }
}

/// Geometry and orientation parameters for a chart.
///
/// All nodes share one `box_size`. `spacing` separates siblings within a
/// pair along the cross axis; `run_spacing` separates levels along the
/// primary axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartConfig {
    /// Uniform size of every node's bounding box.
    pub box_size: Size,
    /// Gap between sibling boxes along the cross axis.
    pub spacing: f64,
    /// Gap between levels along the primary axis.
    pub run_spacing: f64,
    /// Which way levels stack.
    pub orientation: Orientation,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            box_size: Size::new(200.0, 100.0),
            spacing: 20.0,
            run_spacing: 50.0,
            orientation: Orientation::TopToBottom,
        }
    }
}

/// What happens to the direct children of a removed node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RemovePolicy {
    /// Children keep their payloads but their parent references are set to
    /// `None`; each becomes a root.
    Unlink,
    /// Children are spliced onto the removed node's own parent.
    ConnectToParent,
    /// Children and all of their transitive descendants are removed from the
    /// store along with the target.
    RemoveDescendants,
}

/// Effects the chart raises toward its host.
///
/// The chart is synchronous and fire-and-forget: it invokes these methods on
/// the caller's thread and does not track whatever repaint scheduling or
/// centering animation the host starts in response. `()` implements this
/// trait as a no-op host for headless use.
pub trait ChartHost {
    /// Node positions changed; the host decides how and when to re-render.
    fn apply_state(&mut self);

    /// Re-center the viewport on the chart as a whole.
    fn center_chart(&mut self);

    /// Center the viewport on a specific point (a node's box center).
    fn center_on(&mut self, target: Point);
}

impl ChartHost for () {
    fn apply_state(&mut self) {}

    fn center_chart(&mut self) {}

    fn center_on(&mut self, _target: Point) {}
}

/// Errors surfaced by chart operations.
///
/// Lookup failures are caller contract violations and leave the store
/// untouched. Cyclic parent references are detected (never looped on) and
/// abort the operation before any position is written.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// No stored payload resolves to the requested id.
    #[error("no node with id {id} in the chart")]
    NodeNotFound {
        /// The offending id, rendered with `Debug`.
        id: String,
    },
    /// Walking parent references revisited a node.
    #[error("parent references form a cycle through id {id}")]
    CyclicReference {
        /// An id on the cycle, rendered with `Debug`.
        id: String,
    },
}

impl ChartError {
    pub(crate) fn not_found<I: fmt::Debug>(id: &I) -> Self {
        Self::NodeNotFound {
            id: format!("{id:?}"),
        }
    }

    pub(crate) fn cycle<I: fmt::Debug>(id: Option<&I>) -> Self {
        Self::CyclicReference {
            id: match id {
                Some(id) => format!("{id:?}"),
                None => String::from("<unidentified>"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_values() {
        let config = ChartConfig::default();
        assert_eq!(config.box_size, Size::new(200.0, 100.0));
        assert_eq!(config.spacing, 20.0);
        assert_eq!(config.run_spacing, 50.0);
        assert_eq!(config.orientation, Orientation::TopToBottom);
    }

    #[test]
    fn orientation_axis_mapping() {
        let size = Size::new(200.0, 100.0);

        // Top-to-bottom: levels stack along y, siblings spread along x.
        assert_eq!(Orientation::TopToBottom.primary_extent(size), 100.0);
        assert_eq!(Orientation::TopToBottom.cross_extent(size), 200.0);
        assert_eq!(
            Orientation::TopToBottom.point(10.0, 3.0),
            Point::new(3.0, 10.0)
        );
        assert_eq!(
            Orientation::TopToBottom.cross_of(Point::new(3.0, 10.0)),
            3.0
        );

        // Left-to-right is the transpose.
        assert_eq!(Orientation::LeftToRight.primary_extent(size), 200.0);
        assert_eq!(Orientation::LeftToRight.cross_extent(size), 100.0);
        assert_eq!(
            Orientation::LeftToRight.point(10.0, 3.0),
            Point::new(10.0, 3.0)
        );
        assert_eq!(
            Orientation::LeftToRight.cross_of(Point::new(10.0, 3.0)),
            3.0
        );
    }

    #[test]
    fn error_rendering_uses_debug_ids() {
        let err = ChartError::not_found(&"boss");
        assert_eq!(
            err,
            ChartError::NodeNotFound {
                id: alloc::string::String::from("\"boss\""),
            }
        );
        let err = ChartError::cycle::<&str>(None);
        assert_eq!(
            err,
            ChartError::CyclicReference {
                id: alloc::string::String::from("<unidentified>"),
            }
        );
    }
}
