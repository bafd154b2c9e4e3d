// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Laying out and mutating a small org chart from the command line.
//!
//! This example shows how to:
//! - implement `ChartItem`/`ChartItemMut` for a host payload,
//! - implement `ChartHost` to observe layout and centering effects,
//! - run geometry queries (`bounding_size`, `overlapping`) and removals.
//!
//! Run:
//! - `cargo run -p overstory_demos --example basic_org_chart`

use kurbo::Point;
use overstory_org_chart::{
    ChartConfig, ChartHost, ChartItem, ChartItemMut, Orientation, OrgChart, RemovePolicy,
};

/// Host-side record: the chart derives identity and linkage from these fields.
#[derive(Clone, Debug)]
struct Employee {
    id: String,
    name: &'static str,
    manager: Option<String>,
}

impl ChartItem for Employee {
    type Id = String;

    fn id(&self) -> Option<String> {
        Some(self.id.clone())
    }

    fn parent_id(&self) -> Option<String> {
        self.manager.clone()
    }
}

impl ChartItemMut for Employee {
    fn set_parent_id(&mut self, parent: Option<String>) {
        self.manager = parent;
    }
}

/// A host that just logs the effects the chart raises.
#[derive(Debug, Default)]
struct Console;

impl ChartHost for Console {
    fn apply_state(&mut self) {
        println!("(host) positions changed, repaint scheduled");
    }

    fn center_chart(&mut self) {
        println!("(host) centering viewport on the whole chart");
    }

    fn center_on(&mut self, target: Point) {
        println!("(host) centering viewport on {target:?}");
    }
}

fn employee(id: &str, name: &'static str, manager: Option<&str>) -> Employee {
    Employee {
        id: id.to_string(),
        name,
        manager: manager.map(str::to_string),
    }
}

fn print_chart(chart: &OrgChart<Employee>) {
    for node in chart.nodes() {
        let level = chart.level(&node.item().id).unwrap();
        println!(
            "  level {level} {:>10} at ({:>5}, {:>5})",
            node.item().name,
            node.position().x,
            node.position().y,
        );
    }
    println!("  bounding size: {:?}", chart.bounding_size().unwrap());
}

fn main() {
    let mut host = Console;
    let mut chart = OrgChart::new(ChartConfig {
        orientation: Orientation::LeftToRight,
        ..ChartConfig::default()
    });

    chart
        .set_items(
            vec![
                employee("1", "Dana", None),
                employee("2", "Omar", Some("1")),
                employee("3", "Ling", Some("1")),
                employee("4", "Petra", Some("1")),
                employee("5", "Sam", Some("2")),
            ],
            &mut host,
        )
        .unwrap();
    println!("initial layout:");
    print_chart(&chart);

    // Hire someone under Ling, with a synthesized id.
    let id = chart.unique_node_id();
    chart
        .add_item(employee(&id, "Noor", Some("3")), &mut host)
        .unwrap();
    println!("after hiring Noor:");
    print_chart(&chart);

    // Omar leaves; his report moves up to Dana.
    chart
        .remove_item(&"2".to_string(), RemovePolicy::ConnectToParent, &mut host)
        .unwrap();
    println!("after Omar leaves (reports connect to Dana):");
    print_chart(&chart);

    // Which boxes would a drag of Sam's box currently overlap?
    let hits = chart.overlapping(&"5".to_string()).unwrap();
    println!(
        "drop targets near Sam: {:?}",
        hits.iter().map(|n| n.item().name).collect::<Vec<_>>()
    );

    chart.center_node(&"4".to_string(), &mut host).unwrap();
}
