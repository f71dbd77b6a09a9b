//! Inventory analysis.
//!
//! - [`collisions`] - identical prefixes claimed more than once
//! - [`overlap`] - intersecting ranges across VNets
//! - [`peering_graph`] - deduplicated undirected peering edges
//! - [`report`] - runs the above and feeds the sinks

mod collisions;
mod overlap;
mod peering_graph;
mod report;

pub use collisions::{detect_collisions, group_collisions};
pub use overlap::{find_containment_overlaps, ContainmentOverlap, OverlapReport};
pub use peering_graph::{
    build_graph, palette_color, self_loops, GraphOptions, PeeringGraph, PALETTE, UNKNOWN_CIDR,
};
pub use report::{assemble_report, publish_report, PublishOptions, Report};
