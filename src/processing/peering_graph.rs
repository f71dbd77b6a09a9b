//! Undirected peering graph.
//!
//! Azure reports a peering once per side that has it configured, so a healthy
//! hub/spoke pair shows up twice (hub -> spoke, spoke -> hub) and a half-built
//! one shows up once. The builder folds all of these into one undirected edge
//! per pair of endpoint labels.

use crate::error::VnetError;
use crate::models::{endpoint_label, AddressAllocation, PeeringObservation, UndirectedPeeringEdge};
use std::collections::{HashMap, HashSet};

/// CIDR shown for a VNet we have no allocation for (other tenant, no access).
pub const UNKNOWN_CIDR: &str = "Unknown";

/// Edge colors, reused in order.
pub const PALETTE: [&str; 10] = [
    "red", "blue", "green", "yellow", "purple", "orange", "brown", "pink", "gray", "cyan",
];

/// Color for the edge created `index`-th.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphOptions {
    /// Keep the peering state of the first observation on each edge.
    pub label_state: bool,
}

/// Result of [`build_graph`].
#[derive(Debug, Default)]
pub struct PeeringGraph {
    /// Edges in first-encounter order.
    pub edges: Vec<UndirectedPeeringEdge>,
    /// Observations that were left out, one entry each.
    pub diagnostics: Vec<VnetError>,
}

/// Edges peering a VNet with itself.
pub fn self_loops(
    edges: &[UndirectedPeeringEdge],
) -> impl Iterator<Item = &UndirectedPeeringEdge> {
    edges.iter().filter(|e| e.is_self_loop())
}

/// VNet name -> CIDR used in its label. First allocation per name wins, so a
/// VNet with several prefixes is labeled by the first one only. Sources that
/// have no allocation are added after that with the first prefix they
/// reported, so they get the same label when they show up as a target.
fn label_cidrs<'a>(
    allocations: &'a [AddressAllocation],
    observations: &'a [PeeringObservation],
) -> HashMap<&'a str, &'a str> {
    let mut lookup = HashMap::new();
    for a in allocations {
        lookup.entry(a.vnet_name.as_str()).or_insert(a.cidr.as_str());
    }
    for obs in observations {
        let first = obs.source_cidr.split(',').next().unwrap_or_default().trim();
        if !first.is_empty() {
            lookup.entry(obs.source_vnet.as_str()).or_insert(first);
        }
    }
    lookup
}

/// Fold directed peering observations into deduplicated undirected edges.
///
/// Both endpoints are labeled through the same lookup, so an observation and
/// its reverse produce the same pair of labels. A VNet missing from
/// `allocations` is labeled by the first prefix it reported as a source, or
/// [`UNKNOWN_CIDR`] if it never was one. Duplicates are dropped without
/// merging their state. Self-peerings are kept.
pub fn build_graph(
    allocations: &[AddressAllocation],
    observations: &[PeeringObservation],
    options: GraphOptions,
) -> PeeringGraph {
    let lookup = label_cidrs(allocations, observations);
    let mut graph = PeeringGraph::default();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for obs in observations {
        let target_name = match obs.target_vnet_name() {
            Ok(name) => name,
            Err(e) => {
                graph.diagnostics.push(e);
                continue;
            }
        };

        let source_cidr = lookup
            .get(obs.source_vnet.as_str())
            .copied()
            .unwrap_or(UNKNOWN_CIDR);
        let target_cidr = lookup.get(target_name).copied().unwrap_or(UNKNOWN_CIDR);

        let endpoint_a = endpoint_label(&obs.source_vnet, source_cidr);
        let endpoint_b = endpoint_label(target_name, target_cidr);

        let key = if endpoint_a <= endpoint_b {
            (endpoint_a.clone(), endpoint_b.clone())
        } else {
            (endpoint_b.clone(), endpoint_a.clone())
        };
        if !seen.insert(key) {
            continue;
        }

        let color = palette_color(graph.edges.len());
        graph.edges.push(UndirectedPeeringEdge {
            endpoint_a,
            endpoint_b,
            state: options.label_state.then(|| obs.peering_state.clone()),
            color,
        });
    }

    graph
}
