//! Report assembly.
//!
//! Runs the collision detector, the overlap finder and the graph builder over
//! one inventory snapshot, then hands the results to the sinks. Nothing here
//! logs; problems come back as diagnostics.

use super::collisions::detect_collisions;
use super::overlap::{find_containment_overlaps, ContainmentOverlap};
use super::peering_graph::{build_graph, GraphOptions};
use crate::config;
use crate::error::VnetError;
use crate::models::{AddressAllocation, Inventory, PeeringObservation, UndirectedPeeringEdge};
use crate::output::{allocation_rows, overlap_rows, peering_rows, DiagramSink, TableSink};
use crate::output::{ALLOCATION_HEADER, OVERLAP_HEADER, PEERING_HEADER};

/// Everything computed for one run.
#[derive(Debug, Default)]
pub struct Report {
    pub allocations: Vec<AddressAllocation>,
    pub peerings: Vec<PeeringObservation>,
    pub collisions: Vec<AddressAllocation>,
    pub overlaps: Vec<ContainmentOverlap>,
    pub edges: Vec<UndirectedPeeringEdge>,
    pub failed_subscriptions: Vec<String>,
    pub diagnostics: Vec<VnetError>,
}

/// Analyze a full snapshot. Subscriptions missing from `inventory` simply
/// contribute nothing.
pub fn assemble_report(inventory: Inventory, options: GraphOptions) -> Report {
    let collisions = detect_collisions(&inventory.allocations);
    let overlap_report = find_containment_overlaps(&inventory.allocations);
    let graph = build_graph(&inventory.allocations, &inventory.peerings, options);

    let mut diagnostics = inventory.diagnostics;
    diagnostics.extend(overlap_report.diagnostics);
    diagnostics.extend(graph.diagnostics);

    Report {
        allocations: inventory.allocations,
        peerings: inventory.peerings,
        collisions,
        overlaps: overlap_report.overlaps,
        edges: graph.edges,
        failed_subscriptions: inventory.failed_subscriptions,
        diagnostics,
    }
}

/// Which optional outputs to produce.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishOptions {
    /// Append the PeeredVNets column to all_vnets.csv.
    pub csv_peered_vnets: bool,
}

/// Write every table and the diagram. Each sink failure is returned and the
/// remaining sinks still run.
pub fn publish_report(
    report: &Report,
    tables: &dyn TableSink,
    diagram: &dyn DiagramSink,
    options: PublishOptions,
) -> Vec<VnetError> {
    let mut failures = Vec::new();

    let mut allocation_header = ALLOCATION_HEADER.to_vec();
    if options.csv_peered_vnets {
        allocation_header.push("PeeredVNets");
    }

    let results = [
        tables.write_table(
            config::ALL_VNETS_CSV,
            &allocation_header,
            allocation_rows(&report.allocations, options.csv_peered_vnets),
        ),
        tables.write_table(
            config::COLLISIONS_CSV,
            &allocation_header,
            allocation_rows(&report.collisions, options.csv_peered_vnets),
        ),
        tables.write_table(
            config::PEERINGS_CSV,
            &PEERING_HEADER,
            peering_rows(&report.peerings, &report.allocations),
        ),
        tables.write_table(
            config::OVERLAPS_CSV,
            &OVERLAP_HEADER,
            overlap_rows(&report.overlaps),
        ),
        diagram.render(&report.edges),
    ];

    for result in results {
        if let Err(e) = result {
            failures.push(e);
        }
    }
    failures
}
