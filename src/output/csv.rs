//! CSV tables.

use super::TableSink;
use crate::error::VnetError;
use crate::models::{AddressAllocation, PeeringObservation};
use crate::processing::{ContainmentOverlap, UNKNOWN_CIDR};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::PathBuf;

pub const ALLOCATION_HEADER: [&str; 4] = ["CIDR", "VNET", "ResourceGroup", "SubscriptionId"];

pub const PEERING_HEADER: [&str; 6] = [
    "SourceVNet",
    "SourceCIDR",
    "SourceResourceGroup",
    "TargetVNet",
    "TargetCIDR",
    "PeeringState",
];

pub const OVERLAP_HEADER: [&str; 6] = [
    "CIDR",
    "VNET",
    "SubscriptionId",
    "OverlappingCIDR",
    "OverlappingVNET",
    "OverlappingSubscriptionId",
];

/// Writes each table to `<dir>/<file_name>`.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    pub dir: PathBuf,
}

impl CsvFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvFileSink { dir: dir.into() }
    }
}

impl TableSink for CsvFileSink {
    fn write_table(
        &self,
        file_name: &str,
        header: &[&str],
        rows: Vec<Vec<String>>,
    ) -> Result<(), VnetError> {
        let path = self.dir.join(file_name);
        let text = to_csv(header, &rows);
        std::fs::write(&path, text).map_err(|e| VnetError::sink(path.display().to_string(), e))?;
        log::info!("Data written to {} ({} rows)", path.display(), rows.len());
        Ok(())
    }
}

/// Render header and rows as CSV text, one line per row.
pub fn to_csv(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        header
            .iter()
            .map(|h| escape_csv_field(h))
            .collect::<Vec<_>>()
            .join(",")
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{}",
            row.iter()
                .map(|f| escape_csv_field(f))
                .collect::<Vec<_>>()
                .join(",")
        );
    }
    out
}

/// Quote a field when it contains a comma, quote or line break.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains([',', '"', '\n', '\r']) {
        // no space after the comma between fields, excel dislikes it
        format!("\"{}\"", input.replace('"', "\"\""))
    } else {
        input.to_string()
    }
}

/// One row per prefix. PeeredVNets is flattened with `;`.
pub fn allocation_rows(allocations: &[AddressAllocation], peered_vnets: bool) -> Vec<Vec<String>> {
    allocations
        .iter()
        .map(|a| {
            let mut row = vec![
                a.cidr.clone(),
                a.vnet_name.clone(),
                a.resource_group.clone(),
                a.subscription_id.clone(),
            ];
            if peered_vnets {
                row.push(a.peered_vnets.join(";"));
            }
            row
        })
        .collect()
}

/// One row per observation. TargetCIDR lists every known prefix of the
/// remote VNet, or `Unknown`.
pub fn peering_rows(
    peerings: &[PeeringObservation],
    allocations: &[AddressAllocation],
) -> Vec<Vec<String>> {
    let mut prefixes: HashMap<&str, Vec<&str>> = HashMap::new();
    for a in allocations {
        prefixes.entry(&a.vnet_name).or_default().push(&a.cidr);
    }

    peerings
        .iter()
        .map(|p| {
            let target = p.target_vnet_name().unwrap_or_default();
            let target_cidr = prefixes
                .get(target)
                .map(|c| c.join(", "))
                .unwrap_or_else(|| UNKNOWN_CIDR.to_string());
            vec![
                p.source_vnet.clone(),
                p.source_cidr.clone(),
                p.source_resource_group.clone(),
                target.to_string(),
                target_cidr,
                p.peering_state.clone(),
            ]
        })
        .collect()
}

pub fn overlap_rows(overlaps: &[ContainmentOverlap]) -> Vec<Vec<String>> {
    overlaps
        .iter()
        .map(|o| {
            vec![
                o.first.cidr.clone(),
                o.first.vnet_name.clone(),
                o.first.subscription_id.clone(),
                o.second.cidr.clone(),
                o.second.vnet_name.clone(),
                o.second.subscription_id.clone(),
            ]
        })
        .collect()
}
