//! Run-wide constants and settings.

use std::path::PathBuf;

/// Pause between consecutive az calls made by one worker.
pub const SLEEP_MSEC: u64 = 200;

/// Concurrent subscription fetches when nothing else is configured.
pub const DEFAULT_WORKERS: usize = 4;

/// Reject az output larger than this.
pub const MAX_CLI_OUTPUT_BYTES: usize = 5_000_000;

pub const ALL_VNETS_CSV: &str = "all_vnets.csv";
pub const COLLISIONS_CSV: &str = "colliding_vnets.csv";
pub const PEERINGS_CSV: &str = "vnet_peerings.csv";
pub const OVERLAPS_CSV: &str = "overlapping_vnets.csv";
pub const DIAGRAM_BASENAME: &str = "vnet_peering_diagram";

/// Settings for one run, assembled from command line and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Restrict the run to these subscriptions; empty means all accessible.
    pub subscription_ids: Vec<String>,
    /// Carry the peering state as an edge label in the diagram.
    pub label_state: bool,
    pub output_dir: PathBuf,
    /// Replay a cached inventory instead of querying Azure.
    pub cache_file: Option<PathBuf>,
    pub workers: usize,
    /// Write the DOT file but skip the `dot` invocation.
    pub no_render: bool,
    /// Append a PeeredVNets column to all_vnets.csv.
    pub csv_peered_vnets: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            subscription_ids: vec![],
            label_state: false,
            output_dir: PathBuf::from("."),
            cache_file: None,
            workers: DEFAULT_WORKERS,
            no_render: false,
            csv_peered_vnets: false,
        }
    }
}
