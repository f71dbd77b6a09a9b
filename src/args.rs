//! Command line arguments.

use crate::config::{Settings, DEFAULT_WORKERS};
use clap::Parser;
use std::path::PathBuf;

/// VNet CIDR inspection and peering visualization.
#[derive(Parser, Debug)]
#[command(name = "azure-vnet-summary", version)]
pub struct Args {
    /// Subscription ids to review (default: all accessible subscriptions)
    #[arg(long = "subscription-ids", num_args = 1..)]
    pub subscription_ids: Vec<String>,

    /// Label diagram edges with the peering state
    #[arg(long)]
    pub label_state: bool,

    /// Directory for the CSV files and the diagram
    #[arg(long, env = "VNET_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Replay a cached inventory instead of querying Azure
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Subscriptions fetched concurrently
    #[arg(long, env = "VNET_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Write the DOT file only, don't call `dot`
    #[arg(long)]
    pub no_render: bool,

    /// Add a PeeredVNets column to all_vnets.csv
    #[arg(long, env = "VNET_CSV_PEERED_VNETS")]
    pub csv_peered_vnets: bool,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Settings {
            subscription_ids: args.subscription_ids,
            label_state: args.label_state,
            output_dir: args.output_dir,
            cache_file: args.cache_file,
            workers: args.workers.max(1),
            no_render: args.no_render,
            csv_peered_vnets: args.csv_peered_vnets,
        }
    }
}
