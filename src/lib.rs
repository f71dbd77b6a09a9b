//! Azure VNet address-space and peering summary.
//!
//! Collects every VNet prefix and peering across subscriptions, flags
//! prefixes claimed by more than one VNet, and draws the peering graph.
//!
//! - [`azure`] - inventory collection (az CLI, fetch pool, cache)
//! - [`models`] - allocations, peerings, inventory
//! - [`processing`] - collision detection, peering graph, report assembly
//! - [`output`] - CSV, diagram and terminal sinks

pub mod args;
pub mod azure;
mod cmd;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use azure::InventorySource;
use config::Settings;
use error::{log_diagnostics, VnetError};
use models::Inventory;
use output::{CsvFileSink, DotRenderer};
use processing::{GraphOptions, PublishOptions, Report};
use std::error::Error;
use std::sync::Arc;

pub use processing::{build_graph, detect_collisions};

/// Load the inventory for this run.
///
/// An explicit cache file is replayed as-is and must exist. Otherwise a
/// full-scope run reuses today's cache if there is one and writes it if not.
/// Runs restricted to some subscriptions always go to Azure and are not
/// cached.
pub async fn load_inventory(
    settings: &Settings,
    source: Arc<dyn InventorySource>,
) -> Result<Inventory, Box<dyn Error>> {
    if let Some(cache_file) = &settings.cache_file {
        if !cache_file.exists() {
            return Err(format!("Cache file does not exist: {}", cache_file.display()).into());
        }
        log::info!("Using provided cache file: {}", cache_file.display());
        return azure::read_inventory_cache(cache_file);
    }

    let use_daily_cache = settings.subscription_ids.is_empty();
    let daily_cache = azure::default_cache_file();
    if use_daily_cache && daily_cache.exists() {
        return azure::read_inventory_cache(&daily_cache);
    }

    let (subscription_ids, listing_error) =
        azure::resolve_subscriptions(Arc::clone(&source), &settings.subscription_ids).await;
    let mut inventory =
        azure::collect_inventory(source, &subscription_ids, settings.workers).await;
    if let Some(e) = listing_error {
        inventory.diagnostics.push(e);
    }
    log::info!("Collected {inventory}");

    if use_daily_cache && worth_caching(&inventory) {
        if let Err(e) = azure::write_inventory_cache(&daily_cache, &inventory) {
            log::warn!("{e}");
        }
    }
    Ok(inventory)
}

/// A run that read nothing, or hit a failure a retry might fix, is not saved
/// for replay.
fn worth_caching(inventory: &Inventory) -> bool {
    !inventory.is_empty() && !inventory.diagnostics.iter().any(VnetError::is_transient)
}

/// Analyze the inventory and write all outputs. Sink failures are logged and
/// kept in the returned report's diagnostics.
pub fn report_inventory(inventory: Inventory, settings: &Settings) -> Report {
    let options = GraphOptions {
        label_state: settings.label_state,
    };
    let mut report = processing::assemble_report(inventory, options);
    log_diagnostics(&report.diagnostics);
    output::log_findings(&report);

    if let Err(e) = std::fs::create_dir_all(&settings.output_dir) {
        log::warn!(
            "Could not create output dir {}: {e}",
            settings.output_dir.display()
        );
    }
    let tables = CsvFileSink::new(&settings.output_dir);
    let diagram = DotRenderer::new(&settings.output_dir, !settings.no_render);
    let failures: Vec<VnetError> = processing::publish_report(
        &report,
        &tables,
        &diagram,
        PublishOptions {
            csv_peered_vnets: settings.csv_peered_vnets,
        },
    );
    log_diagnostics(&failures);
    report.diagnostics.extend(failures);
    report
}

/// Full run: load, analyze, publish, summarize.
pub async fn run(
    settings: &Settings,
    source: Arc<dyn InventorySource>,
) -> Result<Report, Box<dyn Error>> {
    let inventory = load_inventory(settings, source).await?;
    let report = report_inventory(inventory, settings);
    output::print_summary(&report);
    Ok(report)
}
