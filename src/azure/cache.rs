//! Inventory snapshot cache.
//!
//! A run against a few hundred subscriptions takes minutes, so the merged
//! inventory is saved once per day and replayed on the next run.

use crate::models::Inventory;
use std::error::Error;
use std::path::{Path, PathBuf};

/// `vnet_cache_<YYYY-MM-DD>.json`, dated in the team's timezone.
pub fn default_cache_file() -> PathBuf {
    let now = chrono::Utc::now().with_timezone(&chrono_tz::Pacific::Auckland);
    PathBuf::from(format!("vnet_cache_{}.json", now.format("%Y-%m-%d")))
}

pub fn read_inventory_cache(cache_file: &Path) -> Result<Inventory, Box<dyn Error>> {
    let json = std::fs::read_to_string(cache_file)
        .map_err(|e| format!("Error reading cache file {}: {e}", cache_file.display()))?;
    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let inventory: Inventory = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        format!(
            "Error parsing cache JSON {}: path={} error={}",
            cache_file.display(),
            e.path(),
            e
        )
    })?;
    log::info!("Read {inventory} from cache file: {}", cache_file.display());
    if !inventory.diagnostics.is_empty() {
        log::warn!(
            "Cache carries {} diagnostic(s) from the run that wrote it",
            inventory.diagnostics.len()
        );
    }
    Ok(inventory)
}

pub fn write_inventory_cache(cache_file: &Path, inventory: &Inventory) -> Result<(), Box<dyn Error>> {
    let json =
        serde_json::to_string(inventory).map_err(|e| format!("Error serializing JSON: {e}"))?;
    log::warn!("Writing data to cache file: {}", cache_file.display());
    std::fs::write(cache_file, json)
        .map_err(|e| format!("Error writing cache file {}: {e}", cache_file.display()))?;
    Ok(())
}
