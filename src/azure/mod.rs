//! Azure inventory collection.
//!
//! - [`source`] - the data source trait and the bounded fetch pool
//! - [`cli`] - the `az` CLI implementation
//! - [`cache`] - daily snapshot cache

mod cache;
mod cli;
mod source;

pub use cache::{default_cache_file, read_inventory_cache, write_inventory_cache};
pub use cli::{classify_failure, convert_vnets, parse_az_json, AzCliSource, AzVnet};
pub use source::{collect_inventory, resolve_subscriptions, InventorySource};
