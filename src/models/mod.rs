//! Domain models for the VNet inventory.
//!
//! - [`AddressAllocation`] - one prefix of one VNet
//! - [`PeeringObservation`] and [`UndirectedPeeringEdge`] - peering links
//! - [`Inventory`] - the batch snapshot for a run
//! - [`Ipv4`] - CIDR value type for range arithmetic
//! - [`ResourceId`] - Azure resource id parsing

mod allocation;
mod inventory;
mod ipv4;
mod peering;
mod resource_id;

pub use allocation::AddressAllocation;
pub use inventory::{Inventory, SubscriptionInventory};
pub use ipv4::{broadcast_addr, cut_addr, get_cidr_mask, Ipv4, MAX_LENGTH};
pub use peering::{endpoint_label, PeeringObservation, UndirectedPeeringEdge};
pub use resource_id::{last_segment, ResourceId};
