//! Inventory snapshot, per subscription and merged.

use super::{AddressAllocation, PeeringObservation};
use crate::error::VnetError;
use serde::{Deserialize, Serialize};

/// What one subscription contributed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionInventory {
    pub allocations: Vec<AddressAllocation>,
    pub peerings: Vec<PeeringObservation>,
    /// Records the source had to drop while reading this subscription.
    #[serde(default)]
    pub diagnostics: Vec<VnetError>,
}

/// Full batch snapshot for one run.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub allocations: Vec<AddressAllocation>,
    pub peerings: Vec<PeeringObservation>,
    /// Subscriptions that contributed nothing because they could not be read.
    #[serde(default)]
    pub failed_subscriptions: Vec<String>,
    /// Kept in the cache so a replay reports what the live run left out.
    #[serde(default)]
    pub diagnostics: Vec<VnetError>,
}

impl Inventory {
    pub fn extend(&mut self, part: SubscriptionInventory) {
        self.allocations.extend(part.allocations);
        self.peerings.extend(part.peerings);
        self.diagnostics.extend(part.diagnostics);
    }

    /// Record a subscription that could not be read.
    pub fn add_failure(&mut self, subscription_id: impl Into<String>, error: VnetError) {
        self.failed_subscriptions.push(subscription_id.into());
        self.diagnostics.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty() && self.peerings.is_empty()
    }
}

impl std::fmt::Display for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Inventory ({} prefixes, {} peerings, {} unreadable subscriptions)",
            self.allocations.len(),
            self.peerings.len(),
            self.failed_subscriptions.len()
        )
    }
}
