//! One address prefix owned by one VNet.

use serde::{Deserialize, Serialize};

/// A single CIDR prefix of a VNet. A VNet with three prefixes yields three
/// allocations sharing vnet_name, resource_group and subscription_id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AddressAllocation {
    /// Prefix exactly as reported by Azure. Not normalized.
    pub cidr: String,
    pub vnet_name: String,
    pub resource_group: String,
    pub subscription_id: String,
    /// Resource ids of the remote VNets this VNet peers with, in reported order.
    #[serde(default)]
    pub peered_vnets: Vec<String>,
}

impl AddressAllocation {
    pub fn new(
        cidr: impl Into<String>,
        vnet_name: impl Into<String>,
        resource_group: impl Into<String>,
        subscription_id: impl Into<String>,
    ) -> Self {
        AddressAllocation {
            cidr: cidr.into(),
            vnet_name: vnet_name.into(),
            resource_group: resource_group.into(),
            subscription_id: subscription_id.into(),
            peered_vnets: vec![],
        }
    }

    pub fn with_peered_vnets(mut self, peered_vnets: Vec<String>) -> Self {
        self.peered_vnets = peered_vnets;
        self
    }

    /// (vnet_name, resource_group, subscription_id), unique per VNet in a run.
    pub fn vnet_key(&self) -> (&str, &str, &str) {
        (&self.vnet_name, &self.resource_group, &self.subscription_id)
    }
}

impl std::fmt::Display for AddressAllocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' rg='{}' sub='{}'",
            self.cidr, self.vnet_name, self.resource_group, self.subscription_id
        )
    }
}
