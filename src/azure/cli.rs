//! `az` CLI backed inventory source.
//!
//! One `az network vnet list` call per subscription returns the address space
//! and the peerings of every VNet, so allocations and observations come from
//! the same round trip.

use super::source::InventorySource;
use crate::cmd;
use crate::config;
use crate::error::VnetError;
use crate::models::{AddressAllocation, PeeringObservation, ResourceId, SubscriptionInventory};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Markers in az stderr meaning "you may not read this subscription".
const ACCESS_DENIED_MARKERS: [&str; 4] = [
    "AuthorizationFailed",
    "does not have authorization",
    "AuthenticationFailed",
    "InvalidAuthenticationToken",
];

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AzSubscription {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AzVnet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address_space: Option<AzAddressSpace>,
    #[serde(default)]
    pub virtual_network_peerings: Option<Vec<AzPeering>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AzAddressSpace {
    #[serde(default)]
    pub address_prefixes: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AzPeering {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub peering_state: Option<String>,
    #[serde(default)]
    pub remote_virtual_network: Option<AzSubResource>,
}

#[derive(Deserialize, Debug)]
pub struct AzSubResource {
    pub id: String,
}

impl AzVnet {
    fn prefixes(&self) -> &[String] {
        self.address_space
            .as_ref()
            .and_then(|a| a.address_prefixes.as_deref())
            .unwrap_or(&[])
    }

    fn peerings(&self) -> &[AzPeering] {
        self.virtual_network_peerings.as_deref().unwrap_or(&[])
    }
}

/// Decode az JSON output, naming the failing path.
pub fn parse_az_json<T: DeserializeOwned>(output: &str) -> Result<T, String> {
    let mut deserializer = serde_json::Deserializer::from_str(output);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing az output: path={} error={}", e.path(), e))
}

/// Map a failed az call to AccessDenied or TransientApi.
pub fn classify_failure(subscription_id: &str, message: String) -> VnetError {
    if ACCESS_DENIED_MARKERS.iter().any(|m| message.contains(m)) {
        VnetError::AccessDenied {
            subscription_id: subscription_id.to_string(),
            message,
        }
    } else {
        VnetError::TransientApi {
            subscription_id: subscription_id.to_string(),
            message,
        }
    }
}

/// Turn az VNets into allocations and observations.
///
/// A VNet whose id can't be parsed is dropped whole, a peering without a
/// remote id is dropped alone; both leave a diagnostic behind.
pub fn convert_vnets(subscription_id: &str, vnets: &[AzVnet]) -> SubscriptionInventory {
    let mut inventory = SubscriptionInventory::default();

    for vnet in vnets {
        let resource_group = match ResourceId::parse(&vnet.id) {
            Ok(id) => id.resource_group.to_string(),
            Err(e) => {
                inventory.diagnostics.push(e);
                continue;
            }
        };

        let source_cidr = vnet.prefixes().join(", ");
        let mut peered_vnets = Vec::new();
        for peering in vnet.peerings() {
            let Some(remote) = &peering.remote_virtual_network else {
                inventory.diagnostics.push(VnetError::malformed(
                    format!(
                        "peering '{}' of {}",
                        peering.name.as_deref().unwrap_or("?"),
                        vnet.name
                    ),
                    "no remote virtual network",
                ));
                continue;
            };
            peered_vnets.push(remote.id.clone());
            inventory.peerings.push(PeeringObservation {
                source_vnet: vnet.name.clone(),
                source_cidr: source_cidr.clone(),
                source_resource_group: resource_group.clone(),
                target_vnet_id: remote.id.clone(),
                peering_state: peering.peering_state.clone().unwrap_or_default(),
            });
        }

        for prefix in vnet.prefixes() {
            inventory.allocations.push(
                AddressAllocation::new(
                    prefix.clone(),
                    vnet.name.clone(),
                    resource_group.clone(),
                    subscription_id,
                )
                .with_peered_vnets(peered_vnets.clone()),
            );
        }
    }

    inventory
}

/// Reads subscriptions and VNets through the locally logged-in `az` CLI.
#[derive(Debug, Default, Clone)]
pub struct AzCliSource;

impl AzCliSource {
    pub fn new() -> Self {
        AzCliSource
    }

    fn list_vnets(&self, subscription_id: &str) -> Result<Vec<AzVnet>, VnetError> {
        log::info!("Processing subscription {subscription_id}...");
        let output = cmd::run(&format!(
            "az network vnet list --subscription '{subscription_id}' --output json"
        ))
        .map_err(|e| classify_failure(subscription_id, e.to_string()))?;

        // stay under the ARM read throttle
        std::thread::sleep(std::time::Duration::from_millis(config::SLEEP_MSEC));

        parse_az_json(&output).map_err(|message| VnetError::TransientApi {
            subscription_id: subscription_id.to_string(),
            message,
        })
    }
}

impl InventorySource for AzCliSource {
    fn list_subscriptions(&self) -> Result<Vec<String>, VnetError> {
        log::info!("Fetching all subscriptions...");
        let output = cmd::run("az account list --all --output json")
            .map_err(|e| classify_failure("*", e.to_string()))?;
        let subscriptions: Vec<AzSubscription> =
            parse_az_json(&output).map_err(|message| VnetError::TransientApi {
                subscription_id: "*".to_string(),
                message,
            })?;

        let ids: Vec<String> = subscriptions
            .into_iter()
            .filter(|s| {
                let enabled = s.state.as_deref().map_or(true, |st| st == "Enabled");
                if !enabled {
                    log::debug!("Skipping subscription '{}' ({}) state={:?}", s.name, s.id, s.state);
                }
                enabled
            })
            .map(|s| s.id)
            .collect();
        log::info!("Found {} subscriptions.", ids.len());
        Ok(ids)
    }

    fn list_allocations(&self, subscription_id: &str) -> Result<Vec<AddressAllocation>, VnetError> {
        Ok(self.fetch_subscription(subscription_id)?.allocations)
    }

    fn list_peerings(&self, subscription_id: &str) -> Result<Vec<PeeringObservation>, VnetError> {
        Ok(self.fetch_subscription(subscription_id)?.peerings)
    }

    fn fetch_subscription(&self, subscription_id: &str) -> Result<SubscriptionInventory, VnetError> {
        let vnets = self.list_vnets(subscription_id)?;
        let inventory = convert_vnets(subscription_id, &vnets);
        log::info!(
            "Found {} VNets ({} prefixes, {} peerings) in subscription {subscription_id}.",
            vnets.len(),
            inventory.allocations.len(),
            inventory.peerings.len()
        );
        Ok(inventory)
    }
}
