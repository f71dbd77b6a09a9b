//! Peering records: the directed observations Azure reports and the
//! undirected edges we draw.

use super::resource_id::last_segment;
use crate::error::VnetError;
use serde::{Deserialize, Serialize};

/// One peering as seen from its source VNet. A mutual peering usually shows
/// up twice, once from each side, and the two states need not agree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PeeringObservation {
    pub source_vnet: String,
    /// All prefixes of the source VNet, joined with ", ".
    pub source_cidr: String,
    pub source_resource_group: String,
    /// Full resource id of the remote VNet.
    pub target_vnet_id: String,
    /// "Connected", "Initiated", "Disconnected", ...
    pub peering_state: String,
}

impl PeeringObservation {
    /// Remote VNet name, the last segment of `target_vnet_id`.
    pub fn target_vnet_name(&self) -> Result<&str, VnetError> {
        last_segment(&self.target_vnet_id).map_err(|_| {
            VnetError::malformed(
                format!("peering {} -> '{}'", self.source_vnet, self.target_vnet_id),
                "remote vnet id has an empty name segment",
            )
        })
    }
}

/// Node label used in the diagram: `"<vnet> (<cidr>)"`.
pub fn endpoint_label(vnet_name: &str, cidr: &str) -> String {
    format!("{vnet_name} ({cidr})")
}

/// Deduplicated, undirected peering between two endpoint labels.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UndirectedPeeringEdge {
    pub endpoint_a: String,
    pub endpoint_b: String,
    /// Peering state of the first observation, when state labels are on.
    pub state: Option<String>,
    pub color: &'static str,
}

impl UndirectedPeeringEdge {
    /// Order-independent identity of the edge.
    pub fn key(&self) -> (&str, &str) {
        if self.endpoint_a <= self.endpoint_b {
            (&self.endpoint_a, &self.endpoint_b)
        } else {
            (&self.endpoint_b, &self.endpoint_a)
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.endpoint_a == self.endpoint_b
    }
}
