//! Azure resource id parsing.
//!
//! VNet ids look like
//! `/subscriptions/<sub>/resourceGroups/<rg>/providers/Microsoft.Network/virtualNetworks/<name>`.

use crate::error::VnetError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RESOURCE_ID_RE: Regex =
        Regex::new(r"(?i)^/subscriptions/([^/]+)/resourceGroups/([^/]+)/providers/(.+)$")
            .expect("Invalid Regex?");
}

/// The parts of a resource id we care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId<'a> {
    pub subscription_id: &'a str,
    pub resource_group: &'a str,
    /// Last path segment, the resource's own name.
    pub name: &'a str,
}

impl<'a> ResourceId<'a> {
    pub fn parse(id: &'a str) -> Result<ResourceId<'a>, VnetError> {
        let caps = RESOURCE_ID_RE
            .captures(id)
            .ok_or_else(|| VnetError::malformed(id, "not an Azure resource id"))?;
        let subscription_id = caps.get(1).map_or("", |m| m.as_str());
        let resource_group = caps.get(2).map_or("", |m| m.as_str());
        let name = last_segment(id)?;
        Ok(ResourceId {
            subscription_id,
            resource_group,
            name,
        })
    }
}

/// Last `/`-separated segment of a resource id.
///
/// An empty segment (e.g. a trailing slash) is a malformed record, never a
/// blank name.
pub fn last_segment(id: &str) -> Result<&str, VnetError> {
    match id.rsplit('/').next() {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(VnetError::malformed(id, "empty name segment")),
    }
}
