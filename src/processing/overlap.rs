//! Address-range overlaps between different VNets.
//!
//! [`super::collisions`] only catches identical prefix strings. Here we parse
//! the prefixes and report pairs whose ranges intersect without being the
//! same string, e.g. `10.0.0.0/8` in one VNet and `10.20.0.0/16` in another.
//! Such pairs can't be peered either.

use crate::error::VnetError;
use crate::models::{AddressAllocation, Ipv4};

/// Two allocations from different VNets whose ranges intersect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainmentOverlap {
    /// The allocation with the lower start address.
    pub first: AddressAllocation,
    pub second: AddressAllocation,
}

impl std::fmt::Display for ContainmentOverlap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} overlaps {}", self.first, self.second)
    }
}

#[derive(Debug, Default)]
pub struct OverlapReport {
    pub overlaps: Vec<ContainmentOverlap>,
    /// Prefixes that could not be parsed as IPv4.
    pub diagnostics: Vec<VnetError>,
}

/// Find range overlaps between allocations of different VNets.
///
/// IPv6 prefixes are skipped. Anything else that doesn't parse is reported as
/// a malformed record and left out.
pub fn find_containment_overlaps(allocations: &[AddressAllocation]) -> OverlapReport {
    let mut report = OverlapReport::default();

    let mut parsed: Vec<(Ipv4, &AddressAllocation)> = Vec::with_capacity(allocations.len());
    for a in allocations {
        if a.cidr.contains(':') {
            continue;
        }
        match Ipv4::new(&a.cidr) {
            Ok(ip) => parsed.push((ip, a)),
            Err(e) => report
                .diagnostics
                .push(VnetError::malformed(a.to_string(), e.to_string())),
        }
    }

    // Sweep by start address, widest range first on ties.
    parsed.sort_by(|(x, _), (y, _)| x.lo().cmp(&y.lo()).then(x.mask.cmp(&y.mask)));

    for (i, (ip, a)) in parsed.iter().enumerate() {
        for (other_ip, b) in parsed.iter().skip(i + 1) {
            if other_ip.lo() > ip.hi() {
                break;
            }
            if a.vnet_key() == b.vnet_key() || a.cidr == b.cidr {
                continue;
            }
            report.overlaps.push(ContainmentOverlap {
                first: (*a).clone(),
                second: (*b).clone(),
            });
        }
    }

    report
}
