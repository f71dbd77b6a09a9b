//! Exact-prefix collision detection.
//!
//! Two allocations collide when their CIDR strings are identical. This is a
//! literal string comparison: `10.0.0.0/16` and `10.0.0.0/016` do not collide,
//! and neither do a /16 and a /24 inside it (see [`super::overlap`] for that).

use crate::models::AddressAllocation;
use itertools::Itertools;

/// Return every allocation whose CIDR string is shared with at least one
/// other allocation, sorted by CIDR.
///
/// Allocations with equal CIDRs keep their input order. A VNet listing the
/// same prefix twice collides with itself.
pub fn detect_collisions(allocations: &[AddressAllocation]) -> Vec<AddressAllocation> {
    let counts = allocations.iter().map(|a| a.cidr.as_str()).counts();

    let mut collisions: Vec<AddressAllocation> = allocations
        .iter()
        .filter(|a| counts.get(a.cidr.as_str()).copied().unwrap_or(0) > 1)
        .cloned()
        .collect();

    // sort_by is stable
    collisions.sort_by(|a, b| a.cidr.cmp(&b.cidr));
    collisions
}

/// Colliding allocations grouped per CIDR, in output order.
pub fn group_collisions(collisions: &[AddressAllocation]) -> Vec<(&str, Vec<&AddressAllocation>)> {
    let grouped = collisions.iter().group_by(|a| a.cidr.as_str());
    let groups = grouped
        .into_iter()
        .map(|(cidr, group)| (cidr, group.collect()))
        .collect();
    groups
}
