//! IPv4 CIDR value type.
//!
//! Collision detection works on the raw prefix strings. [`Ipv4`] is only
//! used when we want the address range behind a prefix, i.e. for
//! containment overlaps.

use std::error::Error;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use azure_vnet_summary::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let mask = (u32::MAX as u64 >> right_len) << right_len;
        Ok(mask as u32)
    }
}

/// Network (lowest) address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Broadcast (highest) address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from((u32::from(addr) & mask) | !mask))
}

/// IPv4 address with prefix length, e.g. `10.0.0.0/16`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    pub addr: Ipv4Addr,
    /// Prefix length, 0..=32.
    pub mask: u8,
}

impl Ipv4 {
    /// Parse a CIDR string such as "10.0.0.0/24".
    pub fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| format!("Invalid address/mask {addr_cidr}"))?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| format!("Invalid address {addr}"))?;
        let mask: u8 = mask.parse().map_err(|_| format!("Invalid mask {mask}"))?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Lowest address in the prefix.
    pub fn lo(&self) -> Ipv4Addr {
        // mask is validated on construction
        cut_addr(self.addr, self.mask).unwrap_or(self.addr)
    }

    /// Highest address in the prefix.
    pub fn hi(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.mask).unwrap_or(self.addr)
    }

    /// True when the two address ranges share at least one address.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_lo_hi() {
        let ip = Ipv4::new("10.2.3.4/16").unwrap();
        assert_eq!(ip.lo(), Ipv4Addr::new(10, 2, 0, 0));
        assert_eq!(ip.hi(), Ipv4Addr::new(10, 2, 255, 255));
        let host = Ipv4::new("192.168.1.7/32").unwrap();
        assert_eq!(host.lo(), host.hi());
    }

    #[test]
    fn test_new_rejects_garbage() {
        assert!(Ipv4::new("10.0.0.0").is_err());
        assert!(Ipv4::new("10.0.0.0/33").is_err());
        assert!(Ipv4::new("fd00::/8").is_err());
        assert!(Ipv4::new(" 10.0.0.0/8 ").is_ok());
    }

    #[test]
    fn test_overlaps() {
        let big = Ipv4::new("10.0.0.0/8").unwrap();
        let inner = Ipv4::new("10.1.0.0/16").unwrap();
        let other = Ipv4::new("172.16.0.0/12").unwrap();
        let adjacent = Ipv4::new("10.2.0.0/16").unwrap();
        assert!(big.overlaps(&inner));
        assert!(inner.overlaps(&big));
        assert!(!big.overlaps(&other));
        assert!(!inner.overlaps(&adjacent));
    }
}
