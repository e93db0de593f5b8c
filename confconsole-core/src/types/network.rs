//! Network configuration types

use std::fmt;
use std::net::Ipv4Addr;

/// Snapshot of an interface's current configuration
///
/// Read fresh on every render; the system beneath can change between screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceConfig {
    pub address: Option<String>,
    pub netmask: Option<String>,
    pub gateway: Option<String>,
    pub nameservers: Vec<String>,
}

/// Validated static configuration ready to be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIpConfig {
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub gateway: Option<Ipv4Addr>,
    /// Ordered, without duplicates
    pub nameservers: Vec<Ipv4Addr>,
}

/// Network derived from an address and a netmask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpRange {
    network: Ipv4Addr,
    netmask: Ipv4Addr,
}

impl IpRange {
    pub fn new(address: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        let network = Ipv4Addr::from(u32::from(address) & u32::from(netmask));
        Self { network, netmask }
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix_len(&self) -> u32 {
        u32::from(self.netmask).count_ones()
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & u32::from(self.netmask) == u32::from(self.network)
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len())
    }
}
