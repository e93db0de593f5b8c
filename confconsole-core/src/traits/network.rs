//! Network provider abstract Traits

use crate::error::CoreResult;
use crate::types::{InterfaceConfig, StaticIpConfig};

/// Read-only view of the live network state
///
/// Platform implementation:
/// - Linux: `SysNetInfo` (sysfs + iproute2)
pub trait NetworkInfo {
    /// Names of configurable interfaces, sorted
    fn list_interface_names(&self) -> CoreResult<Vec<String>>;

    /// Current address, netmask, gateway and nameservers of an interface
    ///
    /// # Returns
    /// * `Ok(config)` - fields are `None` when not configured
    /// * `Err(_)` - the configuration could not be determined
    fn get_interface_config(&self, ifname: &str) -> CoreResult<InterfaceConfig>;

    /// Configuration method (`dhcp`, `static`, ...) if known
    fn get_config_method(&self, ifname: &str) -> Option<String>;

    fn get_hostname(&self) -> String;

    /// Publicly reachable address, when the appliance knows how to find it
    fn public_ip(&self) -> Option<String> {
        None
    }
}

/// Applies network changes
pub trait NetworkControl {
    /// Configure a static address
    ///
    /// # Returns
    /// * `Ok(None)` - applied
    /// * `Ok(Some(message))` - refused; `message` is shown to the operator
    fn set_static(&self, ifname: &str, config: &StaticIpConfig) -> CoreResult<Option<String>>;

    /// Switch the interface to DHCP, same return convention as [`NetworkControl::set_static`]
    fn set_dhcp(&self, ifname: &str) -> CoreResult<Option<String>>;

    /// Remove any configuration from the interface
    fn unconfigure(&self, ifname: &str) -> CoreResult<()>;
}
