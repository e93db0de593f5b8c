//! Default interface preference Trait

use crate::error::CoreResult;

/// Persists which interface's address is shown as the primary one
pub trait DefaultRouteSelector {
    /// Interface chosen by the operator, if any
    fn get_default_interface(&self) -> Option<String>;

    fn set_default_interface(&self, ifname: &str) -> CoreResult<()>;
}
