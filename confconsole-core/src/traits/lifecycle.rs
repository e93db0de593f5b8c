//! Appliance lifecycle actions Trait

use crate::error::CoreResult;

/// Reboot, shutdown and installer actions
///
/// Fire-and-forget: success or an error, nothing else.
pub trait Lifecycle {
    fn reboot(&self) -> CoreResult<()>;

    fn shutdown(&self) -> CoreResult<()>;

    /// Whether the disk installer can be run (live system only)
    fn installer_available(&self) -> bool;

    /// Run the installer; it takes over the terminal until it exits
    fn run_installer(&self) -> CoreResult<()>;
}
