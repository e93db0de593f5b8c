//! Plugin execution Trait

use crate::error::CoreResult;
use crate::registry::Plugin;

/// Runs a leaf plugin's action
///
/// Platform implementation:
/// - `ProcessPluginRunner`: spawns the plugin executable
pub trait PluginRunner {
    /// Run the plugin to completion
    ///
    /// # Arguments
    /// * `plugin` - Leaf unit to run
    /// * `interactive` - whether the plugin may prompt the operator
    fn run(&self, plugin: &Plugin, interactive: bool) -> CoreResult<()>;
}
