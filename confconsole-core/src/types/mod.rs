//! Type definitions

mod dialog_key;
mod menu;
mod network;

pub use dialog_key::{AdvancedAction, DialogKey, IfconfAction, PluginKey, Screen};
pub use menu::MenuItem;
pub use network::{InterfaceConfig, IpRange, StaticIpConfig};
