//! Appliance Configuration Console Core Library
//!
//! Provides the platform-independent part of the operator console:
//! - Navigation state machine (`Navigator`) and the built-in screen table
//! - Plugin discovery (`CapabilityRegistry`)
//! - Static IP form validation
//!
//! Everything that touches the terminal or the operating system is reached
//! through the traits in [`traits`], so the front-end decides how screens are
//! drawn and how network changes are applied.

pub mod config;
pub mod error;
pub mod registry;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::ConsoleConf;
pub use error::{CoreError, CoreResult};
pub use registry::{CapabilityRegistry, CapabilityUnit, Plugin, PluginGroup};
pub use services::{Navigator, ServiceContext, SessionState, Settings};
pub use traits::{
    Console, DefaultRouteSelector, Lifecycle, NetworkControl, NetworkInfo, PluginRunner, Renderer,
};
pub use types::{DialogKey, PluginKey, Screen};
