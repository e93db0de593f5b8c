//! Console services: the navigator and its screens
//!
//! ```text
//!            ┌──────────────┐  resolve   ┌──────────────────────┐
//!  DialogKey │  Navigator   │ ─────────▶ │ Screen (built-in)    │
//!  ────────▶ │  step()/run()│            │ CapabilityUnit (ref) │
//!            └──────┬───────┘            └──────────┬───────────┘
//!                   │  next DialogKey               │ Console / NetworkInfo /
//!                   ◀───────────────────────────────┘ NetworkControl / Lifecycle
//! ```

pub mod ipconf;
mod navigator;
mod networking;
mod plugins;
mod screens;

pub use navigator::{Navigator, SessionState};

use std::rc::Rc;

use crate::config::ConsoleConf;
use crate::traits::{
    Console, DefaultRouteSelector, Lifecycle, NetworkControl, NetworkInfo, PluginRunner,
};

/// Usage screen text when the appliance ships no services template
pub const DEFAULT_SERVICES_TEMPLATE: &str = "IP Address: $ipaddr";

/// Session-wide options fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Product name shown in the Advanced menu
    pub appliance_name: String,
    /// Offer the Networking entry in the Advanced menu
    pub networking: bool,
    /// `false` in usage-only mode
    pub advanced_enabled: bool,
    /// Passed to plugins; `false` when launched with `--nointeractive`
    pub interactive: bool,
    /// Running over SSH; network changes need a second confirmation
    pub remote_session: bool,
    /// Usage screen template, `$ipaddr` is substituted
    pub services_template: String,
}

impl Settings {
    pub fn from_conf(conf: &ConsoleConf) -> Self {
        Self {
            appliance_name: conf.appliance_name.clone(),
            networking: conf.networking,
            ..Self::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            appliance_name: ConsoleConf::default().appliance_name,
            networking: true,
            advanced_enabled: true,
            interactive: true,
            remote_session: false,
            services_template: DEFAULT_SERVICES_TEMPLATE.to_string(),
        }
    }
}

/// Service context - holds all dependencies
///
/// The front-end creates this context and injects its platform implementations.
/// Collaborators are shared through `Rc`: the console is single-threaded.
pub struct ServiceContext {
    /// Renderer wrapped with the escape convention
    pub console: Console,
    pub network: Rc<dyn NetworkInfo>,
    pub control: Rc<dyn NetworkControl>,
    pub default_route: Rc<dyn DefaultRouteSelector>,
    pub lifecycle: Rc<dyn Lifecycle>,
    pub plugin_runner: Rc<dyn PluginRunner>,
    pub settings: Settings,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(
        console: Console,
        network: Rc<dyn NetworkInfo>,
        control: Rc<dyn NetworkControl>,
        default_route: Rc<dyn DefaultRouteSelector>,
        lifecycle: Rc<dyn Lifecycle>,
        plugin_runner: Rc<dyn PluginRunner>,
        settings: Settings,
    ) -> Self {
        Self {
            console,
            network,
            control,
            default_route,
            lifecycle,
            plugin_runner,
            settings,
        }
    }
}
