//! Dialog keys: the names the navigator moves between
//!
//! Built-in screens form a closed enum; plugin screens are addressed by their
//! path inside the plugin root. `Display` produces the classic string form
//! (`usage`, `_adv_reboot`, `_ifconf_staticip`, plugin path) used in logs and
//! diagnostics.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Address of a discovered plugin unit
///
/// Absolute path below the registry root with any file extension removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginKey(PathBuf);

impl PluginKey {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Whether this key lives below `root`
    pub fn is_within(&self, root: &Path) -> bool {
        self.0.starts_with(root)
    }
}

impl fmt::Display for PluginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Entries of the Advanced menu that are not plugins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvancedAction {
    Networking,
    Install,
    Reboot,
    Shutdown,
    Quit,
}

impl AdvancedAction {
    /// Menu label of the action
    pub fn label(self) -> &'static str {
        match self {
            Self::Networking => "Networking",
            Self::Install => "Install",
            Self::Reboot => "Reboot",
            Self::Shutdown => "Shutdown",
            Self::Quit => "Quit",
        }
    }

    /// Map a selected menu label back to its action.
    ///
    /// Labels are compared case-insensitively; anything else is a dispatch error.
    pub fn from_label(label: &str) -> CoreResult<Self> {
        match label.to_lowercase().as_str() {
            "networking" => Ok(Self::Networking),
            "install" => Ok(Self::Install),
            "reboot" => Ok(Self::Reboot),
            "shutdown" => Ok(Self::Shutdown),
            "quit" => Ok(Self::Quit),
            other => Err(CoreError::Dispatch(format!("_adv_{other}"))),
        }
    }
}

/// Entries of the per-interface configuration menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfconfAction {
    Dhcp,
    StaticIp,
    Default,
}

impl IfconfAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dhcp => "DHCP",
            Self::StaticIp => "StaticIP",
            Self::Default => "Default",
        }
    }

    pub fn from_label(label: &str) -> CoreResult<Self> {
        match label.to_lowercase().as_str() {
            "dhcp" => Ok(Self::Dhcp),
            "staticip" => Ok(Self::StaticIp),
            "default" => Ok(Self::Default),
            other => Err(CoreError::Dispatch(format!("_ifconf_{other}"))),
        }
    }
}

/// Built-in screens of the console
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Landing screen with the appliance services summary
    Usage,
    /// Advanced menu (networking, plugins, lifecycle)
    Advanced,
    /// Choose a network adapter
    Networking,
    /// Quit confirmation reached from the usage screen
    Quit,
    /// Configuration overview of one interface
    Ifconf { ifname: String },
    /// An Advanced menu action
    AdvancedAction(AdvancedAction),
    /// An action on one interface
    IfconfAction { ifname: String, action: IfconfAction },
}

/// Identifier of the next screen to show
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DialogKey {
    Builtin(Screen),
    Plugin(PluginKey),
}

impl DialogKey {
    pub fn is_plugin(&self) -> bool {
        matches!(self, Self::Plugin(_))
    }
}

impl From<Screen> for DialogKey {
    fn from(screen: Screen) -> Self {
        Self::Builtin(screen)
    }
}

impl From<PluginKey> for DialogKey {
    fn from(key: PluginKey) -> Self {
        Self::Plugin(key)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => f.write_str("usage"),
            Self::Advanced => f.write_str("advanced"),
            Self::Networking => f.write_str("networking"),
            Self::Quit => f.write_str("quit"),
            Self::Ifconf { ifname } => write!(f, "ifconf({ifname})"),
            Self::AdvancedAction(action) => write!(f, "_adv_{}", action.label().to_lowercase()),
            Self::IfconfAction { ifname, action } => {
                write!(f, "_ifconf_{}({ifname})", action.label().to_lowercase())
            }
        }
    }
}

impl fmt::Display for DialogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(screen) => screen.fmt(f),
            Self::Plugin(key) => key.fmt(f),
        }
    }
}
