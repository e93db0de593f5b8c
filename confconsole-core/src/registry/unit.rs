//! Discovered plugin units

use std::path::PathBuf;

use crate::types::{MenuItem, PluginKey};

/// Leaf plugin: one runnable executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    pub key: PluginKey,
    /// Executable to run
    pub path: PathBuf,
    /// File stem, used for lookups by name
    pub name: String,
    pub description: String,
}

/// Group plugin: a directory of further units, shown as its own menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginGroup {
    pub key: PluginKey,
    pub path: PathBuf,
    pub name: String,
    pub description: String,
    pub children: Vec<CapabilityUnit>,
}

/// A discovered plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityUnit {
    Leaf(Plugin),
    Group(PluginGroup),
}

impl CapabilityUnit {
    pub fn key(&self) -> &PluginKey {
        match self {
            Self::Leaf(plugin) => &plugin.key,
            Self::Group(group) => &group.key,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(plugin) => &plugin.name,
            Self::Group(group) => &group.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Leaf(plugin) => &plugin.description,
            Self::Group(group) => &group.description,
        }
    }

    /// Menu label: the name with its first character upper-cased
    pub fn label(&self) -> String {
        let mut chars = self.name().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// The single entry this unit contributes to its parent menu
    pub fn menu_item(&self) -> MenuItem {
        MenuItem::new(self.label(), self.description())
    }

    pub fn as_leaf(&self) -> Option<&Plugin> {
        match self {
            Self::Leaf(plugin) => Some(plugin),
            Self::Group(_) => None,
        }
    }
}
