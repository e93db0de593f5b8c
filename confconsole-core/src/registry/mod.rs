//! Capability registry: plugins discovered from a directory tree
//!
//! The registry owns the discovered tree. A flattened index maps every
//! [`PluginKey`] to the unit's position in the tree, so lookups hand out
//! borrowed references and nothing is duplicated.

mod discovery;
mod unit;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::types::PluginKey;

pub use discovery::GROUP_DESCRIPTION_FILE;
pub use unit::{CapabilityUnit, Plugin, PluginGroup};

#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    /// Child indices from the root down to the unit
    address: Vec<usize>,
    /// Enclosing group, `None` for top-level units
    parent: Option<PluginKey>,
}

/// Plugin registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityRegistry {
    root: PathBuf,
    units: Vec<CapabilityUnit>,
    index: BTreeMap<PluginKey, IndexEntry>,
}

impl CapabilityRegistry {
    /// Registry with no plugins
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            units: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// Discover all plugins below `root`.
    ///
    /// A missing root yields an empty registry.
    pub fn discover(root: impl Into<PathBuf>) -> CoreResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            log::warn!("Plugin directory {} not found, no plugins loaded", root.display());
            return Ok(Self::empty(root));
        }

        let units = discovery::discover_dir(&root)?;
        let registry = Self::from_units(root, units)?;
        log::info!(
            "Discovered {} plugin unit(s) in {}",
            registry.len(),
            registry.root.display()
        );
        Ok(registry)
    }

    /// Build a registry from an already assembled tree.
    ///
    /// Fails when two units share a key or a unit lies outside `root`.
    pub fn from_units(root: impl Into<PathBuf>, units: Vec<CapabilityUnit>) -> CoreResult<Self> {
        let root = root.into();
        let mut index = BTreeMap::new();
        index_units(&root, &units, &[], None, &mut index)?;
        Ok(Self { root, units, index })
    }

    /// Discover the tree again from the same root
    pub fn rescan(&mut self) -> CoreResult<()> {
        *self = Self::discover(self.root.clone())?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Units directly below the root, in discovery order
    pub fn top_level(&self) -> &[CapabilityUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Look up a unit anywhere in the tree
    pub fn get(&self, key: &PluginKey) -> Option<&CapabilityUnit> {
        let entry = self.index.get(key)?;
        self.unit_at(&entry.address)
    }

    /// Enclosing group of a unit; `None` for top-level or unknown keys
    pub fn parent_of(&self, key: &PluginKey) -> Option<&PluginKey> {
        self.index.get(key)?.parent.as_ref()
    }

    /// Flattened key → unit view, ordered by key
    pub fn entries(&self) -> impl Iterator<Item = (&PluginKey, &CapabilityUnit)> {
        self.index
            .iter()
            .filter_map(|(key, entry)| self.unit_at(&entry.address).map(|unit| (key, unit)))
    }

    /// All units whose name matches, ignoring ASCII case.
    ///
    /// Returns every match; choosing between several is the caller's job.
    pub fn get_by_name(&self, name: &str) -> Vec<&CapabilityUnit> {
        self.entries()
            .map(|(_, unit)| unit)
            .filter(|unit| unit.name().eq_ignore_ascii_case(name))
            .collect()
    }

    fn unit_at(&self, address: &[usize]) -> Option<&CapabilityUnit> {
        let (first, rest) = address.split_first()?;
        let mut unit = self.units.get(*first)?;
        for &i in rest {
            match unit {
                CapabilityUnit::Group(group) => unit = group.children.get(i)?,
                CapabilityUnit::Leaf(_) => return None,
            }
        }
        Some(unit)
    }
}

fn index_units(
    root: &Path,
    units: &[CapabilityUnit],
    prefix: &[usize],
    parent: Option<&PluginKey>,
    index: &mut BTreeMap<PluginKey, IndexEntry>,
) -> CoreResult<()> {
    for (i, unit) in units.iter().enumerate() {
        let key = unit.key();
        if !key.is_within(root) {
            return Err(CoreError::Registry(format!(
                "plugin {key} is outside of {}",
                root.display()
            )));
        }
        if index.contains_key(key) {
            return Err(CoreError::Registry(format!("duplicate plugin key: {key}")));
        }

        let mut address = prefix.to_vec();
        address.push(i);

        index.insert(
            key.clone(),
            IndexEntry {
                address: address.clone(),
                parent: parent.cloned(),
            },
        );

        if let CapabilityUnit::Group(group) = unit {
            index_units(root, &group.children, &address, Some(key), index)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    fn write_plugin(path: &Path, body: &str, executable: bool) {
        fs::write(path, body).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = if executable { 0o755 } else { 0o644 };
            fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
        }
        #[cfg(not(unix))]
        let _ = executable;
    }

    fn sample_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write_plugin(
            &root.join("hostname.sh"),
            "#!/bin/sh\n# Change the appliance hostname\nhostname\n",
            true,
        );
        write_plugin(&root.join("README"), "not a plugin\n", false);
        write_plugin(&root.join(".hidden"), "#!/bin/sh\n", true);

        let group = root.join("System_Settings");
        fs::create_dir(&group).unwrap();
        fs::write(group.join(GROUP_DESCRIPTION_FILE), "System settings\nmore\n").unwrap();
        write_plugin(
            &group.join("secupdates.sh"),
            "#!/bin/sh\n#\n# Config SecUpdate behaviour\n",
            true,
        );

        let nested = group.join("Advanced");
        fs::create_dir(&nested).unwrap();
        write_plugin(&nested.join("tune"), "#!/bin/sh\necho\n", true);

        dir
    }

    // ==================== discovery tests ====================

    #[test]
    fn discovers_leaves_and_groups() {
        let dir = sample_tree();
        let registry = CapabilityRegistry::discover(dir.path()).unwrap();

        let top: Vec<_> = registry.top_level().iter().map(CapabilityUnit::name).collect();
        assert_eq!(top, vec!["System_Settings", "hostname"]);

        let hostname = registry
            .get(&PluginKey::new(dir.path().join("hostname")))
            .unwrap();
        assert_eq!(hostname.description(), "Change the appliance hostname");
        assert_eq!(hostname.label(), "Hostname");

        let group = registry
            .get(&PluginKey::new(dir.path().join("System_Settings")))
            .unwrap();
        assert_eq!(group.description(), "System settings");
        let CapabilityUnit::Group(group) = group else {
            unreachable!("System_Settings is a directory");
        };
        assert_eq!(group.children.len(), 2);

        // nested leaf keeps its parent
        let tune = PluginKey::new(dir.path().join("System_Settings/Advanced/tune"));
        assert!(registry.get(&tune).is_some());
        assert_eq!(
            registry.parent_of(&tune),
            Some(&PluginKey::new(dir.path().join("System_Settings/Advanced")))
        );

        // 2 top-level + secupdates + Advanced + tune
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn leaf_description_skips_blank_comments() {
        let dir = sample_tree();
        let registry = CapabilityRegistry::discover(dir.path()).unwrap();
        let key = PluginKey::new(dir.path().join("System_Settings/secupdates"));
        assert_eq!(
            registry.get(&key).unwrap().description(),
            "Config SecUpdate behaviour"
        );
    }

    #[test]
    fn rediscovery_is_idempotent() {
        let dir = sample_tree();
        let first = CapabilityRegistry::discover(dir.path()).unwrap();
        let mut second = CapabilityRegistry::discover(dir.path()).unwrap();
        assert_eq!(first, second);

        second.rescan().unwrap();
        let a: Vec<_> = first.entries().collect();
        let b: Vec<_> = second.entries().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = CapabilityRegistry::discover(dir.path().join("absent")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn colliding_stems_fail_discovery() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(&dir.path().join("tool.sh"), "#!/bin/sh\n", true);
        write_plugin(&dir.path().join("tool.py"), "#!/usr/bin/python3\n", true);

        let err = CapabilityRegistry::discover(dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::Registry(_)));
    }

    // ==================== injected tree tests ====================

    fn leaf(root: &Path, name: &str) -> CapabilityUnit {
        CapabilityUnit::Leaf(Plugin {
            key: PluginKey::new(root.join(name)),
            path: root.join(name),
            name: name.to_string(),
            description: String::new(),
        })
    }

    #[test]
    fn injected_duplicate_is_rejected() {
        let root = Path::new("/plugins");
        let units = vec![leaf(root, "a"), leaf(root, "a")];
        let err = CapabilityRegistry::from_units(root, units).unwrap_err();
        assert!(matches!(err, CoreError::Registry(ref msg) if msg.contains("duplicate")));
    }

    #[test]
    fn duplicate_inside_group_is_rejected() {
        let root = Path::new("/plugins");
        let group = CapabilityUnit::Group(PluginGroup {
            key: PluginKey::new(root.join("g")),
            path: root.join("g"),
            name: "g".into(),
            description: String::new(),
            children: vec![leaf(root, "a")],
        });
        let err = CapabilityRegistry::from_units(root, vec![leaf(root, "a"), group]).unwrap_err();
        assert!(matches!(err, CoreError::Registry(_)));
    }

    #[test]
    fn unit_outside_root_is_rejected() {
        let units = vec![leaf(Path::new("/elsewhere"), "a")];
        assert!(CapabilityRegistry::from_units("/plugins", units).is_err());
    }

    #[test]
    fn get_by_name_returns_all_matches() {
        let root = Path::new("/plugins");
        let group = CapabilityUnit::Group(PluginGroup {
            key: PluginKey::new(root.join("g")),
            path: root.join("g"),
            name: "g".into(),
            description: String::new(),
            children: vec![leaf(&root.join("g"), "backup")],
        });
        let registry =
            CapabilityRegistry::from_units(root, vec![leaf(root, "Backup"), group]).unwrap();

        assert_eq!(registry.get_by_name("backup").len(), 2);
        assert_eq!(registry.get_by_name("g").len(), 1);
        assert!(registry.get_by_name("missing").is_empty());
    }
}
