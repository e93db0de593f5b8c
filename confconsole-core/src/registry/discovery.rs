//! Filesystem discovery of plugin units
//!
//! Layout of a plugin root:
//!
//! ```text
//! plugins.d/
//! ├── Hostname                 executable  -> Leaf "Hostname"
//! └── System_Settings/         directory   -> Group "System_Settings"
//!     ├── description          first line is the group description
//!     └── secupdates.sh        executable  -> Leaf "secupdates"
//! ```
//!
//! A leaf's description is the first `#` comment after an optional shebang.

use std::fs::{File, Metadata};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{CoreError, CoreResult};
use crate::registry::unit::{CapabilityUnit, Plugin, PluginGroup};
use crate::types::PluginKey;

/// File inside a group directory holding its description
pub const GROUP_DESCRIPTION_FILE: &str = "description";

/// Bytes of a leaf scanned for its description comment
const DESCRIPTION_SCAN_BYTES: u64 = 4096;

/// Discover the units directly below `dir`, recursing into groups.
pub(crate) fn discover_dir(dir: &Path) -> CoreResult<Vec<CapabilityUnit>> {
    let mut units = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry
            .map_err(|e| CoreError::Registry(format!("cannot read {}: {e}", dir.display())))?;

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_dir() {
            let children = discover_dir(path)?;
            units.push(CapabilityUnit::Group(PluginGroup {
                key: PluginKey::new(path),
                path: path.to_path_buf(),
                name: file_name,
                description: group_description(path),
                children,
            }));
            continue;
        }

        if !entry.file_type().is_file() || file_name == GROUP_DESCRIPTION_FILE {
            continue;
        }

        let metadata = entry
            .metadata()
            .map_err(|e| CoreError::Registry(format!("cannot stat {}: {e}", path.display())))?;
        if !is_executable(&metadata) {
            log::debug!("Skipping non-executable plugin file {}", path.display());
            continue;
        }

        let name = path
            .file_stem()
            .map_or_else(|| file_name.clone(), |stem| stem.to_string_lossy().into_owned());

        units.push(CapabilityUnit::Leaf(Plugin {
            key: PluginKey::new(path.with_extension("")),
            path: path.to_path_buf(),
            name,
            description: leaf_description(path),
        }));
    }

    Ok(units)
}

#[cfg(unix)]
fn is_executable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &Metadata) -> bool {
    true
}

fn group_description(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(GROUP_DESCRIPTION_FILE))
        .ok()
        .and_then(|text| text.lines().next().map(|line| line.trim().to_string()))
        .unwrap_or_default()
}

fn leaf_description(path: &Path) -> String {
    let Ok(file) = File::open(path) else {
        return String::new();
    };

    BufReader::new(file.take(DESCRIPTION_SCAN_BYTES))
        .lines()
        .map_while(Result::ok)
        .filter(|line| !line.starts_with("#!"))
        .find_map(|line| {
            let text = line.strip_prefix('#')?.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .unwrap_or_default()
}
