//! 插件执行器
//!
//! 插件是可执行文件，直接继承终端运行。

use std::process::Command;

use confconsole_core::registry::Plugin;
use confconsole_core::traits::PluginRunner;
use confconsole_core::{CoreError, CoreResult};

pub const INTERACTIVE_ENV: &str = "CONFCONSOLE_INTERACTIVE";

pub struct ProcessPluginRunner;

impl PluginRunner for ProcessPluginRunner {
    fn run(&self, plugin: &Plugin, interactive: bool) -> CoreResult<()> {
        log::info!(
            "Running plugin {} (interactive: {interactive})",
            plugin.path.display()
        );
        let status = Command::new(&plugin.path)
            .env(INTERACTIVE_ENV, if interactive { "1" } else { "0" })
            .status()
            .map_err(|e| {
                CoreError::Collaborator(format!("cannot run {}: {e}", plugin.path.display()))
            })?;

        if !status.success() {
            return Err(CoreError::Collaborator(format!(
                "plugin {} exited with {status}",
                plugin.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use confconsole_core::types::PluginKey;

    use super::*;

    fn script(dir: &Path, name: &str, body: &str) -> Plugin {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        Plugin {
            key: PluginKey::new(&path),
            path,
            name: name.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn interactive_flag_is_exported() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = script(dir.path(), "check", "test \"$CONFCONSOLE_INTERACTIVE\" = 0");

        assert!(ProcessPluginRunner.run(&plugin, false).is_ok());
        assert!(ProcessPluginRunner.run(&plugin, true).is_err());
    }

    #[test]
    fn non_zero_exit_is_collaborator_error() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = script(dir.path(), "broken", "exit 3");

        let err = ProcessPluginRunner.run(&plugin, true).unwrap_err();
        assert!(matches!(err, CoreError::Collaborator(ref m) if m.starts_with("plugin broken")));
    }
}
