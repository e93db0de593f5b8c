//!
//! app.rs
//! 控制台启动流程
//!
//!
//! 启动时依次：
//!
//!     ConfStore::load()                   // 读取 confconsole.toml
//!     CapabilityRegistry::discover()      // 扫描插件目录
//!     initial_dialog()                    // 决定第一个界面：usage 或指定插件
//!
//! 之后分两种情况：
//!
//!     --plugin NAME -n                    // 不启动界面，直接运行插件
//!     其它                                 // 组装 ServiceContext，交给 Navigator::run()
//!
//!
//! Navigator 的主循环在 confconsole-core 中：
//! loop {
//!
//!     resolve(current)                    // 找到当前界面（内置或插件）
//!     dispatch()                          // 通过 TerminalRenderer 显示对话框
//!     current = 返回的下一个 DialogKey
//!
//! }

use std::env;
use std::rc::Rc;

use anyhow::{bail, Context, Result};

use confconsole_core::services::Settings;
use confconsole_core::traits::{Console, DefaultRouteSelector, PluginRunner};
use confconsole_core::types::Screen;
use confconsole_core::{
    CapabilityRegistry, ConsoleConf, DialogKey, Navigator, Plugin, ServiceContext,
};

use crate::backend::{ConfStore, InterfacesFile, ProcessPluginRunner, SysNetInfo, SystemLifecycle};
use crate::cli::Cli;
use crate::renderer::TerminalRenderer;

/// 运行控制台
pub fn run(cli: &Cli) -> Result<()> {
    let store = Rc::new(ConfStore::new(&cli.config_dir));
    let conf = store.load()?;
    let registry = CapabilityRegistry::discover(&cli.plugin_dir)
        .with_context(|| format!("cannot load plugins from {}", cli.plugin_dir.display()))?;

    let initial = initial_dialog(cli, &registry)?;

    // 非交互模式：不接管终端
    if let DialogKey::Plugin(key) = &initial {
        if !cli.uses_tui() {
            let plugin = registry
                .get(key)
                .and_then(|unit| unit.as_leaf())
                .with_context(|| format!("plugin {key} disappeared"))?;
            log::info!("Running {} without the console", plugin.name);
            ProcessPluginRunner.run(plugin, false)?;
            return Ok(());
        }
    }

    let settings = session_settings(cli, &conf, store.services_template());
    let backtitle = format!("{} - Configuration Console", conf.appliance_name);
    let renderer = TerminalRenderer::new(backtitle, conf.copy_paste)?;

    let default_route: Rc<dyn DefaultRouteSelector> = store;
    let ctx = ServiceContext::new(
        Console::new(Box::new(renderer)),
        Rc::new(SysNetInfo::new(Rc::clone(&default_route), conf.publicip_cmd.clone())),
        Rc::new(InterfacesFile::default()),
        default_route,
        Rc::new(SystemLifecycle::new()),
        Rc::new(ProcessPluginRunner),
        settings,
    );

    let mut navigator = Navigator::new(ctx, &registry);
    navigator.run(initial)?;
    Ok(())
}

fn session_settings(cli: &Cli, conf: &ConsoleConf, services_template: String) -> Settings {
    Settings {
        advanced_enabled: !cli.usage,
        interactive: cli.interactive(),
        remote_session: env::var_os("SSH_CONNECTION").is_some(),
        services_template,
        ..Settings::from_conf(conf)
    }
}

/// 第一个界面：`--plugin` 指定的叶子插件，否则是 usage
pub fn initial_dialog(cli: &Cli, registry: &CapabilityRegistry) -> Result<DialogKey> {
    let Some(name) = cli.plugin.as_deref() else {
        return Ok(Screen::Usage.into());
    };

    let matches: Vec<&Plugin> = registry
        .get_by_name(name)
        .into_iter()
        .filter_map(|unit| unit.as_leaf())
        .collect();

    match matches.as_slice() {
        [] => bail!("no such plugin: {name}"),
        [plugin] => Ok(plugin.key.clone().into()),
        _ => bail!("plugin name ambiguous: {name}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use confconsole_core::registry::PluginGroup;
    use confconsole_core::{CapabilityUnit, PluginKey};

    use super::*;

    const ROOT: &str = "/usr/lib/confconsole/plugins.d";

    fn leaf(path: &str) -> CapabilityUnit {
        let path = Path::new(ROOT).join(path);
        let name = path.file_stem().unwrap().to_string_lossy().into_owned();
        CapabilityUnit::Leaf(Plugin {
            key: PluginKey::new(&path),
            path,
            name,
            description: String::new(),
        })
    }

    fn registry() -> CapabilityRegistry {
        let group_path = PathBuf::from(ROOT).join("System_settings");
        let group = CapabilityUnit::Group(PluginGroup {
            key: PluginKey::new(&group_path),
            path: group_path,
            name: "System_settings".into(),
            description: String::new(),
            children: vec![leaf("System_settings/hostname.py"), leaf("System_settings/Mail.py")],
        });
        let units = vec![group, leaf("mail.py"), leaf("secupdates.py")];
        CapabilityRegistry::from_units(ROOT, units).unwrap()
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("confconsole").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn usage_is_the_default_screen() {
        assert_eq!(initial_dialog(&cli(&[]), &registry()).unwrap(), Screen::Usage.into());
    }

    #[test]
    fn plugin_name_selects_leaf() {
        let key = initial_dialog(&cli(&["--plugin", "Hostname"]), &registry()).unwrap();
        assert_eq!(
            key,
            PluginKey::new(Path::new(ROOT).join("System_settings/hostname.py")).into()
        );
    }

    #[test]
    fn unknown_or_group_name_is_rejected() {
        let err = initial_dialog(&cli(&["--plugin", "nope"]), &registry()).unwrap_err();
        assert_eq!(err.to_string(), "no such plugin: nope");
        assert!(initial_dialog(&cli(&["--plugin", "System_settings"]), &registry()).is_err());
    }

    #[test]
    fn ambiguous_name_is_rejected() {
        let err = initial_dialog(&cli(&["--plugin", "mail"]), &registry()).unwrap_err();
        assert_eq!(err.to_string(), "plugin name ambiguous: mail");
    }

    #[test]
    fn settings_follow_flags() {
        let conf = ConsoleConf {
            networking: false,
            ..ConsoleConf::default()
        };
        let settings = session_settings(&cli(&["--usage", "-n"]), &conf, "tpl".into());
        assert!(!settings.advanced_enabled);
        assert!(!settings.interactive);
        assert!(!settings.networking);
        assert_eq!(settings.services_template, "tpl");
    }
}
