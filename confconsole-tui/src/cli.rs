//! 命令行参数

use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_CONFIG_DIR: &str = "/etc/confconsole";
pub const DEFAULT_PLUGIN_DIR: &str = "/usr/lib/confconsole/plugins.d";

/// Appliance configuration console
#[derive(Debug, Clone, Parser)]
#[command(name = "confconsole", version, about)]
pub struct Cli {
    /// Show only the usage screen (no Advanced menu)
    #[arg(long)]
    pub usage: bool,

    /// Run plugins without the text interface
    #[arg(short = 'n', long = "nointeractive")]
    pub nointeractive: bool,

    /// Run a single plugin by name and exit
    #[arg(long, value_name = "NAME")]
    pub plugin: Option<String>,

    /// Directory holding confconsole.toml and services.txt
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    /// Root of the plugin tree
    #[arg(long, value_name = "DIR", default_value = DEFAULT_PLUGIN_DIR)]
    pub plugin_dir: PathBuf,
}

impl Cli {
    pub fn interactive(&self) -> bool {
        !self.nointeractive
    }

    /// 是否启动界面：只有 `-n --plugin` 不接管终端
    pub fn uses_tui(&self) -> bool {
        !(self.nointeractive && self.plugin.is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["confconsole"]).unwrap();
        assert!(!cli.usage);
        assert!(cli.interactive());
        assert_eq!(cli.plugin, None);
        assert_eq!(cli.config_dir, PathBuf::from(DEFAULT_CONFIG_DIR));
        assert_eq!(cli.plugin_dir, PathBuf::from(DEFAULT_PLUGIN_DIR));
    }

    #[test]
    fn plugin_without_tui() {
        let cli = Cli::try_parse_from(["confconsole", "-n", "--plugin", "secupdates"]).unwrap();
        assert!(!cli.interactive());
        assert!(!cli.uses_tui());
        assert_eq!(cli.plugin.as_deref(), Some("secupdates"));
    }

    #[test]
    fn nointeractive_alone_still_uses_tui() {
        let cli = Cli::try_parse_from(["confconsole", "-n"]).unwrap();
        assert!(!cli.interactive());
        assert!(cli.uses_tui());

        let cli = Cli::try_parse_from(["confconsole", "--plugin", "secupdates"]).unwrap();
        assert!(cli.uses_tui());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["confconsole", "--bogus"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn help_is_not_an_error() {
        let err = Cli::try_parse_from(["confconsole", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }
}
