//! 配置仓库
//!
//! 使用 TOML 文件存储控制台配置，`services.txt` 存放用法页模板。
//! 实现 confconsole-core 的 DefaultRouteSelector trait（持久化 `default_nic`）。

use std::fs;
use std::path::PathBuf;

use confconsole_core::services::DEFAULT_SERVICES_TEMPLATE;
use confconsole_core::traits::DefaultRouteSelector;
use confconsole_core::{ConsoleConf, CoreError, CoreResult};

pub const CONF_FILE: &str = "confconsole.toml";
pub const SERVICES_FILE: &str = "services.txt";

/// 基于配置目录的配置仓库
pub struct ConfStore {
    dir: PathBuf,
}

impl ConfStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn conf_path(&self) -> PathBuf {
        self.dir.join(CONF_FILE)
    }

    /// 加载配置，文件不存在时返回默认值
    pub fn load(&self) -> CoreResult<ConsoleConf> {
        let path = self.conf_path();
        if !path.exists() {
            return Ok(ConsoleConf::default());
        }

        let content = fs::read_to_string(&path)?;
        ConsoleConf::from_toml_str(&content)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
    }

    /// 保存配置
    pub fn save(&self, conf: &ConsoleConf) -> CoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.conf_path(), conf.to_toml_string()?)?;
        Ok(())
    }

    /// 用法页模板，文件不存在时使用内置模板
    pub fn services_template(&self) -> String {
        fs::read_to_string(self.dir.join(SERVICES_FILE))
            .unwrap_or_else(|_| DEFAULT_SERVICES_TEMPLATE.to_string())
    }
}

impl DefaultRouteSelector for ConfStore {
    fn get_default_interface(&self) -> Option<String> {
        match self.load() {
            Ok(conf) => conf.default_nic,
            Err(e) => {
                log::warn!("Cannot read default interface: {e}");
                None
            }
        }
    }

    fn set_default_interface(&self, ifname: &str) -> CoreResult<()> {
        let mut conf = self.load()?;
        conf.default_nic = Some(ifname.to_string());
        self.save(&conf)
    }
}
