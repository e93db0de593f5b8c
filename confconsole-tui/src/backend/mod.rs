//! 系统后端
//!
//! confconsole-core 中各 trait 的 Linux 实现：
//! - `ConfStore`：TOML 配置与默认网卡
//! - `SysNetInfo`：网络状态读取
//! - `InterfacesFile`：网络配置写入
//! - `SystemLifecycle`：重启、关机与安装程序
//! - `ProcessPluginRunner`：插件进程

mod command;
mod conf_store;
mod ifutil;
mod lifecycle;
mod netinfo;
mod plugin_runner;

pub use conf_store::ConfStore;
pub use ifutil::InterfacesFile;
pub use lifecycle::SystemLifecycle;
pub use netinfo::SysNetInfo;
pub use plugin_runner::ProcessPluginRunner;
