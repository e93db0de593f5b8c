//! 系统生命周期：重启、关机与安装程序

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use confconsole_core::traits::Lifecycle;
use confconsole_core::{CoreError, CoreResult};

pub const INSTALLER: &str = "/usr/bin/di-live";
pub const KERNEL_CMDLINE: &str = "/proc/cmdline";

pub struct SystemLifecycle {
    installer: PathBuf,
    cmdline: PathBuf,
}

impl SystemLifecycle {
    pub fn new() -> Self {
        Self {
            installer: PathBuf::from(INSTALLER),
            cmdline: PathBuf::from(KERNEL_CMDLINE),
        }
    }

    fn power(option: &str) -> CoreResult<()> {
        let script = power_command(option, env::var("FGVT").ok().as_deref());
        log::info!("Executing: {script}");
        let status = Command::new("sh").arg("-c").arg(&script).status()?;
        if !status.success() {
            return Err(CoreError::Collaborator(format!("{script} failed ({status})")));
        }
        Ok(())
    }
}

impl Default for SystemLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// 设置了 FGVT 时先切回前台虚拟终端
fn power_command(option: &str, fgvt: Option<&str>) -> String {
    let shutdown = format!("shutdown {option} now");
    match fgvt {
        Some(vt) if !vt.is_empty() => format!("chvt {vt}; {shutdown}"),
        _ => shutdown,
    }
}

/// 仅在 live 系统上提供安装程序
fn is_live_boot(cmdline: &str) -> bool {
    cmdline.split_whitespace().any(|arg| arg == "boot=live")
}

impl Lifecycle for SystemLifecycle {
    fn reboot(&self) -> CoreResult<()> {
        Self::power("-r")
    }

    fn shutdown(&self) -> CoreResult<()> {
        Self::power("-h")
    }

    fn run_installer(&self) -> CoreResult<()> {
        let status = Command::new(&self.installer).status()?;
        if !status.success() {
            return Err(CoreError::Collaborator(format!(
                "{} exited with {status}",
                self.installer.display()
            )));
        }
        Ok(())
    }

    fn installer_available(&self) -> bool {
        if !self.installer.exists() {
            return false;
        }
        fs::read_to_string(&self.cmdline).is_ok_and(|cmdline| is_live_boot(&cmdline))
    }
}
