//! /etc/network/interfaces 读写
//!
//! 改写目标网卡的配置段后，通过 ifdown/ifup 使其生效。
//! 实现 confconsole-core 的 NetworkControl trait。

use std::fs;
use std::io;
use std::path::PathBuf;

use confconsole_core::traits::NetworkControl;
use confconsole_core::types::StaticIpConfig;
use confconsole_core::CoreResult;

use super::command;

pub const INTERFACES_FILE: &str = "/etc/network/interfaces";

/// 开始一个新配置段的关键字
const STANZA_KEYWORDS: [&str; 5] = ["iface", "auto", "mapping", "source", "source-directory"];

pub struct InterfacesFile {
    path: PathBuf,
}

impl InterfacesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_stanza(&self, ifname: &str, stanza: &str) -> CoreResult<()> {
        let current = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        fs::write(&self.path, rewrite_stanza(&current, ifname, stanza))?;
        log::info!("Rewrote {ifname} in {}", self.path.display());
        Ok(())
    }

    /// 重启网卡；ifup 失败时返回错误消息
    fn restart(ifname: &str) -> CoreResult<Option<String>> {
        bring_down(ifname);
        command::refusal("ifup", &[ifname])
    }
}

impl Default for InterfacesFile {
    fn default() -> Self {
        Self::new(INTERFACES_FILE)
    }
}

/// 网卡本来就未启用时 ifdown 会失败，忽略即可
fn bring_down(ifname: &str) {
    match command::refusal("ifdown", &[ifname]) {
        Ok(None) => {}
        Ok(Some(message)) => log::debug!("{message}"),
        Err(e) => log::warn!("{e}"),
    }
}

impl NetworkControl for InterfacesFile {
    fn set_static(&self, ifname: &str, config: &StaticIpConfig) -> CoreResult<Option<String>> {
        self.write_stanza(ifname, &static_stanza(ifname, config))?;
        Self::restart(ifname)
    }

    fn set_dhcp(&self, ifname: &str) -> CoreResult<Option<String>> {
        self.write_stanza(ifname, &method_stanza(ifname, "dhcp"))?;
        Self::restart(ifname)
    }

    fn unconfigure(&self, ifname: &str) -> CoreResult<()> {
        self.write_stanza(ifname, &method_stanza(ifname, "manual"))?;
        bring_down(ifname);
        command::output("ip", &["addr", "flush", "dev", ifname])?;
        Ok(())
    }
}

pub fn static_stanza(ifname: &str, config: &StaticIpConfig) -> String {
    let mut stanza = method_stanza(ifname, "static");
    stanza.push_str(&format!("    address {}\n", config.address));
    stanza.push_str(&format!("    netmask {}\n", config.netmask));
    if let Some(gateway) = config.gateway {
        stanza.push_str(&format!("    gateway {gateway}\n"));
    }
    if !config.nameservers.is_empty() {
        let servers: Vec<String> = config.nameservers.iter().map(ToString::to_string).collect();
        stanza.push_str(&format!("    dns-nameservers {}\n", servers.join(" ")));
    }
    stanza
}

pub fn method_stanza(ifname: &str, method: &str) -> String {
    format!("auto {ifname}\niface {ifname} inet {method}\n")
}

fn starts_stanza(word: &str) -> bool {
    STANZA_KEYWORDS.contains(&word) || word.starts_with("allow-")
}

/// 用 `stanza` 替换 `ifname` 原有的配置段，其它内容保持不变
pub fn rewrite_stanza(text: &str, ifname: &str, stanza: &str) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut in_block = false;

    for line in text.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(&keyword) = words.first().filter(|w| starts_stanza(w)) else {
            if !in_block {
                kept.push(line.to_string());
            }
            continue;
        };
        in_block = false;

        if keyword == "iface" && words.get(1) == Some(&ifname) {
            in_block = true;
            continue;
        }
        if (keyword == "auto" || keyword.starts_with("allow-")) && words[1..].contains(&ifname) {
            let rest: Vec<&str> = words[1..].iter().copied().filter(|w| *w != ifname).collect();
            if !rest.is_empty() {
                kept.push(format!("{keyword} {}", rest.join(" ")));
            }
            continue;
        }
        kept.push(line.to_string());
    }

    while kept.last().is_some_and(|l| l.trim().is_empty()) {
        kept.pop();
    }
    let mut out = kept.join("\n");
    if !out.is_empty() {
        out.push_str("\n\n");
    }
    out.push_str(stanza);
    out
}

/// 读取配置方式，如 `iface eth0 inet dhcp` 中的 `dhcp`
pub fn parse_iface_method(text: &str, ifname: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["iface", name, _family, method, ..] if *name == ifname => Some((*method).to_string()),
            _ => None,
        }
    })
}
