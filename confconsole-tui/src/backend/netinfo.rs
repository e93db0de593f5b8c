//! 网络状态读取
//!
//! 数据来源：
//! - `/sys/class/net`：网卡列表与网桥成员
//! - iproute2 (`ip`)：地址与默认网关
//! - `/etc/resolv.conf`：DNS 服务器
//! - `/etc/network/interfaces`：配置方式

use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::rc::Rc;

use confconsole_core::traits::{DefaultRouteSelector, NetworkInfo};
use confconsole_core::types::InterfaceConfig;
use confconsole_core::CoreResult;

use super::command;
use super::ifutil::{parse_iface_method, INTERFACES_FILE};

pub const SYS_CLASS_NET: &str = "/sys/class/net";
pub const RESOLV_CONF: &str = "/etc/resolv.conf";

/// 不向操作员展示的虚拟网卡前缀
const IGNORED_PREFIXES: [&str; 8] = ["lo", "tap", "br", "natbr", "tun", "vmnet", "veth", "wmaster"];

pub struct SysNetInfo {
    sys_class_net: PathBuf,
    interfaces_file: PathBuf,
    resolv_conf: PathBuf,
    default_route: Rc<dyn DefaultRouteSelector>,
    publicip_cmd: Option<String>,
}

impl SysNetInfo {
    pub fn new(default_route: Rc<dyn DefaultRouteSelector>, publicip_cmd: Option<String>) -> Self {
        Self {
            sys_class_net: PathBuf::from(SYS_CLASS_NET),
            interfaces_file: PathBuf::from(INTERFACES_FILE),
            resolv_conf: PathBuf::from(RESOLV_CONF),
            default_route,
            publicip_cmd,
        }
    }

    #[cfg(test)]
    fn with_paths(
        mut self,
        sys_class_net: &Path,
        interfaces_file: &Path,
        resolv_conf: &Path,
    ) -> Self {
        self.sys_class_net = sys_class_net.to_path_buf();
        self.interfaces_file = interfaces_file.to_path_buf();
        self.resolv_conf = resolv_conf.to_path_buf();
        self
    }

    fn bridge_ports(&self, bridge: &str) -> Vec<String> {
        dir_names(&self.sys_class_net.join(bridge).join("brif")).unwrap_or_default()
    }
}

fn dir_names(path: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(path)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// 过滤虚拟网卡；默认网卡是仍然存在的网桥时，用网桥替换其成员网卡
pub fn select_interfaces(
    mut names: Vec<String>,
    default_nic: Option<&str>,
    bridge_ports: &[String],
) -> Vec<String> {
    let bridge = default_nic
        .filter(|nic| nic.starts_with("br"))
        .filter(|nic| names.iter().any(|name| name.as_str() == *nic));
    names.retain(|name| !IGNORED_PREFIXES.iter().any(|p| name.starts_with(p)));
    if let Some(bridge) = bridge {
        names.retain(|name| !bridge_ports.contains(name));
        names.push(bridge.to_string());
    }
    names.sort();
    names.dedup();
    names
}

/// 解析 `ip -4 -o addr show dev X` 的输出，返回地址与前缀长度
pub fn parse_ip_addr(output: &str) -> Option<(String, u32)> {
    let mut words = output.split_whitespace();
    words.find(|w| *w == "inet")?;
    let (address, prefix) = words.next()?.split_once('/')?;
    Some((address.to_string(), prefix.parse().ok()?))
}

/// 解析 `ip -4 route show default dev X` 的输出
pub fn parse_default_gateway(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let mut words = line.split_whitespace();
        words.find(|w| *w == "via")?;
        words.next().map(str::to_string)
    })
}

pub fn parse_nameservers(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["nameserver", server, ..] => Some((*server).to_string()),
            _ => None,
        })
        .collect()
}

pub fn prefix_to_netmask(prefix: u32) -> Option<Ipv4Addr> {
    match prefix {
        0 => Some(Ipv4Addr::UNSPECIFIED),
        1..=32 => Some(Ipv4Addr::from(u32::MAX << (32 - prefix))),
        _ => None,
    }
}

impl NetworkInfo for SysNetInfo {
    fn list_interface_names(&self) -> CoreResult<Vec<String>> {
        let names = dir_names(&self.sys_class_net)?;
        let default_nic = self.default_route.get_default_interface();
        let ports = default_nic
            .as_deref()
            .filter(|nic| nic.starts_with("br"))
            .map(|bridge| self.bridge_ports(bridge))
            .unwrap_or_default();
        Ok(select_interfaces(names, default_nic.as_deref(), &ports))
    }

    fn get_interface_config(&self, ifname: &str) -> CoreResult<InterfaceConfig> {
        let addr = command::output("ip", &["-4", "-o", "addr", "show", "dev", ifname])?;
        let (address, netmask) = match parse_ip_addr(&addr) {
            Some((address, prefix)) => {
                let netmask = prefix_to_netmask(prefix).map(|m| m.to_string());
                (Some(address), netmask)
            }
            None => (None, None),
        };

        let routes = command::output("ip", &["-4", "route", "show", "default", "dev", ifname]);
        let gateway = match routes {
            Ok(routes) => parse_default_gateway(&routes),
            Err(e) => {
                log::warn!("Cannot read default route of {ifname}: {e}");
                None
            }
        };

        let nameservers = fs::read_to_string(&self.resolv_conf)
            .map(|text| parse_nameservers(&text))
            .unwrap_or_default();

        Ok(InterfaceConfig {
            address,
            netmask,
            gateway,
            nameservers,
        })
    }

    fn get_config_method(&self, ifname: &str) -> Option<String> {
        let text = fs::read_to_string(&self.interfaces_file).ok()?;
        parse_iface_method(&text, ifname)
    }

    fn get_hostname(&self) -> String {
        nix::unistd::gethostname()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_else(|| "localhost".to_string())
    }

    fn public_ip(&self) -> Option<String> {
        let cmd = self.publicip_cmd.as_deref()?;
        let out = Command::new("sh").arg("-c").arg(cmd).output().ok()?;
        if !out.status.success() {
            log::warn!("Public IP command failed ({})", out.status);
            return None;
        }
        let ip = String::from_utf8_lossy(&out.stdout).trim().to_string();
        (!ip.is_empty()).then_some(ip)
    }
}
