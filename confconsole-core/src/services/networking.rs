//! Network adapter screens

use crate::error::CoreResult;
use crate::traits::Outcome;
use crate::types::{DialogKey, IfconfAction, InterfaceConfig, MenuItem, Screen};

use super::ipconf::{self, Validation};
use super::navigator::Navigator;

const SSH_WARNING: &str =
    "Warning: Changing ip while an ssh session is active will drop said ssh session!";

/// Link-local (APIPA) addresses never count as configured
fn is_routable(address: &str) -> bool {
    !address.starts_with("169")
}

impl Navigator<'_> {
    /// Interface whose address the usage screen shows.
    ///
    /// The configured choice wins when it has a routable address, otherwise
    /// the first listed interface that has one.
    pub(super) fn default_nic(&self, ifnames: &[String]) -> Option<String> {
        let has_address = |ifname: &str| match self.ctx.network.get_interface_config(ifname) {
            Ok(config) => config.address.as_deref().is_some_and(is_routable),
            Err(e) => {
                log::debug!("Cannot read {ifname}: {e}");
                false
            }
        };

        if let Some(preferred) = self.ctx.default_route.get_default_interface() {
            if has_address(&preferred) {
                return Some(preferred);
            }
        }
        ifnames.iter().find(|ifname| has_address(ifname)).cloned()
    }

    /// Current configuration, shown as unconfigured when it cannot be read
    fn read_config(&self, ifname: &str) -> InterfaceConfig {
        self.ctx
            .network
            .get_interface_config(ifname)
            .unwrap_or_else(|e| {
                log::warn!("Cannot read {ifname}: {e}");
                InterfaceConfig::default()
            })
    }

    pub(super) fn networking(&mut self) -> CoreResult<DialogKey> {
        let ifnames = self.ctx.network.list_interface_names()?;
        match ifnames.as_slice() {
            [] => {
                self.ctx
                    .console
                    .msgbox("Error", "No network adapters detected")?;
                return Ok(Screen::Advanced.into());
            }
            [only] => return Ok(ifconf_key(only)),
            _ => {}
        }

        let default = self.default_nic(&ifnames);
        let mut text = String::from("Choose network adapter to configure\n");
        if default.is_some() {
            text.push_str("[*] This adapter's IP address is displayed in Usage");
        }

        let mut items = Vec::with_capacity(ifnames.len());
        for ifname in &ifnames {
            let config = self.read_config(ifname);
            let description = match config.address {
                Some(address) => {
                    let mut desc = address;
                    if let Some(method) = self.ctx.network.get_config_method(ifname) {
                        desc.push_str(&format!(" ({method})"));
                    }
                    if default.as_deref() == Some(ifname.as_str()) {
                        desc.push_str(" [*]");
                    }
                    desc
                }
                None => "not configured".to_string(),
            };
            items.push(MenuItem::new(ifname.as_str(), description));
        }

        let (outcome, choice) =
            self.ctx
                .console
                .menu("Networking configuration", text, items, false)?;
        match (outcome, choice) {
            (Outcome::Confirmed, Some(ifname)) => Ok(ifconf_key(&ifname)),
            _ => Ok(Screen::Advanced.into()),
        }
    }

    pub(super) fn ifconf(&mut self, ifname: &str) -> CoreResult<DialogKey> {
        let ifnames = self.ctx.network.list_interface_names()?;
        let default = self.default_nic(&ifnames);
        let is_default = default.as_deref() == Some(ifname);
        let config = self.read_config(ifname);

        let text = self.ifconf_text(ifname, &config, ifnames.len() > 1, is_default);

        let mut items = vec![
            MenuItem::new(
                IfconfAction::Dhcp.label(),
                "Configure networking automatically",
            ),
            MenuItem::new(
                IfconfAction::StaticIp.label(),
                "Configure networking manually",
            ),
        ];
        if !is_default && ifnames.len() > 1 && config.address.is_some() {
            items.push(MenuItem::new(
                IfconfAction::Default.label(),
                "Show this adapter's IP address in Usage",
            ));
        }

        let (outcome, choice) =
            self.ctx
                .console
                .menu(format!("{ifname} configuration"), text, items, false)?;
        let (Outcome::Confirmed, Some(choice)) = (outcome, choice) else {
            return Ok(if ifnames.len() > 1 {
                Screen::Networking.into()
            } else {
                Screen::Advanced.into()
            });
        };

        Ok(Screen::IfconfAction {
            ifname: ifname.to_string(),
            action: IfconfAction::from_label(&choice)?,
        }
        .into())
    }

    fn ifconf_text(
        &self,
        ifname: &str,
        config: &InterfaceConfig,
        several: bool,
        is_default: bool,
    ) -> String {
        let Some(address) = &config.address else {
            return "Network adapter is not configured\n".to_string();
        };

        let mut text = format!(
            "IP Address:      {address}\n\
             Netmask:         {}\n\
             Default Gateway: {}\n\
             Name Server(s):  {}\n\n",
            config.netmask.as_deref().unwrap_or_default(),
            config.gateway.as_deref().unwrap_or_default(),
            config.nameservers.join(" "),
        );
        if let Some(method) = self.ctx.network.get_config_method(ifname) {
            text.push_str(&format!("Networking configuration method: {method}\n"));
        }
        if several {
            text.push_str("Is this adapter's IP address displayed in Usage: ");
            text.push_str(if is_default { "yes\n" } else { "no\n" });
        }
        text
    }

    /// Second confirmation before touching the network over SSH
    fn confirm_remote_change(&mut self) -> CoreResult<bool> {
        if !self.ctx.settings.remote_session {
            return Ok(true);
        }
        Ok(self.ctx.console.yesno(SSH_WARNING)? == Outcome::Confirmed)
    }

    pub(super) fn ifconf_static_ip(&mut self, ifname: &str) -> CoreResult<DialogKey> {
        let (mut values, warnings) = ipconf::prefill(self.ctx.network.get_interface_config(ifname));
        if !warnings.is_empty() {
            self.ctx.console.msgbox("Warning", warnings.join("\n"))?;
        }

        loop {
            let (outcome, entered) = self.ctx.console.form(
                "Network settings",
                format!("Static IP configuration ({ifname})"),
                ipconf::form_fields(&values),
            )?;
            if outcome != Outcome::Confirmed {
                break;
            }
            values = entered.iter().map(|v| v.trim().to_string()).collect();

            let error = match ipconf::validate_form(&values) {
                Validation::Clear => {
                    log::info!("Unconfiguring {ifname}");
                    self.ctx.control.unconfigure(ifname)?;
                    break;
                }
                Validation::Invalid(errors) => errors.join("\n"),
                Validation::Valid(config) => {
                    if !self.confirm_remote_change()? {
                        break;
                    }
                    log::info!("Setting static address {} on {ifname}", config.address);
                    match self.ctx.control.set_static(ifname, &config)? {
                        None => break,
                        Some(message) => message,
                    }
                }
            };
            self.ctx.console.msgbox("Error", error)?;
        }

        Ok(ifconf_key(ifname))
    }

    pub(super) fn ifconf_dhcp(&mut self, ifname: &str) -> CoreResult<DialogKey> {
        if self.confirm_remote_change()? {
            self.ctx
                .console
                .infobox(format!("Requesting DHCP for {ifname}..."))?;
            log::info!("Requesting DHCP for {ifname}");
            if let Some(message) = self.ctx.control.set_dhcp(ifname)? {
                self.ctx.console.msgbox("Error", message)?;
            }
        }
        Ok(ifconf_key(ifname))
    }

    pub(super) fn ifconf_default(&mut self, ifname: &str) -> CoreResult<DialogKey> {
        self.ctx.default_route.set_default_interface(ifname)?;
        log::info!("{ifname} is now the usage screen interface");
        Ok(ifconf_key(ifname))
    }
}

fn ifconf_key(ifname: &str) -> DialogKey {
    Screen::Ifconf {
        ifname: ifname.to_string(),
    }
    .into()
}
