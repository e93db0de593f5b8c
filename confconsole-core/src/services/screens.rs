//! Usage, Advanced menu and session screens

use std::collections::HashMap;
use std::rc::Rc;

use crate::config::render_services_template;
use crate::error::{CoreError, CoreResult};
use crate::traits::Outcome;
use crate::types::{AdvancedAction, DialogKey, MenuItem, PluginKey, Screen};

use super::navigator::{Navigator, PowerAction};

const INSTALLER_NOTE: &str = "Please note that any changes you may have made to the\n\
live system will *not* be installed to the hard disk.\n\n";

impl Navigator<'_> {
    pub(super) fn usage(&mut self) -> CoreResult<DialogKey> {
        let (button, next) = if self.ctx.settings.advanced_enabled {
            ("Advanced Menu", Screen::Advanced)
        } else {
            ("Quit", Screen::Quit)
        };

        let ifnames = self.ctx.network.list_interface_names()?;
        if ifnames.is_empty() {
            return self.usage_error("No network adapters detected", Screen::Advanced);
        }
        let Some(ifname) = self.default_nic(&ifnames) else {
            return self.usage_error("Networking is not yet configured", Screen::Networking);
        };

        let ipaddr = match self.ctx.network.public_ip() {
            Some(ip) => ip,
            None => self
                .ctx
                .network
                .get_interface_config(&ifname)?
                .address
                .unwrap_or_default(),
        };
        let hostname = self.ctx.network.get_hostname().to_uppercase();
        let text = render_services_template(&self.ctx.settings.services_template, &ipaddr);

        let outcome = self.ctx.console.msgbox_with_button(
            format!("{hostname} appliance services"),
            text,
            button,
        )?;
        if outcome != Outcome::Confirmed {
            self.session.running = false;
        }
        Ok(next.into())
    }

    fn usage_error(&mut self, error: &str, next: Screen) -> CoreResult<DialogKey> {
        if !self.ctx.settings.advanced_enabled {
            return Err(CoreError::Fatal(error.to_string()));
        }
        self.ctx.console.msgbox("Error", error)?;
        Ok(next.into())
    }

    pub(super) fn advanced(&mut self) -> CoreResult<DialogKey> {
        let no_cancel = self.ctx.network.list_interface_names()?.is_empty();

        let mut items = Vec::new();
        if self.ctx.settings.networking {
            items.push(action_item(
                AdvancedAction::Networking,
                "Configure appliance networking",
            ));
        }
        if self.ctx.lifecycle.installer_available() {
            items.push(action_item(AdvancedAction::Install, "Install to hard disk"));
        }

        let registry = self.registry;
        let mut plugins: HashMap<String, &PluginKey> = HashMap::new();
        for unit in registry.top_level() {
            items.push(unit.menu_item());
            plugins.insert(unit.label(), unit.key());
        }

        items.push(action_item(AdvancedAction::Reboot, "Reboot the appliance"));
        items.push(action_item(AdvancedAction::Shutdown, "Shutdown the appliance"));
        items.push(action_item(
            AdvancedAction::Quit,
            "Quit the configuration console",
        ));

        let hostname = self.ctx.network.get_hostname().to_uppercase();
        let text = format!(
            "{} {hostname} Advanced Menu\n",
            self.ctx.settings.appliance_name
        );
        let (outcome, choice) = self
            .ctx
            .console
            .menu("Advanced Menu", text, items, no_cancel)?;

        let (Outcome::Confirmed, Some(choice)) = (outcome, choice) else {
            return Ok(Screen::Usage.into());
        };
        if let Some(key) = plugins.get(&choice) {
            return Ok(DialogKey::Plugin((*key).clone()));
        }
        Ok(Screen::AdvancedAction(AdvancedAction::from_label(&choice)?).into())
    }

    pub(super) fn quit(&mut self) -> CoreResult<DialogKey> {
        if !self.ctx.settings.advanced_enabled {
            self.session.running = false;
            return Ok(Screen::Usage.into());
        }
        if self.ctx.console.yesno("Do you really want to quit?")? == Outcome::Confirmed {
            self.session.running = false;
        }
        Ok(Screen::Advanced.into())
    }

    pub(super) fn install(&mut self) -> CoreResult<DialogKey> {
        self.ctx.console.msgbox("Installer", INSTALLER_NOTE)?;
        if !self.ctx.lifecycle.installer_available() {
            return Err(CoreError::Collaborator(
                "installer is not available to be executed".to_string(),
            ));
        }

        let lifecycle = Rc::clone(&self.ctx.lifecycle);
        self.ctx
            .console
            .with_terminal_released(|| lifecycle.run_installer())?;
        Ok(Screen::Advanced.into())
    }

    pub(super) fn power(&mut self, action: PowerAction) -> CoreResult<DialogKey> {
        let prompt = match action {
            PowerAction::Reboot => "Reboot the appliance?",
            PowerAction::Shutdown => "Shutdown the appliance?",
        };
        if self.ctx.console.yesno(prompt)? == Outcome::Confirmed {
            log::info!("{action:?} confirmed by operator");
            match action {
                PowerAction::Reboot => self.ctx.lifecycle.reboot()?,
                PowerAction::Shutdown => self.ctx.lifecycle.shutdown()?,
            }
            self.session.running = false;
        }
        Ok(Screen::Advanced.into())
    }
}

fn action_item(action: AdvancedAction, description: &str) -> MenuItem {
    MenuItem::new(action.label(), description)
}
