//! Plugin group menus and leaf execution

use std::rc::Rc;

use crate::error::{CoreError, CoreResult};
use crate::registry::{CapabilityUnit, Plugin, PluginGroup};
use crate::traits::Outcome;
use crate::types::{DialogKey, Screen};

use super::navigator::Navigator;

impl Navigator<'_> {
    pub(super) fn run_unit(&mut self, unit: &CapabilityUnit) -> CoreResult<DialogKey> {
        let back = self
            .registry
            .parent_of(unit.key())
            .map_or_else(|| Screen::Advanced.into(), |parent| DialogKey::Plugin(parent.clone()));

        match unit {
            CapabilityUnit::Leaf(plugin) => {
                self.run_leaf(plugin)?;
                Ok(back)
            }
            CapabilityUnit::Group(group) => self.show_group(&unit.label(), group, back),
        }
    }

    fn run_leaf(&mut self, plugin: &Plugin) -> CoreResult<()> {
        log::info!("Running plugin {}", plugin.path.display());
        let runner = Rc::clone(&self.ctx.plugin_runner);
        let interactive = self.ctx.settings.interactive;
        self.ctx
            .console
            .with_terminal_released(|| runner.run(plugin, interactive))
    }

    fn show_group(
        &mut self,
        label: &str,
        group: &PluginGroup,
        back: DialogKey,
    ) -> CoreResult<DialogKey> {
        let items = group
            .children
            .iter()
            .map(CapabilityUnit::menu_item)
            .collect();
        let (outcome, choice) =
            self.ctx
                .console
                .menu(label, group.description.as_str(), items, false)?;

        let (Outcome::Confirmed, Some(choice)) = (outcome, choice) else {
            return Ok(back);
        };
        group
            .children
            .iter()
            .find(|child| child.label() == choice)
            .map(|child| DialogKey::Plugin(child.key().clone()))
            .ok_or_else(|| CoreError::Dispatch(format!("{}/{choice}", group.key)))
    }
}
