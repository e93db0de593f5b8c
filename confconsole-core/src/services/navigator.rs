//! Navigation state machine

use crate::error::{CoreError, CoreResult};
use crate::registry::{CapabilityRegistry, CapabilityUnit};
use crate::types::{AdvancedAction, DialogKey, IfconfAction, Screen};

use super::ServiceContext;

/// Per-session flags owned by the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Cleared by quit, power actions or a non-confirmed usage screen
    pub running: bool,
    /// A single plugin was requested from the command line
    pub standalone: bool,
}

/// A resolved dialog key
enum Handler<'r> {
    Screen(Screen),
    Unit(&'r CapabilityUnit),
}

/// Drives the console from one dialog to the next
///
/// Every handler returns the key of the dialog to show next. Errors raised
/// by a handler are shown to the operator and the loop resumes at the last
/// dialog that completed.
pub struct Navigator<'r> {
    pub(super) ctx: ServiceContext,
    pub(super) registry: &'r CapabilityRegistry,
    pub(super) session: SessionState,
    current: Option<DialogKey>,
    previous: Option<DialogKey>,
}

impl<'r> Navigator<'r> {
    #[must_use]
    pub fn new(ctx: ServiceContext, registry: &'r CapabilityRegistry) -> Self {
        Self {
            ctx,
            registry,
            session: SessionState {
                running: false,
                standalone: false,
            },
            current: None,
            previous: None,
        }
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.running
    }

    pub fn current(&self) -> Option<&DialogKey> {
        self.current.as_ref()
    }

    pub fn previous(&self) -> Option<&DialogKey> {
        self.previous.as_ref()
    }

    /// Prepare a session starting at `initial` without running it.
    pub fn start(&mut self, initial: DialogKey, standalone: bool) {
        log::debug!("Starting console at {initial} (standalone: {standalone})");
        self.session = SessionState {
            running: true,
            standalone,
        };
        self.previous = Some(initial.clone());
        self.current = Some(initial);
    }

    /// Run the console until it is quit.
    ///
    /// A plugin key as `initial` runs that plugin once and returns.
    pub fn run(&mut self, initial: DialogKey) -> CoreResult<()> {
        let standalone = initial.is_plugin();
        self.start(initial, standalone);
        while self.step()? {}
        log::info!("Console session finished");
        Ok(())
    }

    /// Invoke the current dialog once.
    ///
    /// Returns `Ok(false)` once the loop has nothing more to do. Only
    /// `Fatal` errors and failures to render a diagnostic escape.
    pub fn step(&mut self) -> CoreResult<bool> {
        if !self.session.running {
            return Ok(false);
        }
        let Some(key) = self.current.clone() else {
            return Ok(false);
        };

        log::debug!("Dispatching {key}");
        match self.dispatch(&key) {
            Ok(next) => {
                if self.session.standalone {
                    self.session.running = false;
                    return Ok(false);
                }
                self.previous = Some(key);
                self.current = next;
                Ok(self.session.running && self.current.is_some())
            }
            Err(CoreError::QuitRequested) => {
                log::info!("Quit requested from {key}");
                self.session.running = false;
                Ok(false)
            }
            Err(e @ CoreError::Fatal(_)) => {
                log::error!("Fatal error in {key}: {e}");
                self.session.running = false;
                Err(e)
            }
            Err(e) => {
                match self.contain(&key, &e) {
                    Ok(()) => {}
                    Err(CoreError::QuitRequested) => {
                        self.session.running = false;
                        return Ok(false);
                    }
                    Err(render) => {
                        self.session.running = false;
                        return Err(render);
                    }
                }
                if self.session.standalone {
                    self.session.running = false;
                    return Ok(false);
                }
                self.current = self.previous.clone();
                Ok(self.session.running && self.current.is_some())
            }
        }
    }

    /// Log the failure and show its diagnostic to the operator.
    fn contain(&mut self, key: &DialogKey, error: &CoreError) -> CoreResult<()> {
        let diagnostic = error.diagnostic();
        if error.is_expected() {
            log::warn!("{key}: {diagnostic}");
        } else {
            log::error!("{key}: {diagnostic}");
        }
        self.ctx.console.msgbox(
            "Caught exception",
            format!("Error in dialog '{key}':\n\n{diagnostic}"),
        )?;
        Ok(())
    }

    fn dispatch(&mut self, key: &DialogKey) -> CoreResult<Option<DialogKey>> {
        match self.resolve(key)? {
            Handler::Screen(screen) => self.show(screen).map(Some),
            Handler::Unit(unit) => self.run_unit(unit).map(Some),
        }
    }

    fn resolve(&self, key: &DialogKey) -> CoreResult<Handler<'r>> {
        match key {
            DialogKey::Builtin(screen) => Ok(Handler::Screen(screen.clone())),
            DialogKey::Plugin(plugin_key) => {
                let registry: &'r CapabilityRegistry = self.registry;
                if !plugin_key.is_within(registry.root()) {
                    return Err(CoreError::Dispatch(plugin_key.to_string()));
                }
                registry
                    .get(plugin_key)
                    .map(Handler::Unit)
                    .ok_or_else(|| CoreError::Dispatch(plugin_key.to_string()))
            }
        }
    }

    fn show(&mut self, screen: Screen) -> CoreResult<DialogKey> {
        match screen {
            Screen::Usage => self.usage(),
            Screen::Advanced => self.advanced(),
            Screen::Networking | Screen::AdvancedAction(AdvancedAction::Networking) => {
                self.networking()
            }
            Screen::Quit | Screen::AdvancedAction(AdvancedAction::Quit) => self.quit(),
            Screen::AdvancedAction(AdvancedAction::Install) => self.install(),
            Screen::AdvancedAction(AdvancedAction::Reboot) => self.power(PowerAction::Reboot),
            Screen::AdvancedAction(AdvancedAction::Shutdown) => {
                self.power(PowerAction::Shutdown)
            }
            Screen::Ifconf { ifname } => self.ifconf(&ifname),
            Screen::IfconfAction { ifname, action } => match action {
                IfconfAction::Dhcp => self.ifconf_dhcp(&ifname),
                IfconfAction::StaticIp => self.ifconf_static_ip(&ifname),
                IfconfAction::Default => self.ifconf_default(&ifname),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PowerAction {
    Reboot,
    Shutdown,
}
