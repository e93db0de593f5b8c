//! Test helpers
//!
//! Scripted renderer, mock collaborators and factory methods.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;

use crate::error::{CoreError, CoreResult};
use crate::registry::{CapabilityRegistry, CapabilityUnit, Plugin, PluginGroup};
use crate::services::{ServiceContext, Settings};
use crate::traits::{
    Console, DefaultRouteSelector, Dialog, Lifecycle, NetworkControl, NetworkInfo, Outcome,
    PluginRunner, Renderer, Response,
};
use crate::types::{InterfaceConfig, PluginKey, StaticIpConfig};

// ===== ScriptedRenderer =====

#[derive(Default)]
struct TranscriptInner {
    dialogs: Vec<Dialog>,
    releases: usize,
    restores: usize,
}

/// What a [`ScriptedRenderer`] was asked to do
#[derive(Clone, Default)]
pub struct Transcript(Rc<RefCell<TranscriptInner>>);

impl Transcript {
    /// Every dialog presented, info boxes included
    pub fn dialogs(&self) -> Vec<Dialog> {
        self.0.borrow().dialogs.clone()
    }

    pub fn releases(&self) -> usize {
        self.0.borrow().releases
    }

    pub fn restores(&self) -> usize {
        self.0.borrow().restores
    }

    /// Dialogs whose frame carries `title`
    pub fn titled(&self, title: &str) -> Vec<Dialog> {
        self.dialogs()
            .into_iter()
            .filter(|d| d.title() == Some(title))
            .collect()
    }
}

/// Renderer answering from a fixed script
///
/// Info boxes do not consume a response. Running out of script is a
/// `Fatal` error so a test with a short script fails loudly.
pub struct ScriptedRenderer {
    script: VecDeque<Response>,
    transcript: Transcript,
}

impl ScriptedRenderer {
    pub fn new(script: Vec<Response>) -> (Self, Transcript) {
        let transcript = Transcript::default();
        let renderer = Self {
            script: script.into(),
            transcript: transcript.clone(),
        };
        (renderer, transcript)
    }
}

impl Renderer for ScriptedRenderer {
    fn present(&mut self, dialog: &Dialog) -> CoreResult<Response> {
        self.transcript.0.borrow_mut().dialogs.push(dialog.clone());
        if matches!(dialog, Dialog::Info { .. }) {
            return Ok(Response::new(Outcome::Confirmed));
        }
        self.script
            .pop_front()
            .ok_or_else(|| CoreError::Fatal(format!("renderer script exhausted at {dialog:?}")))
    }

    fn release_terminal(&mut self) -> CoreResult<()> {
        self.transcript.0.borrow_mut().releases += 1;
        Ok(())
    }

    fn restore_terminal(&mut self) -> CoreResult<()> {
        self.transcript.0.borrow_mut().restores += 1;
        Ok(())
    }
}

// ===== MockNetwork =====

pub struct MockNetwork {
    interfaces: RefCell<BTreeMap<String, InterfaceConfig>>,
    methods: RefCell<BTreeMap<String, String>>,
    public_ip: RefCell<Option<String>>,
    /// Listed, but reading their configuration fails
    broken: RefCell<BTreeSet<String>>,
    /// Fail this many upcoming `list_interface_names` calls
    list_failures: Cell<usize>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self {
            interfaces: RefCell::new(BTreeMap::new()),
            methods: RefCell::new(BTreeMap::new()),
            public_ip: RefCell::new(None),
            broken: RefCell::new(BTreeSet::new()),
            list_failures: Cell::new(0),
        }
    }

    pub fn add_interface(&self, ifname: &str, config: InterfaceConfig) {
        self.interfaces
            .borrow_mut()
            .insert(ifname.to_string(), config);
    }

    pub fn add_broken_interface(&self, ifname: &str) {
        self.broken.borrow_mut().insert(ifname.to_string());
    }

    pub fn set_method(&self, ifname: &str, method: &str) {
        self.methods
            .borrow_mut()
            .insert(ifname.to_string(), method.to_string());
    }

    pub fn set_public_ip(&self, ip: Option<&str>) {
        *self.public_ip.borrow_mut() = ip.map(str::to_string);
    }

    pub fn fail_listing(&self, times: usize) {
        self.list_failures.set(times);
    }
}

impl NetworkInfo for MockNetwork {
    fn list_interface_names(&self) -> CoreResult<Vec<String>> {
        let failures = self.list_failures.get();
        if failures > 0 {
            self.list_failures.set(failures - 1);
            return Err(CoreError::Collaborator("cannot list interfaces".into()));
        }
        let mut names: Vec<String> = self.interfaces.borrow().keys().cloned().collect();
        names.extend(self.broken.borrow().iter().cloned());
        names.sort();
        Ok(names)
    }

    fn get_interface_config(&self, ifname: &str) -> CoreResult<InterfaceConfig> {
        self.interfaces
            .borrow()
            .get(ifname)
            .cloned()
            .ok_or_else(|| CoreError::Collaborator(format!("no such interface: {ifname}")))
    }

    fn get_config_method(&self, ifname: &str) -> Option<String> {
        self.methods.borrow().get(ifname).cloned()
    }

    fn get_hostname(&self) -> String {
        "core".to_string()
    }

    fn public_ip(&self) -> Option<String> {
        self.public_ip.borrow().clone()
    }
}

// ===== MockControl =====

/// Records every change; `set_static` answers from a queue of messages
pub struct MockControl {
    pub calls: RefCell<Vec<String>>,
    pub applied: RefCell<Vec<StaticIpConfig>>,
    static_results: RefCell<VecDeque<Option<String>>>,
    dhcp_result: RefCell<Option<String>>,
}

impl MockControl {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            applied: RefCell::new(Vec::new()),
            static_results: RefCell::new(VecDeque::new()),
            dhcp_result: RefCell::new(None),
        }
    }

    pub fn queue_static_result(&self, message: Option<&str>) {
        self.static_results
            .borrow_mut()
            .push_back(message.map(str::to_string));
    }

    pub fn set_dhcp_result(&self, message: Option<&str>) {
        *self.dhcp_result.borrow_mut() = message.map(str::to_string);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl NetworkControl for MockControl {
    fn set_static(&self, ifname: &str, config: &StaticIpConfig) -> CoreResult<Option<String>> {
        self.calls.borrow_mut().push(format!("static {ifname}"));
        self.applied.borrow_mut().push(config.clone());
        Ok(self.static_results.borrow_mut().pop_front().flatten())
    }

    fn set_dhcp(&self, ifname: &str) -> CoreResult<Option<String>> {
        self.calls.borrow_mut().push(format!("dhcp {ifname}"));
        Ok(self.dhcp_result.borrow().clone())
    }

    fn unconfigure(&self, ifname: &str) -> CoreResult<()> {
        self.calls.borrow_mut().push(format!("unconfigure {ifname}"));
        Ok(())
    }
}

// ===== MockDefaultRoute =====

pub struct MockDefaultRoute {
    default_nic: RefCell<Option<String>>,
}

impl MockDefaultRoute {
    pub fn new() -> Self {
        Self {
            default_nic: RefCell::new(None),
        }
    }
}

impl DefaultRouteSelector for MockDefaultRoute {
    fn get_default_interface(&self) -> Option<String> {
        self.default_nic.borrow().clone()
    }

    fn set_default_interface(&self, ifname: &str) -> CoreResult<()> {
        *self.default_nic.borrow_mut() = Some(ifname.to_string());
        Ok(())
    }
}

// ===== MockLifecycle =====

pub struct MockLifecycle {
    pub calls: RefCell<Vec<&'static str>>,
    pub installer: Cell<bool>,
}

impl MockLifecycle {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            installer: Cell::new(false),
        }
    }
}

impl Lifecycle for MockLifecycle {
    fn reboot(&self) -> CoreResult<()> {
        self.calls.borrow_mut().push("reboot");
        Ok(())
    }

    fn shutdown(&self) -> CoreResult<()> {
        self.calls.borrow_mut().push("shutdown");
        Ok(())
    }

    fn run_installer(&self) -> CoreResult<()> {
        self.calls.borrow_mut().push("installer");
        Ok(())
    }

    fn installer_available(&self) -> bool {
        self.installer.get()
    }
}

// ===== MockPluginRunner =====

pub struct MockPluginRunner {
    /// (plugin name, interactive) per run
    pub runs: RefCell<Vec<(String, bool)>>,
    /// Plugin names whose run fails
    pub failing: RefCell<Vec<String>>,
}

impl MockPluginRunner {
    pub fn new() -> Self {
        Self {
            runs: RefCell::new(Vec::new()),
            failing: RefCell::new(Vec::new()),
        }
    }
}

impl PluginRunner for MockPluginRunner {
    fn run(&self, plugin: &Plugin, interactive: bool) -> CoreResult<()> {
        self.runs
            .borrow_mut()
            .push((plugin.name.clone(), interactive));
        if self.failing.borrow().contains(&plugin.name) {
            return Err(CoreError::Collaborator(format!(
                "plugin {} exited with status 1",
                plugin.name
            )));
        }
        Ok(())
    }
}

// ===== Factory =====

/// Mock collaborators shared with the context under test
pub struct Mocks {
    pub network: Rc<MockNetwork>,
    pub control: Rc<MockControl>,
    pub default_route: Rc<MockDefaultRoute>,
    pub lifecycle: Rc<MockLifecycle>,
    pub runner: Rc<MockPluginRunner>,
}

impl Mocks {
    /// One configured adapter, `eth0`
    pub fn new() -> Self {
        let mocks = Self::bare();
        mocks.network.add_interface("eth0", configured("10.0.0.5"));
        mocks.network.set_method("eth0", "static");
        mocks
    }

    /// No network adapters at all
    pub fn bare() -> Self {
        Self {
            network: Rc::new(MockNetwork::new()),
            control: Rc::new(MockControl::new()),
            default_route: Rc::new(MockDefaultRoute::new()),
            lifecycle: Rc::new(MockLifecycle::new()),
            runner: Rc::new(MockPluginRunner::new()),
        }
    }

    pub fn context(&self, renderer: ScriptedRenderer, settings: Settings) -> ServiceContext {
        ServiceContext::new(
            Console::new(Box::new(renderer)),
            self.network.clone(),
            self.control.clone(),
            self.default_route.clone(),
            self.lifecycle.clone(),
            self.runner.clone(),
            settings,
        )
    }
}

/// A /24 interface configuration around `address`
pub fn configured(address: &str) -> InterfaceConfig {
    InterfaceConfig {
        address: Some(address.to_string()),
        netmask: Some("255.255.255.0".to_string()),
        gateway: Some("10.0.0.1".to_string()),
        nameservers: vec!["8.8.8.8".to_string()],
    }
}

/// Form response with the given values
pub fn form_response(values: &[&str]) -> Response {
    Response::form(
        Outcome::Confirmed,
        values.iter().map(ToString::to_string).collect(),
    )
}

pub fn ok() -> Response {
    Response::new(Outcome::Confirmed)
}

pub fn cancel() -> Response {
    Response::new(Outcome::Cancelled)
}

pub const PLUGIN_ROOT: &str = "/usr/lib/confconsole/plugins.d";

fn leaf(path: &str, description: &str) -> CapabilityUnit {
    let path = format!("{PLUGIN_ROOT}/{path}");
    let name = path.rsplit('/').next().unwrap_or_default().to_string();
    CapabilityUnit::Leaf(Plugin {
        key: PluginKey::new(&path),
        path: path.into(),
        name,
        description: description.to_string(),
    })
}

/// `System_settings/secupdates` inside a group, `hostname` at the top
pub fn plugin_registry() -> CapabilityRegistry {
    let group_path = format!("{PLUGIN_ROOT}/System_settings");
    let group = CapabilityUnit::Group(PluginGroup {
        key: PluginKey::new(&group_path),
        path: group_path.into(),
        name: "System_settings".to_string(),
        description: "Configure system settings".to_string(),
        children: vec![leaf("System_settings/secupdates", "Security updates")],
    });
    let units = vec![group, leaf("hostname", "Change the hostname")];
    CapabilityRegistry::from_units(PLUGIN_ROOT, units).unwrap_or_else(|e| panic!("{e}"))
}

pub fn plugin_key(path: &str) -> PluginKey {
    PluginKey::new(format!("{PLUGIN_ROOT}/{path}"))
}
