//! Collaborator abstraction trait definition
//!
//! The core never talks to the terminal or the operating system directly.
//! Front-ends provide these implementations and hand them to
//! [`ServiceContext`](crate::services::ServiceContext).

mod console;
mod default_route;
mod lifecycle;
mod network;
mod plugin_runner;
mod renderer;

pub use console::Console;
pub use default_route::DefaultRouteSelector;
pub use lifecycle::Lifecycle;
pub use network::{NetworkControl, NetworkInfo};
pub use plugin_runner::PluginRunner;
pub use renderer::{Dialog, FormField, Outcome, Renderer, Response};
