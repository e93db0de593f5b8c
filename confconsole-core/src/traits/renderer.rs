//! Renderer abstract Trait

use crate::error::CoreResult;
use crate::types::MenuItem;

/// How the operator left a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// OK / Select / Yes / Apply
    Confirmed,
    /// Back / Cancel / No
    Cancelled,
    /// Escape key
    Escaped,
}

/// One labeled input of a form dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    pub value: String,
    /// Maximum number of characters accepted
    pub max_len: usize,
}

impl FormField {
    pub fn new(label: impl Into<String>, value: impl Into<String>, max_len: usize) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            max_len,
        }
    }
}

/// A screen to present
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Non-blocking notice; returns immediately
    Info { text: String },
    Message {
        title: String,
        text: String,
        button: String,
    },
    YesNo {
        text: String,
        yes_label: String,
        no_label: String,
    },
    Menu {
        title: String,
        text: String,
        items: Vec<MenuItem>,
        /// Hide the Back button
        no_cancel: bool,
    },
    Form {
        title: String,
        text: String,
        fields: Vec<FormField>,
        ok_label: String,
        cancel_label: String,
    },
}

impl Dialog {
    pub fn yes_no(text: impl Into<String>) -> Self {
        Self::YesNo {
            text: text.into(),
            yes_label: "Yes".to_string(),
            no_label: "No".to_string(),
        }
    }

    /// Title shown in the dialog frame, if any
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Message { title, .. } | Self::Menu { title, .. } | Self::Form { title, .. } => {
                Some(title)
            }
            Self::Info { .. } | Self::YesNo { .. } => None,
        }
    }

    /// Body text of the dialog
    pub fn text(&self) -> &str {
        match self {
            Self::Info { text }
            | Self::Message { text, .. }
            | Self::YesNo { text, .. }
            | Self::Menu { text, .. }
            | Self::Form { text, .. } => text,
        }
    }
}

/// The operator's decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub outcome: Outcome,
    /// Label of the selected menu item
    pub choice: Option<String>,
    /// Form values in input order, returned whatever the outcome
    pub values: Vec<String>,
}

impl Response {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            choice: None,
            values: Vec::new(),
        }
    }

    pub fn choice(label: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Confirmed,
            choice: Some(label.into()),
            values: Vec::new(),
        }
    }

    pub fn form(outcome: Outcome, values: Vec<String>) -> Self {
        Self {
            outcome,
            choice: None,
            values,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.outcome == Outcome::Confirmed
    }
}

/// Renderer Trait
///
/// Presents a dialog and blocks until the operator decides. Never touches
/// navigation state.
///
/// Platform implementation:
/// - TUI: `TerminalRenderer` (ratatui + crossterm)
pub trait Renderer {
    /// Present a dialog and return the operator's decision
    fn present(&mut self, dialog: &Dialog) -> CoreResult<Response>;

    /// Give the terminal back to the shell so an external program can use it
    fn release_terminal(&mut self) -> CoreResult<()>;

    /// Take the terminal again after [`Renderer::release_terminal`]
    fn restore_terminal(&mut self) -> CoreResult<()>;
}
