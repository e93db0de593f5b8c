//! Renderer wrapper applying the escape convention

use crate::error::{CoreError, CoreResult};
use crate::traits::renderer::{Dialog, FormField, Outcome, Renderer, Response};
use crate::types::MenuItem;

const QUIT_PROMPT: &str = "Do you really want to quit?";

/// Console
///
/// Wraps a [`Renderer`] and applies the escape rule to every blocking dialog:
/// escape asks "really quit?"; yes ends the session with
/// [`CoreError::QuitRequested`], no shows the same dialog again.
pub struct Console {
    renderer: Box<dyn Renderer>,
}

impl Console {
    #[must_use]
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self { renderer }
    }

    fn present(&mut self, dialog: &Dialog) -> CoreResult<Response> {
        loop {
            let response = self.renderer.present(dialog)?;
            if response.outcome != Outcome::Escaped {
                return Ok(response);
            }

            let confirm = self.renderer.present(&Dialog::yes_no(QUIT_PROMPT))?;
            if confirm.is_confirmed() {
                return Err(CoreError::QuitRequested);
            }
        }
    }

    pub fn infobox(&mut self, text: impl Into<String>) -> CoreResult<()> {
        self.renderer
            .present(&Dialog::Info { text: text.into() })
            .map(|_| ())
    }

    pub fn msgbox(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> CoreResult<Outcome> {
        self.msgbox_with_button(title, text, "OK")
    }

    pub fn msgbox_with_button(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        button: impl Into<String>,
    ) -> CoreResult<Outcome> {
        let dialog = Dialog::Message {
            title: title.into(),
            text: text.into(),
            button: button.into(),
        };
        Ok(self.present(&dialog)?.outcome)
    }

    pub fn yesno(&mut self, text: impl Into<String>) -> CoreResult<Outcome> {
        Ok(self.present(&Dialog::yes_no(text))?.outcome)
    }

    /// Show a menu; returns the outcome and the selected label
    pub fn menu(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        items: Vec<MenuItem>,
        no_cancel: bool,
    ) -> CoreResult<(Outcome, Option<String>)> {
        let dialog = Dialog::Menu {
            title: title.into(),
            text: text.into(),
            items,
            no_cancel,
        };
        let response = self.present(&dialog)?;
        Ok((response.outcome, response.choice))
    }

    /// Show a form; returns the outcome and the edited values in input order
    pub fn form(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        fields: Vec<FormField>,
    ) -> CoreResult<(Outcome, Vec<String>)> {
        let dialog = Dialog::Form {
            title: title.into(),
            text: text.into(),
            fields,
            ok_label: "Apply".to_string(),
            cancel_label: "Cancel".to_string(),
        };
        let response = self.present(&dialog)?;
        Ok((response.outcome, response.values))
    }

    /// Run `f` while an external program owns the terminal.
    ///
    /// The terminal is taken back even when `f` fails.
    pub fn with_terminal_released<T>(
        &mut self,
        f: impl FnOnce() -> CoreResult<T>,
    ) -> CoreResult<T> {
        self.renderer.release_terminal()?;
        let result = f();
        let restored = self.renderer.restore_terminal();
        let value = result?;
        restored?;
        Ok(value)
    }
}
