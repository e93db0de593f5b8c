//! 终端渲染器
//!
//! 实现核心库的 `Renderer` trait：每次 `present` 都是一个小型的
//! Event → Message → Update → View 循环，直到用户作出决定。

use confconsole_core::error::{CoreError, CoreResult};
use confconsole_core::traits::{Dialog, Outcome, Renderer, Response};

use crate::event::{handle_event, read_event};
use crate::model::DialogState;
use crate::update::update;
use crate::util::{init_terminal, restore_terminal, resume_terminal, suspend_terminal, Term};
use crate::view;

pub struct TerminalRenderer {
    terminal: Term,
    backtitle: String,
    mouse: bool,
}

impl TerminalRenderer {
    /// 接管终端。`copy_paste` 为 true 时不捕获鼠标。
    pub fn new(backtitle: impl Into<String>, copy_paste: bool) -> CoreResult<Self> {
        let mouse = !copy_paste;
        let terminal = init_terminal(mouse)?;
        Ok(Self {
            terminal,
            backtitle: backtitle.into(),
            mouse,
        })
    }

    fn draw(&mut self, state: &DialogState) -> CoreResult<()> {
        let backtitle = &self.backtitle;
        self.terminal
            .draw(|frame| view::render(frame, state, backtitle))?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn present(&mut self, dialog: &Dialog) -> CoreResult<Response> {
        let mut state = DialogState::new(dialog.clone());
        self.draw(&state)?;

        // 信息框不等待输入
        if matches!(dialog, Dialog::Info { .. }) {
            return Ok(Response::new(Outcome::Confirmed));
        }

        loop {
            let event = read_event().map_err(|e| CoreError::Collaborator(e.to_string()))?;
            let msg = handle_event(event, &state);
            if let Some(response) = update(&mut state, msg) {
                return Ok(response);
            }
            self.draw(&state)?;
        }
    }

    fn release_terminal(&mut self) -> CoreResult<()> {
        log::debug!("Releasing terminal");
        suspend_terminal(&mut self.terminal, self.mouse)?;
        Ok(())
    }

    fn restore_terminal(&mut self) -> CoreResult<()> {
        log::debug!("Restoring terminal");
        resume_terminal(&mut self.terminal, self.mouse)?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    // 无论会话如何结束都恢复终端
    fn drop(&mut self) {
        if let Err(e) = restore_terminal(&mut self.terminal, self.mouse) {
            log::error!("Failed to restore terminal: {e}");
        }
    }
}
