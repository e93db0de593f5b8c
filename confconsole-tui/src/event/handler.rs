//! 事件处理器

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};

use crate::event::keymap::DefaultKeymap;
use crate::message::DialogMessage;
use crate::model::DialogState;

/// 阻塞读取下一个事件
pub fn read_event() -> Result<Event> {
    Ok(event::read()?)
}

/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, state: &DialogState) -> DialogMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, state), // 键盘事件
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => DialogMessage::Up,
            MouseEventKind::ScrollDown => DialogMessage::Down,
            _ => DialogMessage::Noop,
        },
        Event::Resize(_, _) => DialogMessage::Noop, // 终端窗口大小改变，重绘
        _ => DialogMessage::Noop,
    }
}

/// 处理键盘事件
fn handle_key_event(key: KeyEvent, state: &DialogState) -> DialogMessage {
    // 只处理 Press 事件，忽略 Release 和 Repeat
    if key.kind != KeyEventKind::Press {
        return DialogMessage::Noop;
    }

    if DefaultKeymap::ESCAPE.matches(&key) || DefaultKeymap::FORCE_QUIT.matches(&key) {
        return DialogMessage::Escape;
    }
    if DefaultKeymap::NAV_CONFIRM.matches(&key) {
        return DialogMessage::Confirm;
    }
    if DefaultKeymap::NAV_UP.matches(&key) {
        return DialogMessage::Up;
    }
    if DefaultKeymap::NAV_DOWN.matches(&key) {
        return DialogMessage::Down;
    }
    if DefaultKeymap::NEXT_BUTTON.matches(&key) {
        return DialogMessage::NextButton;
    }
    // 部分终端发送 BackTab 时不带 SHIFT
    if DefaultKeymap::PREV_BUTTON.matches(&key) || key.code == KeyCode::BackTab {
        return DialogMessage::PrevButton;
    }

    if state.is_form() {
        handle_form_keys(key)
    } else {
        handle_choice_keys(key)
    }
}

/// 表单：字符输入，带 Ctrl/Alt 的组合键不算输入
fn handle_form_keys(key: KeyEvent) -> DialogMessage {
    let plain = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();
    match key.code {
        KeyCode::Char(c) if plain => DialogMessage::Input(c),
        KeyCode::Backspace => DialogMessage::Backspace,
        _ => DialogMessage::Noop,
    }
}

/// 菜单、消息框、是/否对话框
fn handle_choice_keys(key: KeyEvent) -> DialogMessage {
    match key.code {
        KeyCode::Right => DialogMessage::NextButton,
        KeyCode::Left => DialogMessage::PrevButton,
        KeyCode::Char('k') => DialogMessage::Up,
        KeyCode::Char('j') => DialogMessage::Down,
        KeyCode::Char('y' | 'Y') => DialogMessage::Yes,
        KeyCode::Char('n' | 'N') => DialogMessage::No,
        _ => DialogMessage::Noop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confconsole_core::traits::{Dialog, FormField};
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn form_state() -> DialogState {
        DialogState::new(Dialog::Form {
            title: "Network settings".into(),
            text: String::new(),
            fields: vec![FormField::new("IP Address", "", 15)],
            ok_label: "Apply".into(),
            cancel_label: "Cancel".into(),
        })
    }

    #[test]
    fn ctrl_c_escapes() {
        let state = DialogState::new(Dialog::yes_no("Quit?"));
        let msg = handle_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL), &state);
        assert_eq!(msg, DialogMessage::Escape);
    }

    #[test]
    fn letters_are_input_in_forms_only() {
        let form = form_state();
        assert_eq!(
            handle_event(press(KeyCode::Char('n'), KeyModifiers::NONE), &form),
            DialogMessage::Input('n')
        );

        let yes_no = DialogState::new(Dialog::yes_no("Quit?"));
        assert_eq!(
            handle_event(press(KeyCode::Char('n'), KeyModifiers::NONE), &yes_no),
            DialogMessage::No
        );
    }

    #[test]
    fn modified_letters_are_not_typed() {
        let form = form_state();
        assert_eq!(
            handle_event(press(KeyCode::Char('u'), KeyModifiers::CONTROL), &form),
            DialogMessage::Noop
        );
        assert_eq!(
            handle_event(press(KeyCode::Char('a'), KeyModifiers::ALT), &form),
            DialogMessage::Noop
        );
        assert_eq!(
            handle_event(press(KeyCode::Char('A'), KeyModifiers::SHIFT), &form),
            DialogMessage::Input('A')
        );
    }

    #[test]
    fn tab_cycles_buttons() {
        let form = form_state();
        assert_eq!(
            handle_event(press(KeyCode::Tab, KeyModifiers::NONE), &form),
            DialogMessage::NextButton
        );
        assert_eq!(
            handle_event(press(KeyCode::BackTab, KeyModifiers::SHIFT), &form),
            DialogMessage::PrevButton
        );
    }

    #[test]
    fn resize_only_redraws() {
        let form = form_state();
        assert_eq!(handle_event(Event::Resize(80, 24), &form), DialogMessage::Noop);
    }
}
