//!
//! src/update/mod.rs
//! Update 层：根据消息修改对话框状态
//!
//! 返回 `Some(Response)` 表示用户已作出决定，对话框关闭。
//!

use confconsole_core::traits::{Dialog, Outcome, Response};

use crate::message::DialogMessage;
use crate::model::DialogState;

/// 处理对话框消息
pub fn update(state: &mut DialogState, msg: DialogMessage) -> Option<Response> {
    match msg {
        DialogMessage::Up => {
            let rows = state.row_count();
            if rows > 0 {
                state.selected = state.selected.checked_sub(1).unwrap_or(rows - 1);
            }
            None
        }

        DialogMessage::Down => {
            let rows = state.row_count();
            if rows > 0 {
                state.selected = (state.selected + 1) % rows;
            }
            None
        }

        DialogMessage::NextButton => {
            let count = state.buttons().len();
            if count > 0 {
                state.button = (state.button + 1) % count;
            }
            None
        }

        DialogMessage::PrevButton => {
            let count = state.buttons().len();
            if count > 0 {
                state.button = state.button.checked_sub(1).unwrap_or(count - 1);
            }
            None
        }

        DialogMessage::Input(c) => {
            let max_len = state.focused_max_len()?;
            let value = state.values.get_mut(state.selected)?;
            if !c.is_control() && value.chars().count() < max_len {
                value.push(c);
            }
            None
        }

        DialogMessage::Backspace => {
            if state.is_form() {
                if let Some(value) = state.values.get_mut(state.selected) {
                    value.pop();
                }
            }
            None
        }

        DialogMessage::Confirm => Some(respond(state, button_outcome(state.button))),

        DialogMessage::Escape => Some(respond(state, Outcome::Escaped)),

        DialogMessage::Yes if matches!(state.dialog, Dialog::YesNo { .. }) => {
            Some(respond(state, Outcome::Confirmed))
        }

        DialogMessage::No if matches!(state.dialog, Dialog::YesNo { .. }) => {
            Some(respond(state, Outcome::Cancelled))
        }

        DialogMessage::Yes | DialogMessage::No | DialogMessage::Noop => None,
    }
}

fn button_outcome(button: usize) -> Outcome {
    if button == 0 {
        Outcome::Confirmed
    } else {
        Outcome::Cancelled
    }
}

fn respond(state: &DialogState, outcome: Outcome) -> Response {
    match &state.dialog {
        Dialog::Form { .. } => Response::form(outcome, state.values.clone()),
        Dialog::Menu { .. } if outcome == Outcome::Confirmed => match state.selected_label() {
            Some(label) => Response::choice(label),
            None => Response::new(Outcome::Cancelled),
        },
        _ => Response::new(outcome),
    }
}
