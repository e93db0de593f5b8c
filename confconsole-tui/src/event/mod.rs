//!
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘/鼠标输入翻译为 `DialogMessage`。
//!
//!     · read_event      阻塞读取下一个终端事件（无轮询超时）
//!     · handle_event    事件分发，根据当前对话框类型选择按键映射
//!
//! 常用键盘映射：
//!     ↑/↓          → Up / Down
//!     Tab / →      → NextButton
//!     Shift+Tab / ← → PrevButton
//!     Enter        → Confirm
//!     Esc / Ctrl+C → Escape
//!     字符输入      → Input(c)（仅表单）
//!     y / n        → Yes / No（仅是/否对话框）
//!

mod handler;
mod keymap;

pub use handler::{handle_event, read_event};
