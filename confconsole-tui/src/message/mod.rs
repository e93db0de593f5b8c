//!
//! src/message/mod.rs
//! Message 层：对话框消息
//!
//! Event 层将按键翻译为 `DialogMessage`，再交给 Update 层消费。
//!

/// 对话框相关消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMessage {
    /// 上一项 / 上一个输入框
    Up,

    /// 下一项 / 下一个输入框
    Down,

    /// 下一个按钮
    NextButton,

    /// 上一个按钮
    PrevButton,

    /// 输入字符
    Input(char),

    /// 删除字符（Backspace）
    Backspace,

    /// 按下当前按钮
    Confirm,

    /// Esc 或 Ctrl+C
    Escape,

    /// 是/否对话框的快捷键
    Yes,
    No,

    /// 无操作（窗口大小变化等，仅重绘）
    Noop,
}
