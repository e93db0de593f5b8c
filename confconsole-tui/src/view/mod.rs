//!
//! src/view/mod.rs
//! View 层：UI 渲染
//!
//! 只读取 `DialogState`，不修改任何状态。
//!
//!     mod layout;     // 背景、标题栏与居中区域
//!     mod dialog;     // 各类对话框
//!     mod theme;      // 颜色与样式
//!

mod dialog;
mod layout;
mod theme;

pub use layout::render;
