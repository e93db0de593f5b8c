//!
//! src/model/mod.rs
//! Model 层：对话框状态
//!
//! 每次 `Renderer::present` 调用都会基于传入的 `Dialog` 创建一个新的
//! `DialogState`，在用户作出决定（确认、取消或 Esc）之前保存：
//!     · 菜单中选中的条目 / 表单中获得焦点的输入框
//!     · 表单中正在编辑的值
//!     · 当前选中的按钮
//!

mod dialog;

pub use dialog::DialogState;
