//!
//! src/util/mod.rs
//! Util 层：终端的初始化、交出与恢复
//!
//!     mod terminal;
//!
//!     pub use terminal::{init_terminal, restore_terminal, suspend_terminal, resume_terminal, Term};
//!
//! 运行插件或安装程序前调用 `suspend_terminal` 把终端交给子进程，
//! 子进程结束后用 `resume_terminal` 收回。
//!

mod terminal;

pub use terminal::{init_terminal, restore_terminal, resume_terminal, suspend_terminal, Term};
