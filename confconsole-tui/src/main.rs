//! confconsole: 设备配置控制台
//!
//! ## 架构
//!
//! 对话框渲染采用 Elm Architecture (TEA) 模式：
//! - **Model**: 对话框状态 (`model/`)
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 系统服务 (`backend/`)
//!
//! 界面之间的跳转由 confconsole-core 的 `Navigator` 负责，
//! `renderer.rs` 把上面的 TEA 循环包装成核心库的 `Renderer`。
//!
//!
//! main.rs
//! 程序入口
//!
//! fn `main()` {
//!
//!     Cli::try_parse()        // 解析命令行，--help 直接退出
//!     logging::init()         // 初始化日志
//!     geteuid()               // 必须以 root 运行
//!     app::run()              // 见 app.rs
//!
//! }

mod app;
mod backend;
mod cli;
mod event;
mod logging;
mod message;
mod model;
mod renderer;
mod update;
mod util;
mod view;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;

fn main() -> ExitCode {
    // 1. 解析命令行
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    // 2. 初始化日志
    logging::init(cli.uses_tui());

    // 3. 检查权限
    if !nix::unistd::geteuid().is_root() {
        eprintln!("error: confconsole needs root privileges");
        return ExitCode::FAILURE;
    }

    // 4. 运行控制台，终端已由 TerminalRenderer 的 Drop 恢复
    match app::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
