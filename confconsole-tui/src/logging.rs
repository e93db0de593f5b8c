//! 日志初始化
//!
//! 启动界面时写入日志文件，避免污染终端画面；
//! 无法打开日志文件时退回 stderr。
//! 核心库的 `log` 记录经 tracing-log 桥接后同样由此输出。

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE: &str = "/var/log/confconsole.log";
pub const LOG_ENV: &str = "CONFCONSOLE_LOG";

/// 初始化 tracing 订阅者
pub fn init(tui: bool) {
    let writer = if tui {
        file_writer(Path::new(LOG_FILE)).unwrap_or_else(|| BoxMakeWriter::new(std::io::stderr))
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(filter)
        .try_init();
}

fn file_writer(path: &Path) -> Option<BoxMakeWriter> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()?;
    Some(BoxMakeWriter::new(Mutex::new(file)))
}
