//! 终端初始化和清理

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// 终端类型别名
pub type Term = Terminal<CrosstermBackend<Stdout>>;

/// 初始化终端
///
/// `mouse` 为 false 时不捕获鼠标，保留终端自身的复制/粘贴。
pub fn init_terminal(mouse: bool) -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// 恢复终端
pub fn restore_terminal(terminal: &mut Term, mouse: bool) -> io::Result<()> {
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// 暂时把终端交给子进程
pub fn suspend_terminal(terminal: &mut Term, mouse: bool) -> io::Result<()> {
    restore_terminal(terminal, mouse)
}

/// 子进程退出后收回终端，并强制整屏重绘
pub fn resume_terminal(terminal: &mut Term, mouse: bool) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    if mouse {
        execute!(terminal.backend_mut(), EnableMouseCapture)?;
    }
    terminal.clear()
}
