//! 主布局渲染

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use crate::model::DialogState;

use super::dialog;
use super::theme::Styles;

/// 可用的最小终端尺寸
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;

/// 渲染整个画面：背景标题栏 + 居中对话框
pub fn render(frame: &mut Frame, state: &DialogState, backtitle: &str) {
    let size = frame.area();
    frame.render_widget(Block::default().style(Styles::screen()), size);

    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        render_too_small(frame, size);
        return;
    }

    // 三层布局：标题栏 + 对话框区域 + 快捷键提示
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // 标题栏
            Constraint::Min(1),    // 对话框区域
            Constraint::Length(1), // 提示
        ])
        .split(size);

    let title = Paragraph::new(format!(" {backtitle}")).style(Styles::backtitle());
    frame.render_widget(title, main_layout[0]);

    dialog::render(frame, state, main_layout[1]);

    let hint = Paragraph::new(key_hint(state)).style(Styles::hint());
    frame.render_widget(hint, main_layout[2]);
}

fn key_hint(state: &DialogState) -> &'static str {
    if state.is_form() {
        " ↑/↓ field  Tab button  Enter confirm  Esc quit"
    } else {
        " ↑/↓ select  ←/→ button  Enter confirm  Esc quit"
    }
}

fn render_too_small(frame: &mut Frame, area: Rect) {
    let text = format!(
        "Terminal too small\n\nNeed at least {MIN_WIDTH}x{MIN_HEIGHT}, have {}x{}",
        area.width, area.height
    );
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Styles::screen());
    frame.render_widget(paragraph, area);
}

/// 计算居中区域
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_clamped() {
        let area = Rect::new(0, 2, 80, 22);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 8, 40, 10));
        assert_eq!(centered_rect(120, 40, area), area);
    }
}
