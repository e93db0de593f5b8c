//! 主题和样式定义
//!
//! 沿用传统 dialog(1) 配色：蓝色背景，灰色对话框。

use ratatui::style::{Color, Modifier, Style};

/// 主题颜色
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub screen_bg: Color,
    pub screen_fg: Color,
    pub dialog_bg: Color,
    pub dialog_fg: Color,
    pub border: Color,
    pub title: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub input_bg: Color,
    pub muted: Color,
}

/// 获取颜色方案
pub fn colors() -> ThemeColors {
    ThemeColors::classic()
}

impl ThemeColors {
    pub fn classic() -> Self {
        Self {
            screen_bg: Color::Blue,
            screen_fg: Color::White,
            dialog_bg: Color::Gray,
            dialog_fg: Color::Black,
            border: Color::White,
            title: Color::Blue,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            input_bg: Color::Cyan,
            muted: Color::DarkGray,
        }
    }
}

/// 常用样式
pub struct Styles;

impl Styles {
    /// 背景
    pub fn screen() -> Style {
        let c = colors();
        Style::default().bg(c.screen_bg).fg(c.screen_fg)
    }

    /// 背景标题栏
    pub fn backtitle() -> Style {
        Styles::screen().add_modifier(Modifier::BOLD)
    }

    /// 对话框主体
    pub fn dialog() -> Style {
        let c = colors();
        Style::default().bg(c.dialog_bg).fg(c.dialog_fg)
    }

    pub fn border() -> Style {
        let c = colors();
        Style::default().bg(c.dialog_bg).fg(c.border)
    }

    /// 标题样式
    pub fn title() -> Style {
        let c = colors();
        Style::default()
            .bg(c.dialog_bg)
            .fg(c.title)
            .add_modifier(Modifier::BOLD)
    }

    /// 选中项样式
    pub fn selected() -> Style {
        let c = colors();
        Style::default()
            .bg(c.selected_bg)
            .fg(c.selected_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// 菜单标签（未选中）
    pub fn label() -> Style {
        let c = colors();
        Style::default().fg(c.title).add_modifier(Modifier::BOLD)
    }

    /// 表单输入框
    pub fn input(focused: bool) -> Style {
        let c = colors();
        let style = Style::default().bg(c.input_bg).fg(c.dialog_fg);
        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// 快捷键提示
    pub fn hint() -> Style {
        Style::default().fg(colors().muted)
    }
}
