//! 对话框组件

use confconsole_core::traits::{Dialog, FormField};
use confconsole_core::types::MenuItem;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::model::DialogState;

use super::layout::centered_rect;
use super::theme::Styles;

const MIN_DIALOG_WIDTH: u16 = 30;
/// 边框加左右留白
const CHROME_WIDTH: u16 = 4;

/// 渲染对话框
pub fn render(frame: &mut Frame, state: &DialogState, area: Rect) {
    let (width, height) = dialog_size(state, area);
    let rect = centered_rect(width, height, area);

    // 清除背景
    frame.render_widget(Clear, rect);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::dialog());
    if let Some(title) = state.dialog.title() {
        block = block
            .title(Span::styled(format!(" {title} "), Styles::title()))
            .title_alignment(Alignment::Center);
    }
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let inner = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height,
    );
    let text_height = wrapped_height(state.dialog.text(), inner.width);
    let button_height = if state.buttons().is_empty() { 0 } else { 2 };
    let chunks = Layout::vertical([
        Constraint::Length(text_height),
        Constraint::Min(0),
        Constraint::Length(button_height),
    ])
    .split(inner);

    let text = Paragraph::new(state.dialog.text()).wrap(Wrap { trim: false });
    frame.render_widget(text, chunks[0]);

    match &state.dialog {
        Dialog::Menu { items, .. } => render_menu(frame, items, state.selected, chunks[1]),
        Dialog::Form { fields, .. } => render_form(frame, fields, state, chunks[1]),
        _ => {}
    }

    if button_height > 0 {
        render_buttons(frame, state, chunks[2]);
    }
}

/// 计算对话框尺寸，不超出可用区域
fn dialog_size(state: &DialogState, area: Rect) -> (u16, u16) {
    let max_width = area.width.saturating_sub(CHROME_WIDTH).max(MIN_DIALOG_WIDTH);

    let text_width = state
        .dialog
        .text()
        .lines()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0);
    let title_width = state.dialog.title().map_or(0, |t| t.width() + 2);
    let rows_width = match &state.dialog {
        Dialog::Menu { items, .. } => {
            let (label, desc) = menu_columns(items);
            label + desc + 2
        }
        Dialog::Form { fields, .. } => form_label_width(fields) + 2 + max_input_width(fields) + 1,
        _ => 0,
    };
    let buttons_width: usize = state.buttons().iter().map(|b| b.width() + 5).sum();

    let content = text_width
        .max(title_width)
        .max(rows_width)
        .max(buttons_width);
    let width = to_u16(content)
        .saturating_add(CHROME_WIDTH + 2)
        .clamp(MIN_DIALOG_WIDTH, max_width);

    let inner_width = width.saturating_sub(CHROME_WIDTH + 2);
    let rows = to_u16(state.row_count());
    let buttons = if state.buttons().is_empty() { 0 } else { 2 };
    let height = wrapped_height(state.dialog.text(), inner_width)
        .saturating_add(rows)
        .saturating_add(buttons)
        .saturating_add(2);
    (width, height.min(area.height))
}

/// 文本按宽度折行后的行数
fn wrapped_height(text: &str, width: u16) -> u16 {
    if text.is_empty() {
        return 0;
    }
    let width = usize::from(width.max(1));
    let lines: usize = text
        .lines()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    to_u16(lines)
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn menu_columns(items: &[MenuItem]) -> (usize, usize) {
    let label = items.iter().map(|i| i.label.width()).max().unwrap_or(0);
    let desc = items.iter().map(|i| i.description.width()).max().unwrap_or(0);
    (label, desc)
}

/// 渲染菜单
fn render_menu(frame: &mut Frame, items: &[MenuItem], selected: usize, area: Rect) {
    let (label_width, _) = menu_columns(items);
    let rows: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let padding = " ".repeat(label_width.saturating_sub(item.label.width()) + 2);
            ListItem::new(Line::from(vec![
                Span::styled(item.label.clone(), Styles::label()),
                Span::raw(padding),
                Span::raw(item.description.clone()),
            ]))
        })
        .collect();

    let list = List::new(rows).highlight_style(Styles::selected());
    let mut list_state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn form_label_width(fields: &[FormField]) -> usize {
    fields.iter().map(|f| f.label.width()).max().unwrap_or(0)
}

fn max_input_width(fields: &[FormField]) -> usize {
    fields.iter().map(|f| f.max_len).max().unwrap_or(0)
}

/// 渲染表单
fn render_form(frame: &mut Frame, fields: &[FormField], state: &DialogState, area: Rect) {
    let label_width = form_label_width(fields);
    let lines: Vec<Line> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == state.selected;
            let value = state.values.get(i).map_or("", String::as_str);
            let cursor = if focused { "▎" } else { " " };
            let input = format!("{value}{cursor}");
            let fill = " ".repeat((field.max_len + 1).saturating_sub(input.width()));
            let label_style = if focused {
                Styles::label()
            } else {
                Styles::dialog()
            };
            Line::from(vec![
                Span::styled(format!("{:>label_width$}: ", field.label), label_style),
                Span::styled(format!("{input}{fill}"), Styles::input(focused)),
            ])
        })
        .collect();

    // 焦点超出可见区域时滚动
    let offset = state
        .selected
        .saturating_sub(usize::from(area.height.saturating_sub(1)));
    let paragraph = Paragraph::new(lines).scroll((to_u16(offset), 0));
    frame.render_widget(paragraph, area);
}

/// 渲染按钮行
fn render_buttons(frame: &mut Frame, state: &DialogState, area: Rect) {
    let mut spans = Vec::new();
    for (i, label) in state.buttons().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let style = if i == state.button {
            Styles::selected()
        } else {
            Styles::dialog()
        };
        spans.push(Span::styled(format!("< {label} >"), style));
    }

    let [_, row] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        row,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_height_counts_long_lines() {
        assert_eq!(wrapped_height("", 10), 0);
        assert_eq!(wrapped_height("abc\n\nabcdefghijkl", 10), 4);
    }

    #[test]
    fn dialog_fits_the_area() {
        let state = DialogState::new(Dialog::Message {
            title: "Error".into(),
            text: "x".repeat(500),
            button: "OK".into(),
        });
        let area = Rect::new(0, 2, 80, 22);
        let (width, height) = dialog_size(&state, area);
        assert!(width <= 76);
        assert!(height <= 22);
    }

    #[test]
    fn menu_dialog_grows_with_items() {
        let items = vec![
            MenuItem::new("Networking", "Configure appliance networking"),
            MenuItem::new("Quit", "Quit the configuration console"),
        ];
        let state = DialogState::new(Dialog::Menu {
            title: "Advanced Menu".into(),
            text: "Appliance CORE Advanced Menu\n".into(),
            items,
            no_cancel: false,
        });
        let (width, height) = dialog_size(&state, Rect::new(0, 0, 100, 40));
        // 文本 1 行 + 2 项 + 按钮 2 行 + 边框 2 行
        assert_eq!(height, 7);
        assert!(width >= 10 + 30 + 2);
    }
}
