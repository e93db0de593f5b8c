//! 对话框状态

use confconsole_core::traits::Dialog;

/// 单个对话框的交互状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogState {
    pub dialog: Dialog,
    /// 菜单选中项，或表单中获得焦点的输入框
    pub selected: usize,
    /// 表单当前值（按输入框顺序）
    pub values: Vec<String>,
    /// 选中的按钮，0 为确认
    pub button: usize,
}

impl DialogState {
    pub fn new(dialog: Dialog) -> Self {
        let values = match &dialog {
            Dialog::Form { fields, .. } => fields.iter().map(|f| f.value.clone()).collect(),
            _ => Vec::new(),
        };
        Self {
            dialog,
            selected: 0,
            values,
            button: 0,
        }
    }

    /// 按钮文字，从左到右
    pub fn buttons(&self) -> Vec<&str> {
        match &self.dialog {
            Dialog::Info { .. } => Vec::new(),
            Dialog::Message { button, .. } => vec![button.as_str()],
            Dialog::YesNo {
                yes_label,
                no_label,
                ..
            } => vec![yes_label.as_str(), no_label.as_str()],
            Dialog::Menu { no_cancel, .. } => {
                if *no_cancel {
                    vec!["Select"]
                } else {
                    vec!["Select", "Back"]
                }
            }
            Dialog::Form {
                ok_label,
                cancel_label,
                ..
            } => vec![ok_label.as_str(), cancel_label.as_str()],
        }
    }

    /// 可上下选择的行数（菜单项或输入框）
    pub fn row_count(&self) -> usize {
        match &self.dialog {
            Dialog::Menu { items, .. } => items.len(),
            Dialog::Form { fields, .. } => fields.len(),
            _ => 0,
        }
    }

    pub fn is_form(&self) -> bool {
        matches!(self.dialog, Dialog::Form { .. })
    }

    /// 当前选中的菜单项标签
    pub fn selected_label(&self) -> Option<&str> {
        match &self.dialog {
            Dialog::Menu { items, .. } => items.get(self.selected).map(|i| i.label.as_str()),
            _ => None,
        }
    }

    /// 获得焦点的输入框允许的最大长度
    pub fn focused_max_len(&self) -> Option<usize> {
        match &self.dialog {
            Dialog::Form { fields, .. } => fields.get(self.selected).map(|f| f.max_len),
            _ => None,
        }
    }
}
