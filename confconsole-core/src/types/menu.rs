//! Menu entry type

/// One selectable entry of a menu dialog
///
/// Built per render from live state and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Text the operator selects; returned as the menu choice
    pub label: String,
    /// One-line description shown next to the label
    pub description: String,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}
