//! Human-readable rendering of bookmarks.

use owo_colors::OwoColorize;

use super::Bookmark;

/// Rendering options for [`pretty`].
///
/// Built from the `[display]` config table and passed in explicitly so that
/// rendering never depends on process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrettyStyle {
    /// Emit ANSI styling.
    pub color: bool,
    /// Show the whole directory path instead of only its final component.
    pub full_path: bool,
    /// Column width for the `Name:` / `Directory:` labels.
    pub label_width: usize,
}

impl Default for PrettyStyle {
    fn default() -> Self {
        Self {
            color: false,
            full_path: true,
            label_width: 12,
        }
    }
}

impl PrettyStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Render a bookmark as two labelled lines.
///
/// `None` is the explicit "no bookmark" input and renders as `<no bookmark>`.
pub fn pretty(bookmark: Option<&Bookmark>, style: &PrettyStyle) -> String {
    let Some(bookmark) = bookmark else {
        return "<no bookmark>".to_string();
    };

    let directory = if style.full_path {
        bookmark.directory.display().to_string()
    } else {
        bookmark
            .directory
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| bookmark.directory.display().to_string())
    };

    let name_label = format!("{:<width$}", "Name:", width = style.label_width);
    let dir_label = format!("{:<width$}", "Directory:", width = style.label_width);

    if style.color {
        format!(
            "{}{}\n{}{}",
            name_label.dimmed(),
            bookmark.name.bold(),
            dir_label.dimmed(),
            directory.cyan()
        )
    } else {
        format!("{}{}\n{}{}", name_label, bookmark.name, dir_label, directory)
    }
}
