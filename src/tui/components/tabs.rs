//! Tab bar shown at the top of every frame.

use crate::tui::tab::Tab;

/// Renders the tab bar with the active tab highlighted.
///
/// # Examples
///
/// ```
/// use crawldash::tui::Tab;
/// use crawldash::tui::components::render_tab_bar;
///
/// assert_eq!(render_tab_bar(Tab::Crawler), " 1 Reviews  [2 Crawler]\n");
/// ```
#[must_use]
pub fn render_tab_bar(active: Tab) -> String {
    let mut output = String::new();
    for (index, tab) in Tab::ALL.into_iter().enumerate() {
        let number = index.saturating_add(1);
        let label = tab.label();
        if tab == active {
            output.push_str(&format!("[{number} {label}]"));
        } else {
            output.push_str(&format!(" {number} {label} "));
        }
        output.push(' ');
    }
    let trimmed_len = output.trim_end().len();
    output.truncate(trimmed_len);
    output.push('\n');
    output
}
