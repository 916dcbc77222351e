use std::borrow::Cow;

use itertools::Itertools;

/// Pluralizes a piece of text.
pub fn pluralize(base: &str, count: usize) -> Cow<'_, str> {
    if count == 1 {
        base.into()
    } else {
        format!("{base}s").into()
    }
}

/// Formats items as a markdown list, one `- item` line each.
pub fn format_list<T: AsRef<str>>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| format!("- {}\n", item.as_ref()))
        .join("")
}

/// Escapes the message of a GitHub Actions workflow command (e.g. `::error::<message>`), which
/// has to fit on a single line.
pub fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
