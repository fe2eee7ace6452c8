//! Plain-text rendering of a [`ChatView`].

use super::{Bubble, BubbleBody, ChatView, DOCUMENT_UNAVAILABLE, ViewItem};

const TICKS: &str = "✓✓";
const INDENT: &str = "    ";

/// Renders the view as plain text, one row per line.
///
/// ```text
/// --- 3/14/24 ---
///   * Messages and calls are end-to-end encrypted *
/// [9:05 PM] Alice: Hello there
/// [9:07 PM] You: Hi Alice ✓✓
/// ```
///
/// Multi-line bodies continue on indented lines.
pub fn to_text(view: &ChatView) -> String {
    view.items()
        .iter()
        .map(|item| match item {
            ViewItem::DateSeparator(date) => format!("--- {date} ---\n"),
            ViewItem::Notice(text) => format!("  * {} *\n", indent_continuations(text)),
            ViewItem::Bubble(bubble) => render_bubble(bubble),
        })
        .collect()
}

fn render_bubble(bubble: &Bubble) -> String {
    let body = match &bubble.body {
        BubbleBody::Text { text } => text.clone(),
        BubbleBody::Image {
            path: Some(path), ..
        } => format!("[image: {}]", path.display()),
        BubbleBody::Image { name, path: None } => BubbleBody::placeholder(name),
        BubbleBody::Document { name } => format!("📄 {name} ({DOCUMENT_UNAVAILABLE})"),
        BubbleBody::Call { title, detail, .. } if detail.is_empty() => format!("📞 {title}"),
        BubbleBody::Call { title, detail, .. } => format!("📞 {title} ({detail})"),
    };
    let ticks = if bubble.ticks { format!(" {TICKS}") } else { String::new() };

    format!(
        "[{}] {}: {}{ticks}\n",
        bubble.time,
        bubble.sender,
        indent_continuations(&body)
    )
}

fn indent_continuations(text: &str) -> String {
    text.replace('\n', &format!("\n{INDENT}"))
}
