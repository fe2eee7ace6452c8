//! Self-contained HTML rendering of a [`ChatView`].

use crate::config::RenderConfig;

use super::{Bubble, BubbleBody, ChatView, DOCUMENT_UNAVAILABLE, Side, ViewItem};

const STYLE: &str = r#"
:root { --bg: #efeae2; --sent: #d9fdd3; --received: #ffffff; --text: #111b21; --meta: #667781; --notice: #ffeecd; --separator: #e1f3fb; --ticks: #53bdeb; }
body.dark { --bg: #0b141a; --sent: #005c4b; --received: #202c33; --text: #e9edef; --meta: #8696a0; --notice: #182229; --separator: #182229; --ticks: #53bdeb; }
body { margin: 0; background: var(--bg); color: var(--text); font: 14.2px/1.4 -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; }
.chat { max-width: 860px; margin: 0 auto; padding: 16px 5%; display: flex; flex-direction: column; gap: 4px; }
.date-separator { align-self: center; margin: 10px 0; }
.date-separator span { background: var(--separator); border-radius: 8px; padding: 5px 12px; font-size: 12.5px; }
.message-row { display: flex; }
.message-row.sent { justify-content: flex-end; }
.message-row.system { justify-content: center; }
.bubble { max-width: 65%; border-radius: 8px; padding: 6px 8px 8px; box-shadow: 0 1px 0.5px rgba(11, 20, 26, 0.13); white-space: pre-wrap; word-wrap: break-word; }
.bubble.sent { background: var(--sent); }
.bubble.received { background: var(--received); }
.bubble.system-content { background: var(--notice); font-size: 12.5px; text-align: center; }
.sender-name { display: block; font-weight: 600; font-size: 12.8px; margin-bottom: 2px; }
.bubble img { display: block; max-width: 100%; border-radius: 6px; margin-bottom: 4px; }
.placeholder { font-style: italic; opacity: 0.7; margin-bottom: 5px; }
.document-content, .call-content { display: flex; gap: 10px; align-items: center; }
.document-meta-info, .call-subtext { color: var(--meta); font-size: 12px; }
.call-content.missed .call-icon { color: #f15c6d; }
.msg-meta { float: right; margin: 6px 0 -4px 10px; color: var(--meta); font-size: 11px; }
.read-ticks { color: var(--ticks); margin-left: 3px; }
"#;

/// Renders the view as a standalone HTML page.
///
/// All message text is escaped. Resolved images are referenced by their
/// file path; unresolved ones show a placeholder.
///
/// ```rust
/// use chatview::config::{RenderConfig, Theme};
/// use chatview::render::{ChatView, to_html};
/// use chatview::FileMap;
///
/// let messages = chatview::parse("3/14/24, 9:05 PM - Alice: <b>hi</b>");
/// let config = RenderConfig::new().with_theme(Theme::Dark);
/// let html = to_html(&ChatView::build(&messages, &FileMap::new(), &config), &config);
///
/// assert!(html.contains(r#"<body class="dark">"#));
/// assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
/// ```
pub fn to_html(view: &ChatView, config: &RenderConfig) -> String {
    let mut out = String::with_capacity(4096 + view.len() * 256);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>Chat</title>\n<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n");
    out.push_str(&format!("<body class=\"{}\">\n", config.theme.as_str()));
    out.push_str("<div class=\"chat\">\n");

    for item in view.items() {
        let row = match item {
            ViewItem::DateSeparator(date) => format!(
                "<div class=\"date-separator\"><span>{}</span></div>\n",
                escape_html(date)
            ),
            ViewItem::Notice(text) => format!(
                "<div class=\"message-row system\"><div class=\"bubble system-content\">{}</div></div>\n",
                escape_html(text)
            ),
            ViewItem::Bubble(bubble) => render_bubble(bubble),
        };
        out.push_str(&row);
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn render_bubble(bubble: &Bubble) -> String {
    let side = match bubble.side {
        Side::Sent => "sent",
        Side::Received => "received",
    };
    let call_class = if matches!(bubble.body, BubbleBody::Call { .. }) {
        " call-message"
    } else {
        ""
    };

    let mut out =
        format!("<div class=\"message-row {side}\"><div class=\"bubble {side}{call_class}\">");

    if let Some(color) = bubble.color {
        out.push_str(&format!(
            "<span class=\"sender-name\" style=\"color: {color}\">{}</span>",
            escape_html(&bubble.sender)
        ));
    }

    out.push_str(&render_body(&bubble.body));

    out.push_str(&format!("<div class=\"msg-meta\">{}", escape_html(&bubble.time)));
    if bubble.ticks {
        out.push_str("<span class=\"read-ticks\">✓✓</span>");
    }
    out.push_str("</div></div></div>\n");
    out
}

fn render_body(body: &BubbleBody) -> String {
    match body {
        BubbleBody::Text { text } => {
            format!("<div class=\"msg-content\">{}</div>", escape_html(text))
        }
        BubbleBody::Image {
            name,
            path: Some(path),
        } => format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(&path.to_string_lossy()),
            escape_html(name)
        ),
        BubbleBody::Image { name, path: None } => format!(
            "<div class=\"placeholder\">{}</div>",
            escape_html(&BubbleBody::placeholder(name))
        ),
        BubbleBody::Document { name } => format!(
            "<div class=\"document-content\"><div class=\"document-icon\">📄</div>\
             <div class=\"document-info\"><div class=\"document-name\">{}</div>\
             <div class=\"document-meta-info\">{DOCUMENT_UNAVAILABLE}</div></div></div>",
            escape_html(name)
        ),
        BubbleBody::Call {
            title,
            detail,
            video,
            missed,
        } => {
            let missed_class = if *missed { " missed" } else { "" };
            let icon = if *video { "🎥" } else { "📞" };
            format!(
                "<div class=\"call-content{missed_class}\"><div class=\"call-icon\">{icon}</div>\
                 <div class=\"call-text\"><div class=\"call-title\">{}</div>\
                 <div class=\"call-subtext\">{}</div></div></div>",
                escape_html(title),
                escape_html(detail)
            )
        }
    }
}

/// Escapes text for use in HTML content and quoted attributes.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
