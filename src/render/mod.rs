//! Chat view model and its serializers.
//!
//! [`ChatView::build`] lays parsed messages out the way a chat app shows
//! them: date separators, centered system notices and left/right bubbles
//! with sender colors, display times and resolved attachments. The view is
//! built from the already-parsed messages plus a [`RenderConfig`], so
//! switching between 12/24-hour time or toggling date separators only
//! rebuilds the view.
//!
//! - [`to_text`] - plain terminal-friendly transcript
//! - [`to_html`] - self-contained HTML page (requires `html` feature)
//!
//! # Example
//!
//! ```rust
//! use chatview::config::RenderConfig;
//! use chatview::render::{ChatView, ViewItem, to_text};
//! use chatview::FileMap;
//!
//! let messages = chatview::parse("3/14/24, 9:05 PM - Alice: Hello there");
//! let view = ChatView::build(&messages, &FileMap::new(), &RenderConfig::new().with_24_hour(true));
//!
//! assert!(matches!(view.items()[0], ViewItem::DateSeparator(_)));
//! assert!(to_text(&view).contains("[21:05] Alice: Hello there"));
//! ```

mod text;

#[cfg(feature = "html")]
mod html;

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::Message;
use crate::config::RenderConfig;
use crate::files::FileMap;
use crate::message::MessageKind;
use crate::parsing::call::{is_missed_call, is_video_call};
use crate::time::format_time;

#[cfg(feature = "html")]
pub use html::to_html;
pub use text::to_text;

/// Sender label colors, handed out in order of first appearance.
pub const SENDER_PALETTE: [&str; 16] = [
    "#e53935", "#d81b60", "#8e24aa", "#5e35b1", "#3949ab", "#1e88e5", "#039be5", "#00acc1",
    "#00897b", "#43a047", "#7cb342", "#c0ca33", "#fdd835", "#ffb300", "#fb8c00", "#f4511e",
];

/// Shown in place of an image whose file was not collected.
pub const IMAGE_PLACEHOLDER: &str = "📷";

/// Shown under the name of an omitted document.
pub const DOCUMENT_UNAVAILABLE: &str = "Document not available";

/// Which side of the conversation a bubble sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Written by the viewing user.
    Sent,
    /// Written by someone else.
    Received,
}

/// The main content of a bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BubbleBody {
    /// Plain text.
    Text { text: String },
    /// An attachment; `path` is `None` when the file is not in the [`FileMap`].
    Image { name: String, path: Option<PathBuf> },
    /// An omitted document.
    Document { name: String },
    /// A call record.
    Call {
        title: String,
        detail: String,
        video: bool,
        missed: bool,
    },
}

impl BubbleBody {
    /// Text shown for an unresolved image, e.g. `📷 IMG-1.jpg`.
    pub fn placeholder(name: &str) -> String {
        format!("{IMAGE_PLACEHOLDER} {name}")
    }
}

/// A message bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bubble {
    pub side: Side,
    pub sender: String,
    /// Label color; `None` for own messages, which carry no sender label.
    pub color: Option<&'static str>,
    /// Display time, already formatted for the configured clock.
    pub time: String,
    /// Read ticks, shown on own messages.
    pub ticks: bool,
    pub body: BubbleBody,
}

impl Bubble {
    /// Returns `true` if the sender name is displayed above the body.
    pub fn shows_sender(&self) -> bool {
        self.color.is_some()
    }
}

/// One row of the chat view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ViewItem {
    /// Raw date text, shown when the date changes.
    DateSeparator(String),
    /// A system notice.
    Notice(String),
    Bubble(Bubble),
}

/// A laid-out chat, ready for serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatView {
    items: Vec<ViewItem>,
}

impl ChatView {
    /// Lays out `messages`, resolving image attachments against `files`.
    pub fn build(messages: &[Message], files: &FileMap, config: &RenderConfig) -> Self {
        let mut palette = Palette::default();
        let mut items = Vec::with_capacity(messages.len());
        let mut last_date: Option<&str> = None;

        for msg in messages {
            if config.show_dates && !msg.date.is_empty() && last_date != Some(msg.date.as_str()) {
                items.push(ViewItem::DateSeparator(msg.date.clone()));
                last_date = Some(msg.date.as_str());
            }

            if msg.is_system() {
                items.push(ViewItem::Notice(msg.content.clone()));
                continue;
            }

            let (side, color) = if msg.is_me {
                (Side::Sent, None)
            } else {
                (Side::Received, Some(palette.color_for(&msg.sender)))
            };

            items.push(ViewItem::Bubble(Bubble {
                side,
                sender: msg.sender.clone(),
                color,
                time: format_time(&msg.time, config.use_24_hour),
                ticks: msg.is_me,
                body: body_of(msg, files),
            }));
        }

        Self { items }
    }

    /// The rows in display order.
    pub fn items(&self) -> &[ViewItem] {
        &self.items
    }

    /// Iterates over the bubbles only.
    pub fn bubbles(&self) -> impl Iterator<Item = &Bubble> {
        self.items.iter().filter_map(|item| match item {
            ViewItem::Bubble(bubble) => Some(bubble),
            _ => None,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn body_of(msg: &Message, files: &FileMap) -> BubbleBody {
    match (msg.kind, msg.attachment_name()) {
        (MessageKind::Image, Some(name)) => BubbleBody::Image {
            name: name.to_string(),
            path: files.get(name).map(PathBuf::from),
        },
        (MessageKind::Document, name) => BubbleBody::Document {
            name: name.unwrap_or("Document").to_string(),
        },
        (MessageKind::Call, _) => {
            let call_type = msg.call_type().unwrap_or(&msg.content);
            BubbleBody::Call {
                title: msg.content.clone(),
                detail: msg.detail().unwrap_or_default().to_string(),
                video: is_video_call(call_type),
                missed: is_missed_call(call_type),
            }
        }
        _ => BubbleBody::Text {
            text: msg.content.clone(),
        },
    }
}

/// First-seen color assignment, cycling through [`SENDER_PALETTE`].
#[derive(Debug, Default)]
struct Palette {
    assigned: HashMap<String, &'static str>,
}

impl Palette {
    fn color_for(&mut self, sender: &str) -> &'static str {
        if let Some(&color) = self.assigned.get(sender) {
            return color;
        }
        let color = SENDER_PALETTE[self.assigned.len() % SENDER_PALETTE.len()];
        self.assigned.insert(sender.to_string(), color);
        color
    }
}
