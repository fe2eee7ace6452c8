//! Summary statistics over a parsed transcript.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::Message;
use crate::message::MessageKind;

/// Counts per message kind, plus sender information.
///
/// # Example
///
/// ```
/// use chatview::core::TranscriptStats;
///
/// let messages = chatview::parse("\
/// 3/14/24, 9:05 PM - Alice created this group
/// 3/14/24, 9:06 PM - Alice: hi
/// 3/14/24, 9:07 PM - You: Missed voice call");
///
/// let stats = TranscriptStats::from_messages(&messages);
/// assert_eq!(stats.total, 3);
/// assert_eq!(stats.system, 1);
/// assert_eq!(stats.calls, 1);
/// assert_eq!(stats.from_me, 1);
/// assert_eq!(stats.senders, vec!["Alice".to_string(), "You".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranscriptStats {
    pub total: usize,
    pub system: usize,
    pub text: usize,
    pub images: usize,
    pub documents: usize,
    pub calls: usize,
    /// Messages written by the viewing user.
    pub from_me: usize,
    /// Distinct non-system senders, sorted.
    pub senders: Vec<String>,
    /// Raw date of the first message.
    pub first_date: Option<String>,
    /// Raw date of the last message.
    pub last_date: Option<String>,
}

impl TranscriptStats {
    /// Computes statistics in a single pass.
    pub fn from_messages(messages: &[Message]) -> Self {
        let mut stats = Self {
            total: messages.len(),
            first_date: messages.first().map(|m| m.date.clone()),
            last_date: messages.last().map(|m| m.date.clone()),
            ..Self::default()
        };
        let mut senders = BTreeSet::new();

        for msg in messages {
            match msg.kind {
                MessageKind::System => stats.system += 1,
                MessageKind::User => stats.text += 1,
                MessageKind::Image => stats.images += 1,
                MessageKind::Document => stats.documents += 1,
                MessageKind::Call => stats.calls += 1,
            }
            if msg.is_me {
                stats.from_me += 1;
            }
            if !msg.is_system() {
                senders.insert(msg.sender.as_str());
            }
        }

        stats.senders = senders.into_iter().map(str::to_string).collect();
        stats
    }

    /// Number of messages of the given kind.
    pub fn count(&self, kind: MessageKind) -> usize {
        match kind {
            MessageKind::System => self.system,
            MessageKind::User => self.text,
            MessageKind::Image => self.images,
            MessageKind::Document => self.documents,
            MessageKind::Call => self.calls,
        }
    }

    /// Image attachments that have no entry in `files`.
    pub fn missing_attachments<'a>(
        messages: &'a [Message],
        files: &crate::files::FileMap,
    ) -> Vec<&'a str> {
        messages
            .iter()
            .filter(|m| m.kind == MessageKind::Image)
            .filter_map(Message::attachment_name)
            .filter(|name| !files.contains(name))
            .collect()
    }
}
