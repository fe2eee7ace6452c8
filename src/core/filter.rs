//! Filter messages by date range, sender and kind.
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from specific user |
//! | System | [`without_system`](FilterConfig::without_system) | Drop system notices |
//! | Kind | [`with_kinds`](FilterConfig::with_kinds) | Keep only the given kinds |
//!
//! # Examples
//!
//! ```
//! use chatview::core::filter::{FilterConfig, apply_filters};
//!
//! # fn main() -> chatview::Result<()> {
//! let messages = chatview::parse("\
//! 1/10/24, 9:00 AM - Alice created this group
//! 1/10/24, 9:01 AM - Alice: Old
//! 6/15/24, 9:00 AM - Bob: New
//! 6/15/24, 9:05 AM - alice: Newer");
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_sender("Alice");
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].content, "Newer");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Dates are compared against [`Message::timestamp`]; messages whose raw
//!   date cannot be interpreted are **excluded** when date filters are active
//! - Sender matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::Message;
use crate::error::{ChatviewError, Result};
use crate::message::MessageKind;

/// Filter criteria, combined with AND logic.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only messages on or after this moment.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this moment.
    pub before: Option<NaiveDateTime>,

    /// Include only messages from this sender (case-insensitive).
    pub from: Option<String>,

    /// Drop system notices.
    pub skip_system: bool,

    /// Include only these kinds; empty means all.
    pub kinds: Vec<MessageKind>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive), `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatviewError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        let date = parse_filter_date(date_str)?;
        self.after = Some(date.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive), `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatviewError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let date = parse_filter_date(date_str)?;
        let end = date
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ChatviewError::invalid_date(date_str))?;
        self.before = Some(end);
        Ok(self)
    }

    /// Sets the sender filter.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Drops system notices.
    #[must_use]
    pub fn without_system(mut self) -> Self {
        self.skip_system = true;
        self
    }

    /// Keeps only the given kinds.
    #[must_use]
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = MessageKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Sets the start moment directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end moment directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.from.is_some() || self.skip_system || !self.kinds.is_empty()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `msg` passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if self.skip_system && msg.is_system() {
            return false;
        }
        if !self.kinds.is_empty() && !self.kinds.contains(&msg.kind) {
            return false;
        }
        if let Some(ref from) = self.from {
            if !msg.sender.eq_ignore_ascii_case(from) {
                return false;
            }
        }

        if self.has_date_filter() {
            let Some(ts) = msg.timestamp() else {
                return false;
            };
            if self.after.is_some_and(|after| ts < after) {
                return false;
            }
            if self.before.is_some_and(|before| ts > before) {
                return false;
            }
        }

        true
    }
}

fn parse_filter_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatviewError::invalid_date(date_str))
}

/// Keeps the messages that match all active filters, in order.
///
/// Returns the input unchanged when no filter is active.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    messages.into_iter().filter(|msg| config.matches(msg)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::Dialect;

    fn make_msg(sender: &str, content: &str, date: &str) -> Message {
        Message::new(date, "12:00:00", sender, content, MessageKind::User)
            .with_dialect(Dialect::Bracketed)
    }

    #[test]
    fn test_filter_by_sender() {
        let messages = vec![
            make_msg("Alice", "Hello", "01/01/2024"),
            make_msg("Bob", "Hi", "01/01/2024"),
            make_msg("alice", "Bye", "01/01/2024"),
        ];

        let filtered = apply_filters(messages, &FilterConfig::new().with_sender("Alice"));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|m| m.sender.eq_ignore_ascii_case("Alice")));
    }

    #[test]
    fn test_filter_by_date_after() {
        let messages = vec![
            make_msg("Alice", "Old", "01/01/2024"),
            make_msg("Alice", "New", "15/06/2024"),
        ];

        let config = FilterConfig::new().with_date_from("2024-06-01").unwrap();
        let filtered = apply_filters(messages, &config);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "New");
    }

    #[test]
    fn test_filter_by_date_before_is_inclusive() {
        let messages = vec![
            Message::new("01/03/2024", "23:59:59", "Alice", "Late", MessageKind::User)
                .with_dialect(Dialect::Bracketed),
            make_msg("Alice", "Next day", "02/03/2024"),
        ];

        let config = FilterConfig::new().with_date_to("2024-03-01").unwrap();
        let filtered = apply_filters(messages, &config);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "Late");
    }

    #[test]
    fn test_uninterpretable_date_excluded_when_date_filter() {
        let messages = vec![
            make_msg("Alice", "With date", "15/06/2024"),
            make_msg("Alice", "Bad date", "99/99/9999"),
        ];

        let config = FilterConfig::new().with_date_from("2024-01-01").unwrap();
        let filtered = apply_filters(messages.clone(), &config);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "With date");

        // kept without a date filter
        assert_eq!(apply_filters(messages, &FilterConfig::new().with_sender("alice")).len(), 2);
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("01-01-2024");
        assert!(matches!(result, Err(ChatviewError::InvalidDate { .. })));
    }

    #[test]
    fn test_without_system_and_kinds() {
        let messages = vec![
            Message::system("01/01/2024", "12:00:00", "Alice created this group"),
            make_msg("Alice", "Hello", "01/01/2024"),
            Message::new("01/01/2024", "12:00:00", "Bob", "Voice call", MessageKind::User)
                .with_call("Voice call", ""),
        ];

        let no_system = apply_filters(messages.clone(), &FilterConfig::new().without_system());
        assert_eq!(no_system.len(), 2);

        let calls = apply_filters(messages, &FilterConfig::new().with_kinds([MessageKind::Call]));
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].sender, "Bob");
    }

    #[test]
    fn test_inactive_config_passes_everything() {
        let config = FilterConfig::new();
        assert!(!config.is_active());
        let messages = vec![make_msg("A", "x", "not a date")];
        assert_eq!(apply_filters(messages, &config).len(), 1);
    }
}
